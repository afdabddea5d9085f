use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub(crate) mod models;
pub(crate) mod quiz;
pub(crate) mod results;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Reads a whole JSON document. A missing file is a valid empty state, not an
/// error; an unreadable document is logged and also treated as empty so a
/// corrupt file never takes the service down.
pub(crate) async fn read_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "Failed to read store file");
            return None;
        }
    };

    match serde_json::from_slice(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(error = %err, path = %path.display(), "Failed to parse store file");
            None
        }
    }
}

/// Rewrites a whole JSON document via a temp file and rename, so readers never
/// observe a half-written document. The parent directory is created on demand.
pub(crate) async fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let serialized = serde_json::to_vec_pretty(value)?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, &serialized).await?;
    tokio::fs::rename(&tmp_path, path).await?;

    Ok(())
}
