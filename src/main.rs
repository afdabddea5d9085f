#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = quizdeck_rust::run().await {
        eprintln!("quizdeck-rust fatal: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}
