use std::cmp::Reverse;

use crate::stores::models::ResultRecord;

/// Ranks result records for the latest quiz: the quiz id of the last record
/// in append order picks the quiz (inherited quirk, see DESIGN.md), then
/// records sort by score descending with earlier submission winning ties.
/// Missing score/timestamp default to 0 and "" so sorting never fails.
pub(crate) fn rank(records: Vec<ResultRecord>) -> Vec<ResultRecord> {
    let Some(latest_quiz_id) = records.last().map(|record| record.quiz_id.clone()) else {
        return Vec::new();
    };

    let mut ranked: Vec<ResultRecord> =
        records.into_iter().filter(|record| record.quiz_id == latest_quiz_id).collect();

    ranked.sort_by_key(|record| {
        (Reverse(record.score.unwrap_or(0)), record.timestamp.clone().unwrap_or_default())
    });

    ranked
}
