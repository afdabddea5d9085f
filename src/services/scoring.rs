use crate::stores::models::Quiz;

/// Canonical form used for answer comparison: HTML entities decoded,
/// surrounding whitespace trimmed, lowercased.
pub(crate) fn normalize_answer(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_lowercase()
}

/// Position-wise comparison of submitted answers against the stored quiz.
/// A missing position counts as wrong, never as an error, so a short answer
/// list is fine; extra answers beyond the question count are ignored.
pub(crate) fn score(quiz: &Quiz, answers: &[String]) -> (u32, u32) {
    let mut correct = 0;
    for (index, question) in quiz.questions.iter().enumerate() {
        let Some(given) = answers.get(index) else {
            continue;
        };
        if normalize_answer(&question.answer) == normalize_answer(given) {
            correct += 1;
        }
    }
    (correct, quiz.questions.len() as u32)
}
