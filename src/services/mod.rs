pub(crate) mod generation;
pub(crate) mod leaderboard;
pub(crate) mod scoring;
