/// Operator-captured configuration snapshots.
pub mod keyframes;
/// Bounded newest-first generation log.
pub mod recency;
