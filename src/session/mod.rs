/// Transient two-artifact visual diff.
pub mod comparison;
/// Consumed operator events.
pub mod event;
/// Session state owner and generation orchestration.
pub mod studio;
