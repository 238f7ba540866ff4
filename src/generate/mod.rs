/// Request derivation from a configuration.
pub mod request;
/// Service contract and the offline procedural service.
pub mod service;
/// Running a service off the caller's thread.
pub mod worker;
