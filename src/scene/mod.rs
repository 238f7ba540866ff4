/// Generic dotted-path update engine.
pub mod field;
/// The configuration value type and its namespaces.
pub mod model;
/// Static catalog of named configurations.
pub mod presets;
