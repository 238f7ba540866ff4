/// Crate-wide result alias.
pub type CametraxResult<T> = Result<T, CametraxError>;

/// Errors produced by the configuration engine and the generation pipeline.
#[derive(thiserror::Error, Debug)]
pub enum CametraxError {
    /// A dotted path that does not address exactly one field.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A value whose type does not match the addressed field.
    #[error("type mismatch at '{path}': expected {expected}, got {got}")]
    TypeMismatch {
        /// Dotted path of the addressed field.
        path: &'static str,
        /// Human-readable description of the accepted value type.
        expected: &'static str,
        /// Rendering of the rejected value.
        got: String,
    },

    /// Requested preset name is not in the catalog.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// The generation service failed; the reason is shown to the operator verbatim.
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    /// A history entry or keyframe id that is not (or no longer) present.
    #[error("not found: {0}")]
    NotFound(String),

    /// Structurally valid input that violates a declared constraint.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON encoding or decoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually I/O.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CametraxError {
    /// Build an [`CametraxError::InvalidPath`].
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// Build an [`CametraxError::UnknownPreset`].
    pub fn unknown_preset(name: impl Into<String>) -> Self {
        Self::UnknownPreset(name.into())
    }

    /// Build a [`CametraxError::GenerationFailed`].
    pub fn generation_failed(reason: impl Into<String>) -> Self {
        Self::GenerationFailed(reason.into())
    }

    /// Build a [`CametraxError::NotFound`].
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Build a [`CametraxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CametraxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for caller contract breaches of the path update engine.
    ///
    /// The addressable field set is closed, so these indicate a defect at the call site rather
    /// than an operator mistake.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidPath(_) | Self::TypeMismatch { .. })
    }

    /// Message suitable for showing to the operator.
    ///
    /// Generation failures surface their reason without the variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::GenerationFailed(reason) => reason.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
