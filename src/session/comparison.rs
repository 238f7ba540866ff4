use crate::artifact::ArtifactRef;

/// Blend position a new comparison starts at.
pub const DEFAULT_BLEND_POSITION: f64 = 50.0;

/// Pairing of a reference and a current artifact with a split position.
///
/// The blend position is presentational only: the percentage of the frame showing the current
/// artifact, the remainder showing the reference.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    reference: ArtifactRef,
    current: ArtifactRef,
    blend: f64,
}

impl ComparisonSession {
    /// Start comparing `current` against `reference` at the default split.
    pub fn new(reference: ArtifactRef, current: ArtifactRef) -> Self {
        Self {
            reference,
            current,
            blend: DEFAULT_BLEND_POSITION,
        }
    }

    /// Reference (previous) artifact.
    pub fn reference(&self) -> &ArtifactRef {
        &self.reference
    }

    /// Current artifact.
    pub fn current(&self) -> &ArtifactRef {
        &self.current
    }

    /// Split position in `[0, 100]`.
    pub fn blend_position(&self) -> f64 {
        self.blend
    }

    /// Move the split, clamped to `[0, 100]`. NaN is ignored.
    pub fn set_blend_position(&mut self, position: f64) {
        if position.is_nan() {
            return;
        }
        self.blend = position.clamp(0.0, 100.0);
    }

    /// Fraction of the frame showing the current artifact.
    pub fn current_visible_fraction(&self) -> f64 {
        self.blend / 100.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/comparison.rs"]
mod tests;
