use crate::foundation::ids::{IdSeq, KeyframeId};
use crate::scene::model::SceneConfig;

/// Named configuration snapshot captured by the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe {
    id: KeyframeId,
    label: String,
    config: SceneConfig,
}

impl Keyframe {
    /// Sequence-unique id.
    pub fn id(&self) -> KeyframeId {
        self.id
    }

    /// Label assigned at capture time. Never renumbered.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Captured configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Short tile caption, e.g. `Y: 15° P: -5°`.
    pub fn summary(&self) -> String {
        format!("Y: {}° P: {}°", self.config.camera.yaw, self.config.camera.pitch)
    }
}

/// Keyframes in capture order, which is also the default playback order.
#[derive(Debug, Default)]
pub struct KeyframeSequence {
    frames: Vec<Keyframe>,
    ids: IdSeq,
}

impl KeyframeSequence {
    /// Empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot `config` and append it as `Frame N`, N being the new 1-based length.
    pub fn append(&mut self, config: &SceneConfig) -> Keyframe {
        let frame = Keyframe {
            id: KeyframeId(self.ids.next()),
            label: format!("Frame {}", self.frames.len() + 1),
            config: config.clone(),
        };
        tracing::debug!(id = %frame.id, label = %frame.label, "keyframe captured");
        self.frames.push(frame.clone());
        frame
    }

    /// Delete keyframe `id`. Absent ids are ignored; returns whether anything was removed.
    pub fn remove(&mut self, id: KeyframeId) -> bool {
        let before = self.frames.len();
        self.frames.retain(|f| f.id != id);
        let removed = self.frames.len() != before;
        if !removed {
            tracing::debug!(%id, "keyframe already gone");
        }
        removed
    }

    /// Stored snapshot of keyframe `id`, for the caller to load.
    pub fn select(&self, id: KeyframeId) -> Option<SceneConfig> {
        self.get(id).map(|f| f.config.clone())
    }

    /// Keyframe with `id`.
    pub fn get(&self, id: KeyframeId) -> Option<&Keyframe> {
        self.frames.iter().find(|f| f.id == id)
    }

    /// Keyframes in capture order.
    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe> {
        self.frames.iter()
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when no keyframe is held.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/keyframes.rs"]
mod tests;
