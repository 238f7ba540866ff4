use crate::foundation::error::CametraxResult;
use crate::foundation::ids::{EntryId, KeyframeId};
use crate::scene::field::{Field, Scalar};
use crate::session::studio::{PendingGeneration, Studio};
use serde::{Deserialize, Serialize};

/// Operator intent consumed by a [`Studio`].
///
/// Events serialize as JSON objects tagged by `"event"`, e.g.
/// `{"event": "edit", "path": "camera.yaw", "value": 45}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StudioEvent {
    /// Set one field.
    Edit {
        /// Addressed field.
        path: Field,
        /// New value.
        value: Scalar,
    },
    /// Replace the configuration with a catalog preset.
    ApplyPreset {
        /// Catalog identifier.
        preset: String,
    },
    /// Return to the startup preset.
    Reset,
    /// Submit the live configuration for generation.
    Generate,
    /// Restore a history entry.
    SelectHistoryEntry {
        /// Entry to restore.
        id: EntryId,
    },
    /// Compare the current artifact against a history entry.
    SetComparisonReference {
        /// Reference entry.
        id: EntryId,
    },
    /// Empty the generation log.
    ClearHistory,
    /// Capture the live configuration as a keyframe.
    AddKeyframe,
    /// Load a keyframe.
    SelectKeyframe {
        /// Keyframe to load.
        id: KeyframeId,
    },
    /// Delete a keyframe.
    DeleteKeyframe {
        /// Keyframe to delete.
        id: KeyframeId,
    },
    /// Move the comparison split.
    SetBlendPosition {
        /// Percentage in `[0, 100]`.
        position: f64,
    },
    /// End the active comparison.
    ExitComparison,
}

/// What [`Studio::handle`] did with an event.
#[derive(Debug)]
pub enum Dispatched {
    /// State was updated synchronously.
    Applied,
    /// A generation request was submitted; the caller drives it to completion.
    Submitted(PendingGeneration),
}

impl Studio {
    /// Apply one consumed event.
    ///
    /// # Errors
    /// Whatever the corresponding operation reports; state is unchanged on error.
    pub fn handle(&mut self, event: StudioEvent) -> CametraxResult<Dispatched> {
        tracing::debug!(?event, "handling event");
        match event {
            StudioEvent::Edit { path, value } => self.edit(path, value)?,
            StudioEvent::ApplyPreset { preset } => self.apply_preset(&preset)?,
            StudioEvent::Reset => self.reset(),
            StudioEvent::Generate => return Ok(Dispatched::Submitted(self.begin_generation())),
            StudioEvent::SelectHistoryEntry { id } => self.select_history_entry(id)?,
            StudioEvent::SetComparisonReference { id } => self.set_comparison_reference(id)?,
            StudioEvent::ClearHistory => {
                self.clear_history();
            }
            StudioEvent::AddKeyframe => {
                self.add_keyframe();
            }
            StudioEvent::SelectKeyframe { id } => self.select_keyframe(id)?,
            StudioEvent::DeleteKeyframe { id } => {
                self.delete_keyframe(id);
            }
            StudioEvent::SetBlendPosition { position } => self.set_blend_position(position),
            StudioEvent::ExitComparison => self.exit_comparison(),
        }
        Ok(Dispatched::Applied)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/event.rs"]
mod tests;
