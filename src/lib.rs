//! Cametrax is a configuration state engine for driving an external image-generation service.
//!
//! The public API is session-oriented:
//!
//! - Edit a [`SceneConfig`] through [`Field`]-addressed updates or replace it with a [`Preset`]
//! - Own all live state in a [`Studio`] (history, keyframes, comparison, generation status)
//! - Submit a [`GenerationRequest`] to any [`GenerationService`] and feed the result back
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Generated image handles.
pub mod artifact;
/// Generation request building, services, and worker threads.
pub mod generate;
/// Recency log and keyframe sequence.
pub mod history;
/// Scene configuration model, path updates, and the preset catalog.
pub mod scene;
/// Session state owner, comparison, and consumed events.
pub mod session;

pub use crate::foundation::error::{CametraxError, CametraxResult};
pub use crate::foundation::ids::{ArtifactId, EntryId, KeyframeId, TicketId};

pub use crate::artifact::ArtifactRef;
pub use crate::generate::request::{GenerationRequest, OUTPUT_MIME_TYPE};
pub use crate::generate::service::{GenerationService, ProceduralService};
pub use crate::generate::worker::{Completion, InFlight, spawn_generation};
pub use crate::history::keyframes::{Keyframe, KeyframeSequence};
pub use crate::history::recency::{HISTORY_CAPACITY, HistoryEntry, RecencyLog};
pub use crate::scene::field::{
    Field, FieldRange, Namespace, Scalar, ScalarKind, update, update_path,
};
pub use crate::scene::model::{
    AspectRatio, CameraConfig, CompositionConfig, LightingConfig, LightingPreset, RenderConfig,
    SceneConfig,
};
pub use crate::scene::presets::{Preset, apply_preset};
pub use crate::session::comparison::{ComparisonSession, DEFAULT_BLEND_POSITION};
pub use crate::session::event::{Dispatched, StudioEvent};
pub use crate::session::studio::{
    GenerationOutcome, GenerationPhase, PendingGeneration, Studio, StudioOpts, StudioView,
};
