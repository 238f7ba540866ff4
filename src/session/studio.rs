use crate::artifact::ArtifactRef;
use crate::foundation::error::{CametraxError, CametraxResult};
use crate::foundation::ids::{EntryId, IdSeq, KeyframeId, TicketId};
use crate::generate::request::GenerationRequest;
use crate::generate::service::GenerationService;
use crate::generate::worker::{self, Completion, InFlight};
use crate::history::keyframes::{Keyframe, KeyframeSequence};
use crate::history::recency::{HISTORY_CAPACITY, HistoryEntry, RecencyLog};
use crate::scene::field::{Field, Scalar, update};
use crate::scene::model::SceneConfig;
use crate::scene::presets::Preset;
use crate::session::comparison::ComparisonSession;
use std::sync::Arc;

const FALLBACK_FAILURE_MESSAGE: &str = "Failed to communicate with backend.";

/// Options for a [`Studio`] session.
#[derive(Clone, Debug)]
pub struct StudioOpts {
    /// Recency log bound. Must be at least 1.
    pub history_capacity: usize,
    /// Configuration the session starts from and [`Studio::reset`] returns to.
    pub startup_preset: Preset,
    /// Clamp numeric edits into their declared range instead of storing them as given.
    pub clamp_edits: bool,
}

impl Default for StudioOpts {
    fn default() -> Self {
        Self {
            history_capacity: HISTORY_CAPACITY,
            startup_preset: Preset::DEFAULT,
            clamp_edits: false,
        }
    }
}

/// Generation status of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationPhase {
    /// No request outstanding.
    Idle,
    /// The request with this ticket is outstanding.
    Requesting(TicketId),
}

/// A submitted request awaiting its result.
#[derive(Clone, Debug)]
pub struct PendingGeneration {
    ticket: TicketId,
    request: GenerationRequest,
}

impl PendingGeneration {
    /// Ticket identifying this submission.
    pub fn ticket(&self) -> TicketId {
        self.ticket
    }

    /// Request to hand to the generation service.
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Configuration captured at submission.
    pub fn submitted_config(&self) -> &SceneConfig {
        &self.request.config
    }
}

/// Result of applying a completed request.
#[derive(Clone, Debug)]
pub enum GenerationOutcome {
    /// The artifact became current and was recorded.
    Recorded(HistoryEntry),
    /// The request failed with this operator-facing message.
    Failed(String),
}

impl GenerationOutcome {
    /// `true` for [`GenerationOutcome::Recorded`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

/// Borrowed view of everything a front end renders.
#[derive(Clone, Copy, Debug)]
pub struct StudioView<'a> {
    /// Live configuration.
    pub config: &'a SceneConfig,
    /// Current artifact, if any.
    pub artifact: Option<&'a ArtifactRef>,
    /// `true` while a request is outstanding.
    pub loading: bool,
    /// Last generation failure message.
    pub error: Option<&'a str>,
    /// Generation log, newest first.
    pub history: &'a RecencyLog,
    /// Keyframes in capture order.
    pub keyframes: &'a KeyframeSequence,
    /// Active comparison.
    pub comparison: Option<&'a ComparisonSession>,
}

/// Owner of all session state.
///
/// Every mutation is a synchronous method on `&mut self`. The only asynchronous boundary is the
/// generation service, which is split into [`Studio::begin_generation`] and
/// [`Studio::complete_generation`] so the session stays usable while a request runs.
#[derive(Debug)]
pub struct Studio {
    config: SceneConfig,
    artifact: Option<ArtifactRef>,
    error: Option<String>,
    phase: GenerationPhase,
    history: RecencyLog,
    keyframes: KeyframeSequence,
    comparison: Option<ComparisonSession>,
    tickets: IdSeq,
    opts: StudioOpts,
}

impl Default for Studio {
    fn default() -> Self {
        Self::build(StudioOpts::default(), RecencyLog::new())
    }
}

impl Studio {
    /// Create a session with custom options.
    ///
    /// # Errors
    /// [`CametraxError::Validation`] when `opts.history_capacity` is zero.
    pub fn new(opts: StudioOpts) -> CametraxResult<Self> {
        let history = RecencyLog::with_capacity(opts.history_capacity)?;
        Ok(Self::build(opts, history))
    }

    fn build(opts: StudioOpts, history: RecencyLog) -> Self {
        Self {
            config: opts.startup_preset.config(),
            artifact: None,
            error: None,
            phase: GenerationPhase::Idle,
            history,
            keyframes: KeyframeSequence::new(),
            comparison: None,
            tickets: IdSeq::default(),
            opts,
        }
    }

    /// Live configuration.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Current artifact.
    pub fn artifact(&self) -> Option<&ArtifactRef> {
        self.artifact.as_ref()
    }

    /// Last generation failure message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Generation status.
    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// `true` while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.phase != GenerationPhase::Idle
    }

    /// Generation log.
    pub fn history(&self) -> &RecencyLog {
        &self.history
    }

    /// Captured keyframes.
    pub fn keyframes(&self) -> &KeyframeSequence {
        &self.keyframes
    }

    /// Active comparison.
    pub fn comparison(&self) -> Option<&ComparisonSession> {
        self.comparison.as_ref()
    }

    /// Session options.
    pub fn opts(&self) -> &StudioOpts {
        &self.opts
    }

    /// Everything a front end renders.
    pub fn view(&self) -> StudioView<'_> {
        StudioView {
            config: &self.config,
            artifact: self.artifact.as_ref(),
            loading: self.is_loading(),
            error: self.error.as_deref(),
            history: &self.history,
            keyframes: &self.keyframes,
            comparison: self.comparison.as_ref(),
        }
    }

    /// Set one field of the live configuration.
    ///
    /// # Errors
    /// Contract violations from [`update`]; the live configuration is left unchanged.
    pub fn edit(&mut self, field: Field, value: impl Into<Scalar>) -> CametraxResult<()> {
        let mut value = value.into();
        if self.opts.clamp_edits {
            value = field.clamp(value);
        }
        match update(&self.config, field, value) {
            Ok(next) => {
                self.config = next;
                Ok(())
            }
            Err(e) => {
                tracing::error!(%field, error = %e, "edit rejected");
                Err(e)
            }
        }
    }

    /// [`Studio::edit`] addressed by a dotted path.
    pub fn edit_path(&mut self, path: &str, value: impl Into<Scalar>) -> CametraxResult<()> {
        let field = path.parse::<Field>().inspect_err(|e| {
            tracing::error!(path, error = %e, "edit rejected");
        })?;
        self.edit(field, value)
    }

    /// Replace the live configuration with a catalog preset.
    ///
    /// # Errors
    /// [`CametraxError::UnknownPreset`]; the live configuration is left unchanged.
    pub fn apply_preset(&mut self, name: &str) -> CametraxResult<()> {
        match name.parse::<Preset>() {
            Ok(preset) => {
                self.apply(preset);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(preset = name, "unknown preset ignored");
                Err(e)
            }
        }
    }

    /// Replace the live configuration with `preset`.
    pub fn apply(&mut self, preset: Preset) {
        tracing::debug!(%preset, "preset applied");
        self.config = preset.config();
    }

    /// Return to the startup preset.
    pub fn reset(&mut self) {
        self.config = self.opts.startup_preset.config();
    }

    /// Replace the live configuration wholesale, e.g. from an imported payload.
    pub fn load_config(&mut self, config: SceneConfig) {
        self.config = config;
    }

    /// Snapshot the live configuration and mark it as submitted.
    ///
    /// A request still outstanding is superseded for the loading state, but its completion is
    /// still accepted.
    #[tracing::instrument(skip(self))]
    pub fn begin_generation(&mut self) -> PendingGeneration {
        let ticket = TicketId(self.tickets.next());
        if let GenerationPhase::Requesting(prev) = self.phase {
            tracing::debug!(%prev, %ticket, "superseding outstanding request");
        }
        self.phase = GenerationPhase::Requesting(ticket);
        self.error = None;
        PendingGeneration {
            ticket,
            request: GenerationRequest::from_config(&self.config),
        }
    }

    /// Apply the service result for `pending`.
    ///
    /// On success the submitted snapshot is recorded, the artifact becomes current, and any
    /// comparison ends. On failure only the error message changes.
    #[tracing::instrument(skip_all, fields(ticket = %pending.ticket))]
    pub fn complete_generation(
        &mut self,
        pending: PendingGeneration,
        result: CametraxResult<Vec<u8>>,
    ) -> GenerationOutcome {
        if self.phase == GenerationPhase::Requesting(pending.ticket) {
            self.phase = GenerationPhase::Idle;
        } else {
            tracing::debug!("completing a superseded request");
        }

        match result.and_then(ArtifactRef::from_payload) {
            Ok(artifact) => {
                let entry = self
                    .history
                    .record(pending.submitted_config(), artifact.clone());
                self.artifact = Some(artifact);
                self.comparison = None;
                GenerationOutcome::Recorded(entry)
            }
            Err(e) => {
                let mut message = e.user_message();
                if message.trim().is_empty() {
                    message = FALLBACK_FAILURE_MESSAGE.to_string();
                }
                tracing::error!(error = %message, "generation failed");
                self.error = Some(message.clone());
                GenerationOutcome::Failed(message)
            }
        }
    }

    /// Apply a completion delivered by a worker.
    pub fn apply_completion(&mut self, done: Completion) -> GenerationOutcome {
        self.complete_generation(done.pending, done.result)
    }

    /// Submit and wait for `service` on the calling thread.
    pub fn generate(&mut self, service: &dyn GenerationService) -> GenerationOutcome {
        let pending = self.begin_generation();
        let result = service.generate(pending.request());
        self.complete_generation(pending, result)
    }

    /// Submit and run `service` on a worker thread.
    ///
    /// # Errors
    /// When the worker cannot be started; the submission is then completed as a failure.
    pub fn spawn_generation(
        &mut self,
        service: Arc<dyn GenerationService>,
    ) -> CametraxResult<InFlight> {
        let pending = self.begin_generation();
        worker::spawn_generation(service, pending.clone()).inspect_err(|e| {
            self.complete_generation(pending, Err(CametraxError::generation_failed(e.to_string())));
        })
    }

    /// Restore a history entry as the live configuration and artifact.
    ///
    /// # Errors
    /// [`CametraxError::NotFound`] when the entry was evicted or cleared.
    pub fn select_history_entry(&mut self, id: EntryId) -> CametraxResult<()> {
        let (config, artifact) = self
            .history
            .select(id)
            .ok_or_else(|| CametraxError::not_found(format!("history entry {id}")))?;
        self.config = config;
        self.artifact = Some(artifact);
        self.comparison = None;
        self.error = None;
        Ok(())
    }

    /// Compare the current artifact against the artifact of history entry `id`.
    ///
    /// The live configuration is not touched.
    ///
    /// # Errors
    /// [`CametraxError::NotFound`] for an unknown entry, [`CametraxError::Validation`] when there
    /// is no current artifact.
    pub fn set_comparison_reference(&mut self, id: EntryId) -> CametraxResult<()> {
        let reference = self
            .history
            .comparison_reference(id)
            .ok_or_else(|| CametraxError::not_found(format!("history entry {id}")))?;
        let current = self.artifact.clone().ok_or_else(|| {
            CametraxError::validation("no current artifact to compare against")
        })?;
        self.start_comparison(reference, current);
        Ok(())
    }

    /// Empty the generation log. Returns how many entries were dropped.
    pub fn clear_history(&mut self) -> usize {
        self.history.clear()
    }

    /// Start a comparison, replacing any active one.
    pub fn start_comparison(&mut self, reference: ArtifactRef, current: ArtifactRef) {
        if self.comparison.is_some() {
            tracing::debug!("replacing active comparison");
        }
        self.comparison = Some(ComparisonSession::new(reference, current));
    }

    /// Move the comparison split. No-op without an active comparison.
    pub fn set_blend_position(&mut self, position: f64) {
        if let Some(session) = self.comparison.as_mut() {
            session.set_blend_position(position);
        }
    }

    /// End the active comparison.
    pub fn exit_comparison(&mut self) {
        self.comparison = None;
    }

    /// Capture the live configuration as a new keyframe.
    pub fn add_keyframe(&mut self) -> Keyframe {
        self.keyframes.append(&self.config)
    }

    /// Load keyframe `id` as the live configuration.
    ///
    /// # Errors
    /// [`CametraxError::NotFound`] when the keyframe was deleted.
    pub fn select_keyframe(&mut self, id: KeyframeId) -> CametraxResult<()> {
        let config = self
            .keyframes
            .select(id)
            .ok_or_else(|| CametraxError::not_found(format!("keyframe {id}")))?;
        self.config = config;
        self.comparison = None;
        Ok(())
    }

    /// Delete keyframe `id`; absent ids are ignored.
    pub fn delete_keyframe(&mut self, id: KeyframeId) -> bool {
        self.keyframes.remove(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/studio.rs"]
mod tests;
