use crate::artifact::ArtifactRef;
use crate::foundation::error::{CametraxError, CametraxResult};
use crate::foundation::ids::{EntryId, IdSeq};
use crate::scene::model::SceneConfig;
use std::collections::VecDeque;
use std::time::SystemTime;

/// Number of generations a session keeps by default.
pub const HISTORY_CAPACITY: usize = 8;

/// One successful generation: the submitted configuration and its result.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    id: EntryId,
    created_at: SystemTime,
    config: SceneConfig,
    artifact: ArtifactRef,
}

impl HistoryEntry {
    /// Log-unique id.
    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Wall-clock time of recording.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Configuration snapshot as submitted.
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Generated image.
    pub fn artifact(&self) -> &ArtifactRef {
        &self.artifact
    }
}

/// Fixed-capacity record of generations, newest first.
///
/// Eviction is strict FIFO by insertion: reading or selecting an entry never refreshes it.
#[derive(Debug)]
pub struct RecencyLog {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
    ids: IdSeq,
}

impl Default for RecencyLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RecencyLog {
    /// Empty log holding up to [`HISTORY_CAPACITY`] entries.
    pub fn new() -> Self {
        Self::build(HISTORY_CAPACITY)
    }

    /// Empty log with a custom bound.
    ///
    /// # Errors
    /// [`CametraxError::Validation`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> CametraxResult<Self> {
        if capacity == 0 {
            return Err(CametraxError::validation("history capacity must be at least 1"));
        }
        Ok(Self::build(capacity))
    }

    fn build(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            ids: IdSeq::default(),
        }
    }

    /// Snapshot `config`, pair it with `artifact`, and prepend the entry.
    ///
    /// The oldest entries are evicted until the bound holds again.
    pub fn record(&mut self, config: &SceneConfig, artifact: ArtifactRef) -> HistoryEntry {
        let entry = HistoryEntry {
            id: EntryId(self.ids.next()),
            created_at: SystemTime::now(),
            config: config.clone(),
            artifact,
        };
        self.entries.push_front(entry.clone());
        while self.entries.len() > self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                tracing::debug!(id = %evicted.id, "history entry evicted");
            }
        }
        tracing::debug!(id = %entry.id, len = self.entries.len(), "history entry recorded");
        entry
    }

    /// Entry with `id`, if still present.
    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Snapshot and artifact of entry `id`, for the caller to restore.
    pub fn select(&self, id: EntryId) -> Option<(SceneConfig, ArtifactRef)> {
        self.get(id).map(|e| (e.config.clone(), e.artifact.clone()))
    }

    /// Artifact of entry `id`, to be used as a comparison reference.
    pub fn comparison_reference(&self, id: EntryId) -> Option<ArtifactRef> {
        self.get(id).map(|e| e.artifact.clone())
    }

    /// Most recently recorded entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    /// Drop every entry, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.entries.len();
        self.entries.clear();
        n
    }

    /// Entries, newest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }

    /// Current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no entry is held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/recency.rs"]
mod tests;
