//! Optimistic milestone-status overlay
//!
//! While a mutation is in flight the client shows the expected outcome
//! immediately. The overlay is an explicit pending-patch map merged over the
//! authoritative document for rendering only. It is never persisted, and a
//! successful refetch discards it wholesale. Keeping it separate from the
//! document is what prevents the local guess from drifting into durable
//! state.

use std::collections::HashMap;

use pact_types::MilestoneStatus;

use crate::types::deal::Milestone;

/// Pending local status patches keyed by milestone id
#[derive(Debug, Clone, Default)]
pub struct MilestoneOverlay {
    pending: HashMap<String, MilestoneStatus>,
}

impl MilestoneOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the status the in-flight mutation is expected to produce
    pub fn set(&mut self, milestone_id: impl Into<String>, status: MilestoneStatus) {
        self.pending.insert(milestone_id.into(), status);
    }

    /// The pending status for a milestone, if any
    pub fn get(&self, milestone_id: &str) -> Option<MilestoneStatus> {
        self.pending.get(milestone_id).copied()
    }

    /// Drop a single entry (e.g. when its mutation fails)
    pub fn remove(&mut self, milestone_id: &str) {
        self.pending.remove(milestone_id);
    }

    /// Discard all pending patches, called after every successful refetch
    /// when the server document becomes the sole source of truth again
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Merge the overlay over the authoritative milestones for rendering.
    ///
    /// The input document is not modified; the patched copies exist only in
    /// the returned view.
    pub fn apply(&self, milestones: &[Milestone]) -> Vec<Milestone> {
        milestones
            .iter()
            .map(|m| match self.pending.get(&m.id) {
                Some(&status) => {
                    let mut patched = m.clone();
                    patched.status = status;
                    patched
                }
                None => m.clone(),
            })
            .collect()
    }
}
