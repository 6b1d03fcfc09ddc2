use serde::{Deserialize, Serialize};

use crate::Pose;

/// Host-reported confidence classification for a marker's current detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum TrackingState {
    /// Fully tracked; the reported pose is trustworthy.
    Tracked,
    /// Detected but low-confidence; the pose may lag or drift.
    Limited,
    /// Not currently detected.
    None,
}

impl TrackingState {
    pub fn is_tracked(self) -> bool {
        matches!(self, TrackingState::Tracked)
    }
}

/// One marker observation delivered by the tracking runtime.
///
/// Reports are transient: the binder consumes them synchronously inside the
/// callback and never retains them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingReport {
    /// Marker identity, matching a configured template name.
    pub id: String,
    pub state: TrackingState,
    pub pose: Pose,
}

impl TrackingReport {
    pub fn new(id: impl Into<String>, state: TrackingState, pose: Pose) -> Self {
        Self {
            id: id.into(),
            state,
            pose,
        }
    }
}

/// One batched change notification from the tracking runtime.
///
/// Removed entries carry the last-known report for the removed marker, not a
/// bare identity; `None` stands for a prior report the host no longer has.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingChanges {
    pub added: Vec<TrackingReport>,
    pub updated: Vec<TrackingReport>,
    pub removed: Vec<(String, Option<TrackingReport>)>,
}

impl TrackingChanges {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }
}

/// Receiver of batched change notifications.
///
/// The host invokes this synchronously on its own schedule (typically once per
/// detection cycle) and guarantees that invocations never overlap.
pub trait TrackingListener {
    fn on_changes(&mut self, changes: &TrackingChanges);
}
