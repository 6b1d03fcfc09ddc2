//! Per-report sync policy: tracking state to proxy outcome.

use marker_binder_core::{Pose, TrackingReport, TrackingState};

/// Outcome of classifying one tracking report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SyncAction {
    /// Hide the proxy; its pose stays whatever it last was.
    Hide,
    /// Show the proxy and move it to the reported pose.
    Show(Pose),
}

/// Map a report to the action applied to its proxy.
///
/// Stateless and memoryless: the outcome depends only on this report, never
/// on earlier ones. `Limited` is treated the same as `None` — a low-confidence
/// pose is not worth showing a misplaced proxy for.
pub fn sync_action(report: &TrackingReport) -> SyncAction {
    match report.state {
        TrackingState::Tracked => SyncAction::Show(report.pose),
        TrackingState::Limited | TrackingState::None => SyncAction::Hide,
    }
}
