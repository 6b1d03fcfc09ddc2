//! Marker-to-proxy binding for AR image-tracking sessions.
//!
//! The binder owns a registry of pre-instantiated, initially hidden scene
//! proxies (one per configured template, keyed by template name) and keeps
//! each proxy's visibility and pose in sync with the latest report from the
//! tracking runtime:
//! - `Tracked` report: show the proxy and copy the reported pose onto it,
//! - `Limited` or `None` report: hide the proxy, leave its pose alone.
//!
//! Detection, pose estimation, and rendering all live behind the
//! `TrackingSource` and `SceneRuntime` traits from `marker-binder-core`;
//! nothing here recognizes images or draws.

mod binder;
mod config;
mod policy;

pub use binder::{BinderError, MarkerBinder};
pub use config::{BinderConfig, ConfigError};
pub use policy::{sync_action, SyncAction};

pub use marker_binder_core::{
    Pose, ProxyTemplate, SceneRuntime, SubscribeError, Subscription, TrackingChanges,
    TrackingListener, TrackingReport, TrackingSource, TrackingState,
};
