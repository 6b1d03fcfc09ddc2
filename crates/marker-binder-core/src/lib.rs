//! Core types and trait seams for marker-to-proxy binding.
//!
//! This crate is intentionally small. It does *not* depend on any concrete
//! tracking or rendering runtime; both are reached through the traits defined
//! here (`TrackingSource`, `SceneRuntime`), so a binder built on top can be
//! exercised with fakes.

mod logger;
mod pose;
mod scene;
mod source;
mod tracking;

pub use pose::Pose;
pub use scene::{ProxyTemplate, SceneRuntime};
pub use source::{SubscribeError, Subscription, TrackingSource};
pub use tracking::{TrackingChanges, TrackingListener, TrackingReport, TrackingState};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
