use serde::{Deserialize, Serialize};

use crate::Pose;

/// A spawnable visual prototype. `name` doubles as the marker identity the
/// proxy is bound to, so names must be unique across a configuration.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ProxyTemplate {
    pub name: String,
    /// Optional asset reference (model path, prefab id) resolved by the scene
    /// runtime; the binder never interprets it.
    #[serde(default)]
    pub asset: Option<String>,
}

impl ProxyTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset: None,
        }
    }

    pub fn with_asset(name: impl Into<String>, asset: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            asset: Some(asset.into()),
        }
    }
}

/// Rendering/scene-graph runtime the binder drives.
///
/// Implementations own the actual scene objects; the binder only keeps the
/// handles and issues activation and transform calls against them.
pub trait SceneRuntime {
    /// Handle to an instantiated scene object.
    type Handle;

    /// Instantiate `template` in the scene and return its handle. The binder
    /// hides the object immediately after instantiation.
    fn instantiate(&mut self, template: &ProxyTemplate) -> Self::Handle;

    fn set_active(&mut self, handle: &Self::Handle, active: bool);

    fn set_transform(&mut self, handle: &Self::Handle, pose: &Pose);
}
