use nalgebra::{Point3, UnitQuaternion};
use serde::{Deserialize, Serialize};

/// Rigid pose of a marker or proxy: position plus orientation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point3<f32>,
    pub orientation: UnitQuaternion<f32>,
}

impl Pose {
    /// Origin with no rotation. Proxies spawn here before the first report.
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            orientation: UnitQuaternion::identity(),
        }
    }

    pub fn new(position: Point3<f32>, orientation: UnitQuaternion<f32>) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Position-only pose with identity orientation.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            orientation: UnitQuaternion::identity(),
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}
