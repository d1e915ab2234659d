//! Pose types for drone trajectory logs.

use serde::{Deserialize, Serialize};

/// Pose sample as published on the pose topics.
///
/// Position in meters, yaw (`rot_z`) in the unit used by the publisher.
/// Yaw is not normalized: differences are taken literally so that the
/// error statistics match what the publisher reported.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose3D {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Z position (altitude)
    pub z: f64,
    /// Rotation about the Z axis (yaw)
    #[serde(rename = "rotZ", alias = "rot_z")]
    pub rot_z: f64,
}

impl Pose3D {
    /// Create a new pose.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64, rot_z: f64) -> Self {
        Self { x, y, z, rot_z }
    }

    /// Pose at the origin with zero yaw.
    #[inline]
    pub fn origin() -> Self {
        Self::default()
    }

    /// Signed planar offset `self - other` as `(dx, dy)`.
    #[inline]
    pub fn planar_offset(&self, other: &Pose3D) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }

    /// Euclidean distance between the XY projections of two poses.
    #[inline]
    pub fn planar_distance(&self, other: &Pose3D) -> f64 {
        let (dx, dy) = self.planar_offset(other);
        (dx * dx + dy * dy).sqrt()
    }

    /// Read one component of the pose.
    #[inline]
    pub fn component(&self, axis: PoseAxis) -> f64 {
        match axis {
            PoseAxis::X => self.x,
            PoseAxis::Y => self.y,
            PoseAxis::Z => self.z,
            PoseAxis::RotZ => self.rot_z,
        }
    }
}

/// One plottable component of a [`Pose3D`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoseAxis {
    X,
    Y,
    Z,
    RotZ,
}

impl PoseAxis {
    /// All axes in chart order (top to bottom).
    pub const ALL: [PoseAxis; 4] = [PoseAxis::X, PoseAxis::Y, PoseAxis::Z, PoseAxis::RotZ];

    /// Short label used as panel title.
    pub fn label(&self) -> &'static str {
        match self {
            PoseAxis::X => "X",
            PoseAxis::Y => "Y",
            PoseAxis::Z => "Z",
            PoseAxis::RotZ => "rotZ",
        }
    }
}
