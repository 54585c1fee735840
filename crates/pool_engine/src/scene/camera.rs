//! # Scene Camera
//!
//! A camera is an eye, an up vector and a target. The target is either a
//! fixed point or a reference to a scene object; the latter is resolved
//! against the scene every time the view matrix is built, so a follow
//! camera always looks at the object's live position rather than at a copy
//! taken when the camera was configured.

use crate::foundation::math::Vec3;
use crate::scene::ObjectKey;

/// Camera behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMode {
    /// Fixed overhead view
    TopDown,
    /// Tracks a moving object
    Follow,
}

/// What the camera looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraTarget {
    /// A fixed world-space point
    Point(Vec3),
    /// The current position of a scene object
    Object(ObjectKey),
}

/// Scene camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera behaviour
    pub mode: CameraMode,

    /// Camera position in world space
    pub eye: Vec3,

    /// Look-at target
    pub target: CameraTarget,

    /// Up vector for camera orientation
    pub up: Vec3,
}

impl Camera {
    /// Overhead camera looking at a fixed point
    pub fn top_down(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            mode: CameraMode::TopDown,
            eye,
            target: CameraTarget::Point(target),
            up,
        }
    }

    /// Camera tracking a scene object
    pub fn follow(eye: Vec3, object: ObjectKey, up: Vec3) -> Self {
        Self {
            mode: CameraMode::Follow,
            eye,
            target: CameraTarget::Object(object),
            up,
        }
    }
}
