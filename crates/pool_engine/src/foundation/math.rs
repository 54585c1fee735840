//! Math utilities and types
//!
//! Provides the vector and matrix types used by the scene and renderer.
//! Matrices are `nalgebra` column-major, so flat index `k` of a matrix is
//! `m.as_slice()[k]`, the same layout the shaders receive.

use thiserror::Error;

pub use nalgebra::{Matrix4, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Homogeneous 4x4 affine/projective transform
pub type Transform4 = Mat4;

/// RGB colour triple in the 0.0-1.0 range
pub type Color3 = Vec3;

/// Errors raised by transform construction
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    /// Projection aspect ratio must be strictly positive
    #[error("Invalid aspect ratio: {0} (must be > 0)")]
    InvalidAspect(f32),

    /// Vertical field of view must lie in (0, pi)
    #[error("Invalid vertical field of view: {0} rad (must be in (0, pi))")]
    InvalidFieldOfView(f32),

    /// Clip planes must satisfy 0 < near < far
    #[error("Invalid clip range: near={near}, far={far}")]
    InvalidClipRange {
        /// Near plane distance
        near: f32,
        /// Far plane distance
        far: f32,
    },
}

/// Result type for math operations
pub type MathResult<T> = Result<T, MathError>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;
}
