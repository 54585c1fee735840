//! Backend abstraction traits for the rendering system
//!
//! This module defines the traits that rendering backends and geometry
//! providers implement so the render composer never touches a concrete
//! graphics API.

use std::fmt;

use crate::foundation::math::{Mat4, Vec3};
use crate::render::{Mesh, RenderError};
use crate::scene::GeometryKind;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Handle to a mesh resource stored in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Uploaded geometry: opaque handle plus the number of indices to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshBuffer {
    /// Backend handle of the vertex/index buffers
    pub handle: MeshHandle,
    /// Index count passed to the indexed draw
    pub index_count: u32,
}

/// Shading program selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderPass {
    /// Phong lighting with fog
    Lit,
    /// Flat colour scaled by an intensity
    Emissive,
}

impl ShaderPass {
    /// Both passes in draw order
    pub const ALL: [Self; 2] = [Self::Lit, Self::Emissive];
}

impl fmt::Display for ShaderPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lit => write!(f, "lit"),
            Self::Emissive => write!(f, "emissive"),
        }
    }
}

/// Immediate-mode rendering backend
///
/// Uniform setters apply to the currently bound program, as with a GL
/// context. Only the result of [`RenderBackend::link_program`] matters for
/// setup; every other error is reported per call and never aborts a frame.
pub trait RenderBackend {
    /// Current drawable extent (width, height) in pixels
    fn get_viewport_extent(&self) -> (u32, u32);

    /// Compile and link the program of a pass
    fn link_program(&mut self, pass: ShaderPass) -> BackendResult<()>;

    /// Upload a mesh and return its buffer descriptor
    fn create_mesh_resource(&mut self, mesh: &Mesh) -> BackendResult<MeshBuffer>;

    /// Clear colour and depth for a new frame
    fn clear(&mut self, color: [f32; 4]) -> BackendResult<()>;

    /// Bind the program of a pass
    fn use_program(&mut self, pass: ShaderPass) -> BackendResult<()>;

    /// Set a 4x4 matrix uniform on the bound program
    fn set_uniform_matrix(&mut self, name: &str, value: &Mat4) -> BackendResult<()>;

    /// Set a vec3 uniform on the bound program
    fn set_uniform_vec3(&mut self, name: &str, value: &Vec3) -> BackendResult<()>;

    /// Set a float uniform on the bound program
    fn set_uniform_float(&mut self, name: &str, value: f32) -> BackendResult<()>;

    /// Issue one indexed triangle draw
    fn draw_indexed(&mut self, buffer: &MeshBuffer) -> BackendResult<()>;
}

/// Source of uploaded geometry per [`GeometryKind`]
///
/// `None` means the kind has no geometry; the composer skips such draws.
pub trait GeometryProvider {
    /// Buffer for `kind`, if one exists
    fn get_buffer(&self, kind: GeometryKind) -> Option<MeshBuffer>;
}
