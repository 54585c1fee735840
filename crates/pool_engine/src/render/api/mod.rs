//! Public rendering API
//!
//! The traits the render composer is written against, plus the handle and
//! statistics types that cross the boundary.

pub mod render_backend;
pub mod frame_data;

pub use render_backend::{RenderBackend, GeometryProvider, BackendResult, MeshHandle, MeshBuffer, ShaderPass};
pub use frame_data::FrameStats;
