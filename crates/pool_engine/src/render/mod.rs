//! # Rendering System
//!
//! Backend-agnostic render composition for the pool scene. The composer in
//! [`crate::scene::SceneRenderer`] talks to a [`RenderBackend`] through a
//! small immediate-mode interface (bind program, set uniforms, draw) and
//! looks geometry up through a [`GeometryProvider`].
//!
//! ## Architecture
//!
//! - **api**: backend and geometry-provider traits, handles, frame statistics
//! - **primitives**: vertex/mesh data and tessellation of the demo shapes
//! - **material**: per-pass material parameters and their uniform upload
//! - **uniforms**: uniform names shared with the shader side
//! - **mesh_library**: the geometry provider used by the driver
//! - **backends**: concrete backends (headless recording backend)
//!
//! ## Shading Passes
//!
//! Two programs are linked at setup. The lit pass shades table, cue, balls
//! and pockets with a single directional light and exponential fog; the
//! emissive pass draws the ambient lights as flat colour scaled by their
//! intensity.

pub mod api;
pub mod primitives;
pub mod material;
pub mod uniforms;
pub mod mesh_library;
pub mod backends;

pub use api::{
    RenderBackend, GeometryProvider, BackendResult, MeshHandle, MeshBuffer, ShaderPass, FrameStats,
};
pub use primitives::{Mesh, Vertex};
pub use material::{LitMaterial, EmissiveMaterial};
pub use mesh_library::MeshLibrary;
pub use backends::recording::{RecordingBackend, BackendCommand, RecordedDraw, UniformValue};

use thiserror::Error;

/// Errors raised by the rendering layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A rendering operation failed during execution
    ///
    /// Raised for calls issued in an invalid backend state, such as setting
    /// a uniform with no program bound. Never fatal for the frame loop.
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),

    /// Resource creation or management failed
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// Backend-specific error occurred
    #[error("Backend error: {0}")]
    BackendError(String),

    /// A shading program failed to link
    ///
    /// Surfaced as a warning at setup; the pass keeps running with whatever
    /// program state the backend has bound.
    #[error("Shader program for {pass} pass failed to link: {log}")]
    ShaderLinkFailed {
        /// Pass whose program failed
        pass: ShaderPass,
        /// Linker diagnostics reported by the backend
        log: String,
    },
}
