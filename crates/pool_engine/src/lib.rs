//! # Pool Engine
//!
//! Scripted animation of a pool-table scene rendered through a two-pass
//! (lit + emissive) shading pipeline against an abstract graphics backend.
//!
//! ## Features
//!
//! - **Transform Library**: 4x4 homogeneous transforms, perspective and look-at
//! - **Scene Model**: table, cue, balls, pockets and ambient lights plus a
//!   camera that can track an object live
//! - **Animation**: a deterministic, time-driven three-scene state machine
//! - **Render Composer**: per-frame matrices, lighting uniforms and draws
//! - **Headless Backend**: a recording backend for drivers and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pool_engine::prelude::*;
//!
//! let config = PoolSceneConfig::default();
//! let mut backend = RecordingBackend::new(config.renderer.viewport);
//! let meshes = MeshLibrary::build(&mut backend, &config.meshes);
//! let mut renderer = SceneRenderer::new(&mut backend, meshes, &config);
//!
//! renderer.switch_to_scene(1)?;
//! let stats = renderer.tick(&mut backend, 1.0 / 60.0);
//! println!("{} draws", stats.total_draws());
//! # Ok::<(), pool_engine::animation::AnimationError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod scene;
pub mod animation;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        animation::{AnimationError, AnimationState, SceneAnimator, SceneCommand, SceneId},
        core::config::{PoolSceneConfig, Config, ConfigError},
        foundation::{
            math::{Vec3, Mat4, Transform4},
            time::Timer,
        },
        render::{
            RenderBackend, GeometryProvider, MeshLibrary, RecordingBackend, ShaderPass, FrameStats,
        },
        scene::{PoolScene, SceneRenderer, Camera, CameraMode},
    };
}
