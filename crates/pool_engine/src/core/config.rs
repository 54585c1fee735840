//! # Unified Configuration System
//!
//! All tunables of the pool scene in one serializable tree. Every section
//! defaults to the reference values of the scene, so an empty config file
//! (or none at all) reproduces the stock animation.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: logging and frame pacing
//! - **Renderer Config**: projection parameters, clear colour, delta clamp
//! - **Lighting Config**: the fixed directional light, fog and shininess
//! - **Camera Config**: top-down and follow camera presets
//! - **Mesh Config**: tessellation density of the demo geometry

use serde::{Serialize, Deserialize};

use crate::foundation::math::{constants, Color3, Vec3};
use crate::render::primitives::{sphere_vertex_count, MAX_SPHERE_VERTICES};

pub use crate::config::{Config, ConfigError};

/// # Engine Configuration
///
/// Core behaviour shared by the library and the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Target FPS for frame pacing in the driver (unlimited when absent)
    pub target_fps: Option<u32>,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: Some(60),
        }
    }

    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Renderer Configuration
///
/// Projection and per-frame parameters of the render composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Background clear color [R, G, B, A] (0.0-1.0 range)
    pub clear_color: [f32; 4],
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
    /// Upper bound for a single tick's delta time in seconds
    pub max_frame_delta: f32,
    /// Viewport extent (width, height) reported by the headless backend
    pub viewport: (u32, u32),
}

impl RendererConfig {
    /// Validate the projection and delta parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_y > 0.0 && self.fov_y < constants::PI) {
            return Err(ConfigError::Invalid(format!(
                "fov_y must be in (0, pi), got {}", self.fov_y
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}", self.near, self.far
            )));
        }
        if !(self.max_frame_delta > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_frame_delta must be positive, got {}", self.max_frame_delta
            )));
        }
        Ok(())
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.1, 0.1, 0.2, 1.0],
            fov_y: constants::QUARTER_PI,
            near: 0.1,
            far: 100.0,
            max_frame_delta: 0.25,
            viewport: (800, 600),
        }
    }
}

/// # Lighting Configuration
///
/// The single directional light of the lit pass, distance fog, and the
/// shininess shared by every lit material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Light position uploaded as `uLightPosition`
    pub light_position: Vec3,
    /// Light colour uploaded as `uLightColor`
    pub light_color: Color3,
    /// Fog colour uploaded as `uFogColor`
    pub fog_color: Color3,
    /// Exponential fog density uploaded as `uFogDensity`
    pub fog_density: f32,
    /// Specular exponent for every lit object
    pub shininess: f32,
}

impl LightingConfig {
    /// Validate lighting values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fog_density < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fog_density must not be negative, got {}", self.fog_density
            )));
        }
        Ok(())
    }
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            light_position: Vec3::new(0.0, 5.0, 5.0),
            light_color: Vec3::new(1.0, 1.0, 1.0),
            fog_color: Vec3::new(0.1, 0.1, 0.2),
            fog_density: 0.02,
            shininess: 32.0,
        }
    }
}

/// # Camera Configuration
///
/// Presets applied on every scene switch. The follow camera's target is not
/// configurable: it always tracks the white ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye of the overhead camera used by scenes 1 and 3
    pub top_down_eye: Vec3,
    /// Target of the overhead camera
    pub top_down_target: Vec3,
    /// Eye of the follow camera used by scene 2
    pub follow_eye: Vec3,
    /// Up vector shared by both presets
    pub up: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            top_down_eye: Vec3::new(0.0, 8.0, 0.0),
            top_down_target: Vec3::zeros(),
            follow_eye: Vec3::new(2.0, 3.0, 2.0),
            up: Vec3::new(0.0, 0.0, 1.0),
        }
    }
}

/// # Mesh Configuration
///
/// Tessellation density of the built-in geometry library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Latitude bands of the sphere mesh
    pub sphere_lat_bands: u32,
    /// Longitude bands of the sphere mesh
    pub sphere_long_bands: u32,
}

impl MeshConfig {
    /// Validate tessellation parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sphere_lat_bands < 2 || self.sphere_long_bands < 3 {
            return Err(ConfigError::Invalid(format!(
                "sphere needs at least 2x3 bands, got {}x{}",
                self.sphere_lat_bands, self.sphere_long_bands
            )));
        }
        if sphere_vertex_count(self.sphere_lat_bands, self.sphere_long_bands).is_none() {
            return Err(ConfigError::Invalid(format!(
                "sphere of {}x{} bands exceeds {} vertices",
                self.sphere_lat_bands, self.sphere_long_bands, MAX_SPHERE_VERTICES
            )));
        }
        Ok(())
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            sphere_lat_bands: 16,
            sphere_long_bands: 16,
        }
    }
}

/// # Complete Scene Configuration
///
/// Top-level configuration that encompasses all subsystems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSceneConfig {
    /// Engine core configuration
    pub engine: EngineConfig,
    /// Render composer configuration
    pub renderer: RendererConfig,
    /// Lighting configuration
    pub lighting: LightingConfig,
    /// Camera presets
    pub camera: CameraConfig,
    /// Geometry tessellation
    pub meshes: MeshConfig,
}

impl PoolSceneConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.renderer.validate()?;
        self.lighting.validate()?;
        self.meshes.validate()?;
        Ok(())
    }
}

impl Config for PoolSceneConfig {}
