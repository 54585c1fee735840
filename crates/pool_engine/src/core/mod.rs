//! # Core Engine Module
//!
//! Shared configuration for every subsystem of the scene engine.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for rendering, lighting, camera presets
//!   and geometry tessellation

pub mod config;

pub use config::{
    PoolSceneConfig,
    EngineConfig,
    RendererConfig,
    LightingConfig,
    CameraConfig,
    MeshConfig,
    Config,
    ConfigError,
};
