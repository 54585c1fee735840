//! Demo driver configuration
//!
//! The engine's [`PoolSceneConfig`] plus the parameters of a scripted run.

use pool_engine::animation::{SceneCommand, ScriptedCommand};
use pool_engine::config::Config;
use pool_engine::core::{ConfigError, PoolSceneConfig};
use serde::{Deserialize, Serialize};

/// Scripted run parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of frames to tick before exiting
    pub frames: u64,
    /// Seconds per frame; wall-clock deltas when absent
    pub fixed_timestep: Option<f32>,
    /// Commands replayed against the scene control surface
    pub script: Vec<ScriptedCommand>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 360,
            fixed_timestep: None,
            script: vec![ScriptedCommand {
                frame: 0,
                command: SceneCommand::SwitchToScene(1),
            }],
        }
    }
}

impl RunConfig {
    /// Commands scheduled for `frame`, in file order
    pub fn commands_at(&self, frame: u64) -> impl Iterator<Item = SceneCommand> + '_ {
        self.script.iter().filter(move |c| c.frame == frame).map(|c| c.command)
    }
}

/// Complete demo configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Engine configuration
    pub scene: PoolSceneConfig,
    /// Run parameters
    pub run: RunConfig,
}

impl DemoConfig {
    /// Validate the scene and run sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene.validate()?;
        if let Some(step) = self.run.fixed_timestep {
            if !(step > 0.0) {
                return Err(ConfigError::Invalid(format!("fixed_timestep must be positive, got {step}")));
            }
        }
        Ok(())
    }
}

impl Config for DemoConfig {}
