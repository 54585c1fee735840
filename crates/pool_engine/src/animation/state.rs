//! Animation state, scene identifiers and control commands

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Animation control errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    /// Scene numbers are 1, 2 or 3
    #[error("Invalid scene index: {0} (expected 1, 2 or 3)")]
    InvalidSceneIndex(u8),
}

/// The three scripted scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneId {
    /// Scene 1: cue pull-back and strike
    Aim,
    /// Scene 2: white ball rolls into the black ball
    Collision,
    /// Scene 3: black ball drops into a pocket
    Pocket,
}

impl SceneId {
    /// 1-based scene number used by the control surface
    pub const fn number(self) -> u8 {
        match self {
            Self::Aim => 1,
            Self::Collision => 2,
            Self::Pocket => 3,
        }
    }

    /// Human-readable label for status reporting
    pub const fn description(self) -> &'static str {
        match self {
            Self::Aim => "Aim and strike",
            Self::Collision => "Ball collision",
            Self::Pocket => "Black ball pocketed",
        }
    }
}

impl TryFrom<u8> for SceneId {
    type Error = AnimationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Aim),
            2 => Ok(Self::Collision),
            3 => Ok(Self::Pocket),
            other => Err(AnimationError::InvalidSceneIndex(other)),
        }
    }
}

impl std::fmt::Display for SceneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scene {} - {}", self.number(), self.description())
    }
}

bitflags! {
    /// Sub-animations that have run in the current scene
    ///
    /// Flags are raised by the timeline and only cleared when a scene is
    /// entered or the animation is reset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PhaseFlags: u8 {
        /// Cue is being pulled back
        const CUE_PULLING = 1 << 0;
        /// Cue is striking forward
        const CUE_HITTING = 1 << 1;
        /// White ball is rolling
        const WHITE_BALL_MOVING = 1 << 2;
        /// Black ball is rolling
        const BLACK_BALL_MOVING = 1 << 3;
        /// Black ball is sinking into the pocket
        const BLACK_BALL_IN_POCKET = 1 << 4;
    }
}

/// Observable animation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Scene currently selected
    pub current_scene: SceneId,
    /// Seconds since the current scene was entered
    pub elapsed_time: f32,
    /// Phase flags of the current scene
    pub phases: PhaseFlags,
    /// Whether ticks advance the timeline
    pub animating: bool,
}

impl AnimationState {
    /// Idle state: scene 1, nothing running
    pub const fn idle() -> Self {
        Self {
            current_scene: SceneId::Aim,
            elapsed_time: 0.0,
            phases: PhaseFlags::empty(),
            animating: false,
        }
    }

    /// Cue pull-back flag
    pub fn cue_pulling(&self) -> bool {
        self.phases.contains(PhaseFlags::CUE_PULLING)
    }

    /// Cue strike flag
    pub fn cue_hitting(&self) -> bool {
        self.phases.contains(PhaseFlags::CUE_HITTING)
    }

    /// White ball rolling flag
    pub fn white_ball_moving(&self) -> bool {
        self.phases.contains(PhaseFlags::WHITE_BALL_MOVING)
    }

    /// Black ball rolling flag
    pub fn black_ball_moving(&self) -> bool {
        self.phases.contains(PhaseFlags::BLACK_BALL_MOVING)
    }

    /// Black ball sinking flag
    pub fn black_ball_in_pocket(&self) -> bool {
        self.phases.contains(PhaseFlags::BLACK_BALL_IN_POCKET)
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::idle()
    }
}

/// Commands accepted by the scene control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneCommand {
    /// Enter scene 1, 2 or 3 and start animating
    SwitchToScene(u8),
    /// Return to scene 1 and stop animating
    Reset,
}

/// A command scheduled for a given frame of a scripted run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedCommand {
    /// Frame index (0-based) before whose tick the command runs
    pub frame: u64,
    /// Command to dispatch
    pub command: SceneCommand,
}
