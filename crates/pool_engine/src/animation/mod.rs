//! Scripted scene animation
//!
//! Three sequential scenes driven purely by elapsed time:
//! 1. **Aim** - the cue pulls back and strikes
//! 2. **Collision** - the white ball rolls, then the black ball
//! 3. **Pocket** - the black ball sinks while the ambient lights come up
//!
//! [`SceneAnimator`] owns the timeline and the phase flags; the scene it
//! animates is passed in by reference on every call.

mod state;
mod animator;

pub use state::{AnimationError, AnimationState, PhaseFlags, SceneCommand, ScriptedCommand, SceneId};
pub use animator::SceneAnimator;
