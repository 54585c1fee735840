//! Scene timeline state machine
//!
//! | Scene | Phase      | Condition        | Effect                                   |
//! |-------|------------|------------------|------------------------------------------|
//! | 1     | pull       | t < 1.0          | cue.x = -1.5 - 0.3t                      |
//! | 1     | hit        | 1.0 <= t < 1.2   | cue.x = -1.8 + 3(t - 1)                  |
//! | 1     | advance    | t > 1.5          | enter scene 2                            |
//! | 2     | white ball | t < 1.0          | white.x += 2dt                           |
//! | 2     | black ball | 1.0 <= t < 2.0   | black.x += 1.5dt                         |
//! | 2     | advance    | t > 2.2          | enter scene 3                            |
//! | 3     | sink       | every tick       | black scale *= max(0, 1 - 2t), lights = clamp(3t) |
//!
//! `t` is the time since the current scene was entered. Gaps between phases
//! (scene 1 between 1.2 and 1.5, scene 2 between 2.0 and 2.2) hold the pose.

use crate::animation::{AnimationError, AnimationState, PhaseFlags, SceneCommand, SceneId};
use crate::core::config::CameraConfig;
use crate::scene::{Camera, PoolScene};

const CUE_PULL_END: f32 = 1.0;
const CUE_HIT_END: f32 = 1.2;
const AIM_SCENE_END: f32 = 1.5;
const CUE_REST_X: f32 = -1.5;
const CUE_PULLED_X: f32 = -1.8;
const CUE_PULL_SPEED: f32 = 0.3;
const CUE_HIT_SPEED: f32 = 3.0;

const WHITE_BALL_END: f32 = 1.0;
const BLACK_BALL_END: f32 = 2.0;
const COLLISION_SCENE_END: f32 = 2.2;
const WHITE_BALL_SPEED: f32 = 2.0;
const BLACK_BALL_SPEED: f32 = 1.5;

const SINK_END: f32 = 0.5;
const SINK_RATE: f32 = 2.0;
const LIGHT_RAMP_RATE: f32 = 3.0;

/// Drives the three-scene timeline over a [`PoolScene`]
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    state: AnimationState,
    camera_config: CameraConfig,
}

impl SceneAnimator {
    /// Create an idle animator on scene 1
    pub fn new(camera_config: CameraConfig) -> Self {
        Self {
            state: AnimationState::idle(),
            camera_config,
        }
    }

    /// Current animation state
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Whether ticks currently advance the timeline
    pub fn is_animating(&self) -> bool {
        self.state.animating
    }

    /// Advance the timeline by `delta_time` seconds
    ///
    /// No-op while idle. Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, scene: &mut PoolScene, delta_time: f32) {
        if !self.state.animating {
            return;
        }
        let delta_time = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };

        self.state.elapsed_time += delta_time;

        match self.state.current_scene {
            SceneId::Aim => self.update_aim(scene),
            SceneId::Collision => self.update_collision(scene, delta_time),
            SceneId::Pocket => self.update_pocket(scene),
        }
    }

    /// Enter scene `number` (1, 2 or 3) and start animating
    ///
    /// # Errors
    /// [`AnimationError::InvalidSceneIndex`] for any other number; the state
    /// is left untouched in that case.
    pub fn switch_to_scene(&mut self, scene: &mut PoolScene, number: u8) -> Result<(), AnimationError> {
        let id = SceneId::try_from(number).map_err(|e| {
            log::warn!("Rejected scene switch: {}", e);
            e
        })?;
        self.enter_scene(scene, id);
        Ok(())
    }

    /// Return to scene 1 without animating
    ///
    /// Idempotent: a second call observes and produces the same state.
    pub fn reset(&mut self, scene: &mut PoolScene) {
        self.state = AnimationState::idle();
        scene.restore_initial_pose();
        self.apply_camera(scene, SceneId::Aim);
        log::info!("Animation reset to {}", SceneId::Aim);
    }

    /// Execute a control-surface command
    ///
    /// # Errors
    /// Propagates [`AnimationError`] from [`SceneAnimator::switch_to_scene`].
    pub fn dispatch(&mut self, scene: &mut PoolScene, command: SceneCommand) -> Result<(), AnimationError> {
        match command {
            SceneCommand::SwitchToScene(number) => self.switch_to_scene(scene, number),
            SceneCommand::Reset => {
                self.reset(scene);
                Ok(())
            }
        }
    }

    fn enter_scene(&mut self, scene: &mut PoolScene, id: SceneId) {
        self.state = AnimationState {
            current_scene: id,
            elapsed_time: 0.0,
            phases: PhaseFlags::empty(),
            animating: true,
        };
        scene.restore_initial_pose();
        self.apply_camera(scene, id);
        log::info!("Entered {}", id);
    }

    fn apply_camera(&self, scene: &mut PoolScene, id: SceneId) {
        let config = &self.camera_config;
        let camera = match id {
            SceneId::Aim | SceneId::Pocket => {
                Camera::top_down(config.top_down_eye, config.top_down_target, config.up)
            }
            SceneId::Collision => Camera::follow(config.follow_eye, scene.white_ball_key(), config.up),
        };
        scene.set_camera(camera);
    }

    fn update_aim(&mut self, scene: &mut PoolScene) {
        let t = self.state.elapsed_time;

        if t < CUE_PULL_END {
            scene.cue_mut().position.x = CUE_REST_X - t * CUE_PULL_SPEED;
            self.state.phases.insert(PhaseFlags::CUE_PULLING);
        } else if t < CUE_HIT_END {
            scene.cue_mut().position.x = CUE_PULLED_X + (t - CUE_PULL_END) * CUE_HIT_SPEED;
            self.state.phases.insert(PhaseFlags::CUE_HITTING);
        } else if t > AIM_SCENE_END {
            self.enter_scene(scene, SceneId::Collision);
        }
    }

    fn update_collision(&mut self, scene: &mut PoolScene, delta_time: f32) {
        let t = self.state.elapsed_time;

        // The follow camera resolves the white ball's key on every view
        // build, so moving the ball is enough to move the target.
        if t < WHITE_BALL_END {
            scene.white_ball_mut().position.x += delta_time * WHITE_BALL_SPEED;
            self.state.phases.insert(PhaseFlags::WHITE_BALL_MOVING);
        } else if t < BLACK_BALL_END {
            scene.black_ball_mut().position.x += delta_time * BLACK_BALL_SPEED;
            self.state.phases.insert(PhaseFlags::BLACK_BALL_MOVING);
        } else if t > COLLISION_SCENE_END {
            self.enter_scene(scene, SceneId::Pocket);
        }
    }

    fn update_pocket(&mut self, scene: &mut PoolScene) {
        let t = self.state.elapsed_time;

        let shrink = (1.0 - t * SINK_RATE).max(0.0);
        let ball = scene.black_ball_mut();
        ball.scale = ball.original_scale() * shrink;
        scene.set_ambient_intensity((t * LIGHT_RAMP_RATE).clamp(0.0, 1.0));

        if t < SINK_END {
            self.state.phases.insert(PhaseFlags::BLACK_BALL_IN_POCKET);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::CameraMode;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    fn setup() -> (SceneAnimator, PoolScene) {
        let config = CameraConfig::default();
        (SceneAnimator::new(config.clone()), PoolScene::new(&config))
    }

    fn run(animator: &mut SceneAnimator, scene: &mut PoolScene, step: f32, steps: usize) {
        for _ in 0..steps {
            animator.advance(scene, step);
        }
    }

    #[test]
    fn test_idle_animator_ignores_ticks() {
        let (mut animator, mut scene) = setup();
        run(&mut animator, &mut scene, 0.1, 10);
        assert_eq!(animator.state(), &AnimationState::idle());
        assert_eq!(scene.cue().position.x, -1.5);
    }

    #[test]
    fn test_cue_pull_phase() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 1).unwrap();
        run(&mut animator, &mut scene, 0.1, 5);

        assert_relative_eq!(animator.state().elapsed_time, 0.5, epsilon = EPSILON);
        assert_relative_eq!(scene.cue().position.x, -1.65, epsilon = EPSILON);
        assert!(animator.state().cue_pulling());
        assert!(!animator.state().cue_hitting());
    }

    #[test]
    fn test_cue_hit_phase() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 1).unwrap();
        run(&mut animator, &mut scene, 0.1, 11);

        let t = animator.state().elapsed_time;
        assert_relative_eq!(t, 1.1, epsilon = 1e-5);
        assert_relative_eq!(scene.cue().position.x, -1.8 + (t - 1.0) * 3.0, epsilon = EPSILON);
        assert!(animator.state().cue_hitting());
        // Pull flag stays raised for the rest of the scene
        assert!(animator.state().cue_pulling());
    }

    #[test]
    fn test_aim_scene_holds_until_threshold_then_advances_once() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 1).unwrap();

        // 0.25 is exact in binary, so t lands on 1.5 exactly
        run(&mut animator, &mut scene, 0.25, 6);
        assert_eq!(animator.state().elapsed_time, 1.5);
        assert_eq!(animator.state().current_scene, SceneId::Aim);

        animator.advance(&mut scene, 0.25);
        assert_eq!(animator.state().current_scene, SceneId::Collision);
        assert_eq!(animator.state().elapsed_time, 0.0);
        assert!(animator.state().phases.is_empty());
        assert_eq!(scene.cue().position, Vec3::new(-1.5, 0.0, 0.2));
        assert_eq!(scene.camera().mode, CameraMode::Follow);
    }

    #[test]
    fn test_collision_moves_balls_in_sequence() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 2).unwrap();

        run(&mut animator, &mut scene, 0.25, 3);
        assert_relative_eq!(scene.white_ball().position.x, 1.5, epsilon = EPSILON);
        assert_eq!(scene.black_ball().position.x, 1.5);
        assert!(animator.state().white_ball_moving());

        // t = 1.0 starts the black ball phase; white ball stops
        run(&mut animator, &mut scene, 0.25, 4);
        assert_relative_eq!(scene.white_ball().position.x, 1.5, epsilon = EPSILON);
        assert_relative_eq!(scene.black_ball().position.x, 1.5 + 4.0 * 0.25 * 1.5, epsilon = EPSILON);
        assert!(animator.state().black_ball_moving());
    }

    #[test]
    fn test_follow_camera_tracks_live_ball() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 2).unwrap();
        assert_eq!(scene.camera_target(), Vec3::new(0.0, 0.0, 0.3));

        run(&mut animator, &mut scene, 0.1, 4);
        assert_eq!(scene.camera_target(), scene.white_ball().position);
        assert!(scene.camera_target().x > 0.7);
    }

    #[test]
    fn test_collision_scene_advances_after_threshold() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 2).unwrap();

        // t = 2.0 holds, t = 2.25 crosses 2.2
        run(&mut animator, &mut scene, 0.25, 8);
        assert_eq!(animator.state().current_scene, SceneId::Collision);
        animator.advance(&mut scene, 0.25);
        assert_eq!(animator.state().current_scene, SceneId::Pocket);
        assert_eq!(scene.camera().mode, CameraMode::TopDown);
        // Balls snap back on scene entry
        assert_eq!(scene.white_ball().position, Vec3::new(0.0, 0.0, 0.3));
        assert_eq!(scene.black_ball().position, Vec3::new(1.5, 0.0, 0.3));
    }

    #[test]
    fn test_pocket_sink_and_lights() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 3).unwrap();

        animator.advance(&mut scene, 0.25);
        assert_relative_eq!(scene.black_ball().scale, Vec3::repeat(0.15 * 0.5), epsilon = EPSILON);
        assert!(scene.ambient_lights().all(|l| l.emissive_intensity() == Some(0.75)));
        assert!(animator.state().black_ball_in_pocket());

        animator.advance(&mut scene, 0.25);
        assert_eq!(animator.state().elapsed_time, 0.5);
        assert_eq!(scene.black_ball().scale, Vec3::zeros());
        assert!(scene.ambient_lights().all(|l| l.emissive_intensity() == Some(1.0)));

        // Terminal: holds, no further transition
        run(&mut animator, &mut scene, 0.25, 20);
        assert_eq!(animator.state().current_scene, SceneId::Pocket);
        assert_eq!(scene.black_ball().scale, Vec3::zeros());
    }

    #[test]
    fn test_pocket_terminal_pose_with_uneven_steps() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 3).unwrap();
        run(&mut animator, &mut scene, 0.1, 5);

        assert_relative_eq!(animator.state().elapsed_time, 0.5, epsilon = 1e-6);
        assert_relative_eq!(scene.black_ball().scale, Vec3::zeros(), epsilon = 1e-6);
        assert!(scene.ambient_lights().all(|l| l.emissive_intensity() == Some(1.0)));
    }

    #[test]
    fn test_invalid_scene_leaves_state_untouched() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 1).unwrap();
        run(&mut animator, &mut scene, 0.1, 3);
        let before = *animator.state();
        let cue_before = scene.cue().position;

        assert_eq!(animator.switch_to_scene(&mut scene, 4), Err(AnimationError::InvalidSceneIndex(4)));
        assert_eq!(animator.switch_to_scene(&mut scene, 0), Err(AnimationError::InvalidSceneIndex(0)));
        assert_eq!(animator.state(), &before);
        assert_eq!(scene.cue().position, cue_before);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 3).unwrap();
        run(&mut animator, &mut scene, 0.1, 3);

        animator.reset(&mut scene);
        let state_once = *animator.state();
        let camera_once = scene.camera().clone();
        let poses_once: Vec<_> = scene.lit_objects().chain(scene.emissive_objects()).cloned().collect();

        animator.reset(&mut scene);
        let poses_twice: Vec<_> = scene.lit_objects().chain(scene.emissive_objects()).cloned().collect();

        assert_eq!(animator.state(), &state_once);
        assert_eq!(scene.camera(), &camera_once);
        assert_eq!(poses_once, poses_twice);

        assert_eq!(state_once, AnimationState::idle());
        assert_eq!(camera_once.mode, CameraMode::TopDown);
        assert_eq!(scene.black_ball().scale, Vec3::repeat(0.15));
    }

    #[test]
    fn test_bad_deltas_do_not_corrupt_state() {
        let (mut animator, mut scene) = setup();
        animator.switch_to_scene(&mut scene, 1).unwrap();
        animator.advance(&mut scene, f32::NAN);
        animator.advance(&mut scene, -3.0);
        animator.advance(&mut scene, f32::INFINITY);

        assert_eq!(animator.state().elapsed_time, 0.0);
        assert!(scene.cue().position.x.is_finite());
    }

    #[test]
    fn test_dispatch_routes_commands() {
        let (mut animator, mut scene) = setup();
        animator.dispatch(&mut scene, SceneCommand::SwitchToScene(2)).unwrap();
        assert_eq!(animator.state().current_scene, SceneId::Collision);
        assert!(animator.is_animating());

        animator.dispatch(&mut scene, SceneCommand::Reset).unwrap();
        assert_eq!(animator.state().current_scene, SceneId::Aim);
        assert!(!animator.is_animating());

        assert!(animator.dispatch(&mut scene, SceneCommand::SwitchToScene(9)).is_err());
    }
}
