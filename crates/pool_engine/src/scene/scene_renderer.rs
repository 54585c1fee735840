//! # Scene Renderer
//!
//! Owns the pool scene and its animator, and turns the scene state into
//! draw calls once per tick:
//!
//! 1. clamp the delta and advance the animation
//! 2. clear, build projection and view
//! 3. lit pass: one draw per lit object, geometry chosen by kind
//! 4. emissive pass: one cube draw per ambient light
//!
//! Nothing in a tick is fatal. Missing geometry, an unusable projection and
//! backend call failures skip the affected draws and show up in
//! [`FrameStats::skipped_draws`].

use crate::animation::{AnimationError, AnimationState, SceneAnimator, SceneCommand};
use crate::core::config::{LightingConfig, PoolSceneConfig, RendererConfig};
use crate::foundation::math::{MathResult, Transform4};
use crate::foundation::transform;
use crate::render::{
    uniforms, BackendResult, EmissiveMaterial, FrameStats, GeometryProvider, LitMaterial, MeshBuffer,
    RenderBackend, ShaderPass,
};
use crate::scene::{GeometryKind, PoolScene, SceneObject};

/// Clamp a frame delta to `[0, max]`; NaN and infinities become 0
pub fn clamp_delta(delta_time: f32, max: f32) -> f32 {
    let max = max.max(0.0);
    let clamped = if delta_time.is_finite() { delta_time.clamp(0.0, max) } else { 0.0 };
    if clamped != delta_time {
        log::debug!("Frame delta {} clamped to {}", delta_time, clamped);
    }
    clamped
}

/// Matrix uploaded as `uNormalMatrix`: `model_view × model_view`
///
/// Not an inverse-transpose. The lit shader is tuned against this value, so
/// it is reproduced exactly.
pub fn normal_matrix(model_view: &Transform4) -> Transform4 {
    transform::multiply(model_view, model_view)
}

/// Two-pass render composer over a [`PoolScene`]
pub struct SceneRenderer<G: GeometryProvider> {
    scene: PoolScene,
    animator: SceneAnimator,
    geometry: G,
    renderer: RendererConfig,
    lighting: LightingConfig,
    lit_linked: bool,
    emissive_linked: bool,
}

impl<G: GeometryProvider> SceneRenderer<G> {
    /// Build the scene and link both shading programs
    ///
    /// A link failure is logged and the pass keeps running with whatever
    /// program the backend has bound. The animation starts idle; call
    /// [`SceneRenderer::switch_to_scene`] to start it.
    pub fn new<B: RenderBackend + ?Sized>(backend: &mut B, geometry: G, config: &PoolSceneConfig) -> Self {
        let scene = PoolScene::new(&config.camera);
        let animator = SceneAnimator::new(config.camera.clone());

        let mut renderer = Self {
            scene,
            animator,
            geometry,
            renderer: config.renderer.clone(),
            lighting: config.lighting.clone(),
            lit_linked: false,
            emissive_linked: false,
        };

        for pass in ShaderPass::ALL {
            let linked = match backend.link_program(pass) {
                Ok(()) => true,
                Err(e) => {
                    log::error!("{}; {} pass will render with the bound program state", e, pass);
                    false
                }
            };
            match pass {
                ShaderPass::Lit => renderer.lit_linked = linked,
                ShaderPass::Emissive => renderer.emissive_linked = linked,
            }
        }

        log::info!("Scene renderer initialized");
        renderer
    }

    /// The animated scene
    pub fn scene(&self) -> &PoolScene {
        &self.scene
    }

    /// Current animation state
    pub fn animation_state(&self) -> &AnimationState {
        self.animator.state()
    }

    /// The geometry provider
    pub fn geometry(&self) -> &G {
        &self.geometry
    }

    /// Whether the program of `pass` linked at setup
    pub const fn is_pass_linked(&self, pass: ShaderPass) -> bool {
        match pass {
            ShaderPass::Lit => self.lit_linked,
            ShaderPass::Emissive => self.emissive_linked,
        }
    }

    /// Enter scene `number` (1, 2 or 3)
    ///
    /// # Errors
    /// [`AnimationError::InvalidSceneIndex`] outside 1..=3; state unchanged.
    pub fn switch_to_scene(&mut self, number: u8) -> Result<(), AnimationError> {
        self.animator.switch_to_scene(&mut self.scene, number)
    }

    /// Stop the animation and return to scene 1
    pub fn reset(&mut self) {
        self.animator.reset(&mut self.scene);
    }

    /// Execute a control-surface command
    ///
    /// # Errors
    /// Propagates [`AnimationError`] from a rejected scene switch.
    pub fn dispatch(&mut self, command: SceneCommand) -> Result<(), AnimationError> {
        self.animator.dispatch(&mut self.scene, command)
    }

    /// Projection for a viewport extent
    ///
    /// # Errors
    /// [`crate::foundation::math::MathError::InvalidAspect`] for a zero-height
    /// or zero-width viewport, or the projection errors of a bad config.
    #[allow(clippy::cast_precision_loss)]
    pub fn projection_matrix(&self, extent: (u32, u32)) -> MathResult<Transform4> {
        let (width, height) = extent;
        let aspect = if height == 0 { 0.0 } else { width as f32 / height as f32 };
        transform::perspective(self.renderer.fov_y, aspect, self.renderer.near, self.renderer.far)
    }

    /// View matrix of the scene camera, target resolved live
    pub fn view_matrix(&self) -> Transform4 {
        let camera = self.scene.camera();
        transform::look_at(&camera.eye, &self.scene.camera_target(), &camera.up)
    }

    /// Advance the animation and draw one frame
    pub fn tick<B: RenderBackend + ?Sized>(&mut self, backend: &mut B, delta_time: f32) -> FrameStats {
        let delta_time = clamp_delta(delta_time, self.renderer.max_frame_delta);
        self.animator.advance(&mut self.scene, delta_time);

        let mut stats = FrameStats {
            delta_time,
            ..FrameStats::default()
        };

        if let Err(e) = backend.clear(self.renderer.clear_color) {
            log::debug!("Clear failed: {}", e);
        }

        let projection = match self.projection_matrix(backend.get_viewport_extent()) {
            Ok(projection) => projection,
            Err(e) => {
                let skipped = self.scene.lit_objects().count() + self.scene.emissive_objects().count();
                log::warn!("Skipping {} draws this frame: {}", skipped, e);
                stats.skipped_draws = u32::try_from(skipped).unwrap_or(u32::MAX);
                return stats;
            }
        };
        let view = self.view_matrix();

        self.draw_lit_pass(backend, &view, &projection, &mut stats);
        self.draw_emissive_pass(backend, &view, &projection, &mut stats);

        log::trace!(
            "Frame: {} lit, {} emissive, {} skipped",
            stats.lit_draws, stats.emissive_draws, stats.skipped_draws
        );
        stats
    }

    fn draw_lit_pass<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        view: &Transform4,
        projection: &Transform4,
        stats: &mut FrameStats,
    ) {
        if let Err(e) = backend.use_program(ShaderPass::Lit) {
            log::trace!("Lit program not bound: {}", e);
        }
        if let Err(e) = self.apply_frame_lighting(backend) {
            log::trace!("Lighting uniforms not applied: {}", e);
        }

        for object in self.scene.lit_objects() {
            let Some(buffer) = self.geometry.get_buffer(object.kind) else {
                log::trace!("No geometry for {:?}, draw skipped", object.kind);
                stats.skipped_draws += 1;
                continue;
            };
            match self.draw_lit_object(backend, object, &buffer, view, projection) {
                Ok(()) => stats.lit_draws += 1,
                Err(e) => {
                    log::trace!("Lit draw of {:?} failed: {}", object.kind, e);
                    stats.skipped_draws += 1;
                }
            }
        }
    }

    fn draw_emissive_pass<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        view: &Transform4,
        projection: &Transform4,
        stats: &mut FrameStats,
    ) {
        if let Err(e) = backend.use_program(ShaderPass::Emissive) {
            log::trace!("Emissive program not bound: {}", e);
        }

        // Lights are always drawn as cubes, whatever kind they declare
        let Some(buffer) = self.geometry.get_buffer(GeometryKind::Cube) else {
            let count = u32::try_from(self.scene.emissive_objects().count()).unwrap_or(u32::MAX);
            log::trace!("No cube geometry, {} emissive draws skipped", count);
            stats.skipped_draws += count;
            return;
        };

        for object in self.scene.emissive_objects() {
            match self.draw_emissive_object(backend, object, &buffer, view, projection) {
                Ok(()) => stats.emissive_draws += 1,
                Err(e) => {
                    log::trace!("Emissive draw failed: {}", e);
                    stats.skipped_draws += 1;
                }
            }
        }
    }

    fn apply_frame_lighting<B: RenderBackend + ?Sized>(&self, backend: &mut B) -> BackendResult<()> {
        let lighting = &self.lighting;
        backend.set_uniform_vec3(uniforms::LIGHT_POSITION, &lighting.light_position)?;
        backend.set_uniform_vec3(uniforms::LIGHT_COLOR, &lighting.light_color)?;
        backend.set_uniform_vec3(uniforms::FOG_COLOR, &lighting.fog_color)?;
        backend.set_uniform_float(uniforms::FOG_DENSITY, lighting.fog_density)
    }

    fn draw_lit_object<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        object: &SceneObject,
        buffer: &MeshBuffer,
        view: &Transform4,
        projection: &Transform4,
    ) -> BackendResult<()> {
        let model_view = transform::multiply(view, &object.model_matrix());

        // Uniform failures leave stale values bound; the draw still goes out
        let uploaded = backend
            .set_uniform_matrix(uniforms::MODEL_VIEW_MATRIX, &model_view)
            .and_then(|()| backend.set_uniform_matrix(uniforms::PROJECTION_MATRIX, projection))
            .and_then(|()| backend.set_uniform_matrix(uniforms::NORMAL_MATRIX, &normal_matrix(&model_view)))
            .and_then(|()| LitMaterial::for_object(object, self.lighting.shininess).apply(backend));
        if let Err(e) = uploaded {
            log::trace!("Lit uniforms incomplete for {:?}: {}", object.kind, e);
        }

        backend.draw_indexed(buffer)
    }

    fn draw_emissive_object<B: RenderBackend + ?Sized>(
        &self,
        backend: &mut B,
        object: &SceneObject,
        buffer: &MeshBuffer,
        view: &Transform4,
        projection: &Transform4,
    ) -> BackendResult<()> {
        let model_view = transform::multiply(view, &object.emissive_model_matrix());

        let uploaded = backend
            .set_uniform_matrix(uniforms::MODEL_VIEW_MATRIX, &model_view)
            .and_then(|()| backend.set_uniform_matrix(uniforms::PROJECTION_MATRIX, projection))
            .and_then(|()| EmissiveMaterial::for_object(object).apply(backend));
        if let Err(e) = uploaded {
            log::trace!("Emissive uniforms incomplete: {}", e);
        }

        backend.draw_indexed(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};
    use crate::render::{MeshLibrary, RecordingBackend};
    use approx::assert_relative_eq;

    fn setup() -> (RecordingBackend, SceneRenderer<MeshLibrary>) {
        let config = PoolSceneConfig::default();
        let mut backend = RecordingBackend::new(config.renderer.viewport);
        let library = MeshLibrary::build(&mut backend, &config.meshes);
        let renderer = SceneRenderer::new(&mut backend, library, &config);
        backend.clear_recording();
        (backend, renderer)
    }

    #[test]
    fn test_clamp_delta() {
        assert_eq!(clamp_delta(0.016, 0.25), 0.016);
        assert_eq!(clamp_delta(-1.0, 0.25), 0.0);
        assert_eq!(clamp_delta(f32::NAN, 0.25), 0.0);
        assert_eq!(clamp_delta(f32::INFINITY, 0.25), 0.0);
        assert_eq!(clamp_delta(3.0, 0.25), 0.25);
        assert_eq!(clamp_delta(0.1, f32::NAN), 0.0);
    }

    #[test]
    fn test_normal_matrix_is_model_view_squared() {
        let mv = transform::translate(&Mat4::identity(), &Vec3::new(1.0, 2.0, 3.0));
        let expected = transform::translate(&Mat4::identity(), &Vec3::new(2.0, 4.0, 6.0));
        assert_relative_eq!(normal_matrix(&mv), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_frame_draw_counts() {
        let (mut backend, mut renderer) = setup();
        let stats = renderer.tick(&mut backend, 0.016);

        // Table and both balls drawn; cue and six pockets have no cylinder mesh
        assert_eq!(stats.lit_draws, 3);
        assert_eq!(stats.skipped_draws, 7);
        assert_eq!(stats.emissive_draws, 4);
        assert_eq!(backend.draws_for(ShaderPass::Emissive).count(), 4);
    }

    #[test]
    fn test_idle_tick_does_not_animate() {
        let (mut backend, mut renderer) = setup();
        let stats = renderer.tick(&mut backend, 0.1);
        assert_eq!(stats.delta_time, 0.1);
        assert_eq!(renderer.animation_state().elapsed_time, 0.0);
    }

    #[test]
    fn test_zero_height_viewport_skips_frame() {
        let (mut backend, mut renderer) = setup();
        renderer.switch_to_scene(1).unwrap();
        backend.set_extent((800, 0));

        let stats = renderer.tick(&mut backend, 0.1);

        assert_eq!(stats.total_draws(), 0);
        assert_eq!(stats.skipped_draws, 14);
        assert!(backend.draws().is_empty());
        // Animation still advanced
        assert_relative_eq!(renderer.animation_state().elapsed_time, 0.1);
    }

    #[test]
    fn test_lit_uniform_contract() {
        let (mut backend, mut renderer) = setup();
        renderer.tick(&mut backend, 0.0);

        let projection = renderer.projection_matrix((800, 600)).unwrap();
        let view = renderer.view_matrix();
        let table = renderer.scene().table();

        let draw = backend.draws_for(ShaderPass::Lit).next().unwrap();
        let model_view = view * table.model_matrix();
        assert_relative_eq!(*draw.matrix(uniforms::MODEL_VIEW_MATRIX).unwrap(), model_view, epsilon = 1e-6);
        assert_relative_eq!(*draw.matrix(uniforms::PROJECTION_MATRIX).unwrap(), projection, epsilon = 1e-6);
        assert_relative_eq!(
            *draw.matrix(uniforms::NORMAL_MATRIX).unwrap(),
            model_view * model_view,
            epsilon = 1e-5
        );
        assert_eq!(draw.vec3(uniforms::AMBIENT_COLOR), Some(&table.color));
        assert_eq!(draw.vec3(uniforms::SPECULAR_COLOR), Some(&table.color));
        assert_eq!(draw.float(uniforms::SHININESS), Some(32.0));
        assert_eq!(draw.vec3(uniforms::LIGHT_POSITION), Some(&Vec3::new(0.0, 5.0, 5.0)));
        assert_eq!(draw.float(uniforms::FOG_DENSITY), Some(0.02));
    }

    #[test]
    fn test_emissive_uses_cube_and_translate_scale() {
        let (mut backend, mut renderer) = setup();
        renderer.switch_to_scene(3).unwrap();
        renderer.tick(&mut backend, 0.25);

        let cube = renderer.geometry().get_buffer(GeometryKind::Cube).unwrap();
        let view = renderer.view_matrix();
        let lights: Vec<_> = renderer.scene().ambient_lights().cloned().collect();
        let draws: Vec<_> = backend.draws_for(ShaderPass::Emissive).collect();

        assert_eq!(draws.len(), lights.len());
        for (draw, light) in draws.iter().zip(&lights) {
            assert_eq!(draw.buffer, cube);
            let expected = view * light.emissive_model_matrix();
            assert_relative_eq!(*draw.matrix(uniforms::MODEL_VIEW_MATRIX).unwrap(), expected, epsilon = 1e-6);
            assert_eq!(draw.float(uniforms::INTENSITY), Some(0.75));
            assert_eq!(draw.vec3(uniforms::EMISSIVE_COLOR), Some(&Vec3::new(0.0, 0.5, 1.0)));
        }
    }

    #[test]
    fn test_link_failure_degrades() {
        let config = PoolSceneConfig::default();
        let mut backend = RecordingBackend::new((800, 600)).fail_program_link(ShaderPass::Emissive);
        let library = MeshLibrary::build(&mut backend, &config.meshes);
        let mut renderer = SceneRenderer::new(&mut backend, library, &config);

        assert!(renderer.is_pass_linked(ShaderPass::Lit));
        assert!(!renderer.is_pass_linked(ShaderPass::Emissive));

        let stats = renderer.tick(&mut backend, 0.016);
        assert_eq!(stats.lit_draws, 3);
        // Light draws go out under the still-bound lit program
        assert_eq!(stats.emissive_draws, 4);
        assert_eq!(backend.draws_for(ShaderPass::Lit).count(), 7);
    }

    #[test]
    fn test_control_surface() {
        let (_, mut renderer) = setup();
        assert!(renderer.switch_to_scene(0).is_err());
        assert!(!renderer.animation_state().animating);

        renderer.dispatch(SceneCommand::SwitchToScene(2)).unwrap();
        assert!(renderer.animation_state().animating);

        renderer.reset();
        assert!(!renderer.animation_state().animating);
    }
}
