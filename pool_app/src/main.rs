//! Pool scene demo
//!
//! Headless driver for the pool scene: loads the configuration, replays the
//! scripted scene commands and ticks the renderer once per frame against the
//! recording backend.
//!
//! Usage: `pool_demo [config.toml|config.ron]`

mod config;

use std::time::{Duration, Instant};

use pool_engine::config::{Config, ConfigError};
use pool_engine::foundation::{logging, time::Timer};
use pool_engine::render::{FrameStats, MeshLibrary, RecordingBackend};
use pool_engine::scene::SceneRenderer;
use thiserror::Error;

use crate::config::DemoConfig;

const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/pool_demo.toml");

/// Demo failures
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Demo application state
pub struct PoolDemoApp {
    config: DemoConfig,
    backend: RecordingBackend,
    renderer: SceneRenderer<MeshLibrary>,
    timer: Timer,
}

impl PoolDemoApp {
    /// Create the backend, geometry and scene renderer
    pub fn new(config: DemoConfig) -> Self {
        log::info!("Creating pool demo application...");
        let scene_config = &config.scene;

        let mut backend = RecordingBackend::new(scene_config.renderer.viewport);
        let meshes = MeshLibrary::build(&mut backend, &scene_config.meshes);
        log::info!("Mesh library ready: {} geometry kinds", meshes.len());

        let renderer = SceneRenderer::new(&mut backend, meshes, scene_config);
        let timer = config.run.fixed_timestep.map_or_else(Timer::new, Timer::fixed);

        Self {
            config,
            backend,
            renderer,
            timer,
        }
    }

    /// Run the configured number of frames
    pub fn run(&mut self) -> FrameStats {
        let frame_budget = self.frame_budget();
        let mut totals = FrameStats::default();
        let mut last_scene = None;

        log::info!(
            "Running {} frames ({})",
            self.config.run.frames,
            self.config.run.fixed_timestep.map_or_else(
                || "wall clock".to_string(),
                |step| format!("fixed step {step}s")
            )
        );

        for frame in 0..self.config.run.frames {
            let frame_start = Instant::now();

            for command in self.config.run.commands_at(frame) {
                log::debug!("Frame {}: dispatching {:?}", frame, command);
                if let Err(e) = self.renderer.dispatch(command) {
                    log::warn!("Frame {}: command {:?} rejected: {}", frame, command, e);
                }
            }

            self.timer.update();
            let stats = self.renderer.tick(&mut self.backend, self.timer.delta_time());
            totals.accumulate(&stats);
            self.backend.clear_recording();

            let state = *self.renderer.animation_state();
            let status = (state.current_scene, state.animating);
            if last_scene != Some(status) {
                log::info!(
                    "Frame {}: {} ({})",
                    frame,
                    state.current_scene,
                    if state.animating { "playing" } else { "stopped" }
                );
                last_scene = Some(status);
            }

            if let Some(budget) = frame_budget {
                let elapsed = frame_start.elapsed();
                if elapsed < budget {
                    std::thread::sleep(budget - elapsed);
                }
            }
        }

        totals
    }

    fn frame_budget(&self) -> Option<Duration> {
        if self.timer.is_fixed() {
            return None;
        }
        self.config
            .scene
            .engine
            .target_fps
            .filter(|&fps| fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / f64::from(fps)))
    }

    /// Log the end-of-run summary
    pub fn report(&self, totals: &FrameStats) {
        let state = self.renderer.animation_state();
        log::info!(
            "Finished {} frames in {:.2}s simulated ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.total_time(),
            self.timer.average_fps()
        );
        log::info!(
            "Draws: {} lit, {} emissive, {} skipped",
            totals.lit_draws, totals.emissive_draws, totals.skipped_draws
        );
        log::info!(
            "Final state: {}, t = {:.2}s, phases {:?}",
            state.current_scene, state.elapsed_time, state.phases
        );
    }
}

fn load_config(path: &str) -> Result<DemoConfig, AppError> {
    let config = DemoConfig::load_or_default(path)?;
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), AppError> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            logging::init();
            log::error!("{}: {}", path, e);
            return Err(e);
        }
    };
    logging::init_with_level(&config.scene.engine.log_level);
    log::info!("Loaded configuration from {}", path);

    log::info!("Starting pool scene demo");

    let mut app = PoolDemoApp::new(config);
    let totals = app.run();
    app.report(&totals);

    log::info!("Pool scene demo completed successfully");
    Ok(())
}
