//! Frame timing for the external tick driver

use std::time::Instant;

/// Frame timer producing the per-tick delta
///
/// In wall-clock mode the delta is the real time since the previous
/// [`Timer::update`]. In fixed-step mode every update reports the same step,
/// which makes scripted runs reproducible.
pub struct Timer {
    last_frame: Instant,
    fixed_step: Option<f32>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a wall-clock timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fixed_step: None,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a timer that advances by `step` seconds per update
    pub fn fixed(step: f32) -> Self {
        Self {
            fixed_step: Some(step),
            ..Self::new()
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = match self.fixed_step {
            Some(step) => step,
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the timer runs on a fixed step
    pub fn is_fixed(&self) -> bool {
        self.fixed_step.is_some()
    }

    /// Get the average FPS since timer creation
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}
