//! Per-frame rendering statistics

/// Outcome of one composer tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Successful draws in the lit pass
    pub lit_draws: u32,
    /// Successful draws in the emissive pass
    pub emissive_draws: u32,
    /// Draws skipped for missing geometry, an unusable projection or a backend error
    pub skipped_draws: u32,
    /// Delta time actually applied to the animation, after clamping
    pub delta_time: f32,
}

impl FrameStats {
    /// Total draws issued in both passes
    pub const fn total_draws(&self) -> u32 {
        self.lit_draws + self.emissive_draws
    }

    /// Fold another frame into running totals
    pub fn accumulate(&mut self, frame: &Self) {
        self.lit_draws += frame.lit_draws;
        self.emissive_draws += frame.emissive_draws;
        self.skipped_draws += frame.skipped_draws;
        self.delta_time += frame.delta_time;
    }
}
