//! Frame clock
//!
//! Turns a monotonic elapsed-seconds reading (one per rendered frame) into
//! a frame delta and a whole number of fixed simulation steps.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta accepted (tab switches, debugger pauses)
const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-step pacing driven by elapsed time
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Elapsed reading from the previous frame
    previous: Option<f64>,
    /// Time not yet consumed by whole steps
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_step(SIM_DT, MAX_SUBSTEPS)
    }

    pub fn with_step(step: f32, max_substeps: u32) -> Self {
        Self {
            previous: None,
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Fixed step length in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Frame delta since the last reading. The first reading yields 0, and a
    /// reading that goes backwards is treated as no time passing.
    pub fn frame_delta(&mut self, elapsed: f64) -> f32 {
        let dt = match self.previous {
            Some(prev) if elapsed > prev => (elapsed - prev) as f32,
            Some(_) => 0.0,
            None => 0.0,
        };
        if self.previous.is_none_or(|prev| elapsed > prev) {
            self.previous = Some(elapsed);
        }
        dt.min(MAX_FRAME_DT)
    }

    /// Number of fixed steps to run for the given frame delta
    pub fn steps_for(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        steps
    }

    /// Feed an elapsed reading and get the steps to simulate this frame
    pub fn advance(&mut self, elapsed: f64) -> u32 {
        let dt = self.frame_delta(elapsed);
        self.steps_for(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_reading_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame_delta(12.5), 0.0);
        assert!((clock.frame_delta(12.55) - 0.05).abs() < 1e-4);
    }

    #[test]
    fn test_non_monotonic_reading() {
        let mut clock = FrameClock::new();
        clock.frame_delta(1.0);
        assert_eq!(clock.frame_delta(0.5), 0.0);
        // The earlier, larger reading is still the reference
        assert!((clock.frame_delta(1.02) - 0.02).abs() < 1e-4);
    }

    #[test]
    fn test_accumulates_partial_steps() {
        let mut clock = FrameClock::with_step(0.01, 8);
        assert_eq!(clock.steps_for(0.004), 0);
        assert_eq!(clock.steps_for(0.007), 1);
    }

    #[test]
    fn test_advance_runs_whole_steps() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(0.0), 0);
        assert_eq!(clock.advance(0.09), 5);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FrameClock::new();
        clock.advance(0.0);
        let steps = clock.advance(5.0);
        assert!(steps <= MAX_SUBSTEPS);
        assert!(steps >= 1);
    }
}
