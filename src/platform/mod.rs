//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (frame clock + fixed-step pacing)

pub mod time;

pub use time::FrameClock;
