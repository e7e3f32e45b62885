//! Duck Pond - a pond-defense arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation core (spawning, steering, combat, progression, lifecycle)
//! - `renderer`: Scene/visual-handle boundary the simulation drives
//! - `platform`: Frame clock and fixed-step pacing
//! - `ui`: HUD snapshots and timed presentation tasks
//! - `audio`: Event-keyed audio cues
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one update per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player may only move while strictly inside this radius (ground plane)
    pub const ARENA_BOUNDARY_RADIUS: f32 = 28.0;
    pub const ARENA_BOUNDARY_RADIUS_SQ: f32 = ARENA_BOUNDARY_RADIUS * ARENA_BOUNDARY_RADIUS;
    /// Enemies appear on a ring outside the camera's view
    pub const SPAWN_RING_MIN: f32 = 30.0;
    pub const SPAWN_RING_MAX: f32 = 50.0;

    /// Player defaults
    pub const PLAYER_HEIGHT: f32 = 0.1;
    pub const PLAYER_SPEED: f32 = 0.05; // per step
    /// Enemy-player contact distance (3D, squared: 1.5 * 1.5)
    pub const PLAYER_CONTACT_DIST_SQ: f32 = 2.25;

    /// Enemy defaults
    pub const ENEMY_HEIGHT: f32 = 1.3;
    pub const ENEMY_HIT_FLASH: f32 = 0.1;
    pub const ENEMY_DEATH_TIME: f32 = 0.15;
    pub const ZIGZAG_STRAFE_SPEED: f32 = 0.05;
    pub const ZIGZAG_STRAFE_AMPLITUDE: f32 = 1.1;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 0.3;
    pub const PROJECTILE_MAX_RANGE: f32 = 100.0;
    pub const PROJECTILE_KNOCKBACK: f32 = 0.5;
    pub const TRACER_START_LIFE: f32 = 1.5;
    pub const TRACER_START_SCALE: f32 = 0.2;

    /// Power-up defaults
    pub const POWER_UP_HEIGHT: f32 = 1.0;
    pub const POWER_UP_RADIUS: f32 = 1.5;
    pub const POWER_UP_LIFE: f32 = 5.0;
    pub const POWER_UP_BLINK_BELOW: f32 = 2.0;

    /// Wave skill defaults
    pub const WAVE_HEIGHT: f32 = 0.2;
    pub const WAVE_SPEED: f32 = 0.2; // per step
    pub const WAVE_BASE_RADIUS: f32 = 2.5;
    pub const WAVE_MAX_SCALE: f32 = 3.0;
    pub const WAVE_GROWTH: f32 = 1.02;
    pub const WAVE_START_OPACITY: f32 = 0.7;
    pub const WAVE_FADE: f32 = 0.05;
    pub const WAVE_KNOCKBACK: f32 = 0.3;

    /// Coin defaults
    pub const COIN_SPAWN_HEIGHT: f32 = 1.5;
    pub const COIN_MAGNET_DELAY: f32 = 0.5;
    pub const COIN_ACCELERATION: f32 = 20.0;
    pub const COIN_SPIN: f32 = 5.0;
    pub const COIN_PICKUP_DIST_SQ: f32 = 1.0;

    /// Decorative pools
    pub const TRAIL_HEIGHT: f32 = 0.05;
    pub const TRAIL_FADE: f32 = 0.01; // per step
    pub const DEATH_PARTICLE_COUNT: usize = 8;
    pub const PARTICLE_FLOOR: f32 = -1.0;
}

/// Squared distance on the ground plane (ignores height)
#[inline]
pub fn ground_distance_sq(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// Point on the ground plane at polar (r, theta), lifted to `height`
#[inline]
pub fn polar_to_ground(r: f32, theta: f32, height: f32) -> Vec3 {
    Vec3::new(r * theta.cos(), height, r * theta.sin())
}

/// Flatten a vector onto the ground plane and normalize it (zero stays zero)
#[inline]
pub fn flat_direction(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}
