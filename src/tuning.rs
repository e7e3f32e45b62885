//! Data-driven game balance
//!
//! Everything a designer may want to tweak without touching the simulation.
//! The per-archetype enemy table is fixed data on [`crate::sim::EnemyKind`]
//! and deliberately not part of this struct.

use serde::{Deserialize, Serialize};

/// Balance values consumed by the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scoring ===
    /// Multiplier applied to every score gain
    pub combo: u64,
    /// Points for a projectile kill
    pub projectile_kill_points: u64,
    /// Points for a wave kill
    pub wave_kill_points: u64,
    /// Points for a collected coin
    pub coin_points: u64,
    /// Points for a Heal collected at full health with the skill unlocked
    pub wasted_heal_points: u64,

    // === Player ===
    pub max_health: u32,

    // === Progression ===
    pub kills_to_first_level: u32,
    pub kills_increment_per_level: u32,
    /// Spawn interval before the first level-up (seconds)
    pub initial_spawn_interval: f32,

    // === Drops ===
    pub power_up_drop_chance: f32,
    pub trail_chance: f32,

    // === Skill ===
    pub skill_stacks_required: u32,
    pub wave_cooldown: f32,

    // === Timed effects ===
    pub base_projectile_speed: f32,
    pub rapid_fire_projectile_speed: f32,
    pub rapid_fire_duration: f32,
    pub slow_time_multiplier: f32,
    pub slow_time_duration: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            combo: 2,
            projectile_kill_points: 5,
            wave_kill_points: 20,
            coin_points: 50,
            wasted_heal_points: 100,

            max_health: 5,

            kills_to_first_level: 10,
            kills_increment_per_level: 5,
            initial_spawn_interval: 1.5,

            power_up_drop_chance: 0.15,
            trail_chance: 0.15,

            skill_stacks_required: 5,
            wave_cooldown: 5.0,

            base_projectile_speed: 0.5,
            rapid_fire_projectile_speed: 0.9,
            rapid_fire_duration: 5.0,
            slow_time_multiplier: 0.3,
            slow_time_duration: 4.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(err) => {
                    log::warn!("Invalid tuning in {}: {}, using defaults", path.display(), err);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Spawn interval for a level (monotonically decreasing, floored at 0.3s)
    pub fn spawn_interval_for_level(level: u32) -> f32 {
        (1.0 - level as f32 * 0.1).max(0.3)
    }
}
