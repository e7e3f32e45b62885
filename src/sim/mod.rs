//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pool order, newest last)
//! - No rendering internals: visuals go through the [`Scene`](crate::renderer::Scene) traits

pub mod collision;
pub mod lifecycle;
pub mod progression;
pub mod spawner;
pub mod state;
pub mod steering;
pub mod tick;

pub use collision::{inside_arena, spheres_overlap, within_ground_radius, within_sq};
pub use state::{
    ActiveEffects, Coin, Enemy, EnemyKind, EnemyState, EnemyStats, GameEvent, GamePhase,
    GameState, HitSource, Particle, Player, PowerUp, PowerUpKind, Progress, Projectile, Trail,
    Tracer, Wave,
};
pub use tick::{TickInput, tick};
