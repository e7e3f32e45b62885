//! Game state and core simulation types
//!
//! One owned [`GameState`] aggregate holds every pool, the player singleton,
//! progression counters and the run's RNG. Components are plain functions
//! over this state.

use glam::{Vec2, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::{Rgb, Visual};
use crate::tuning::Tuning;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Landing menu, nothing simulates
    Inactive,
    /// Active gameplay
    Active,
    /// Game is paused
    Paused,
    /// Health reached zero
    GameOver,
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Normal,
    Fast,
    Tank,
    ZigZag,
}

/// Fixed per-archetype stats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    /// Units per step
    pub speed: f32,
    pub health: u32,
    /// Hit radius
    pub radius: f32,
    /// Visual scale multiplier
    pub scale: f32,
    /// Body tint (`None` keeps the model's texture)
    pub tint: Option<Rgb>,
    /// Debris color on death
    pub death_color: Rgb,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Normal,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::ZigZag,
    ];

    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Normal => EnemyStats {
                speed: 0.04,
                health: 1,
                radius: 1.5,
                scale: 1.0,
                tint: None,
                death_color: Rgb::RED,
            },
            EnemyKind::Fast => EnemyStats {
                speed: 0.07,
                health: 1,
                radius: 1.5,
                scale: 1.0,
                tint: Some(Rgb::ORANGE),
                death_color: Rgb::ORANGE,
            },
            EnemyKind::Tank => EnemyStats {
                speed: 0.02,
                health: 3,
                radius: 1.2,
                scale: 1.5,
                tint: Some(Rgb::DARK_GREY),
                death_color: Rgb::DARK_GREY,
            },
            EnemyKind::ZigZag => EnemyStats {
                speed: 0.04,
                health: 1,
                radius: 1.5,
                scale: 1.0,
                tint: None,
                death_color: Rgb::RED,
            },
        }
    }
}

/// The player's avatar
#[derive(Debug)]
pub struct Player {
    pub pos: Vec3,
    pub health: u32,
    pub max_health: u32,
    /// Units per step
    pub speed: f32,
    /// Unit vector on the ground plane toward the aim point
    pub facing: Vec3,
    /// Squash-and-stretch scale (recoil)
    pub scale: Vec3,
    pub visual: Visual,
}

impl Player {
    pub fn new(max_health: u32) -> Self {
        Self {
            pos: Vec3::new(0.0, PLAYER_HEIGHT, 0.0),
            health: max_health,
            max_health,
            speed: PLAYER_SPEED,
            facing: Vec3::X,
            scale: Vec3::ONE,
            visual: Visual::none(),
        }
    }

    pub fn is_full_health(&self) -> bool {
        self.health >= self.max_health
    }
}

/// Enemy hit state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyState {
    Alive,
    /// Death animation; removed when the timer runs out
    Dying { timer: f32 },
}

/// An enemy entity
#[derive(Debug)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec3,
    pub health: u32,
    pub speed: f32,
    pub radius: f32,
    /// ZigZag oscillator phase
    pub strafe_offset: f32,
    pub strafe_speed: f32,
    /// Remaining hit-flash time (visual only)
    pub hit_timer: f32,
    pub state: EnemyState,
    /// Spawn a power-up when the death animation finishes
    pub drop_power_up: bool,
    /// Unit vector toward the player
    pub facing: Vec3,
    pub scale: f32,
    pub opacity: f32,
    pub visual: Visual,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec3, strafe_offset: f32, visual: Visual) -> Self {
        let stats = kind.stats();
        Self {
            id,
            kind,
            pos,
            health: stats.health,
            speed: stats.speed,
            radius: stats.radius,
            strafe_offset,
            strafe_speed: ZIGZAG_STRAFE_SPEED,
            hit_timer: 0.0,
            state: EnemyState::Alive,
            drop_power_up: false,
            facing: Vec3::X,
            scale: stats.scale,
            opacity: 1.0,
            visual,
        }
    }

    pub fn is_dying(&self) -> bool {
        matches!(self.state, EnemyState::Dying { .. })
    }
}

/// A player projectile
#[derive(Debug)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    /// Units per step
    pub vel: Vec3,
    pub traveled: f32,
    pub visual: Visual,
}

/// Cosmetic afterimage left behind a projectile
#[derive(Debug)]
pub struct Tracer {
    pub pos: Vec3,
    pub life: f32,
    pub scale: f32,
    pub visual: Visual,
}

impl Tracer {
    /// Opacity follows life, capped at fully opaque
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

/// Death debris
#[derive(Debug)]
pub struct Particle {
    pub pos: Vec3,
    /// Units per step
    pub vel: Vec3,
    /// 1 -> 0
    pub life: f32,
    /// Spin around X and Y (radians per second)
    pub spin: Vec2,
    pub rotation: Vec2,
    pub scale: f32,
    pub visual: Visual,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Heal,
    RapidFire,
    SlowTime,
}

impl PowerUpKind {
    /// Order used for the uniform drop roll
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::RapidFire,
        PowerUpKind::Heal,
        PowerUpKind::SlowTime,
    ];

    pub fn glow_color(self) -> Rgb {
        match self {
            PowerUpKind::Heal => Rgb(0x00ff00),
            PowerUpKind::RapidFire => Rgb(0xffaa00),
            PowerUpKind::SlowTime => Rgb(0x00aaff),
        }
    }

    /// Aura compensation (the rapid-fire model is smaller)
    pub fn aura_base_scale(self) -> f32 {
        match self {
            PowerUpKind::RapidFire => 1.6,
            _ => 1.0,
        }
    }
}

/// A collectible power-up
#[derive(Debug)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec3,
    /// Seconds until it disappears
    pub life: f32,
    /// Radians per second around Y
    pub rotation_speed: f32,
    pub rotation: f32,
    pub aura_scale: f32,
    pub aura_opacity: f32,
    /// Blink state
    pub visible: bool,
    pub visual: Visual,
}

/// Water ripple behind moving entities
#[derive(Debug)]
pub struct Trail {
    pub pos: Vec3,
    /// 1 -> 0
    pub life: f32,
    pub scale: f32,
    pub visual: Visual,
}

impl Trail {
    pub fn opacity(&self) -> f32 {
        (self.life * 0.4).max(0.0)
    }
}

/// The area skill projectile (C-shaped arc)
#[derive(Debug)]
pub struct Wave {
    pub id: u32,
    pub pos: Vec3,
    /// Units per step
    pub vel: Vec3,
    pub scale: f32,
    pub opacity: f32,
    pub visual: Visual,
}

impl Wave {
    /// Whether the wave is still growing (vs. fading in place)
    pub fn is_growing(&self) -> bool {
        self.scale < WAVE_MAX_SCALE
    }

    /// Hit radius on the ground plane
    pub fn hit_radius(&self) -> f32 {
        WAVE_BASE_RADIUS * self.scale
    }
}

/// Currency dropped by a kill
#[derive(Debug)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec3,
    pub rotation: f32,
    pub bob_offset: f32,
    /// Seconds left in the waiting phase
    pub magnet_delay: f32,
    /// Homing speed (units per second), grows while homing
    pub fly_speed: f32,
    pub visual: Visual,
}

impl Coin {
    pub fn is_homing(&self) -> bool {
        self.magnet_delay <= 0.0
    }
}

/// Level, score and skill counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub level: u32,
    pub kills: u32,
    pub kills_to_next: u32,
    pub score: u64,
    pub combo: u64,
    /// Seconds between enemy spawns
    pub spawn_interval: f32,
    pub spawn_timer: f32,
    pub skill_stacks: u32,
    pub skill_unlocked: bool,
    /// Seconds until the wave skill can be cast again
    pub skill_cooldown: f32,
}

impl Progress {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            level: 1,
            kills: 0,
            kills_to_next: tuning.kills_to_first_level,
            score: 0,
            combo: tuning.combo,
            spawn_interval: tuning.initial_spawn_interval,
            spawn_timer: 0.0,
            skill_stacks: 0,
            skill_unlocked: false,
            skill_cooldown: 0.0,
        }
    }
}

/// Transient power-up effects, expressed as deadlines on `GameState::elapsed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub projectile_speed: f32,
    pub rapid_fire_until: Option<f32>,
    pub enemy_speed_multiplier: f32,
    pub slow_time_until: Option<f32>,
}

impl ActiveEffects {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            projectile_speed: tuning.base_projectile_speed,
            rapid_fire_until: None,
            enemy_speed_multiplier: 1.0,
            slow_time_until: None,
        }
    }

    pub fn rapid_fire(&self) -> bool {
        self.rapid_fire_until.is_some()
    }
}

/// What hit an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitSource {
    Projectile,
    Wave,
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    Shot { rapid_fire: bool },
    WaveCast,
    /// `audible` is false for throttled wave hits
    EnemyHit { source: HitSource, audible: bool },
    EnemyKilled { kind: EnemyKind, source: HitSource, pos: Vec3 },
    PlayerHit { health: u32 },
    GameOver { score: u64 },
    PowerUpCollected { kind: PowerUpKind },
    Healed { health: u32 },
    SkillCharged { stacks: u32, required: u32 },
    SkillUnlocked,
    BonusScore { points: u64 },
    CoinCollected,
    LevelUp { level: u32 },
    EffectExpired { kind: PowerUpKind },
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Seconds since process start, advances even when not Active
    pub elapsed: f32,
    /// Active simulation steps
    pub time_ticks: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub tracers: Vec<Tracer>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub trails: Vec<Trail>,
    pub waves: Vec<Wave>,
    pub coins: Vec<Coin>,
    pub progress: Progress,
    pub effects: ActiveEffects,
    /// Guards the game-over transition
    pub game_over_fired: bool,
    /// Events emitted since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(tuning.max_health),
            progress: Progress::new(&tuning),
            effects: ActiveEffects::new(&tuning),
            tuning,
            phase: GamePhase::Inactive,
            elapsed: 0.0,
            time_ticks: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            tracers: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            trails: Vec::new(),
            waves: Vec::new(),
            coins: Vec::new(),
            game_over_fired: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Live instances across every pool
    pub fn pooled_count(&self) -> usize {
        self.enemies.len()
            + self.projectiles.len()
            + self.tracers.len()
            + self.particles.len()
            + self.power_ups.len()
            + self.trails.len()
            + self.waves.len()
            + self.coins.len()
    }
}
