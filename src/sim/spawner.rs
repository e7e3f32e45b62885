//! Spawn policy
//!
//! Decides when and what to create, and instantiates entities into their
//! pools. A model template that has not finished loading skips the spawn.

use glam::{Vec2, Vec3};
use rand::Rng;

use super::state::{
    Coin, Enemy, EnemyKind, GameEvent, GameState, Particle, PowerUp, PowerUpKind, Progress,
    Projectile, Trail, Tracer, Wave,
};
use crate::consts::*;
use crate::renderer::{Rgb, Scene, Template, Visual};
use crate::{flat_direction, polar_to_ground};

/// Layered archetype roll. Checks run in a fixed order and a later
/// successful check overwrites an earlier one. A gate below its level does
/// not consume a random number.
pub fn roll_enemy_kind(level: u32, rng: &mut impl Rng) -> EnemyKind {
    let mut kind = EnemyKind::Normal;
    if level >= 2 && rng.random::<f32>() < 0.3 {
        kind = EnemyKind::Fast;
    }
    if level >= 3 && rng.random::<f32>() < 0.4 {
        kind = EnemyKind::ZigZag;
    }
    if level >= 4 && rng.random::<f32>() < 0.2 {
        kind = EnemyKind::Tank;
    }
    kind
}

/// Uniform angle, radius in [30, 50) on the outer ring
pub fn spawn_ring_position(rng: &mut impl Rng) -> Vec3 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let distance = rng.random_range(SPAWN_RING_MIN..SPAWN_RING_MAX);
    polar_to_ground(distance, angle, ENEMY_HEIGHT)
}

/// Advance the spawn timer (scaled by the enemy speed multiplier). Returns
/// true and resets the timer when an enemy is due.
pub fn advance_spawn_timer(progress: &mut Progress, dt: f32, speed_multiplier: f32) -> bool {
    progress.spawn_timer += dt * speed_multiplier;
    if progress.spawn_timer >= progress.spawn_interval {
        progress.spawn_timer = 0.0;
        true
    } else {
        false
    }
}

/// Spawn one enemy on the outer ring. Returns its id, or `None` when the
/// archetype's model is not loaded yet.
pub fn spawn_enemy(state: &mut GameState, scene: &mut dyn Scene) -> Option<u32> {
    let pos = spawn_ring_position(&mut state.rng);
    let kind = roll_enemy_kind(state.progress.level, &mut state.rng);
    let strafe_offset = state.rng.random_range(0.0..std::f32::consts::TAU);

    let visual = Visual::spawn(scene, Template::Enemy(kind))?;
    if let Some(tint) = kind.stats().tint {
        visual.set_color(scene, tint);
    }

    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, kind, pos, strafe_offset, visual));
    log::debug!("Spawned {:?} enemy {} at ({:.1}, {:.1})", kind, id, pos.x, pos.z);
    Some(id)
}

/// Drop a random power-up at `pos`. A kind whose model is not loaded falls
/// back to the procedural sphere.
pub fn spawn_power_up(state: &mut GameState, scene: &mut dyn Scene, pos: Vec3) {
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let template = if scene.template_ready(Template::PowerUp(kind)) {
        Template::PowerUp(kind)
    } else {
        Template::PowerUpFallback(kind)
    };
    let Some(visual) = Visual::spawn(scene, template) else {
        return;
    };

    let id = state.next_entity_id();
    let rotation_speed = 1.0 + state.rng.random::<f32>();
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos: Vec3::new(pos.x, POWER_UP_HEIGHT, pos.z),
        life: POWER_UP_LIFE,
        rotation_speed,
        rotation: 0.0,
        aura_scale: kind.aura_base_scale(),
        aura_opacity: 0.3,
        visible: true,
        visual,
    });
}

/// Drop a coin at `pos` (skipped until the coin model is loaded)
pub fn spawn_coin(state: &mut GameState, scene: &mut dyn Scene, pos: Vec3) {
    let Some(visual) = Visual::spawn(scene, Template::Coin) else {
        return;
    };
    let id = state.next_entity_id();
    let bob_offset = state.rng.random::<f32>() * std::f32::consts::PI;
    state.coins.push(Coin {
        id,
        pos: Vec3::new(pos.x, COIN_SPAWN_HEIGHT, pos.z),
        rotation: 0.0,
        bob_offset,
        magnet_delay: COIN_MAGNET_DELAY,
        fly_speed: 0.0,
        visual,
    });
}

/// Burst of debris where an enemy died
pub fn spawn_death_particles(state: &mut GameState, scene: &mut dyn Scene, pos: Vec3, color: Rgb) {
    for _ in 0..DEATH_PARTICLE_COUNT {
        let Some(visual) = Visual::spawn(scene, Template::Particle) else {
            return;
        };
        visual.set_color(scene, color);

        let rng = &mut state.rng;
        let origin = Vec3::new(
            pos.x + (rng.random::<f32>() - 0.5) * 0.5,
            pos.y + 0.5,
            pos.z + (rng.random::<f32>() - 0.5) * 0.5,
        );
        let vel = Vec3::new(
            (rng.random::<f32>() - 0.5) * 0.3,
            rng.random::<f32>() * 0.5 + 0.1,
            (rng.random::<f32>() - 0.5) * 0.1,
        );
        let spin = Vec2::new(
            (rng.random::<f32>() - 0.5) * 10.0,
            (rng.random::<f32>() - 0.5) * 10.0,
        );

        state.particles.push(Particle {
            pos: origin,
            vel,
            life: 1.0,
            spin,
            rotation: Vec2::ZERO,
            scale: 1.0,
            visual,
        });
    }
}

/// Water ripple at `pos`
pub fn spawn_trail(state: &mut GameState, scene: &mut dyn Scene, pos: Vec3) {
    let Some(visual) = Visual::spawn(scene, Template::Trail) else {
        return;
    };
    state.trails.push(Trail {
        pos: Vec3::new(pos.x, TRAIL_HEIGHT, pos.z),
        life: 1.0,
        scale: 1.0,
        visual,
    });
}

/// Ripple with the configured per-step chance
pub fn maybe_spawn_trail(state: &mut GameState, scene: &mut dyn Scene, pos: Vec3) {
    if state.rng.random::<f32>() < state.tuning.trail_chance {
        spawn_trail(state, scene, pos);
    }
}

/// Afterimage at a projectile's position
pub fn spawn_tracer(state: &mut GameState, scene: &mut dyn Scene, pos: Vec3) {
    let Some(visual) = Visual::spawn(scene, Template::Tracer) else {
        return;
    };
    if state.effects.rapid_fire() {
        visual.set_color(scene, Rgb::RED);
    }
    state.tracers.push(Tracer {
        pos,
        life: TRACER_START_LIFE,
        scale: TRACER_START_SCALE,
        visual,
    });
}

/// Fire from one unit ahead of the player toward `target` (flat trajectory).
/// Returns false when the player model is not in the scene yet.
pub fn spawn_projectile(state: &mut GameState, scene: &mut dyn Scene, target: Vec3) -> bool {
    if !state.player.visual.is_live() {
        return false;
    }
    let Some(visual) = Visual::spawn(scene, Template::Projectile) else {
        return false;
    };

    let rapid_fire = state.effects.rapid_fire();
    if rapid_fire {
        visual.set_color(scene, Rgb::RED);
        visual.set_emissive(scene, Some(Rgb::RED));
    }

    let player = &mut state.player;
    let pos = player.pos + player.facing + Vec3::Y;
    let mut dir = flat_direction(target - pos);
    if dir == Vec3::ZERO {
        dir = player.facing;
    }
    player.scale = Vec3::new(1.3, 0.8, 1.3);

    let id = state.next_entity_id();
    state.projectiles.push(Projectile {
        id,
        pos,
        vel: dir * state.effects.projectile_speed,
        traveled: 0.0,
        visual,
    });
    state.events.push(GameEvent::Shot { rapid_fire });
    true
}

/// Launch a wave from the player toward `target`
pub fn spawn_wave(state: &mut GameState, scene: &mut dyn Scene, target: Vec3) -> bool {
    let Some(visual) = Visual::spawn(scene, Template::Wave) else {
        return false;
    };
    let origin = state.player.pos;
    let mut dir = flat_direction(target - origin);
    if dir == Vec3::ZERO {
        dir = state.player.facing;
    }

    let id = state.next_entity_id();
    state.waves.push(Wave {
        id,
        pos: Vec3::new(origin.x, WAVE_HEIGHT, origin.z),
        vel: dir * WAVE_SPEED,
        scale: 1.0,
        opacity: WAVE_START_OPACITY,
        visual,
    });
    true
}
