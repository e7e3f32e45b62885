//! Movement and kinematics
//!
//! Per-step position updates. Speeds and growth factors are per fixed step;
//! countdowns use `dt`.

use glam::Vec3;

use super::collision::inside_arena;
use super::state::{Coin, Enemy, EnemyKind, Particle, PowerUp, Projectile, Trail, Tracer, Wave};
use crate::consts::*;

/// Directional intent on the ground plane from four booleans (-Z is up)
pub fn intent_from_keys(up: bool, down: bool, left: bool, right: bool) -> Vec3 {
    let mut intent = Vec3::ZERO;
    if up {
        intent.z -= 1.0;
    }
    if down {
        intent.z += 1.0;
    }
    if left {
        intent.x -= 1.0;
    }
    if right {
        intent.x += 1.0;
    }
    intent
}

/// Tentative player move. Returns the new position, or `None` when there is
/// no intent or the move would leave the arena (the whole move is rejected).
pub fn player_step(pos: Vec3, intent: Vec3, speed: f32) -> Option<Vec3> {
    if intent.length_squared() == 0.0 {
        return None;
    }
    let candidate = pos + intent.normalize() * speed;
    inside_arena(candidate).then_some(candidate)
}

/// Unit direction on the ground plane from the player toward the aim point
pub fn facing_toward(from: Vec3, target: Vec3) -> Option<Vec3> {
    let dir = crate::flat_direction(target - from);
    (dir != Vec3::ZERO).then_some(dir)
}

/// Steering vector for one enemy step (before speed scaling)
///
/// ZigZag perturbs the pursuit direction with a shear rather than a true
/// rotation; the z update reads the already-sheared x.
pub fn enemy_direction(kind: EnemyKind, pos: Vec3, player_pos: Vec3, strafe_offset: f32) -> Vec3 {
    let mut dir = (player_pos - pos).normalize_or_zero();
    if kind == EnemyKind::ZigZag {
        let shear = strafe_offset.sin() * ZIGZAG_STRAFE_AMPLITUDE;
        dir.x += -dir.z * shear;
        dir.z += dir.x * shear;
    }
    dir
}

/// Move a live enemy one step toward the player
pub fn steer_enemy(enemy: &mut Enemy, player_pos: Vec3, speed_multiplier: f32) {
    if enemy.kind == EnemyKind::ZigZag {
        enemy.strafe_offset += enemy.strafe_speed;
    }
    let dir = enemy_direction(enemy.kind, enemy.pos, player_pos, enemy.strafe_offset);
    enemy.pos += dir * (enemy.speed * speed_multiplier);
    if let Some(facing) = facing_toward(enemy.pos, player_pos) {
        enemy.facing = facing;
    }
}

/// Push an enemy along the direction of the hit
pub fn knock_back(enemy: &mut Enemy, hit_velocity: Vec3, distance: f32) {
    enemy.pos += hit_velocity.normalize_or_zero() * distance;
}

/// Advance a projectile; returns false once it has exceeded its range
pub fn advance_projectile(projectile: &mut Projectile) -> bool {
    projectile.pos += projectile.vel;
    projectile.traveled += projectile.vel.length();
    projectile.traveled <= PROJECTILE_MAX_RANGE
}

/// Fade a tracer; returns false when it is spent
pub fn fade_tracer(tracer: &mut Tracer, dt: f32) -> bool {
    tracer.life -= dt * 8.0;
    tracer.scale *= 0.9;
    tracer.life > 0.0
}

/// Grow and fade a trail ripple; returns false when it is spent
pub fn fade_trail(trail: &mut Trail) -> bool {
    trail.life -= TRAIL_FADE;
    trail.scale *= 1.01;
    trail.life > 0.0
}

/// Ballistic debris; returns false when faded out or below the floor
pub fn integrate_particle(particle: &mut Particle, dt: f32) -> bool {
    particle.life -= dt * 1.5;
    particle.vel.y -= dt * 0.5;
    particle.pos += particle.vel;
    particle.rotation += particle.spin * dt;
    particle.scale *= 0.95;
    particle.life > 0.0 && particle.pos.y >= PARTICLE_FLOOR
}

/// Count down and animate a power-up; returns false when it expires
pub fn animate_power_up(power_up: &mut PowerUp, dt: f32, elapsed: f32) -> bool {
    power_up.life -= dt;
    if power_up.life <= 0.0 {
        return false;
    }

    power_up.visible = if power_up.life < POWER_UP_BLINK_BELOW {
        (elapsed * 20.0).sin() > -0.5
    } else {
        true
    };

    power_up.rotation += power_up.rotation_speed * dt;
    let pulse = 1.1 + (elapsed * 3.0).sin() * 0.2;
    power_up.aura_scale = pulse * power_up.kind.aura_base_scale();
    power_up.aura_opacity = 0.3 + (elapsed * 3.0).sin() * 0.1;
    true
}

/// Move a wave: grow while advancing, then fade in place. Returns false
/// once fully faded.
pub fn advance_wave(wave: &mut Wave) -> bool {
    if wave.is_growing() {
        wave.pos += wave.vel;
        wave.scale *= WAVE_GROWTH;
    } else {
        wave.opacity -= WAVE_FADE;
        if wave.opacity <= 0.0 {
            return false;
        }
    }
    true
}

/// Bob in place, then accelerate toward the player
pub fn advance_coin(coin: &mut Coin, player_pos: Vec3, dt: f32, elapsed: f32) {
    coin.rotation += COIN_SPIN * dt;

    if coin.magnet_delay > 0.0 {
        coin.magnet_delay -= dt;
        coin.pos.y = 1.0 + (elapsed * 3.0 + coin.bob_offset).sin() * 0.2;
    } else {
        let dir = (player_pos - coin.pos).normalize_or_zero();
        coin.fly_speed += dt * COIN_ACCELERATION;
        coin.pos += dir * (coin.fly_speed * dt);
    }
}
