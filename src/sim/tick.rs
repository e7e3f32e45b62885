//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation one step. Pools are processed
//! in a fixed order and an entity removed by an earlier pass is gone for
//! every later pass in the same tick.

use glam::Vec3;
use rand::Rng;

use super::collision::{spheres_overlap, within_ground_radius, within_sq};
use super::state::{EnemyKind, EnemyState, GameEvent, GamePhase, GameState, HitSource, PowerUpKind};
use super::steering::{
    advance_coin, advance_projectile, advance_wave, animate_power_up, facing_toward, fade_trail,
    fade_tracer, integrate_particle, intent_from_keys, knock_back, player_step, steer_enemy,
};
use super::{lifecycle, progression, spawner};
use crate::consts::*;
use crate::renderer::{Rgb, Scene};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directional intents (up is -Z)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Aim point on the ground plane (from mouse/touch position)
    pub aim: Option<Vec3>,
    /// Primary action: shoot
    pub fire: bool,
    /// Secondary action: cast the wave skill
    pub cast: bool,
    /// Leave the landing menu
    pub start: bool,
    /// Pause toggle
    pub pause: bool,
    /// Reset and play again
    pub restart: bool,
    /// Reset and return to the landing menu
    pub menu: bool,
    /// Idle/demo mode - AI plays the game
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, scene: &mut dyn Scene, dt: f32) {
    // Wall-clock style timers run in every phase
    state.elapsed += dt;
    progression::expire_effects(state);
    lifecycle::ensure_player_visual(state, scene);

    if input.menu {
        lifecycle::return_to_menu(state, scene);
    } else if input.restart {
        lifecycle::restart(state, scene);
    }
    if input.start {
        lifecycle::start(state);
    }
    if input.pause {
        lifecycle::toggle_pause(state);
    }

    if state.phase != GamePhase::Active {
        return;
    }
    state.time_ticks += 1;

    let mut input = input.clone();
    if input.autopilot {
        autopilot(state, &mut input);
    }

    // Player movement
    let intent = intent_from_keys(input.up, input.down, input.left, input.right);
    if let Some(next) = player_step(state.player.pos, intent, state.player.speed) {
        state.player.pos = next;
        spawner::maybe_spawn_trail(state, scene, next);
    }

    // Enemy spawning
    let speed_multiplier = state.effects.enemy_speed_multiplier;
    if spawner::advance_spawn_timer(&mut state.progress, dt, speed_multiplier) {
        spawner::spawn_enemy(state, scene);
    }

    // Aim, recoil and actions
    if let Some(facing) = input.aim.and_then(|aim| facing_toward(state.player.pos, aim)) {
        state.player.facing = facing;
    }
    state.player.scale = state.player.scale.lerp(Vec3::ONE, 0.1);
    let target = input
        .aim
        .unwrap_or(state.player.pos + state.player.facing * 10.0);
    if input.fire {
        spawner::spawn_projectile(state, scene, target);
    }
    if input.cast {
        progression::try_cast_wave(state, scene, target);
    }

    // Trails
    state.trails.retain_mut(|trail| {
        let alive = fade_trail(trail);
        if !alive {
            trail.visual.release(scene);
        }
        alive
    });

    update_enemies(state, scene, dt);
    if state.player.health == 0 {
        lifecycle::trigger_game_over(state);
        return;
    }

    // Tracers
    state.tracers.retain_mut(|tracer| {
        let alive = fade_tracer(tracer, dt);
        if !alive {
            tracer.visual.release(scene);
        }
        alive
    });

    // Power-ups
    let elapsed = state.elapsed;
    state.power_ups.retain_mut(|power_up| {
        let alive = animate_power_up(power_up, dt, elapsed);
        if !alive {
            power_up.visual.release(scene);
        }
        alive
    });

    update_projectiles(state, scene);

    // Particles
    state.particles.retain_mut(|particle| {
        let alive = integrate_particle(particle, dt);
        if !alive {
            particle.visual.release(scene);
        }
        alive
    });

    progression::tick_cooldown(state, dt);
    update_waves(state, scene);
    update_coins(state, scene, dt);
}

/// Death animations, hit flashes, pursuit and player contact
fn update_enemies(state: &mut GameState, scene: &mut dyn Scene, dt: f32) {
    let player_pos = state.player.pos;
    let speed_multiplier = state.effects.enemy_speed_multiplier;
    let mut trail_spots = Vec::new();
    let mut drops = Vec::new();

    for i in (0..state.enemies.len()).rev() {
        let enemy = &mut state.enemies[i];

        if let EnemyState::Dying { timer } = enemy.state {
            let timer = timer - dt;
            enemy.state = EnemyState::Dying { timer };
            enemy.scale *= 1.05;
            enemy.opacity = (timer * 5.0).max(0.0);
            if timer <= 0.0 {
                let mut dead = state.enemies.remove(i);
                dead.visual.release(scene);
                if dead.drop_power_up {
                    drops.push(dead.pos);
                }
            }
            continue;
        }

        if enemy.hit_timer > 0.0 {
            enemy.hit_timer -= dt;
            if enemy.hit_timer <= 0.0 {
                enemy.hit_timer = 0.0;
                enemy.visual.set_emissive(scene, None);
            }
        }

        steer_enemy(enemy, player_pos, speed_multiplier);
        if state.rng.random::<f32>() < state.tuning.trail_chance {
            trail_spots.push(enemy.pos);
        }

        if within_sq(enemy.pos, player_pos, PLAYER_CONTACT_DIST_SQ) {
            let mut hit = state.enemies.remove(i);
            hit.visual.release(scene);
            state.player.health = state.player.health.saturating_sub(1);
            log::debug!("{:?} enemy {} reached the player", hit.kind, hit.id);
            state.events.push(GameEvent::PlayerHit {
                health: state.player.health,
            });
        }
    }

    for pos in trail_spots {
        spawner::spawn_trail(state, scene, pos);
    }
    for pos in drops {
        spawner::spawn_power_up(state, scene, pos);
    }
}

/// Projectile flight, then at most one collision: enemies first, then power-ups
fn update_projectiles(state: &mut GameState, scene: &mut dyn Scene) {
    let mut tracer_spots = Vec::new();
    let mut kills: Vec<(EnemyKind, Vec3)> = Vec::new();
    let mut collected: Vec<PowerUpKind> = Vec::new();

    for i in (0..state.projectiles.len()).rev() {
        let projectile = &mut state.projectiles[i];
        let in_range = advance_projectile(projectile);
        let (pos, vel) = (projectile.pos, projectile.vel);
        tracer_spots.push(pos);

        if !in_range {
            state.projectiles.remove(i).visual.release(scene);
            continue;
        }

        let hit_enemy = state.enemies.iter().rposition(|enemy| {
            !enemy.is_dying() && spheres_overlap(pos, PROJECTILE_RADIUS, enemy.pos, enemy.radius)
        });
        if let Some(j) = hit_enemy {
            state.projectiles.remove(i).visual.release(scene);

            let enemy = &mut state.enemies[j];
            enemy.health = enemy.health.saturating_sub(1);
            enemy.hit_timer = ENEMY_HIT_FLASH;
            enemy.visual.set_emissive(scene, Some(Rgb::WHITE));
            knock_back(enemy, vel, PROJECTILE_KNOCKBACK);

            if enemy.health == 0 {
                let mut dead = state.enemies.remove(j);
                dead.visual.release(scene);
                kills.push((dead.kind, dead.pos));
                state.events.push(GameEvent::EnemyKilled {
                    kind: dead.kind,
                    source: HitSource::Projectile,
                    pos: dead.pos,
                });
            } else {
                state.events.push(GameEvent::EnemyHit {
                    source: HitSource::Projectile,
                    audible: true,
                });
            }
            continue;
        }

        let hit_power_up = state
            .power_ups
            .iter()
            .rposition(|power_up| spheres_overlap(pos, PROJECTILE_RADIUS, power_up.pos, POWER_UP_RADIUS));
        if let Some(k) = hit_power_up {
            state.projectiles.remove(i).visual.release(scene);
            let mut power_up = state.power_ups.remove(k);
            power_up.visual.release(scene);
            collected.push(power_up.kind);
        }
    }

    for pos in tracer_spots {
        spawner::spawn_tracer(state, scene, pos);
    }
    let points = state.tuning.projectile_kill_points;
    for (kind, pos) in kills {
        confirm_kill(state, scene, kind, pos, points);
        if state.rng.random::<f32>() < state.tuning.power_up_drop_chance {
            spawner::spawn_power_up(state, scene, pos);
        }
    }
    for kind in collected {
        progression::apply_power_up(state, kind);
    }
}

/// Wave flight and area hits against every enemy not already dying
fn update_waves(state: &mut GameState, scene: &mut dyn Scene) {
    let mut kills: Vec<(EnemyKind, Vec3)> = Vec::new();

    for i in (0..state.waves.len()).rev() {
        let wave = &mut state.waves[i];
        if !advance_wave(wave) {
            state.waves.remove(i).visual.release(scene);
            continue;
        }
        let (center, radius, vel) = (wave.pos, wave.hit_radius(), wave.vel);

        for enemy in state.enemies.iter_mut().rev() {
            if enemy.is_dying() || !within_ground_radius(center, radius, enemy.pos) {
                continue;
            }

            let audible = state.rng.random::<f32>() < 0.1;
            enemy.health = enemy.health.saturating_sub(1);
            knock_back(enemy, vel, WAVE_KNOCKBACK);
            enemy.hit_timer = ENEMY_HIT_FLASH;
            enemy.visual.set_emissive(scene, Some(Rgb::CYAN));

            if enemy.health == 0 {
                enemy.state = EnemyState::Dying {
                    timer: ENEMY_DEATH_TIME,
                };
                enemy.drop_power_up =
                    state.rng.random::<f32>() < state.tuning.power_up_drop_chance;
                kills.push((enemy.kind, enemy.pos));
                state.events.push(GameEvent::EnemyKilled {
                    kind: enemy.kind,
                    source: HitSource::Wave,
                    pos: enemy.pos,
                });
            } else {
                state.events.push(GameEvent::EnemyHit {
                    source: HitSource::Wave,
                    audible,
                });
            }
        }
    }

    let points = state.tuning.wave_kill_points;
    for (kind, pos) in kills {
        confirm_kill(state, scene, kind, pos, points);
    }
}

/// Score, kill count, coin and debris for a confirmed kill
fn confirm_kill(state: &mut GameState, scene: &mut dyn Scene, kind: EnemyKind, pos: Vec3, points: u64) {
    progression::add_score(state, points);
    progression::record_kill(state);
    spawner::spawn_coin(state, scene, pos);
    spawner::spawn_death_particles(state, scene, pos, kind.stats().death_color);
}

/// Coin bobbing, homing and pickup
fn update_coins(state: &mut GameState, scene: &mut dyn Scene, dt: f32) {
    if !state.player.visual.is_live() {
        return;
    }
    let player_pos = state.player.pos;
    let elapsed = state.elapsed;

    for i in (0..state.coins.len()).rev() {
        let coin = &mut state.coins[i];
        advance_coin(coin, player_pos, dt, elapsed);
        if within_sq(coin.pos, player_pos, COIN_PICKUP_DIST_SQ) {
            state.coins.remove(i).visual.release(scene);
            let points = state.tuning.coin_points;
            progression::add_score(state, points);
            state.events.push(GameEvent::CoinCollected);
        }
    }
}

/// Demo driver: aim at the closest enemy, shoot on a cadence, cast when
/// crowded and back away from anything too close
fn autopilot(state: &GameState, input: &mut TickInput) {
    let player_pos = state.player.pos;
    let closest = state
        .enemies
        .iter()
        .filter(|enemy| !enemy.is_dying())
        .min_by(|a, b| {
            crate::ground_distance_sq(a.pos, player_pos)
                .partial_cmp(&crate::ground_distance_sq(b.pos, player_pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(enemy) = closest else {
        // Drift back toward the middle
        input.up = player_pos.z > 1.0;
        input.down = player_pos.z < -1.0;
        input.left = player_pos.x > 1.0;
        input.right = player_pos.x < -1.0;
        return;
    };

    input.aim = Some(Vec3::new(enemy.pos.x, 0.0, enemy.pos.z));
    input.fire = state.time_ticks % 12 == 0;

    let dist_sq = crate::ground_distance_sq(enemy.pos, player_pos);
    input.cast = dist_sq < 36.0 && progression::can_cast(state);
    if dist_sq < 64.0 {
        let away = crate::flat_direction(player_pos - enemy.pos);
        input.left = away.x < -0.3;
        input.right = away.x > 0.3;
        input.up = away.z < -0.3;
        input.down = away.z > 0.3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{HeadlessScene, Template, Visual};
    use crate::sim::state::{Enemy, PowerUp, Projectile, Wave};

    fn active_state(seed: u64) -> (GameState, HeadlessScene) {
        let mut state = GameState::new(seed);
        let mut scene = HeadlessScene::new();
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, &mut scene, SIM_DT);
        state.drain_events();
        (state, scene)
    }

    fn place_enemy(state: &mut GameState, scene: &mut HeadlessScene, kind: EnemyKind, pos: Vec3) {
        let id = state.next_entity_id();
        let visual = Visual::spawn(scene, Template::Enemy(kind)).unwrap();
        state.enemies.push(Enemy::new(id, kind, pos, 0.0, visual));
    }

    fn place_projectile(state: &mut GameState, scene: &mut HeadlessScene, pos: Vec3, vel: Vec3) {
        let id = state.next_entity_id();
        let visual = Visual::spawn(scene, Template::Projectile).unwrap();
        state.projectiles.push(Projectile {
            id,
            pos,
            vel,
            traveled: 0.0,
            visual,
        });
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut state = GameState::new(1);
        let mut scene = HeadlessScene::new();
        for _ in 0..300 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Inactive);
        assert!(state.enemies.is_empty());
        assert_eq!(state.time_ticks, 0);
        assert!(state.elapsed > 4.9);
        // Player model is added even on the menu
        assert!(state.player.visual.is_live());
    }

    #[test]
    fn test_first_enemy_after_spawn_interval() {
        let (mut state, mut scene) = active_state(2);
        for _ in 0..80 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert!(state.enemies.is_empty());
        for _ in 0..20 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_unready_enemy_still_resets_timer() {
        let (mut state, mut scene) = active_state(2);
        for kind in EnemyKind::ALL {
            scene.set_ready(Template::Enemy(kind), false);
        }
        for _ in 0..100 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert!(state.enemies.is_empty());
        assert!(state.progress.spawn_timer < state.progress.spawn_interval);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let (mut state, mut scene) = active_state(3);
        place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(10.0, 1.3, 0.0));
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, &mut scene, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        let before = state.enemies[0].pos;
        let ticks = state.time_ticks;
        for _ in 0..60 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert_eq!(state.enemies[0].pos, before);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause, &mut scene, SIM_DT);
        assert_eq!(state.phase, GamePhase::Active);
        assert_ne!(state.enemies[0].pos, before);
    }

    #[test]
    fn test_player_movement() {
        let (mut state, mut scene) = active_state(4);
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &right, &mut scene, SIM_DT);
        }
        assert!((state.player.pos.x - 0.5).abs() < 1e-4);
        assert_eq!(state.player.pos.y, PLAYER_HEIGHT);
    }

    #[test]
    fn test_contact_removes_enemy_and_damages_player() {
        let (mut state, mut scene) = active_state(5);
        place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(1.0, 0.1, 0.0));
        let disposed = scene.disposed_count();

        tick(&mut state, &idle(), &mut scene, SIM_DT);

        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health, 4);
        assert!(state.events.contains(&GameEvent::PlayerHit { health: 4 }));
        assert_eq!(scene.disposed_count(), disposed + 1);
        // Contact is not a kill
        assert_eq!(state.progress.kills, 0);
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_game_over_fires_once_with_simultaneous_contacts() {
        let (mut state, mut scene) = active_state(6);
        state.player.health = 1;
        place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(1.0, 0.1, 0.0));
        place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(-1.0, 0.1, 0.0));

        tick(&mut state, &idle(), &mut scene, SIM_DT);
        tick(&mut state, &idle(), &mut scene, SIM_DT);

        assert_eq!(state.player.health, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }

    #[test]
    fn test_projectile_removed_when_range_crossed() {
        let (mut state, mut scene) = active_state(7);
        place_projectile(&mut state, &mut scene, Vec3::new(0.0, 1.1, 0.0), Vec3::new(0.0, 0.0, 0.5));
        state.projectiles[0].traveled = 99.8;

        tick(&mut state, &idle(), &mut scene, SIM_DT);
        assert!(state.projectiles.is_empty());
        // The final step still leaves a tracer
        assert_eq!(state.tracers.len(), 1);
    }

    #[test]
    fn test_projectile_kill() {
        let (mut state, mut scene) = active_state(8);
        place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(10.0, 1.3, 0.0));
        place_projectile(&mut state, &mut scene, Vec3::new(9.0, 1.1, 0.0), Vec3::new(0.5, 0.0, 0.0));

        tick(&mut state, &idle(), &mut scene, SIM_DT);

        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.progress.score, 10);
        assert_eq!(state.progress.kills, 1);
        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.particles.len(), DEATH_PARTICLE_COUNT);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyKilled {
                source: HitSource::Projectile,
                ..
            }
        )));
    }

    #[test]
    fn test_tank_takes_three_hits() {
        let (mut state, mut scene) = active_state(9);
        place_enemy(&mut state, &mut scene, EnemyKind::Tank, Vec3::new(10.0, 1.3, 0.0));
        place_projectile(&mut state, &mut scene, Vec3::new(9.0, 1.1, 0.0), Vec3::new(0.5, 0.0, 0.0));

        tick(&mut state, &idle(), &mut scene, SIM_DT);

        let tank = &state.enemies[0];
        assert_eq!(tank.health, 2);
        assert!(tank.hit_timer > 0.0);
        assert!(tank.pos.x > 10.0);
        let handle = tank.visual.handle().unwrap();
        assert_eq!(scene.visual(handle).unwrap().emissive, Some(Rgb::WHITE));

        // Flash clears after 0.1 s
        for _ in 0..7 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert_eq!(scene.visual(handle).unwrap().emissive, None);
    }

    #[test]
    fn test_projectile_collects_power_up() {
        let (mut state, mut scene) = active_state(10);
        let id = state.next_entity_id();
        let visual = Visual::spawn(&mut scene, Template::PowerUp(PowerUpKind::RapidFire)).unwrap();
        state.power_ups.push(PowerUp {
            id,
            kind: PowerUpKind::RapidFire,
            pos: Vec3::new(5.0, POWER_UP_HEIGHT, 0.0),
            life: POWER_UP_LIFE,
            rotation_speed: 1.0,
            rotation: 0.0,
            aura_scale: 1.6,
            aura_opacity: 0.3,
            visible: true,
            visual,
        });
        place_projectile(&mut state, &mut scene, Vec3::new(4.0, 1.1, 0.0), Vec3::new(0.5, 0.0, 0.0));

        tick(&mut state, &idle(), &mut scene, SIM_DT);

        assert!(state.power_ups.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.effects.projectile_speed, 0.9);
    }

    #[test]
    fn test_enemy_killed_by_projectile_is_not_hit_by_wave() {
        let (mut state, mut scene) = active_state(11);
        place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(10.0, 1.3, 0.0));
        place_projectile(&mut state, &mut scene, Vec3::new(9.0, 1.1, 0.0), Vec3::new(0.5, 0.0, 0.0));
        let id = state.next_entity_id();
        let visual = Visual::spawn(&mut scene, Template::Wave).unwrap();
        state.waves.push(Wave {
            id,
            pos: Vec3::new(10.0, WAVE_HEIGHT, 0.0),
            vel: Vec3::ZERO,
            scale: 1.0,
            opacity: WAVE_START_OPACITY,
            visual,
        });

        tick(&mut state, &idle(), &mut scene, SIM_DT);

        assert_eq!(state.progress.kills, 1);
        assert_eq!(state.progress.score, 10);
    }

    #[test]
    fn test_cast_wave_kills_into_dying() {
        let (mut state, mut scene) = active_state(12);
        state.progress.skill_unlocked = true;
        place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(2.0, 1.3, 0.0));
        let cast = TickInput {
            cast: true,
            aim: Some(Vec3::new(10.0, 0.0, 0.0)),
            ..Default::default()
        };

        tick(&mut state, &cast, &mut scene, SIM_DT);
        assert_eq!(state.waves.len(), 1);
        // Heads for the aim point along the ground
        let player = state.player.pos;
        let to_aim = Vec3::new(10.0 - player.x, 0.0, -player.z).normalize();
        let wave = &state.waves[0];
        assert_eq!(wave.vel.y, 0.0);
        assert!((wave.vel.normalize() - to_aim).length() < 1e-5);
        assert!((wave.vel.length() - WAVE_SPEED).abs() < 1e-6);
        // Reset to 5 s, then counted down once in the same tick
        assert!((state.progress.skill_cooldown - (5.0 - SIM_DT)).abs() < 1e-5);
        assert!(state.enemies[0].is_dying());
        assert_eq!(state.progress.score, 40);

        // Second cast during cooldown does nothing
        tick(&mut state, &cast, &mut scene, SIM_DT);
        assert_eq!(state.waves.len(), 1);

        // Death animation finishes
        for _ in 0..10 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert!(state.enemies.is_empty());
        assert_eq!(state.progress.kills, 1);
    }

    #[test]
    fn test_ten_projectile_kills_level_up() {
        let (mut state, mut scene) = active_state(15);
        for _ in 0..10 {
            place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(10.0, 1.3, 0.0));
            place_projectile(&mut state, &mut scene, Vec3::new(9.0, 1.1, 0.0), Vec3::new(0.5, 0.0, 0.0));
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }

        assert_eq!(state.progress.level, 2);
        assert_eq!(state.progress.kills, 0);
        assert_eq!(state.progress.kills_to_next, 15);
        assert!((state.progress.spawn_interval - 0.8).abs() < 1e-6);
        let level_ups: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .collect();
        assert_eq!(level_ups, vec![&GameEvent::LevelUp { level: 2 }]);
    }

    #[test]
    fn test_wave_kills_cross_level_threshold_once() {
        let (mut state, mut scene) = active_state(16);
        state.progress.skill_unlocked = true;
        state.progress.kills = 8;
        for z in [-1.0, -0.5, 0.0, 0.5, 1.0] {
            place_enemy(&mut state, &mut scene, EnemyKind::Normal, Vec3::new(2.0, 1.3, z));
        }
        let cast = TickInput {
            cast: true,
            aim: Some(Vec3::new(10.0, 0.0, 0.0)),
            ..Default::default()
        };

        tick(&mut state, &cast, &mut scene, SIM_DT);

        assert!(state.enemies.iter().all(|e| e.is_dying()));
        assert_eq!(state.progress.level, 2);
        assert_eq!(state.progress.kills, 3);
        let level_ups = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .count();
        assert_eq!(level_ups, 1);
    }

    #[test]
    fn test_coin_pickup() {
        let (mut state, mut scene) = active_state(13);
        spawner::spawn_coin(&mut state, &mut scene, Vec3::new(2.0, 1.3, 0.0));
        for _ in 0..120 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert!(state.coins.is_empty());
        assert_eq!(state.progress.score, 100);
        assert!(state.events.contains(&GameEvent::CoinCollected));
    }

    #[test]
    fn test_rapid_fire_expires_during_pause() {
        let (mut state, mut scene) = active_state(14);
        progression::apply_power_up(&mut state, PowerUpKind::RapidFire);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, &mut scene, SIM_DT);
        for _ in 0..240 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert_eq!(state.effects.projectile_speed, 0.9);
        for _ in 0..60 {
            tick(&mut state, &idle(), &mut scene, SIM_DT);
        }
        assert_eq!(state.effects.projectile_speed, 0.5);
    }

    #[test]
    fn test_restart_clears_pools() {
        let (mut state, mut scene) = active_state(15);
        let auto = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &auto, &mut scene, SIM_DT);
        }
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, &mut scene, SIM_DT);
        assert_eq!(state.phase, GamePhase::Active);
        // Only what the restart tick itself created can be live
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.progress.score, 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let (mut state1, mut scene1) = active_state(99999);
        let (mut state2, mut scene2) = active_state(99999);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        for _ in 0..1200 {
            tick(&mut state1, &input, &mut scene1, SIM_DT);
            tick(&mut state2, &input, &mut scene2, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.progress, state2.progress);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.health, state2.player.health);
    }
}
