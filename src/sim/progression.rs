//! Score, levels, power-up effects and the wave skill
//!
//! Every score gain goes through [`add_score`] so the combo multiplier is
//! applied in one place. Timed effects are deadlines on `GameState::elapsed`.

use glam::Vec3;

use super::spawner;
use super::state::{GameEvent, GameState, PowerUpKind};
use crate::renderer::Scene;
use crate::tuning::Tuning;

/// Add `points` times the combo multiplier. Returns the amount awarded.
pub fn add_score(state: &mut GameState, points: u64) -> u64 {
    let awarded = points * state.progress.combo;
    state.progress.score += awarded;
    awarded
}

/// Count a confirmed kill and level up when the threshold is reached
pub fn record_kill(state: &mut GameState) {
    state.progress.kills += 1;
    if state.progress.kills >= state.progress.kills_to_next {
        level_up(state);
    }
}

/// Advance one level: reset the kill counter, raise the threshold and
/// shorten the spawn interval
pub fn level_up(state: &mut GameState) {
    let progress = &mut state.progress;
    progress.level += 1;
    progress.kills = 0;
    progress.kills_to_next += state.tuning.kills_increment_per_level;
    progress.spawn_interval = Tuning::spawn_interval_for_level(progress.level);

    log::info!(
        "Level {} (next at {} kills, spawn every {:.2}s)",
        progress.level,
        progress.kills_to_next,
        progress.spawn_interval
    );
    state.events.push(GameEvent::LevelUp {
        level: progress.level,
    });
}

/// Apply a collected power-up
pub fn apply_power_up(state: &mut GameState, kind: PowerUpKind) {
    state.events.push(GameEvent::PowerUpCollected { kind });
    log::debug!("Collected {:?}", kind);

    match kind {
        PowerUpKind::Heal => apply_heal(state),
        PowerUpKind::RapidFire => {
            state.effects.projectile_speed = state.tuning.rapid_fire_projectile_speed;
            state.effects.rapid_fire_until = Some(state.elapsed + state.tuning.rapid_fire_duration);
        }
        PowerUpKind::SlowTime => {
            state.effects.enemy_speed_multiplier = state.tuning.slow_time_multiplier;
            state.effects.slow_time_until = Some(state.elapsed + state.tuning.slow_time_duration);
        }
    }
}

/// Heal priority: restore health, else charge the wave skill, else bonus
fn apply_heal(state: &mut GameState) {
    if !state.player.is_full_health() {
        state.player.health += 1;
        state.events.push(GameEvent::Healed {
            health: state.player.health,
        });
        return;
    }

    let progress = &mut state.progress;
    if !progress.skill_unlocked {
        progress.skill_stacks += 1;
        let required = state.tuning.skill_stacks_required;
        state.events.push(GameEvent::SkillCharged {
            stacks: progress.skill_stacks,
            required,
        });
        if progress.skill_stacks >= required {
            progress.skill_unlocked = true;
            log::info!("Wave skill unlocked");
            state.events.push(GameEvent::SkillUnlocked);
        }
        return;
    }

    let bonus = state.tuning.wasted_heal_points;
    let points = add_score(state, bonus);
    state.events.push(GameEvent::BonusScore { points });
}

/// Revert timed effects whose deadline has passed
pub fn expire_effects(state: &mut GameState) {
    let now = state.elapsed;
    let effects = &mut state.effects;

    if effects.rapid_fire_until.is_some_and(|until| now >= until) {
        effects.rapid_fire_until = None;
        effects.projectile_speed = state.tuning.base_projectile_speed;
        state.events.push(GameEvent::EffectExpired {
            kind: PowerUpKind::RapidFire,
        });
    }
    if effects.slow_time_until.is_some_and(|until| now >= until) {
        effects.slow_time_until = None;
        effects.enemy_speed_multiplier = 1.0;
        state.events.push(GameEvent::EffectExpired {
            kind: PowerUpKind::SlowTime,
        });
    }
}

/// Count the skill cooldown down, clamped at zero
pub fn tick_cooldown(state: &mut GameState, dt: f32) {
    let cooldown = &mut state.progress.skill_cooldown;
    *cooldown = (*cooldown - dt).max(0.0);
}

/// Whether a wave may be cast right now
pub fn can_cast(state: &GameState) -> bool {
    state.progress.skill_unlocked
        && state.progress.skill_cooldown <= 0.0
        && state.player.visual.is_live()
}

/// Cast the wave skill toward `target`. A no-op while locked or cooling down.
pub fn try_cast_wave(state: &mut GameState, scene: &mut dyn Scene, target: Vec3) -> bool {
    if !can_cast(state) {
        return false;
    }
    if !spawner::spawn_wave(state, scene, target) {
        return false;
    }
    state.progress.skill_cooldown = state.tuning.wave_cooldown;
    state.events.push(GameEvent::WaveCast);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{HeadlessScene, Template, Visual};

    #[test]
    fn test_score_uses_combo() {
        let mut state = GameState::new(1);
        assert_eq!(add_score(&mut state, 5), 10);
        assert_eq!(state.progress.score, 10);
    }

    #[test]
    fn test_ten_kills_level_up() {
        let mut state = GameState::new(1);
        for _ in 0..10 {
            record_kill(&mut state);
        }
        assert_eq!(state.progress.level, 2);
        assert_eq!(state.progress.kills, 0);
        assert_eq!(state.progress.kills_to_next, 15);
        assert!((state.progress.spawn_interval - 0.8).abs() < 1e-6);
        assert_eq!(state.events, vec![GameEvent::LevelUp { level: 2 }]);
    }

    #[test]
    fn test_spawn_interval_floor() {
        let mut state = GameState::new(1);
        for _ in 0..12 {
            level_up(&mut state);
        }
        assert_eq!(state.progress.spawn_interval, 0.3);
    }

    #[test]
    fn test_heal_restores_health_first() {
        let mut state = GameState::new(1);
        state.player.health = 3;
        apply_power_up(&mut state, PowerUpKind::Heal);
        assert_eq!(state.player.health, 4);
        assert_eq!(state.progress.skill_stacks, 0);
    }

    #[test]
    fn test_five_full_health_heals_unlock_skill() {
        let mut state = GameState::new(1);
        for _ in 0..5 {
            apply_power_up(&mut state, PowerUpKind::Heal);
        }
        assert!(state.progress.skill_unlocked);
        assert_eq!(state.progress.skill_stacks, 5);
        assert!(state.events.contains(&GameEvent::SkillUnlocked));

        // Sixth heal is a score bonus
        apply_power_up(&mut state, PowerUpKind::Heal);
        assert_eq!(state.progress.skill_stacks, 5);
        assert_eq!(state.progress.score, 200);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::BonusScore { points: 200 })
        );
    }

    #[test]
    fn test_rapid_fire_reverts_after_duration() {
        let mut state = GameState::new(1);
        apply_power_up(&mut state, PowerUpKind::RapidFire);
        assert_eq!(state.effects.projectile_speed, 0.9);

        state.elapsed = 4.9;
        expire_effects(&mut state);
        assert_eq!(state.effects.projectile_speed, 0.9);

        state.elapsed = 5.0;
        expire_effects(&mut state);
        assert_eq!(state.effects.projectile_speed, 0.5);
        assert!(!state.effects.rapid_fire());
    }

    #[test]
    fn test_retrigger_extends_deadline() {
        let mut state = GameState::new(1);
        apply_power_up(&mut state, PowerUpKind::SlowTime);
        state.elapsed = 3.0;
        apply_power_up(&mut state, PowerUpKind::SlowTime);

        state.elapsed = 4.5;
        expire_effects(&mut state);
        assert_eq!(state.effects.enemy_speed_multiplier, 0.3);

        state.elapsed = 7.0;
        expire_effects(&mut state);
        assert_eq!(state.effects.enemy_speed_multiplier, 1.0);
    }

    #[test]
    fn test_cooldown_clamps_at_zero() {
        let mut state = GameState::new(1);
        state.progress.skill_cooldown = 0.01;
        tick_cooldown(&mut state, 1.0 / 60.0);
        assert_eq!(state.progress.skill_cooldown, 0.0);
    }

    #[test]
    fn test_cast_gating() {
        let mut state = GameState::new(1);
        let mut scene = HeadlessScene::new();
        let target = Vec3::new(5.0, 0.0, 0.0);

        // Locked
        state.player.visual = Visual::spawn(&mut scene, Template::Player).unwrap();
        assert!(!try_cast_wave(&mut state, &mut scene, target));

        state.progress.skill_unlocked = true;
        assert!(try_cast_wave(&mut state, &mut scene, target));
        assert_eq!(state.waves.len(), 1);
        assert_eq!(state.progress.skill_cooldown, 5.0);

        // Cooling down
        assert!(!try_cast_wave(&mut state, &mut scene, target));
        assert_eq!(state.waves.len(), 1);
    }
}
