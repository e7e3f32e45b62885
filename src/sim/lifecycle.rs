//! Top-level state machine and bulk teardown
//!
//! Inactive -> Active -> (Paused <-> Active) -> GameOver, and back to
//! Inactive or Active through a reset.

use super::state::{ActiveEffects, GameEvent, GamePhase, GameState, Player, Progress};
use crate::renderer::{Scene, Template, Visual};

/// Add the player model to the scene once its template has loaded
pub fn ensure_player_visual(state: &mut GameState, scene: &mut dyn Scene) {
    if state.player.visual.is_live() {
        return;
    }
    if let Some(visual) = Visual::spawn(scene, Template::Player) {
        log::debug!("Player model ready");
        state.player.visual = visual;
    }
}

/// Leave the menu and begin play
pub fn start(state: &mut GameState) {
    if state.phase != GamePhase::Inactive {
        return;
    }
    state.phase = GamePhase::Active;
    log::info!("Game started (seed {})", state.seed);
    state.events.push(GameEvent::Started);
}

/// Active <-> Paused; ignored in any other phase
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Active => {
            state.phase = GamePhase::Paused;
            log::info!("Paused");
            state.events.push(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Active;
            log::info!("Resumed");
            state.events.push(GameEvent::Resumed);
        }
        GamePhase::Inactive | GamePhase::GameOver => {}
    }
}

/// Enter GameOver. Fires at most once per run.
pub fn trigger_game_over(state: &mut GameState) {
    if state.game_over_fired {
        return;
    }
    state.game_over_fired = true;
    state.phase = GamePhase::GameOver;
    log::info!(
        "Game over at level {} with score {}",
        state.progress.level,
        state.progress.score
    );
    state.events.push(GameEvent::GameOver {
        score: state.progress.score,
    });
}

/// Release every pooled visual, empty every pool and restore progression,
/// effects and the player to their start values. The player model stays in
/// the scene.
pub fn reset(state: &mut GameState, scene: &mut dyn Scene) {
    let released = state.pooled_count();

    for mut enemy in state.enemies.drain(..) {
        enemy.visual.release(scene);
    }
    for mut projectile in state.projectiles.drain(..) {
        projectile.visual.release(scene);
    }
    for mut tracer in state.tracers.drain(..) {
        tracer.visual.release(scene);
    }
    for mut particle in state.particles.drain(..) {
        particle.visual.release(scene);
    }
    for mut power_up in state.power_ups.drain(..) {
        power_up.visual.release(scene);
    }
    for mut trail in state.trails.drain(..) {
        trail.visual.release(scene);
    }
    for mut wave in state.waves.drain(..) {
        wave.visual.release(scene);
    }
    for mut coin in state.coins.drain(..) {
        coin.visual.release(scene);
    }

    let visual = std::mem::take(&mut state.player.visual);
    state.player = Player {
        visual,
        ..Player::new(state.tuning.max_health)
    };
    state.progress = Progress::new(&state.tuning);
    state.effects = ActiveEffects::new(&state.tuning);
    state.game_over_fired = false;
    state.time_ticks = 0;

    log::info!("Reset ({} pooled visuals released)", released);
    state.events.push(GameEvent::Reset);
}

/// Reset and play again immediately
pub fn restart(state: &mut GameState, scene: &mut dyn Scene) {
    reset(state, scene);
    state.phase = GamePhase::Inactive;
    start(state);
}

/// Reset and go back to the landing menu
pub fn return_to_menu(state: &mut GameState, scene: &mut dyn Scene) {
    reset(state, scene);
    state.phase = GamePhase::Inactive;
}
