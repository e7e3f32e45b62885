//! Presentation layer
//!
//! Turns drained simulation events into audio cues, timed UI effects and HUD
//! updates. Runs once per rendered frame, after the simulation steps.

pub mod hud;
pub mod scheduler;

pub use hud::{HudSink, HudSnapshot, SkillStatus};
pub use scheduler::{TaskQueue, UiEffect};

use crate::audio::{AudioManager, CueSink};
use crate::renderer::Rgb;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState};

/// Per-frame glue between the simulation and its collaborators
#[derive(Debug, Clone)]
pub struct Presenter {
    pub audio: AudioManager,
    pub tasks: TaskQueue,
    settings: Settings,
    /// Last snapshot pushed to the HUD sink
    last_hud: Option<HudSnapshot>,
}

impl Presenter {
    pub fn new(settings: Settings) -> Self {
        Self {
            audio: AudioManager::new(&settings),
            tasks: TaskQueue::new(),
            settings,
            last_hud: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    /// Drain this frame's events, play cues, schedule UI effects and refresh
    /// the HUD if anything changed. Returns the drained events.
    pub fn present(
        &mut self,
        state: &mut GameState,
        now: f64,
        cues: &mut dyn CueSink,
        hud: &mut dyn HudSink,
    ) -> Vec<GameEvent> {
        let events = state.drain_events();
        for event in &events {
            self.audio.handle_event(event, cues);
            self.schedule_effects(event, now);
        }
        self.tasks.advance(now);

        let snapshot = HudSnapshot::from_state(state);
        if self.last_hud.as_ref() != Some(&snapshot) {
            hud.show(&snapshot);
            self.last_hud = Some(snapshot);
        }
        events
    }

    fn schedule_effects(&mut self, event: &GameEvent, now: f64) {
        match event {
            GameEvent::PlayerHit { .. } => {
                self.switch_on(UiEffect::DamageFlash, now);
                self.switch_on(UiEffect::HealthFrameShake, now);
                self.switch_on(UiEffect::PlayerTint, now);
            }
            GameEvent::Healed { .. } => self.switch_on(UiEffect::HealFlash, now),
            GameEvent::LevelUp { .. } => self.switch_on(UiEffect::LevelPopup, now),
            GameEvent::Reset => self.tasks.clear(),
            _ => {}
        }
    }

    fn switch_on(&mut self, effect: UiEffect, now: f64) {
        if effect.is_flash() && !self.settings.effective_flashes() {
            return;
        }
        self.tasks.trigger(effect, now);
    }

    /// Color override for the player model while the hit tint is on
    pub fn player_tint(&self) -> Option<Rgb> {
        self.tasks
            .is_active(UiEffect::PlayerTint)
            .then_some(Rgb::RED)
    }

    /// Last snapshot pushed to the HUD
    pub fn hud(&self) -> Option<&HudSnapshot> {
        self.last_hud.as_ref()
    }
}
