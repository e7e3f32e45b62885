//! Timed presentation effects
//!
//! Short-lived UI states (screen flashes, the level popup) that switch on
//! when an event arrives and switch off after a fixed duration of
//! presentation time. Nothing here touches the simulation.

use serde::{Deserialize, Serialize};

/// A reversible UI state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiEffect {
    /// Red full-screen flash when the player is hit
    DamageFlash,
    /// Shake on the health frame
    HealthFrameShake,
    /// Green full-screen flash on heal
    HealFlash,
    /// Player model tinted red
    PlayerTint,
    /// "LEVEL n" banner
    LevelPopup,
}

impl UiEffect {
    /// How long the effect stays on, in seconds
    pub fn duration(self) -> f64 {
        match self {
            UiEffect::DamageFlash => 0.2,
            UiEffect::HealthFrameShake => 0.4,
            UiEffect::HealFlash => 0.3,
            UiEffect::PlayerTint => 0.2,
            UiEffect::LevelPopup => 2.0,
        }
    }

    /// Full-screen flashes are dropped under reduced motion
    pub fn is_flash(self) -> bool {
        matches!(self, UiEffect::DamageFlash | UiEffect::HealFlash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ScheduledReversion {
    effect: UiEffect,
    /// Presentation time (seconds) at which the effect switches off
    at: f64,
}

/// Pending reversions ordered by insertion
#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    tasks: Vec<ScheduledReversion>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch `effect` on at `now`. Re-triggering an active effect pushes
    /// its switch-off time back.
    pub fn trigger(&mut self, effect: UiEffect, now: f64) {
        let at = now + effect.duration();
        match self.tasks.iter_mut().find(|task| task.effect == effect) {
            Some(task) => task.at = at,
            None => self.tasks.push(ScheduledReversion { effect, at }),
        }
    }

    /// Whether `effect` is currently on
    pub fn is_active(&self, effect: UiEffect) -> bool {
        self.tasks.iter().any(|task| task.effect == effect)
    }

    /// Effects currently on, in trigger order
    pub fn active(&self) -> impl Iterator<Item = UiEffect> + '_ {
        self.tasks.iter().map(|task| task.effect)
    }

    /// Switch off everything due at `now`; returns what was switched off
    pub fn advance(&mut self, now: f64) -> Vec<UiEffect> {
        let mut expired = Vec::new();
        self.tasks.retain(|task| {
            let due = now >= task.at;
            if due {
                expired.push(task.effect);
            }
            !due
        });
        for effect in &expired {
            log::debug!("UI effect {:?} off", effect);
        }
        expired
    }

    /// Drop every pending effect (menu, restart)
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
