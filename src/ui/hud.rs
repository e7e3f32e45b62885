//! HUD values
//!
//! Plain values read off the game state once per frame. The sink owns all
//! drawing.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Wave skill indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillStatus {
    /// No charge yet
    Locked,
    /// Some heal packs banked toward the unlock
    Charging { stacks: u32, required: u32 },
    Ready,
    /// Whole seconds left, rounded up
    CoolingDown { seconds: u32 },
}

impl SkillStatus {
    pub fn from_state(state: &GameState) -> Self {
        let progress = &state.progress;
        if !progress.skill_unlocked {
            if progress.skill_stacks == 0 {
                SkillStatus::Locked
            } else {
                SkillStatus::Charging {
                    stacks: progress.skill_stacks,
                    required: state.tuning.skill_stacks_required,
                }
            }
        } else if progress.skill_cooldown > 0.0 {
            SkillStatus::CoolingDown {
                seconds: progress.skill_cooldown.ceil() as u32,
            }
        } else {
            SkillStatus::Ready
        }
    }

    /// Short status text
    pub fn label(&self) -> String {
        match self {
            SkillStatus::Locked => "LOCKED".to_string(),
            SkillStatus::Charging { stacks, required } => format!("{}/{}", stacks, required),
            SkillStatus::Ready => "READY".to_string(),
            SkillStatus::CoolingDown { seconds } => seconds.to_string(),
        }
    }
}

/// Everything the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    /// Filled duck icons
    pub health: u32,
    pub max_health: u32,
    pub level: u32,
    pub skill: SkillStatus,
    pub phase: GamePhase,
    pub rapid_fire: bool,
    pub slow_time: bool,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.progress.score,
            health: state.player.health,
            max_health: state.player.max_health,
            level: state.progress.level,
            skill: SkillStatus::from_state(state),
            phase: state.phase,
            rapid_fire: state.effects.rapid_fire(),
            slow_time: state.effects.slow_time_until.is_some(),
        }
    }

    /// Game-over screen text
    pub fn final_score_text(&self) -> String {
        format!("SCORE: {}", self.score)
    }
}

/// Receives a snapshot whenever it changes
pub trait HudSink {
    fn show(&mut self, hud: &HudSnapshot);
}
