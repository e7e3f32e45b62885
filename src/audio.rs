//! Audio cues keyed by game events
//!
//! The simulation never plays sounds. The presentation layer feeds drained
//! [`GameEvent`]s to [`AudioManager::handle_event`], which maps them to cues
//! and forwards the ones whose sound has finished loading to a [`CueSink`].

use std::collections::HashSet;

use crate::settings::Settings;
use crate::sim::{GameEvent, HitSource, PowerUpKind};

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// Looping background music
    Music,
    /// Projectile fired
    Shoot,
    /// Enemy hit or killed
    Hit,
    /// Enemy reached the player
    Quack,
    /// Wave skill cast
    Splash,
    /// Health restored
    Heal,
    /// Rapid fire collected
    RapidFire,
    /// Slow time collected
    SlowTime,
    /// Coin picked up
    Coin,
    LevelUp,
    GameOver,
}

impl AudioCue {
    pub const ALL: [AudioCue; 11] = [
        AudioCue::Music,
        AudioCue::Shoot,
        AudioCue::Hit,
        AudioCue::Quack,
        AudioCue::Splash,
        AudioCue::Heal,
        AudioCue::RapidFire,
        AudioCue::SlowTime,
        AudioCue::Coin,
        AudioCue::LevelUp,
        AudioCue::GameOver,
    ];

    /// Per-cue mix level before the player's volume settings
    pub fn base_volume(self) -> f32 {
        match self {
            AudioCue::Music => 0.5,
            AudioCue::Hit => 0.2,
            AudioCue::Coin => 0.3,
            AudioCue::GameOver => 0.8,
            _ => 0.5,
        }
    }

    pub fn is_music(self) -> bool {
        matches!(self, AudioCue::Music)
    }
}

/// How a cue interacts with an instance that is already playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Stop the playing instance and start over
    Restart,
    /// Leave the playing instance alone
    IfIdle,
}

/// Fire-and-forget playback backend
pub trait CueSink {
    fn play(&mut self, cue: AudioCue, volume: f32, playback: Playback);
    fn stop(&mut self, cue: AudioCue);
}

/// Sink that only logs (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl CueSink for LogSink {
    fn play(&mut self, cue: AudioCue, volume: f32, playback: Playback) {
        log::debug!("cue {:?} at {:.2} ({:?})", cue, volume, playback);
    }

    fn stop(&mut self, cue: AudioCue) {
        log::debug!("cue {:?} stopped", cue);
    }
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    /// Cues whose sound data has loaded
    ready: HashSet<AudioCue>,
    sfx_volume: f32,
    music_volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl AudioManager {
    /// Manager with nothing loaded yet
    pub fn new(settings: &Settings) -> Self {
        let mut manager = Self {
            ready: HashSet::new(),
            sfx_volume: 0.0,
            music_volume: 0.0,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Re-read volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
    }

    /// Record that a cue's sound finished loading. Idempotent.
    pub fn mark_ready(&mut self, cue: AudioCue) {
        if self.ready.insert(cue) {
            log::debug!("Sound ready: {:?}", cue);
        }
    }

    /// Mark every cue loaded
    pub fn mark_all_ready(&mut self) {
        for cue in AudioCue::ALL {
            self.mark_ready(cue);
        }
    }

    pub fn is_ready(&self, cue: AudioCue) -> bool {
        self.ready.contains(&cue)
    }

    /// Final volume for a cue
    pub fn volume_for(&self, cue: AudioCue) -> f32 {
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        cue.base_volume() * channel
    }

    /// Play a cue if it has loaded and is audible
    pub fn play(&self, cue: AudioCue, playback: Playback, sink: &mut dyn CueSink) {
        if !self.is_ready(cue) {
            return;
        }
        let volume = self.volume_for(cue);
        if volume <= 0.0 {
            return;
        }
        sink.play(cue, volume, playback);
    }

    /// React to one simulation event
    pub fn handle_event(&self, event: &GameEvent, sink: &mut dyn CueSink) {
        match event {
            GameEvent::Started | GameEvent::Resumed => {
                self.play(AudioCue::Music, Playback::IfIdle, sink)
            }
            GameEvent::Paused => sink.stop(AudioCue::Music),
            GameEvent::GameOver { .. } => {
                sink.stop(AudioCue::Music);
                self.play(AudioCue::GameOver, Playback::Restart, sink);
            }
            GameEvent::Shot { .. } => self.play(AudioCue::Shoot, Playback::Restart, sink),
            GameEvent::WaveCast => self.play(AudioCue::Splash, Playback::Restart, sink),
            GameEvent::EnemyHit {
                source: HitSource::Projectile,
                ..
            }
            | GameEvent::EnemyKilled {
                source: HitSource::Projectile,
                ..
            } => self.play(AudioCue::Hit, Playback::Restart, sink),
            GameEvent::EnemyHit {
                source: HitSource::Wave,
                audible: true,
            } => self.play(AudioCue::Hit, Playback::IfIdle, sink),
            GameEvent::PlayerHit { .. } => self.play(AudioCue::Quack, Playback::Restart, sink),
            GameEvent::Healed { .. } => self.play(AudioCue::Heal, Playback::IfIdle, sink),
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::RapidFire,
            } => self.play(AudioCue::RapidFire, Playback::IfIdle, sink),
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::SlowTime,
            } => self.play(AudioCue::SlowTime, Playback::IfIdle, sink),
            GameEvent::CoinCollected => self.play(AudioCue::Coin, Playback::Restart, sink),
            GameEvent::LevelUp { .. } => self.play(AudioCue::LevelUp, Playback::Restart, sink),
            _ => {}
        }
    }
}
