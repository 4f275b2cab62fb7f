//! Audio cues driven by simulation events
//!
//! The simulation never waits on audio. Events are mapped to sound effects
//! and handed to a backend; a backend that cannot play just drops them.

use std::io::Write;

use crate::settings::Settings;
use crate::sim::{GameEvent, GameOverReason};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Coin picked up
    CoinCollect,
    /// Speed went up after a coin streak
    SpeedUp,
    /// Car hit an obstacle
    Crash,
    /// Run ended by missing too many coins
    GameOver,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::CoinCollected { .. } => Some(SoundEffect::CoinCollect),
            GameEvent::SpeedIncreased { .. } => Some(SoundEffect::SpeedUp),
            GameEvent::ObstacleHit { .. } => Some(SoundEffect::Crash),
            GameEvent::GameOver {
                reason: GameOverReason::TooManyMissed,
            } => Some(SoundEffect::GameOver),
            _ => None,
        }
    }
}

/// Something that can make noise
pub trait AudioBackend {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Rings the terminal bell for loud cues, logs the rest
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioBackend for TerminalBell {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("Sound {:?} at volume {:.2}", effect, volume);
        if matches!(effect, SoundEffect::Crash | SoundEffect::GameOver) {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>, settings: &Settings) -> Self {
        let mut manager = Self {
            backend,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        };
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.backend.play(effect, vol);
    }

    /// Play whatever the tick's events call for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
