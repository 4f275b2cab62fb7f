//! Score, misses and speed progression
//!
//! Speed only changes through coins: every `coins_per_speed_up` coins adds
//! `speed_increment`. Nothing here looks at elapsed time.

use serde::{Deserialize, Serialize};

use crate::tuning::GameConfig;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    ObstacleHit { lane: u32 },
    TooManyMissed,
}

/// Transient on-screen message with a frame countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub text: String,
    pub remaining_frames: u32,
}

/// Per-run scoring state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTracker {
    pub score: u64,
    pub missed: u32,
    pub speed: u32,
    /// Coins collected since the last speed-up
    pub coin_progress: u32,
    pub notification: Option<Notification>,
    coin_score: u64,
    coins_per_speed_up: u32,
    base_speed: u32,
    speed_increment: u32,
    max_missed: u32,
    notification_frames: u32,
}

impl ScoreTracker {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            score: 0,
            missed: 0,
            speed: config.base_speed,
            coin_progress: 0,
            notification: None,
            coin_score: config.coin_score,
            coins_per_speed_up: config.coins_per_speed_up.max(1),
            base_speed: config.base_speed,
            speed_increment: config.speed_increment,
            max_missed: config.max_missed,
            notification_frames: config.notification_frames,
        }
    }

    pub fn max_missed(&self) -> u32 {
        self.max_missed
    }

    pub fn base_speed(&self) -> u32 {
        self.base_speed
    }

    /// Count a coin; returns the new speed if this coin triggered a speed-up
    pub fn on_collected(&mut self) -> Option<u32> {
        self.score += self.coin_score;
        self.coin_progress += 1;
        if self.coin_progress < self.coins_per_speed_up {
            return None;
        }

        self.coin_progress = 0;
        self.speed += self.speed_increment;
        self.notification = Some(Notification {
            text: format!("Speed +{}: {} km/h", self.speed_increment, self.speed),
            remaining_frames: self.notification_frames,
        });
        log::info!("Speed increased to {} km/h", self.speed);
        Some(self.speed)
    }

    /// Count a missed coin; true once the miss limit is reached
    pub fn on_missed(&mut self) -> bool {
        self.missed += 1;
        self.missed >= self.max_missed
    }

    /// Hitting an obstacle always ends the run
    pub fn on_obstacle_hit(&self, lane: u32) -> GameOverReason {
        GameOverReason::ObstacleHit { lane }
    }

    /// Count down the notification, clearing it when it runs out
    pub fn tick_notification(&mut self) {
        if let Some(note) = &mut self.notification {
            note.remaining_frames = note.remaining_frames.saturating_sub(1);
            if note.remaining_frames == 0 {
                self.notification = None;
            }
        }
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.missed = 0;
        self.speed = self.base_speed;
        self.coin_progress = 0;
        self.notification = None;
    }
}
