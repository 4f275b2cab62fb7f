//! Data-driven game balance
//!
//! Every gameplay constant lives in [`GameConfig`], which is handed to the
//! simulation at construction. Tuning files are JSON; omitted fields keep
//! their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Reasons a tuning file can be rejected
#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Immutable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub screen_width: u32,
    pub screen_height: u32,
    pub lane_count: u32,

    // === Car ===
    pub car_width: u32,
    pub car_height: u32,
    pub car_hitbox_inset: u32,
    pub car_lateral_step: u32,
    /// Distance from the bottom edge to the car center
    pub car_bottom_offset: u32,
    pub car_max_tilt: u32,
    pub car_tilt_recovery: u32,

    // === Road objects ===
    pub obstacle_size: u32,
    pub collectible_size: u32,
    pub object_hitbox_inset: u32,
    pub spawn_y: i32,
    pub spawn_interval: u32,
    pub obstacle_probability: f64,

    // === Scoring ===
    pub coin_score: u64,
    pub coins_per_speed_up: u32,
    pub base_speed: u32,
    pub speed_increment: u32,
    pub max_missed: u32,
    pub notification_frames: u32,

    pub target_fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            lane_count: LANE_COUNT,

            car_width: CAR_WIDTH,
            car_height: CAR_HEIGHT,
            car_hitbox_inset: CAR_HITBOX_INSET,
            car_lateral_step: CAR_LATERAL_STEP,
            car_bottom_offset: CAR_BOTTOM_OFFSET,
            car_max_tilt: CAR_MAX_TILT,
            car_tilt_recovery: CAR_TILT_RECOVERY,

            obstacle_size: OBSTACLE_SIZE,
            collectible_size: COLLECTIBLE_SIZE,
            object_hitbox_inset: OBJECT_HITBOX_INSET,
            spawn_y: SPAWN_Y,
            spawn_interval: SPAWN_INTERVAL_FRAMES,
            obstacle_probability: OBSTACLE_PROBABILITY,

            coin_score: COIN_SCORE,
            coins_per_speed_up: COINS_PER_SPEED_UP,
            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            max_missed: MAX_MISSED,
            notification_frames: NOTIFICATION_FRAMES,

            target_fps: TARGET_FPS,
        }
    }
}

impl GameConfig {
    /// Width of a single lane in pixels
    pub fn lane_width(&self) -> u32 {
        self.screen_width / self.lane_count.max(1)
    }

    /// Horizontal center of a lane
    pub fn lane_center_x(&self, lane: u32) -> f32 {
        let width = self.lane_width();
        (lane * width + width / 2) as f32
    }

    /// Lane whose corridor contains `x` (clamped to the playfield)
    pub fn lane_at(&self, x: f32) -> u32 {
        let width = self.lane_width().max(1) as f32;
        let lane = (x.max(0.0) / width) as u32;
        lane.min(self.lane_count.saturating_sub(1))
    }

    /// Middle lane, where the car starts
    pub fn start_lane(&self) -> u32 {
        self.lane_count / 2
    }

    /// Fixed car center for a given lane
    pub fn car_home(&self, lane: u32) -> Vec2 {
        let y = self.screen_height as f32 - self.car_bottom_offset as f32;
        Vec2::new(self.lane_center_x(lane), y)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.lane_count == 0 {
            return invalid("lane_count", "must be at least 1");
        }
        if self.screen_width < self.lane_count || self.screen_height == 0 {
            return invalid("screen_width", "playfield is too small for the lane count");
        }
        if self.spawn_interval == 0 {
            return invalid("spawn_interval", "must be at least 1 frame");
        }
        if !(0.0..=1.0).contains(&self.obstacle_probability) {
            return invalid("obstacle_probability", "must be within 0.0..=1.0");
        }
        if self.coins_per_speed_up == 0 {
            return invalid("coins_per_speed_up", "must be at least 1");
        }
        if self.max_missed == 0 {
            return invalid("max_missed", "must be at least 1");
        }
        if self.car_lateral_step == 0 {
            return invalid("car_lateral_step", "car would never reach its lane");
        }
        if self.car_hitbox_inset * 2 >= self.car_width.min(self.car_height) {
            return invalid("car_hitbox_inset", "hitbox would be empty");
        }
        if self.object_hitbox_inset * 2 >= self.collectible_size.min(self.obstacle_size) {
            return invalid("object_hitbox_inset", "hitbox would be empty");
        }
        if self.target_fps == 0 {
            return invalid("target_fps", "must be at least 1");
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a tuning file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let result = std::fs::read_to_string(path)
            .map_err(TuningError::from)
            .and_then(|json| Self::from_json_str(&json));

        match result {
            Ok(config) => {
                log::info!("Loaded tuning from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }
}
