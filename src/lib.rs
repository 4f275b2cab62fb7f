//! Speed Hunter - A lane-based arcade chase game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (car, road objects, scoring, game phases)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Terminal rendering of simulation snapshots
//! - `platform`: Input mapping and frame pacing
//! - `persistence`: High score and settings files
//! - `audio`: Sound cues driven by simulation events

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use settings::Settings;
pub use tuning::GameConfig;

/// Game configuration defaults
pub mod consts {
    /// Frames per second the simulation is stepped at
    pub const TARGET_FPS: u32 = 60;

    /// Playfield dimensions (pixels)
    pub const SCREEN_WIDTH: u32 = 1200;
    pub const SCREEN_HEIGHT: u32 = 800;
    pub const LANE_COUNT: u32 = 3;

    /// Car defaults
    pub const CAR_WIDTH: u32 = 80;
    pub const CAR_HEIGHT: u32 = 140;
    /// Hitbox is shrunk by this much on every side of the sprite
    pub const CAR_HITBOX_INSET: u32 = 15;
    /// Lateral pixels per frame while changing lanes
    pub const CAR_LATERAL_STEP: u32 = 15;
    /// Distance from the bottom of the screen to the car center
    pub const CAR_BOTTOM_OFFSET: u32 = 300;
    pub const CAR_MAX_TILT: u32 = 15; // degrees
    pub const CAR_TILT_RECOVERY: u32 = 2; // degrees per frame

    /// Road object defaults
    pub const OBSTACLE_SIZE: u32 = 70;
    pub const COLLECTIBLE_SIZE: u32 = 40;
    pub const OBJECT_HITBOX_INSET: u32 = 5;
    /// Objects appear above the visible area
    pub const SPAWN_Y: i32 = -50;

    /// Spawning
    pub const SPAWN_INTERVAL_FRAMES: u32 = 60;
    pub const OBSTACLE_PROBABILITY: f64 = 0.2;

    /// Scoring and progression
    pub const COIN_SCORE: u64 = 10;
    pub const COINS_PER_SPEED_UP: u32 = 10;
    pub const BASE_SPEED: u32 = 10;
    pub const SPEED_INCREMENT: u32 = 10;
    pub const MAX_MISSED: u32 = 5;
    pub const NOTIFICATION_FRAMES: u32 = 60;
}
