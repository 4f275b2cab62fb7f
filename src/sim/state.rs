//! Game state and core simulation types
//!
//! `GameState` is the single authoritative object the host steps once per
//! frame. Renderers and audio only ever see it through [`Snapshot`] and the
//! drained [`GameEvent`] list.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::car::PlayerCar;
use super::collision::Rect;
use super::progression::{GameOverReason, Notification, ScoreTracker};
use super::road_object::{ObjectKind, RoadObject};
use super::spawn::SpawnController;
use crate::highscores::HighScore;
use crate::tuning::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen; a paused run is kept intact behind it
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or quit
    GameOver,
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Paused,
    /// A finished run was wiped for a fresh one
    RunRestarted,
    CoinCollected { lane: u32, score: u64 },
    CoinMissed { missed: u32 },
    ObstacleHit { lane: u32 },
    SpeedIncreased { speed: u32 },
    GameOver { reason: GameOverReason },
    QuitRequested,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed of the first run; later runs derive theirs from it
    pub seed: u64,
    pub phase: GamePhase,
    pub car: PlayerCar,
    /// Active objects in spawn order
    pub objects: Vec<RoadObject>,
    pub spawner: SpawnController,
    pub tracker: ScoreTracker,
    pub high_score: HighScore,
    pub game_over_reason: Option<GameOverReason>,
    /// Frames simulated in the current run
    pub run_frames: u64,
    /// Road scroll position in pixels, wraps at screen height
    pub road_offset: u32,
    /// Number of restarts so far
    pub restarts: u64,
    pub quit_requested: bool,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game sitting in the menu
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_high_score(config, seed, HighScore::default())
    }

    /// Create a new game with a previously saved high score
    pub fn with_high_score(config: GameConfig, seed: u64, high_score: HighScore) -> Self {
        Self {
            car: PlayerCar::new(&config),
            spawner: SpawnController::new(&config, seed),
            tracker: ScoreTracker::new(&config),
            config,
            seed,
            phase: GamePhase::Menu,
            objects: Vec::new(),
            high_score,
            game_over_reason: None,
            run_frames: 0,
            road_offset: 0,
            restarts: 0,
            quit_requested: false,
            events: Vec::new(),
        }
    }

    pub fn score(&self) -> u64 {
        self.tracker.score
    }

    pub fn speed(&self) -> u32 {
        self.tracker.speed
    }

    pub fn missed(&self) -> u32 {
        self.tracker.missed
    }

    /// Wipe the run: car, objects, score, speed and notifications
    pub fn reset_run(&mut self) {
        self.restarts += 1;
        self.car.reset();
        self.objects.clear();
        self.spawner.reset(self.seed.wrapping_add(self.restarts));
        self.tracker.reset();
        self.high_score.begin_run();
        self.game_over_reason = None;
        self.run_frames = 0;
        self.road_offset = 0;
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            screen: Vec2::new(
                self.config.screen_width as f32,
                self.config.screen_height as f32,
            ),
            lane_count: self.config.lane_count,
            road_offset: self.road_offset,
            car: CarView {
                lane: self.car.lane,
                pos: self.car.pos,
                hitbox: self.car.hitbox,
                tilt: self.car.tilt,
            },
            objects: self
                .objects
                .iter()
                .filter(|o| o.is_active())
                .map(|o| ObjectView {
                    id: o.id,
                    lane: o.lane,
                    kind: o.kind,
                    pos: o.pos,
                    hitbox: o.hitbox,
                })
                .collect(),
            score: self.tracker.score,
            high_score: self.high_score.best,
            new_record: self.high_score.is_new_record(self.tracker.score),
            missed: self.tracker.missed,
            max_missed: self.tracker.max_missed(),
            speed: self.tracker.speed,
            notification: self.tracker.notification.clone(),
            game_over_reason: self.game_over_reason,
        }
    }
}

/// Car as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarView {
    pub lane: u32,
    pub pos: Vec2,
    pub hitbox: Rect,
    pub tilt: i32,
}

/// Road object as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectView {
    pub id: u32,
    pub lane: u32,
    pub kind: ObjectKind,
    pub pos: Vec2,
    pub hitbox: Rect,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub screen: Vec2,
    pub lane_count: u32,
    pub road_offset: u32,
    pub car: CarView,
    pub objects: Vec<ObjectView>,
    pub score: u64,
    pub high_score: u64,
    pub new_record: bool,
    pub missed: u32,
    pub max_missed: u32,
    pub speed: u32,
    pub notification: Option<Notification>,
    pub game_over_reason: Option<GameOverReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_in_menu() {
        let state = GameState::new(GameConfig::default(), 1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.objects.is_empty());
        assert_eq!(state.speed(), 10);
        assert_eq!(state.score(), 0);
        assert!(!state.quit_requested);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = GameState::with_high_score(GameConfig::default(), 1, HighScore::new(300));
        state.tracker.score = 500;
        state.high_score.observe(500);
        state.car.move_left();
        state
            .objects
            .push(RoadObject::new(1, 0, ObjectKind::Collectible, &state.config));

        state.reset_run();
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score.best, 500);
        assert!(state.objects.is_empty());
        assert_eq!(state.car.lane, 1);
        assert_eq!(state.restarts, 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(GameConfig::default(), 1);
        state
            .objects
            .push(RoadObject::new(4, 2, ObjectKind::Obstacle, &state.config));
        let snap = state.snapshot();
        assert_eq!(snap.objects.len(), 1);
        assert_eq!(snap.objects[0].kind, ObjectKind::Obstacle);
        assert_eq!(snap.car.pos, state.car.pos);
        assert_eq!(snap.max_missed, 5);
        assert_eq!(snap.screen, Vec2::new(1200.0, 800.0));
        assert!(!snap.new_record);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(GameConfig::default(), 1);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Menu\""));
    }
}
