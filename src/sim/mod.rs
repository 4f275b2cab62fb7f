//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or file access

pub mod car;
pub mod collision;
pub mod progression;
pub mod road_object;
pub mod spawn;
pub mod state;
pub mod tick;

pub use car::PlayerCar;
pub use collision::Rect;
pub use progression::{GameOverReason, Notification, ScoreTracker};
pub use road_object::{Lifecycle, ObjectKind, Resolution, RoadObject};
pub use spawn::SpawnController;
pub use state::{CarView, GameEvent, GamePhase, GameState, ObjectView, Snapshot};
pub use tick::{Command, TickInput, apply_command, tick};
