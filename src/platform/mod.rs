//! Platform abstraction layer
//!
//! Handles host concerns the simulation must not know about:
//! - Time/ticks (fixed-rate frame pacing, FPS)
//! - Input events (terminal keys to commands)
//! - Storage locations (data directory from the environment)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{command_for_key, should_quit};
pub use storage::HostConfig;
pub use time::FrameClock;
