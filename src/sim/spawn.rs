//! Timer-driven road object spawner
//!
//! One object every `spawn_interval` frames, in a uniformly random lane.
//! No anti-clustering: the same lane can come up any number of times.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::road_object::{ObjectKind, RoadObject};
use crate::tuning::GameConfig;

/// Frame-counting spawner with a seeded RNG
#[derive(Debug, Clone)]
pub struct SpawnController {
    /// Frames since the last spawn
    pub timer: u32,
    interval: u32,
    obstacle_probability: f64,
    lane_count: u32,
    rng: Pcg32,
    next_id: u32,
}

impl SpawnController {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        Self {
            timer: 0,
            interval: config.spawn_interval.max(1),
            obstacle_probability: config.obstacle_probability.clamp(0.0, 1.0),
            lane_count: config.lane_count.max(1),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Advance one frame; yields an object when the interval elapses
    pub fn tick(&mut self, config: &GameConfig) -> Option<RoadObject> {
        self.timer += 1;
        if self.timer < self.interval {
            return None;
        }
        self.timer = 0;

        let lane = self.rng.random_range(0..self.lane_count);
        let kind = if self.rng.random_bool(self.obstacle_probability) {
            ObjectKind::Obstacle
        } else {
            ObjectKind::Collectible
        };

        let id = self.next_id;
        self.next_id += 1;
        log::debug!("Spawned {:?} #{} in lane {}", kind, id, lane);
        Some(RoadObject::new(id, lane, kind, config))
    }

    /// Restart the cadence with a fresh RNG stream
    pub fn reset(&mut self, seed: u64) {
        self.timer = 0;
        self.rng = Pcg32::seed_from_u64(seed);
        self.next_id = 1;
    }
}
