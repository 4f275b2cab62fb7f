//! Falling road objects: coins to collect and obstacles to dodge

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::car::PlayerCar;
use super::collision::Rect;
use crate::tuning::GameConfig;

/// What a road object does when the car touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Coin: scores and counts toward the next speed-up
    Collectible,
    /// Ends the run on contact
    Obstacle,
}

/// Lifecycle tag; an object is resolved exactly once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Active,
    Resolved(Resolution),
}

/// How an object left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Touched by the car
    Collided,
    /// Fell past the bottom of the screen
    OffScreen,
}

/// A coin or obstacle falling down one lane
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadObject {
    pub id: u32,
    pub lane: u32,
    pub kind: ObjectKind,
    /// Center; x is the lane center and never changes
    pub pos: Vec2,
    pub hitbox: Rect,
    /// Only ever set on collectibles
    pub collected: bool,
    pub lifecycle: Lifecycle,
}

impl RoadObject {
    /// Create an object at the top of `lane`; obstacles get the larger box
    pub fn new(id: u32, lane: u32, kind: ObjectKind, config: &GameConfig) -> Self {
        let pos = Vec2::new(config.lane_center_x(lane), config.spawn_y as f32);
        let size = match kind {
            ObjectKind::Obstacle => config.obstacle_size,
            ObjectKind::Collectible => config.collectible_size,
        };
        Self {
            id,
            lane,
            kind,
            pos,
            hitbox: Rect::inset(pos, size, size, config.object_hitbox_inset),
            collected: false,
            lifecycle: Lifecycle::Active,
        }
    }

    /// Fall by the shared game speed
    pub fn update(&mut self, speed: u32) {
        self.pos.y += speed as f32;
        self.hitbox = self.hitbox.centered_at(self.pos);
    }

    pub fn check_collision(&self, car: &PlayerCar) -> bool {
        self.hitbox.overlaps(&car.hitbox)
    }

    /// Past the bottom edge of the playfield
    pub fn is_off_screen(&self, screen_height: u32) -> bool {
        self.pos.y > screen_height as f32
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle == Lifecycle::Active
    }

    pub fn is_obstacle(&self) -> bool {
        self.kind == ObjectKind::Obstacle
    }

    /// Mark as picked up by the car
    pub fn collect(&mut self) {
        if self.kind == ObjectKind::Collectible {
            self.collected = true;
        }
        self.resolve(Resolution::Collided);
    }

    /// Take the object out of play; later calls keep the first resolution
    pub fn resolve(&mut self, how: Resolution) {
        if self.is_active() {
            self.lifecycle = Lifecycle::Resolved(how);
        }
    }
}
