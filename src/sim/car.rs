//! The player's car
//!
//! The car lives in one of a fixed number of lanes. Lane changes are instant
//! in terms of which lane it "belongs" to, while the visible x position
//! slides toward the lane center a fixed step per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::GameConfig;

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCar {
    /// Lane index the car is in (or heading to)
    pub lane: u32,
    /// Current center; y never changes
    pub pos: Vec2,
    /// Center x of the lane being driven to
    pub target_x: f32,
    /// Tilt in degrees, positive leans right (cosmetic)
    pub tilt: i32,
    /// Collision box, always centered on `pos`
    pub hitbox: Rect,
    lane_count: u32,
    lane_width: u32,
    lateral_step: f32,
    max_tilt: i32,
    tilt_recovery: i32,
}

impl PlayerCar {
    /// Create a car parked in the middle lane
    pub fn new(config: &GameConfig) -> Self {
        let lane = config.start_lane();
        let pos = config.car_home(lane);
        Self {
            lane,
            pos,
            target_x: pos.x,
            tilt: 0,
            hitbox: Rect::inset(
                pos,
                config.car_width,
                config.car_height,
                config.car_hitbox_inset,
            ),
            lane_count: config.lane_count,
            lane_width: config.lane_width(),
            lateral_step: config.car_lateral_step as f32,
            max_tilt: config.car_max_tilt as i32,
            tilt_recovery: config.car_tilt_recovery as i32,
        }
    }

    fn lane_center(&self, lane: u32) -> f32 {
        (lane * self.lane_width + self.lane_width / 2) as f32
    }

    /// Shift one lane left (no-op in the leftmost lane)
    pub fn move_left(&mut self) {
        if self.lane > 0 {
            self.lane -= 1;
            self.target_x = self.lane_center(self.lane);
            self.tilt = self.max_tilt;
        }
    }

    /// Shift one lane right (no-op in the rightmost lane)
    pub fn move_right(&mut self) {
        if self.lane + 1 < self.lane_count {
            self.lane += 1;
            self.target_x = self.lane_center(self.lane);
            self.tilt = -self.max_tilt;
        }
    }

    /// Slide toward the target lane and refresh the hitbox
    pub fn update(&mut self) {
        if self.pos.x < self.target_x {
            self.pos.x = (self.pos.x + self.lateral_step).min(self.target_x);
        } else if self.pos.x > self.target_x {
            self.pos.x = (self.pos.x - self.lateral_step).max(self.target_x);
        }

        self.hitbox = self.hitbox.centered_at(self.pos);

        // Straighten out once the lane change is done
        if self.is_settled() {
            if self.tilt > 0 {
                self.tilt = (self.tilt - self.tilt_recovery).max(0);
            } else if self.tilt < 0 {
                self.tilt = (self.tilt + self.tilt_recovery).min(0);
            }
        }
    }

    /// True when the car sits exactly on its lane center
    pub fn is_settled(&self) -> bool {
        self.pos.x == self.target_x
    }

    /// Snap back to the middle lane without sliding
    pub fn reset(&mut self) {
        self.lane = self.lane_count / 2;
        self.target_x = self.lane_center(self.lane);
        self.pos.x = self.target_x;
        self.tilt = 0;
        self.hitbox = self.hitbox.centered_at(self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn car() -> PlayerCar {
        PlayerCar::new(&GameConfig::default())
    }

    #[test]
    fn test_starts_centered_in_middle_lane() {
        let car = car();
        assert_eq!(car.lane, 1);
        assert_eq!(car.pos, Vec2::new(600.0, 500.0));
        assert_eq!(car.hitbox.center, car.pos);
        assert!(car.is_settled());
    }

    #[test]
    fn test_moves_stop_at_edges() {
        let mut car = car();
        car.move_left();
        car.move_left();
        assert_eq!(car.lane, 0);
        assert_eq!(car.target_x, 200.0);

        car.move_right();
        car.move_right();
        car.move_right();
        assert_eq!(car.lane, 2);
        assert_eq!(car.target_x, 1000.0);
    }

    #[test]
    fn test_update_never_overshoots() {
        let mut car = car();
        car.move_right();
        // 400px at 15px per frame: 26 full steps then a 10px step
        for _ in 0..26 {
            car.update();
            assert!(car.pos.x < 1000.0);
        }
        car.update();
        assert_eq!(car.pos.x, 1000.0);
        car.update();
        assert_eq!(car.pos.x, 1000.0);
        assert_eq!(car.hitbox.center, car.pos);
    }

    #[test]
    fn test_tilt_cue_and_recovery() {
        let mut car = car();
        car.move_left();
        assert_eq!(car.tilt, 15);
        car.update();
        // still sliding, tilt holds
        assert_eq!(car.tilt, 15);

        for _ in 0..40 {
            car.update();
        }
        assert!(car.is_settled());
        assert_eq!(car.tilt, 0);

        car.move_right();
        assert_eq!(car.tilt, -15);
    }

    #[test]
    fn test_reset_snaps_without_interpolation() {
        let mut car = car();
        car.move_left();
        for _ in 0..10 {
            car.update();
        }
        car.reset();
        assert_eq!(car.lane, 1);
        assert_eq!(car.pos.x, 600.0);
        assert_eq!(car.hitbox.center.x, 600.0);
        assert_eq!(car.tilt, 0);
    }

    #[test]
    fn test_single_lane_never_moves() {
        let config = GameConfig {
            lane_count: 1,
            ..GameConfig::default()
        };
        let mut car = PlayerCar::new(&config);
        car.move_left();
        car.move_right();
        assert_eq!(car.lane, 0);
        assert_eq!(car.pos.x, 600.0);
    }

    proptest! {
        #[test]
        fn prop_lane_stays_in_bounds(moves in prop::collection::vec(any::<bool>(), 0..64), lanes in 1u32..8) {
            let config = GameConfig { lane_count: lanes, ..GameConfig::default() };
            let mut car = PlayerCar::new(&config);
            for right in moves {
                if right { car.move_right() } else { car.move_left() }
                prop_assert!(car.lane < lanes);
                car.update();
            }
        }

        #[test]
        fn prop_converges_and_stays(moves in prop::collection::vec(any::<bool>(), 0..8)) {
            let mut car = car();
            for right in moves {
                if right { car.move_right() } else { car.move_left() }
            }
            let step = 15.0;
            let mut prev_gap = (car.target_x - car.pos.x).abs();
            for _ in 0..100 {
                let was_close = prev_gap <= step;
                car.update();
                let gap = (car.target_x - car.pos.x).abs();
                prop_assert!(gap <= prev_gap);
                if was_close {
                    prop_assert_eq!(car.pos.x, car.target_x);
                }
                prev_gap = gap;
            }
            prop_assert_eq!(car.pos.x, car.target_x);
        }
    }
}
