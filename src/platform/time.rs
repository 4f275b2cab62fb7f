//! Fixed-rate frame pacing

use std::time::{Duration, Instant};

/// Paces the host loop at a fixed frame rate and measures the real FPS
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    next_deadline: Instant,
    // FPS tracking
    frame_times: [Option<Instant>; 60],
    frame_index: usize,
    fps: u32,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self::starting_at(target_fps, Instant::now())
    }

    pub fn starting_at(target_fps: u32, now: Instant) -> Self {
        let frame = Duration::from_secs(1) / target_fps.max(1);
        Self {
            frame,
            next_deadline: now + frame,
            frame_times: [None; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }

    /// Time left before the next tick is due
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next_deadline.saturating_duration_since(now)
    }

    /// True when the current frame's deadline has passed
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next_deadline
    }

    /// Mark a tick as done and schedule the next one.
    ///
    /// A host that falls far behind skips ahead instead of bursting ticks.
    pub fn advance(&mut self, now: Instant) {
        self.next_deadline += self.frame;
        if self.next_deadline + self.frame * 4 < now {
            self.next_deadline = now + self.frame;
        }

        // Calculate FPS from the oldest to the newest of the last 60 frames
        let oldest = self.frame_times[self.frame_index];
        self.frame_times[self.frame_index] = Some(now);
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();
        if let Some(oldest) = oldest {
            let elapsed = now.duration_since(oldest).as_secs_f64();
            if elapsed > 0.0 {
                self.fps = (self.frame_times.len() as f64 / elapsed).round() as u32;
            }
        }
    }

    /// Measured frames per second (0 until a full window has been seen)
    pub fn fps(&self) -> u32 {
        self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadlines_step_by_frame() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(60, start);
        let frame = clock.frame_duration();
        assert!(!clock.is_due(start));
        assert_eq!(clock.remaining(start), frame);

        let t1 = start + frame;
        assert!(clock.is_due(t1));
        clock.advance(t1);
        assert_eq!(clock.remaining(t1), frame);
    }

    #[test]
    fn test_falls_behind_then_resyncs() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(60, start);
        let late = start + Duration::from_secs(2);
        clock.advance(late);
        assert!(!clock.is_due(late));
        assert!(clock.remaining(late) <= clock.frame_duration());
    }

    #[test]
    fn test_fps_measured_over_window() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(60, start);
        assert_eq!(clock.fps(), 0);
        let frame = Duration::from_millis(20);
        for i in 1..=61u32 {
            clock.advance(start + frame * i);
        }
        assert_eq!(clock.fps(), 50);
    }
}
