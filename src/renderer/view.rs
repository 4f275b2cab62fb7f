//! Snapshot to frame: the whole picture, drawn from read-only state
//!
//! Layout: HUD on the first row, key help on the last, playfield scaled into
//! everything in between.

use glam::Vec2;

use super::frame::{Frame, Tint};
use crate::sim::{GameOverReason, GamePhase, ObjectKind, Rect, Snapshot};

/// Road dash period and length in playfield pixels
const DASH_PERIOD: i64 = 40;
const DASH_LENGTH: i64 = 20;

/// Host-side drawing options
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewOptions {
    /// Show this FPS value in the HUD
    pub fps: Option<u32>,
    pub show_controls: bool,
}

/// Terminal size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Maps playfield pixels onto terminal cells
struct Projection {
    screen: Vec2,
    cols: u16,
    rows: u16,
    top: u16,
}

impl Projection {
    fn col(&self, x: f32) -> i32 {
        (x / self.screen.x * self.cols as f32).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        self.top as i32 + (y / self.screen.y * self.rows as f32).floor() as i32
    }

    /// Pixel y at the top of a playfield row
    fn pixel_y(&self, row: u16) -> i64 {
        ((row - self.top) as f32 / self.rows as f32 * self.screen.y) as i64
    }

    fn in_field(&self, col: i32, row: i32) -> bool {
        col >= 0
            && col < self.cols as i32
            && row >= self.top as i32
            && row < (self.top + self.rows) as i32
    }

    fn fill(&self, frame: &mut Frame, rect: &Rect, ch: char, tint: Tint) {
        let (min, max) = (rect.min(), rect.max());
        let (c0, c1) = (self.col(min.x), self.col(max.x - 0.01).max(self.col(min.x)));
        let (r0, r1) = (self.row(min.y), self.row(max.y - 0.01).max(self.row(min.y)));
        for row in r0..=r1 {
            for col in c0..=c1 {
                if self.in_field(col, row) {
                    frame.put(col as u16, row as u16, ch, tint);
                }
            }
        }
    }
}

/// Draw a full frame for the snapshot
pub fn render(snapshot: &Snapshot, viewport: Viewport, options: ViewOptions) -> Frame {
    let mut frame = Frame::new(viewport.width, viewport.height);
    if viewport.width == 0 || viewport.height < 3 {
        return frame;
    }

    let proj = Projection {
        screen: snapshot.screen.max(Vec2::ONE),
        cols: viewport.width,
        rows: viewport.height - 2,
        top: 1,
    };

    draw_road(&mut frame, snapshot, &proj);
    for obj in &snapshot.objects {
        let (ch, tint) = match obj.kind {
            ObjectKind::Collectible => ('$', Tint::Coin),
            ObjectKind::Obstacle => ('#', Tint::Obstacle),
        };
        proj.fill(&mut frame, &obj.hitbox, ch, tint);
    }
    draw_car(&mut frame, snapshot, &proj);
    draw_hud(&mut frame, snapshot, options);

    if let Some(note) = &snapshot.notification {
        let row = proj.top + proj.rows / 2 - proj.rows / 8;
        frame.put_centered(row, &format!(" {} ", note.text), Tint::Warning);
    }

    match snapshot.phase {
        GamePhase::Menu => draw_menu(&mut frame, snapshot, &proj, options),
        GamePhase::GameOver => draw_game_over(&mut frame, snapshot, &proj),
        GamePhase::Playing => {}
    }

    let help = match snapshot.phase {
        GamePhase::Menu => "Enter: start  Esc/q: quit",
        GamePhase::Playing => "<-/->: change lane  Esc/p: menu  q: quit",
        GamePhase::GameOver => "r: play again  Esc/q: quit",
    };
    frame.put_str(0, viewport.height - 1, help, Tint::Hud);

    frame
}

fn draw_road(frame: &mut Frame, snapshot: &Snapshot, proj: &Projection) {
    let lanes = snapshot.lane_count.max(1);
    let lane_width = snapshot.screen.x / lanes as f32;
    let offset = snapshot.road_offset as i64;

    for row in proj.top..proj.top + proj.rows {
        for col in 0..proj.cols {
            frame.put(col, row, ' ', Tint::Road);
        }

        for lane in 1..lanes {
            let col = proj.col(lane as f32 * lane_width);
            if proj.in_field(col, row as i32) {
                frame.put(col as u16, row, '|', Tint::Lane);
            }
        }

        // Dashes scroll down with the road
        let y = proj.pixel_y(row);
        if (y - offset).rem_euclid(DASH_PERIOD) < DASH_LENGTH {
            for lane in 0..lanes {
                let col = proj.col((lane as f32 + 0.5) * lane_width);
                if proj.in_field(col, row as i32) {
                    frame.put(col as u16, row, ':', Tint::Lane);
                }
            }
        }
    }
}

fn draw_car(frame: &mut Frame, snapshot: &Snapshot, proj: &Projection) {
    let car = &snapshot.car;
    proj.fill(frame, &car.hitbox, '@', Tint::Car);

    // Nose shows which way the car leans
    let nose = match car.tilt {
        t if t > 0 => '\\',
        t if t < 0 => '/',
        _ => '^',
    };
    let col = proj.col(car.pos.x);
    let row = proj.row(car.hitbox.min().y);
    if proj.in_field(col, row) {
        frame.put(col as u16, row as u16, nose, Tint::Car);
    }
}

fn draw_hud(frame: &mut Frame, snapshot: &Snapshot, options: ViewOptions) {
    let mut hud = format!(
        "Score: {}  High Score: {}  Speed: {} km/h  Missed: {}/{}",
        snapshot.score, snapshot.high_score, snapshot.speed, snapshot.missed, snapshot.max_missed
    );
    if let Some(fps) = options.fps {
        hud.push_str(&format!("  FPS: {}", fps));
    }
    frame.put_str(0, 0, &hud, Tint::Hud);

    // Warn one miss before the limit
    if snapshot.missed + 1 >= snapshot.max_missed {
        let x = hud.chars().count() as u16 + 2;
        frame.put_str(x, 0, "WARNING!", Tint::Warning);
    }
}

fn draw_menu(frame: &mut Frame, snapshot: &Snapshot, proj: &Projection, options: ViewOptions) {
    let mid = proj.top + proj.rows / 2;
    let top = mid.saturating_sub(3);
    frame.put_centered(top, "SPEED HUNTER", Tint::Title);
    frame.put_centered(top + 1, "Collect coins, avoid obstacles!", Tint::Hud);
    frame.put_centered(top + 3, "Press Enter to start", Tint::Hud);
    if options.show_controls {
        frame.put_centered(top + 4, "Use LEFT and RIGHT arrow keys to move", Tint::Plain);
        frame.put_centered(
            top + 5,
            &format!("Game over after missing {} coins", snapshot.max_missed),
            Tint::Plain,
        );
    }
}

fn draw_game_over(frame: &mut Frame, snapshot: &Snapshot, proj: &Projection) {
    let mid = proj.top + proj.rows / 2;
    let top = mid.saturating_sub(3);
    frame.put_centered(top, "GAME OVER", Tint::Warning);
    let reason = match snapshot.game_over_reason {
        Some(GameOverReason::ObstacleHit { .. }) => "You crashed into an obstacle",
        Some(GameOverReason::TooManyMissed) => "Too many coins missed",
        None => "",
    };
    frame.put_centered(top + 1, reason, Tint::Hud);
    frame.put_centered(top + 2, &format!("Final Score: {}", snapshot.score), Tint::Hud);
    if snapshot.new_record {
        frame.put_centered(top + 3, "NEW HIGH SCORE!", Tint::Title);
    } else {
        frame.put_centered(
            top + 3,
            &format!("High Score: {}", snapshot.high_score),
            Tint::Hud,
        );
    }
    frame.put_centered(top + 5, "Press R to play again", Tint::Plain);
}
