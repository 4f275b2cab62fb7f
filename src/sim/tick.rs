//! Fixed-rate simulation tick
//!
//! One call to [`tick`] per rendered frame. Commands are applied first, in
//! the order received, then the world advances if the game is playing.

use super::progression::GameOverReason;
use super::road_object::{ObjectKind, Resolution};
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    /// Start from the menu
    Start,
    /// Leave play for the menu
    Pause,
    /// New run after game over
    Restart,
    Quit,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub commands: Vec<Command>,
}

impl TickInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

/// Apply one command; commands that make no sense in the phase are ignored
pub fn apply_command(state: &mut GameState, command: Command) {
    match (state.phase, command) {
        (_, Command::Quit) => {
            if !state.quit_requested {
                log::info!("Quit requested");
                state.quit_requested = true;
                state.events.push(GameEvent::QuitRequested);
            }
        }
        (GamePhase::Menu, Command::Start) => {
            log::info!("Run started (speed {} km/h)", state.speed());
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::RunStarted);
        }
        (GamePhase::Playing, Command::MoveLeft) => state.car.move_left(),
        (GamePhase::Playing, Command::MoveRight) => state.car.move_right(),
        (GamePhase::Playing, Command::Pause) => {
            log::info!("Paused to menu");
            state.phase = GamePhase::Menu;
            state.events.push(GameEvent::Paused);
        }
        (GamePhase::GameOver, Command::Restart) => {
            state.reset_run();
            log::info!("Run restarted");
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::RunRestarted);
        }
        _ => {}
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    for &command in &input.commands {
        apply_command(state, command);
    }

    if state.phase != GamePhase::Playing || state.quit_requested {
        return;
    }

    state.run_frames += 1;
    state.road_offset =
        (state.road_offset + state.tracker.speed) % state.config.screen_height.max(1);

    // 1. Car
    state.car.update();

    // 2. Objects: decide each object's fate first, compact afterwards
    let speed = state.tracker.speed;
    let screen_height = state.config.screen_height;
    let mut ended: Option<GameOverReason> = None;

    for obj in state.objects.iter_mut() {
        if !obj.is_active() {
            continue;
        }
        obj.update(speed);

        // Collision wins over leaving the screen in the same frame
        if obj.check_collision(&state.car) {
            match obj.kind {
                ObjectKind::Obstacle => {
                    obj.resolve(Resolution::Collided);
                    state.events.push(GameEvent::ObstacleHit { lane: obj.lane });
                    ended = Some(state.tracker.on_obstacle_hit(obj.lane));
                }
                ObjectKind::Collectible => {
                    obj.collect();
                    let speed_up = state.tracker.on_collected();
                    state.events.push(GameEvent::CoinCollected {
                        lane: obj.lane,
                        score: state.tracker.score,
                    });
                    if let Some(speed) = speed_up {
                        state.events.push(GameEvent::SpeedIncreased { speed });
                    }
                }
            }
        } else if obj.is_off_screen(screen_height) {
            obj.resolve(Resolution::OffScreen);
            if obj.kind == ObjectKind::Collectible && !obj.collected {
                let limit_reached = state.tracker.on_missed();
                log::debug!("Missed coin #{} ({} missed)", obj.id, state.tracker.missed);
                state.events.push(GameEvent::CoinMissed {
                    missed: state.tracker.missed,
                });
                if limit_reached {
                    ended = Some(GameOverReason::TooManyMissed);
                }
            }
        }

        if ended.is_some() {
            break;
        }
    }
    state.objects.retain(|o| o.is_active());

    if let Some(reason) = ended {
        log::info!(
            "Game over ({:?}): score {}, speed {} km/h",
            reason,
            state.tracker.score,
            state.tracker.speed
        );
        state.phase = GamePhase::GameOver;
        state.game_over_reason = Some(reason);
        state.events.push(GameEvent::GameOver { reason });
    } else {
        // 3. Spawn
        if let Some(obj) = state.spawner.tick(&state.config) {
            state.objects.push(obj);
        }
    }

    // 4. High score
    state.high_score.observe(state.tracker.score);

    // 5. Notification countdown
    state.tracker.tick_notification();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::sim::road_object::RoadObject;
    use crate::sim::spawn::SpawnController;
    use crate::tuning::GameConfig;

    fn playing(seed: u64) -> GameState {
        let mut state = GameState::new(GameConfig::default(), seed);
        tick(&mut state, &TickInput::new([Command::Start]));
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    /// Put an object in `lane` with its center at `y`
    fn place(state: &mut GameState, id: u32, lane: u32, kind: ObjectKind, y: f32) {
        let mut obj = RoadObject::new(id, lane, kind, &state.config);
        obj.pos.y = y;
        obj.update(0);
        state.objects.push(obj);
    }

    fn idle(state: &mut GameState, frames: u32) {
        let input = TickInput::default();
        for _ in 0..frames {
            tick(state, &input);
        }
    }

    #[test]
    fn test_menu_start_pause_cycle() {
        let mut state = GameState::new(GameConfig::default(), 3);
        idle(&mut state, 10);
        assert_eq!(state.run_frames, 0);

        tick(&mut state, &TickInput::new([Command::Start]));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::RunStarted]);
        idle(&mut state, 30);
        place(&mut state, 500, 0, ObjectKind::Collectible, 100.0);
        state.tracker.score = 40;

        tick(&mut state, &TickInput::new([Command::Pause]));
        assert_eq!(state.phase, GamePhase::Menu);
        let frames = state.run_frames;
        idle(&mut state, 10);
        assert_eq!(state.run_frames, frames);

        // Paused run is preserved
        tick(&mut state, &TickInput::new([Command::Start]));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score(), 40);
        assert!(state.objects.iter().any(|o| o.id == 500));
    }

    #[test]
    fn test_commands_outside_their_phase_are_ignored() {
        let mut state = GameState::new(GameConfig::default(), 3);
        tick(
            &mut state,
            &TickInput::new([Command::MoveLeft, Command::Restart, Command::Pause]),
        );
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.car.lane, 1);

        let mut state = playing(3);
        tick(&mut state, &TickInput::new([Command::Restart, Command::Start]));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.restarts, 0);
    }

    #[test]
    fn test_move_commands_in_play() {
        let mut state = playing(3);
        tick(&mut state, &TickInput::new([Command::MoveLeft]));
        assert_eq!(state.car.lane, 0);
        // first car update already happened this tick
        assert_eq!(state.car.pos.x, 585.0);
        tick(&mut state, &TickInput::new([Command::MoveLeft]));
        assert_eq!(state.car.lane, 0);
    }

    #[test]
    fn test_collect_coin_scores_and_removes() {
        let mut state = playing(3);
        place(&mut state, 900, 1, ObjectKind::Collectible, 440.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score(), 10);
        assert_eq!(state.tracker.coin_progress, 1);
        assert!(state.objects.iter().all(|o| o.id != 900));
        assert!(state
            .events
            .contains(&GameEvent::CoinCollected { lane: 1, score: 10 }));
        assert_eq!(state.high_score.best, 10);
    }

    #[test]
    fn test_obstacle_hit_ends_run() {
        let mut state = playing(3);
        state.tracker.missed = 0;
        place(&mut state, 900, 1, ObjectKind::Obstacle, 440.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(
            state.game_over_reason,
            Some(GameOverReason::ObstacleHit { lane: 1 })
        );
        assert!(state.events.contains(&GameEvent::ObstacleHit { lane: 1 }));

        // Frozen after game over
        let score = state.score();
        idle(&mut state, 120);
        assert_eq!(state.score(), score);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_obstacle_off_screen_is_not_a_miss() {
        let mut state = playing(3);
        place(&mut state, 900, 0, ObjectKind::Obstacle, 795.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.missed(), 0);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_miss_counts_once_and_spares_score() {
        let mut state = playing(3);
        state.tracker.score = 70;
        place(&mut state, 900, 0, ObjectKind::Collectible, 795.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.missed(), 1);
        assert_eq!(state.score(), 70);
        assert_eq!(state.speed(), 10);
        assert!(state.objects.is_empty());
        idle(&mut state, 5);
        assert_eq!(state.missed(), 1);
    }

    #[test]
    fn test_fifth_miss_ends_run_fourth_does_not() {
        let mut state = playing(3);
        state.tracker.missed = 3;
        place(&mut state, 900, 0, ObjectKind::Collectible, 795.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.missed(), 4);
        assert_eq!(state.phase, GamePhase::Playing);

        place(&mut state, 901, 2, ObjectKind::Collectible, 795.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.missed(), 5);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::TooManyMissed));
    }

    #[test]
    fn test_collision_beats_off_screen_in_same_frame() {
        let config = GameConfig {
            screen_height: 520,
            car_bottom_offset: 20,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, 3);
        tick(&mut state, &TickInput::new([Command::Start]));
        // Car box spans y 445..555 here; after moving 10px the coin is past
        // the bottom edge and still overlapping the car.
        place(&mut state, 900, 1, ObjectKind::Collectible, 515.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score(), 10);
        assert_eq!(state.missed(), 0);
    }

    #[test]
    fn test_tenth_coin_raises_speed_and_shows_notification() {
        let mut state = playing(3);
        state.tracker.coin_progress = 9;
        place(&mut state, 900, 1, ObjectKind::Collectible, 440.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.speed(), 20);
        assert!(state.events.contains(&GameEvent::SpeedIncreased { speed: 20 }));
        // counted down once in the same frame
        assert_eq!(
            state.tracker.notification.as_ref().map(|n| n.remaining_frames),
            Some(59)
        );
        idle(&mut state, 59);
        assert!(state.tracker.notification.is_none());
    }

    #[test]
    fn test_speed_does_not_creep_over_time() {
        let config = GameConfig {
            obstacle_probability: 0.0,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, 11);
        tick(&mut state, &TickInput::new([Command::Start]));
        // The car never moves, so only coins in the middle lane are collected
        for _ in 0..3000 {
            let coins = state.tracker.coin_progress;
            let before = state.speed();
            tick(&mut state, &TickInput::default());
            if state.phase != GamePhase::Playing {
                break;
            }
            if state.speed() != before {
                assert_eq!(coins + 1, 10);
                assert_eq!(state.speed(), before + 10);
            }
        }
    }

    #[test]
    fn test_restart_resets_everything_but_high_score() {
        let mut state = GameState::with_high_score(GameConfig::default(), 3, HighScore::new(50));
        tick(&mut state, &TickInput::new([Command::Start]));
        state.tracker.score = 90;
        state.tracker.coin_progress = 9;
        place(&mut state, 900, 1, ObjectKind::Collectible, 440.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.speed(), 20);
        let lane = state.car.lane;
        place(&mut state, 901, lane, ObjectKind::Obstacle, 440.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.high_score.best, 100);
        assert!(state.high_score.is_new_record(100));

        tick(&mut state, &TickInput::new([Command::Restart]));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::RunRestarted));
        assert_eq!(state.score(), 0);
        assert_eq!(state.speed(), 10);
        assert_eq!(state.missed(), 0);
        assert_eq!(state.tracker.coin_progress, 0);
        assert!(state.tracker.notification.is_none());
        assert_eq!(state.car.lane, 1);
        assert_eq!(state.high_score.best, 100);
        assert!(state.game_over_reason.is_none());
    }

    #[test]
    fn test_quit_from_any_phase() {
        for phase_setup in 0..3 {
            let mut state = GameState::new(GameConfig::default(), 3);
            if phase_setup >= 1 {
                tick(&mut state, &TickInput::new([Command::Start]));
            }
            if phase_setup == 2 {
                place(&mut state, 1, 1, ObjectKind::Obstacle, 440.0);
                tick(&mut state, &TickInput::default());
                assert_eq!(state.phase, GamePhase::GameOver);
            }
            tick(&mut state, &TickInput::new([Command::Quit]));
            assert!(state.quit_requested);
            assert_eq!(state.events, vec![GameEvent::QuitRequested]);
        }
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput::new([Command::Start]),
            TickInput::new([Command::MoveLeft]),
            TickInput::default(),
            TickInput::new([Command::MoveRight, Command::MoveRight]),
        ];
        let mut a = GameState::new(GameConfig::default(), 99999);
        let mut b = GameState::new(GameConfig::default(), 99999);
        for frame in 0..2000 {
            let input = &inputs[frame % inputs.len()];
            tick(&mut a, input);
            tick(&mut b, input);
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    /// Start in the menu, a coin drops into lane 1 at frame 60, the car
    /// drives to lane 2 and the coin falls past it.
    #[test]
    fn test_scenario_coin_missed_while_car_in_other_lane() {
        let config = GameConfig::default();
        let seed = (0..10_000u64)
            .find(|&seed| {
                let mut spawner = SpawnController::new(&config, seed);
                let first = (0..60).find_map(|_| spawner.tick(&config));
                matches!(first, Some(o) if o.lane == 1 && o.kind == ObjectKind::Collectible)
            })
            .expect("some seed spawns a coin in lane 1");

        let mut state = GameState::new(config, seed);
        tick(&mut state, &TickInput::new([Command::Start]));
        tick(
            &mut state,
            &TickInput::new([Command::MoveRight, Command::MoveRight]),
        );
        assert_eq!(state.car.lane, 2);

        // Spawn tick counts from the first playing frame
        idle(&mut state, 58);
        assert_eq!(state.objects.len(), 1);
        let coin = &state.objects[0];
        assert_eq!((coin.lane, coin.kind), (1, ObjectKind::Collectible));

        let mut frames = 0;
        while state.missed() == 0 && frames < 200 {
            tick(&mut state, &TickInput::default());
            frames += 1;
        }
        assert_eq!(state.missed(), 1);
        assert_eq!(state.score(), 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
