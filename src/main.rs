//! Speed Hunter entry point
//!
//! Sets up logging and the terminal, then runs the fixed-rate game loop.

use std::fs::File;
use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use env_logger::{Env, Target};

use speed_hunter::audio::{AudioManager, TerminalBell};
use speed_hunter::consts::TARGET_FPS;
use speed_hunter::platform::{FrameClock, HostConfig, command_for_key};
use speed_hunter::renderer::{TerminalRenderer, ViewOptions, Viewport, render};
use speed_hunter::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use speed_hunter::{GameConfig, HighScore, Settings};

/// Everything the loop owns besides the terminal
struct Game {
    host: HostConfig,
    state: GameState,
    settings: Settings,
    audio: AudioManager,
    clock: FrameClock,
    input: TickInput,
    // Track phase for auto-save
    last_phase: GamePhase,
}

impl Game {
    fn new(host: HostConfig) -> Self {
        let config = match &host.tuning_path {
            Some(path) => GameConfig::load(path),
            None => GameConfig::default(),
        };
        let settings = Settings::load(&host.settings_path());
        let high_score = HighScore::load(&host.high_score_path());
        let seed = host.resolve_seed();
        log::info!("Game initialized with seed: {}", seed);

        let state = GameState::with_high_score(config, seed, high_score);
        let audio = AudioManager::new(Box::new(TerminalBell), &settings);
        let last_phase = state.phase;
        Self {
            host,
            state,
            settings,
            audio,
            clock: FrameClock::new(TARGET_FPS),
            input: TickInput::default(),
            last_phase,
        }
    }

    fn save_high_score(&self) {
        self.state.high_score.save(&self.host.high_score_path());
    }

    /// Run one simulation frame with the commands gathered since the last one
    fn step(&mut self) {
        tick(&mut self.state, &self.input);
        self.input.clear();
        self.audio.handle_events(&self.state.events);

        if self.state.phase != self.last_phase {
            log::info!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
            if self.state.phase == GamePhase::GameOver {
                self.save_high_score();
            }
            self.last_phase = self.state.phase;
        }
        if self.state.events.contains(&GameEvent::RunRestarted) {
            self.save_high_score();
        }
    }

    fn view_options(&self) -> ViewOptions {
        ViewOptions {
            fps: self.settings.show_fps.then(|| self.clock.fps()),
            show_controls: self.settings.show_controls,
        }
    }

    fn shutdown(&self) {
        self.save_high_score();
        self.settings.save(&self.host.settings_path());
        log::info!("Speed Hunter exiting");
    }
}

fn init_logging(host: &HostConfig) {
    let target = match File::create(host.log_path()) {
        Ok(file) => Target::Pipe(Box::new(file)),
        // stderr belongs to the UI
        Err(_) => Target::Pipe(Box::new(io::sink())),
    };
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(target)
        .init();
}

fn main() -> Result<()> {
    let host = HostConfig::from_env();
    init_logging(&host);
    log::info!("Speed Hunter starting...");

    let mut game = Game::new(host);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    game.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    loop {
        let (w, h) = term.size().unwrap_or((80, 24));
        let frame = render(
            &game.state.snapshot(),
            Viewport::new(w, h),
            game.view_options(),
        );
        term.draw(frame)?;

        // Wait for input until the next frame is due
        let timeout = game.clock.remaining(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(command) = command_for_key(key, game.state.phase) {
                        game.input.push(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        if game.clock.is_due(now) {
            game.step();
            game.clock.advance(now);
        }

        if game.state.quit_requested {
            return Ok(());
        }
    }
}
