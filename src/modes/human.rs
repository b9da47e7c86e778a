use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameStatus, GridState, Request, SimulationEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::score::ScoreStore;

/// Interactive keyboard play
///
/// Owns the only `GridState` of the session. The engine mutates it on clock
/// ticks, the renderer reads it on frame ticks, and a reset swaps in a new one.
pub struct HumanMode<S, R = ThreadRng> {
    engine: SimulationEngine<R>,
    state: GridState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    score_store: S,
    should_quit: bool,
}

impl<S: ScoreStore> HumanMode<S, ThreadRng> {
    pub fn new(config: GameConfig, score_store: S) -> Self {
        Self::with_engine(SimulationEngine::new(config), score_store)
    }
}

impl<S: ScoreStore, R: Rng> HumanMode<S, R> {
    pub fn with_engine(mut engine: SimulationEngine<R>, score_store: S) -> Self {
        let state = engine.reset();
        let high_score = score_store.load();
        log::info!("loaded high score {}", high_score);

        Self {
            engine,
            state,
            metrics: GameMetrics::with_high_score(high_score),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            score_store,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn score_store(&self) -> &S {
        &self.score_store
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let tick_interval = self.engine.config().tick_interval();
        let mut tick_timer = interval(tick_interval);
        // A stalled frame must not replay a burst of moves afterwards.
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        log::info!(
            "starting {}x{} game at {} Hz",
            self.state.width(),
            self.state.height(),
            self.engine.config().tick_rate_hz
        );

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => log::warn!("terminal event error: {}", err),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        log::info!("quitting after {} games", self.metrics.games_played);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if let KeyAction::Request(request) = self.input_handler.handle_key_event(key) {
                self.apply_request(request);
            }
        }
    }

    /// Route a request according to the round's status
    fn apply_request(&mut self, request: Request) {
        match request {
            Request::Move(direction) => {
                let was_waiting = self.state.status() == GameStatus::NotStarted;
                let accepted = self.engine.request_direction(&mut self.state, direction);
                if accepted && was_waiting {
                    self.metrics.on_round_start();
                }
            }
            Request::Reset => {
                if self.state.is_game_over() {
                    self.reset_game();
                }
            }
            Request::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn update_game(&mut self) {
        if self.state.status() != GameStatus::Running {
            return;
        }

        let result = self.engine.tick(&mut self.state);

        // Running -> GameOver happens exactly once per round
        if result.terminated {
            let score = self.state.score();
            if self.metrics.on_game_over(score) {
                self.score_store.save(score);
            }
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_reset();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Position};
    use crate::score::MemoryScoreStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mode(high_score: u32) -> HumanMode<MemoryScoreStore, StdRng> {
        let engine =
            SimulationEngine::with_rng(GameConfig::small(), StdRng::seed_from_u64(17));
        let store = MemoryScoreStore {
            score: high_score,
            saves: 0,
        };
        HumanMode::with_engine(engine, store)
    }

    /// Drive the snake straight up until it hits the top wall
    fn crash(mode: &mut HumanMode<MemoryScoreStore, StdRng>) {
        mode.apply_request(Request::Move(Direction::Up));
        for _ in 0..mode.state.height() + 1 {
            mode.update_game();
        }
        assert!(mode.state.is_game_over());
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode(40);
        assert_eq!(mode.state().status(), GameStatus::NotStarted);
        assert_eq!(mode.state().score(), 0);
        assert_eq!(mode.metrics().high_score, 40);
    }

    #[test]
    fn test_ticks_wait_for_first_input() {
        let mut mode = mode(0);
        let head = mode.state.head();

        mode.update_game();
        mode.update_game();
        assert_eq!(mode.state.head(), head);

        mode.apply_request(Request::Move(Direction::Left));
        assert_eq!(mode.state.status(), GameStatus::Running);
        assert_eq!(mode.state.head(), head);

        mode.update_game();
        assert_eq!(mode.state.head(), Position::new(head.x - 1, head.y));
    }

    #[test]
    fn test_reset_only_after_game_over() {
        let mut mode = mode(0);
        mode.apply_request(Request::Move(Direction::Up));
        mode.update_game();
        let moved = mode.state.head();

        mode.apply_request(Request::Reset);
        assert_eq!(mode.state.head(), moved);
        assert_eq!(mode.state.status(), GameStatus::Running);

        crash(&mut mode);
        mode.apply_request(Request::Reset);
        assert_eq!(mode.state.status(), GameStatus::NotStarted);
        assert_eq!(mode.state.score(), 0);
        assert_eq!(mode.state.snake().len(), 1);
    }

    #[test]
    fn test_new_high_score_is_saved_once() {
        let mut mode = mode(0);
        mode.state.food = Some(Position::new(5, 4));

        crash(&mut mode);

        // More food may have landed on the path up.
        assert!(mode.state.score() >= 10);
        assert_eq!(mode.score_store().saves, 1);
        assert_eq!(mode.score_store().score, mode.state.score());

        // Further ticks on a finished round change nothing.
        mode.update_game();
        assert_eq!(mode.score_store().saves, 1);
    }

    #[test]
    fn test_lower_score_is_not_saved() {
        let mut mode = mode(500);

        crash(&mut mode);

        assert_eq!(mode.score_store().saves, 0);
        assert_eq!(mode.metrics().high_score, 500);
        assert_eq!(mode.metrics().games_played, 1);
    }

    #[test]
    fn test_directions_ignored_after_game_over() {
        let mut mode = mode(0);
        crash(&mut mode);
        let frozen = mode.state.clone();

        mode.apply_request(Request::Move(Direction::Down));
        mode.update_game();

        assert_eq!(mode.state, frozen);
    }

    #[test]
    fn test_quit_request() {
        let mut mode = mode(0);
        mode.apply_request(Request::Quit);
        assert!(mode.should_quit);
    }
}
