use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::{ClockEvent, GameClock, GameConfig, GameEngine, GameState, SpeedConfig};
use crate::input::{InputAction, InputHandler};
use crate::metrics::GameMetrics;
use crate::render::{GlyphSet, Renderer};

use super::retry::RetryControl;

/// What the loop has to do after an input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventResponse {
    Ignored,
    Redraw,
    Restarted,
}

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    clock: GameClock,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    retry: RetryControl,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, speed: SpeedConfig, glyphs: GlyphSet) -> Self {
        Self::with_engine(GameEngine::new(config), speed, glyphs)
    }

    pub fn with_engine(mut engine: GameEngine, speed: SpeedConfig, glyphs: GlyphSet) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            clock: GameClock::new(speed),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(glyphs),
            input_handler: InputHandler::new(),
            retry: RetryControl::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal; a half-done setup is undone before the error surfaces
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = restore_on_err(setup_terminal(), restore_terminal)?;

        log::info!("game started");

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
        let mut tick_timer = ticker(self.clock.interval());

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => match self.handle_event(event) {
                            EventResponse::Ignored => {}
                            EventResponse::Redraw => self.draw(terminal)?,
                            EventResponse::Restarted => {
                                tick_timer = ticker(self.clock.interval());
                                self.draw(terminal)?;
                            }
                        },
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => break,
                    }
                }

                // Game logic tick; disabled while stopped
                _ = tick_timer.tick(), if self.clock.is_running() => {
                    if let ClockEvent::LevelUp(interval) = self.tick() {
                        tick_timer = ticker(interval);
                    }
                    self.draw(terminal)?;
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

        Ok(())
    }

    /// Advance the game one step and update the clock, stats and Retry control
    fn tick(&mut self) -> ClockEvent {
        let result = self.engine.advance(&mut self.state);
        self.metrics.update();

        let event = self.clock.on_step(&result, self.state.level);
        match event {
            ClockEvent::LevelUp(interval) => {
                log::info!(
                    "level up: level {} | interval {}ms",
                    self.state.level,
                    interval.as_millis()
                );
            }
            ClockEvent::Stop => {
                self.metrics.on_game_over(self.state.score);
                self.retry.show();
                log::info!(
                    "game over ({:?}): score {}, level {}, {} apples",
                    result.collision,
                    self.state.score,
                    self.state.level,
                    self.state.apples_eaten
                );
            }
            ClockEvent::Unchanged => {}
        }

        event
    }

    fn handle_event(&mut self, event: Event) -> EventResponse {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse),
            Event::Resize(_, _) => return EventResponse::Redraw,
            _ => return EventResponse::Ignored,
        };

        match action {
            InputAction::Turn(heading) => {
                if self.clock.is_running() {
                    self.state.set_pending_heading(heading);
                }
                EventResponse::Ignored
            }
            InputAction::Retry if self.retry.is_visible() => {
                self.restart();
                EventResponse::Restarted
            }
            InputAction::Click { column, row } if self.retry.hit(column, row) => {
                self.restart();
                EventResponse::Restarted
            }
            InputAction::Quit => {
                self.should_quit = true;
                EventResponse::Ignored
            }
            InputAction::Retry | InputAction::Click { .. } | InputAction::None => {
                EventResponse::Ignored
            }
        }
    }

    fn restart(&mut self) {
        self.state = self.engine.reset();
        self.clock.restart();
        self.metrics.on_game_start();
        self.retry.hide();
        log::info!("retry: new game (best so far {})", self.metrics.high_score);
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut retry_area = None;
        terminal
            .draw(|frame| {
                retry_area = self.renderer.render(
                    frame,
                    &self.state,
                    &self.metrics,
                    self.retry.is_visible(),
                );
            })
            .context("Failed to draw frame")?;
        self.retry.place(retry_area);
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best-effort teardown when setup fails part way; the setup error is the one reported
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(stderr(), LeaveAlternateScreen, DisableMouseCapture, Show);
}

fn restore_on_err<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

/// A tick timer whose first tick fires one `period` from now
fn ticker(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
