//! Simulation clock for the game loop
//!
//! Tracks whether the loop is ticking and at what interval, independent of
//! any timer or terminal. The driver asks it for the current interval and
//! feeds it the result of every tick.

use std::time::Duration;

use super::config::SpeedConfig;
use super::engine::StepResult;

/// Whether the loop is ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Advancing the game every `interval`
    Running,
    /// Game over, waiting for a retry
    Stopped,
}

/// Change the driver must apply to its timer after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// Nothing changed
    Unchanged,
    /// The game levelled up; tick at this interval from now on (unchanged once at the floor)
    LevelUp(Duration),
    /// The game ended; stop ticking
    Stop,
}

#[derive(Debug, Clone)]
pub struct GameClock {
    speed: SpeedConfig,
    state: LoopState,
    interval: Duration,
}

impl GameClock {
    /// A clock that starts Running at the base interval
    pub fn new(speed: SpeedConfig) -> Self {
        Self {
            speed,
            state: LoopState::Running,
            interval: speed.interval_for_level(1),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Account for the outcome of one tick
    pub fn on_step(&mut self, result: &StepResult, level: u32) -> ClockEvent {
        if !self.is_running() {
            return ClockEvent::Unchanged;
        }

        if result.terminated {
            self.state = LoopState::Stopped;
            return ClockEvent::Stop;
        }

        if result.leveled_up {
            self.interval = self.speed.interval_for_level(level);
            return ClockEvent::LevelUp(self.interval);
        }

        ClockEvent::Unchanged
    }

    /// Back to Running at the base interval after a reset
    pub fn restart(&mut self) {
        self.state = LoopState::Running;
        self.interval = self.speed.interval_for_level(1);
    }
}
