use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Board geometry and scoring rules
///
/// The defaults reproduce the classic 400x400 board with 10-unit cells: a
/// 40x40 grid whose top four rows are reserved for the score header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in cells
    pub board_width: usize,
    /// Height of the board in cells, header band included
    pub board_height: usize,
    /// Rows at the top of the board reserved for the header
    pub header_rows: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Column of the head at spawn
    pub spawn_col: i32,
    /// Row of the head at spawn
    pub spawn_row: i32,

    /// Points awarded per apple
    pub apple_points: u32,
    /// Apples needed to advance one level
    pub apples_per_level: u32,
    /// Segments behind the head skipped by the self-collision check
    pub collision_grace: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 40,
            board_height: 40,
            header_rows: 4,
            initial_snake_length: 3,
            spawn_col: 5,
            spawn_row: 9,
            apple_points: 10,
            apples_per_level: 10,
            collision_grace: 4,
        }
    }
}

impl GameConfig {
    /// Number of rows the snake can move in
    pub fn playable_rows(&self) -> usize {
        self.board_height.saturating_sub(self.header_rows)
    }
}

/// Tick pacing: the interval shrinks by `step` per level, never below `min`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedConfig {
    pub base_interval_ms: u64,
    pub step_ms: u64,
    pub min_interval_ms: u64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            base_interval_ms: 140,
            step_ms: 20,
            min_interval_ms: 60,
        }
    }
}

impl SpeedConfig {
    /// Tick interval for a given level (levels start at 1)
    pub fn interval_for_level(&self, level: u32) -> Duration {
        let reduction = self.step_ms.saturating_mul(u64::from(level.saturating_sub(1)));
        let ms = self
            .base_interval_ms
            .saturating_sub(reduction)
            .max(self.min_interval_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_width, 40);
        assert_eq!(config.board_height, 40);
        assert_eq!(config.header_rows, 4);
        assert_eq!(config.playable_rows(), 36);
        assert_eq!(config.initial_snake_length, 3);
    }

    #[test]
    fn test_interval_per_level() {
        let speed = SpeedConfig::default();
        assert_eq!(speed.interval_for_level(1), Duration::from_millis(140));
        assert_eq!(speed.interval_for_level(2), Duration::from_millis(120));
        assert_eq!(speed.interval_for_level(5), Duration::from_millis(60));
    }

    #[test]
    fn test_interval_clamped_at_floor() {
        let speed = SpeedConfig::default();
        assert_eq!(speed.interval_for_level(6), Duration::from_millis(60));
        assert_eq!(speed.interval_for_level(1000), Duration::from_millis(60));
        assert_eq!(speed.interval_for_level(u32::MAX), Duration::from_millis(60));
    }
}
