use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    config::GameConfig,
    heading::Heading,
    state::{CollisionType, GameState, Position, Snake},
};

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the head landed on the apple this tick
    pub ate_apple: bool,
    /// Whether eating pushed the game to a new level
    pub leveled_up: bool,
    /// Whether the game has ended
    pub terminated: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
}

impl StepResult {
    fn idle() -> Self {
        Self {
            ate_apple: false,
            leveled_up: false,
            terminated: true,
            collision: None,
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a fixed seed, for reproducible games
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Start a fresh game: three segments heading right, level 1, new apple
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            Position::new(self.config.spawn_col, self.config.spawn_row),
            Heading::Right,
            self.config.initial_snake_length,
        );
        let apple = self.place_apple();

        log::debug!("new game, apple at {apple:?}");

        GameState::new(
            snake,
            Heading::Right,
            apple,
            self.config.board_width,
            self.config.board_height,
            self.config.header_rows,
        )
    }

    /// Execute one tick of the game
    pub fn advance(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult::idle();
        }

        state.heading = state.pending_heading;

        let new_head = state.snake.head().moved_in_direction(state.heading);
        let ate_apple = new_head == state.apple;
        state.snake.move_snake(state.heading, ate_apple);

        let mut leveled_up = false;
        if ate_apple {
            state.score += self.config.apple_points;
            state.apples_eaten += 1;
            state.apple = self.place_apple();
            log::debug!(
                "apple eaten ({} total), next apple at {:?}",
                state.apples_eaten,
                state.apple
            );

            if self.config.apples_per_level > 0
                && state.apples_eaten % self.config.apples_per_level == 0
            {
                state.level += 1;
                leveled_up = true;
            }
        }

        let collision = self.check_collision(state);
        if collision.is_some() {
            state.is_alive = false;
        }

        StepResult {
            ate_apple,
            leveled_up,
            terminated: !state.is_alive,
            collision,
        }
    }

    /// Check the (already moved) head against the walls and the body
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        if !state.is_in_bounds(state.snake.head()) {
            return Some(CollisionType::Wall);
        }

        if state.snake.head_hits_body(self.config.collision_grace) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Pick a uniformly random cell in the playable area.
    ///
    /// The snake's own cells are not excluded, so an apple can land under
    /// the body.
    fn place_apple(&mut self) -> Position {
        let col = self.rng.gen_range(0..self.config.board_width.max(1)) as i32;
        let row = self.rng.gen_range(0..self.config.playable_rows().max(1)) as i32;
        Position::new(col, self.config.header_rows as i32 + row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::with_seed(GameConfig::default(), 7)
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.apples_eaten, 0);
        assert_eq!(state.heading, Heading::Right);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), Position::new(5, 9));
        assert!(state.is_in_bounds(state.apple));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.apple = Position::new(30, 30);
        let initial_head = state.snake.head();
        let initial_tail = state.snake.tail();

        let result = engine.advance(&mut state);

        assert!(!result.terminated);
        assert!(!result.ate_apple);
        assert_eq!(state.snake.head(), initial_head.moved_by(1, 0));
        assert_eq!(state.snake.len(), 3);
        assert!(!state.snake.contains(initial_tail));
    }

    #[test]
    fn test_apple_consumption() {
        let mut engine = engine();
        let mut state = engine.reset();

        state.apple = state.snake.head().moved_in_direction(state.heading);
        let eaten_at = state.apple;
        let initial_tail = state.snake.tail();

        let result = engine.advance(&mut state);

        assert!(result.ate_apple);
        assert!(!result.leveled_up);
        assert_eq!(state.score, 10);
        assert_eq!(state.apples_eaten, 1);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), eaten_at);
        assert_eq!(state.snake.tail(), initial_tail);
        assert!(state.is_in_bounds(state.apple));
    }

    #[test]
    fn test_pending_heading_applied_on_tick() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.apple = Position::new(30, 30);

        state.set_pending_heading(Heading::Down);
        assert_eq!(state.heading, Heading::Right);

        engine.advance(&mut state);
        assert_eq!(state.heading, Heading::Down);
        assert_eq!(state.snake.head(), Position::new(5, 10));
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(0, 10), Heading::Left, 3);
        let mut state = GameState::new(snake, Heading::Left, Position::new(20, 20), 40, 40, 4);

        let result = engine.advance(&mut state);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.collision, Some(CollisionType::Wall));
        assert_eq!(state.snake.head(), Position::new(-1, 10));
    }

    #[test]
    fn test_header_band_is_a_wall() {
        let mut engine = engine();
        let snake = Snake::new(Position::new(10, 4), Heading::Up, 3);
        let mut state = GameState::new(snake, Heading::Up, Position::new(20, 20), 40, 40, 4);

        let result = engine.advance(&mut state);

        assert_eq!(result.collision, Some(CollisionType::Wall));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();

        // Length 7 heading Right: (10,10) .. (4,10)
        let snake = Snake::new(Position::new(10, 10), Heading::Right, 7);
        let mut state = GameState::new(snake, Heading::Right, Position::new(30, 30), 40, 40, 4);

        // Loop back across the body: Down, Left, Left, Up lands on (8,10)
        state.set_pending_heading(Heading::Down);
        engine.advance(&mut state);
        state.set_pending_heading(Heading::Left);
        engine.advance(&mut state);
        engine.advance(&mut state);
        assert!(state.is_alive);

        state.set_pending_heading(Heading::Up);
        let result = engine.advance(&mut state);

        assert_eq!(state.snake.head(), Position::new(8, 10));
        assert!(result.terminated);
        assert_eq!(result.collision, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_tight_turn_inside_grace_survives() {
        let mut engine = engine();

        // A 6-long snake turning in a 2x2 square meets its index-4 segment,
        // which the grace distance ignores
        let snake = Snake::new(Position::new(10, 10), Heading::Right, 6);
        let mut state = GameState::new(snake, Heading::Right, Position::new(30, 30), 40, 40, 4);

        for heading in [Heading::Down, Heading::Left, Heading::Up] {
            state.set_pending_heading(heading);
            engine.advance(&mut state);
        }

        assert_eq!(state.snake.head(), Position::new(9, 10));
        assert!(state.is_alive);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.apple = Position::new(30, 30);

        state.set_pending_heading(Heading::Left);
        engine.advance(&mut state);

        assert_eq!(state.heading, Heading::Right);
        assert!(state.is_alive);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.is_alive = false;
        let before = state.clone();

        let result = engine.advance(&mut state);

        assert!(result.terminated);
        assert!(!result.ate_apple);
        assert_eq!(state, before);
    }

    #[test]
    fn test_level_up_every_ten_apples() {
        let mut engine = engine();
        let mut state = engine.reset();

        let mut level_ups = 0;
        for _ in 0..10 {
            state.set_pending_heading(Heading::Right);
            state.apple = state.snake.head().moved_in_direction(Heading::Right);
            let result = engine.advance(&mut state);
            assert!(result.ate_apple);
            if result.leveled_up {
                level_ups += 1;
            }
        }

        assert_eq!(level_ups, 1);
        assert_eq!(state.apples_eaten, 10);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 100);
        assert_eq!(state.snake.len(), 13);
    }

    #[test]
    fn test_apple_always_in_playable_area() {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 42);
        let state = engine.reset();
        for _ in 0..500 {
            let apple = engine.place_apple();
            assert!(state.is_in_bounds(apple), "apple {apple:?} outside board");
        }
    }

    #[test]
    fn test_apple_may_land_on_snake() {
        // A one-row playable area fully covered by the snake leaves no free
        // cell; placement still succeeds, on top of the body
        let config = GameConfig {
            board_width: 3,
            board_height: 2,
            header_rows: 1,
            spawn_col: 2,
            spawn_row: 1,
            ..GameConfig::default()
        };
        let mut engine = GameEngine::with_seed(config, 1);
        let state = engine.reset();

        assert_eq!(state.snake.len(), 3);
        assert!(state.snake.contains(state.apple));
    }
}
