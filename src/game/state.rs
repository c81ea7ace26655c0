use std::collections::VecDeque;

use super::heading::Heading;

/// A cell on the board, `(col, row)` with rows counted from the top edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move position by delta
    pub fn moved_by(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Move position one cell in a heading
    pub fn moved_in_direction(&self, heading: Heading) -> Self {
        let (dcol, drow) = heading.delta();
        self.moved_by(dcol, drow)
    }
}

/// The snake, head at the front of the deque
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: VecDeque<Position>,
}

impl Snake {
    /// Create a straight snake whose body trails behind `head`, opposite to `heading`
    pub fn new(head: Position, heading: Heading, length: usize) -> Self {
        let back = heading.opposite();
        let segments = std::iter::successors(Some(head), |pos| Some(pos.moved_in_direction(back)))
            .take(length.max(1))
            .collect();

        Self { segments }
    }

    /// Build a snake from explicit segments, head first
    #[cfg(test)]
    pub(crate) fn from_segments(segments: impl IntoIterator<Item = Position>) -> Self {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        assert!(!segments.is_empty(), "a snake needs at least a head");
        Self { segments }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().copied()
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().skip(1).copied()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    /// Whether the head sits on a segment more than `grace` places behind it
    pub fn head_hits_body(&self, grace: usize) -> bool {
        let head = self.head();
        self.segments.iter().skip(grace + 1).any(|&segment| segment == head)
    }

    /// Advance one cell, keeping the tail when growing
    pub fn move_snake(&mut self, heading: Heading, should_grow: bool) {
        let new_head = self.head().moved_in_direction(heading);
        self.segments.push_front(new_head);

        if !should_grow {
            self.segments.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the playable area
    Wall,
    /// Head ran into the body
    SelfCollision,
}

/// Complete per-game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub heading: Heading,
    pub pending_heading: Heading,
    pub apple: Position,
    pub board_width: usize,
    pub board_height: usize,
    pub header_rows: usize,
    pub score: u32,
    pub level: u32,
    pub apples_eaten: u32,
    pub is_alive: bool,
}

impl GameState {
    pub fn new(
        snake: Snake,
        heading: Heading,
        apple: Position,
        board_width: usize,
        board_height: usize,
        header_rows: usize,
    ) -> Self {
        Self {
            snake,
            heading,
            pending_heading: heading,
            apple,
            board_width,
            board_height,
            header_rows,
            score: 0,
            level: 1,
            apples_eaten: 0,
            is_alive: true,
        }
    }

    /// Queue a heading for the next tick; reversals of the current heading are dropped
    pub fn set_pending_heading(&mut self, heading: Heading) {
        if !self.heading.is_opposite(heading) {
            self.pending_heading = heading;
        }
    }

    /// Check if a position lies inside the playable area (below the header)
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.col >= 0
            && pos.col < self.board_width as i32
            && pos.row >= self.header_rows as i32
            && pos.row < self.board_height as i32
    }
}
