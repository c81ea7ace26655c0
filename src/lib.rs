//! Snake - the classic arcade game in a terminal
//!
//! This library provides:
//! - Core game logic and the tick clock (game module)
//! - Keyboard and mouse mapping (input module)
//! - TUI rendering and glyph loading (render module)
//! - In-memory session stats (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
