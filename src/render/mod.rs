pub mod glyphs;
pub mod renderer;

pub use glyphs::{Glyph, GlyphError, GlyphSet};
pub use renderer::{CellMode, Renderer};
