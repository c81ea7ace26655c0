//! Glyphs for the apple, the body and the head
//!
//! A default set is compiled into the binary; a replacement can be loaded
//! from a JSON file at startup:
//!
//! ```json
//! {
//!   "apple": { "symbol": "●", "color": "red" },
//!   "body":  { "symbol": "■", "color": "green" },
//!   "head":  { "symbol": "◆", "color": "#00ffff" }
//! }
//! ```
//!
//! Colours accept anything `ratatui::style::Color` parses: names, `#rrggbb`
//! and indexed values.

use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_GLYPHS: &str = include_str!("../../assets/glyphs.json");

#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("failed to read glyph file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed glyph definition")]
    Parse(#[from] serde_json::Error),
    #[error("{glyph} symbol must be exactly one character, got {symbol:?}")]
    InvalidSymbol { glyph: &'static str, symbol: String },
    #[error("{glyph} colour {color:?} is not a known colour")]
    InvalidColor { glyph: &'static str, color: String },
}

/// One drawable cell: a character and its colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub symbol: char,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphSet {
    pub apple: Glyph,
    pub body: Glyph,
    pub head: Glyph,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GlyphFile {
    apple: GlyphSpec,
    body: GlyphSpec,
    head: GlyphSpec,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct GlyphSpec {
    symbol: String,
    color: String,
}

impl GlyphSpec {
    fn into_glyph(self, glyph: &'static str) -> Result<Glyph, GlyphError> {
        let mut chars = self.symbol.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() && !c.is_whitespace() => c,
            _ => {
                return Err(GlyphError::InvalidSymbol {
                    glyph,
                    symbol: self.symbol,
                });
            }
        };

        let color = Color::from_str(&self.color).map_err(|_| GlyphError::InvalidColor {
            glyph,
            color: self.color.clone(),
        })?;

        Ok(Glyph { symbol, color })
    }
}

impl GlyphSet {
    /// Parse a glyph set from JSON text
    pub fn from_json(json: &str) -> Result<Self, GlyphError> {
        let file: GlyphFile = serde_json::from_str(json)?;

        Ok(Self {
            apple: file.apple.into_glyph("apple")?,
            body: file.body.into_glyph("body")?,
            head: file.head.into_glyph("head")?,
        })
    }

    /// Load the set from `path`, or the built-in set when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, GlyphError> {
        match path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| GlyphError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                Self::from_json(&json)
            }
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Result<Self, GlyphError> {
        Self::from_json(DEFAULT_GLYPHS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_set_loads() {
        let glyphs = GlyphSet::builtin().unwrap();
        assert_eq!(glyphs.apple.color, Color::Red);
        assert_ne!(glyphs.head.symbol, glyphs.body.symbol);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{
                "apple": {{ "symbol": "@", "color": "yellow" }},
                "body": {{ "symbol": "o", "color": "#00ff00" }},
                "head": {{ "symbol": "O", "color": "white" }}
            }}"##
        )
        .unwrap();

        let glyphs = GlyphSet::load(Some(file.path())).unwrap();

        assert_eq!(glyphs.apple, Glyph { symbol: '@', color: Color::Yellow });
        assert_eq!(glyphs.body.color, Color::Rgb(0, 255, 0));
        assert_eq!(glyphs.head.symbol, 'O');
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");

        let err = GlyphSet::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, GlyphError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = GlyphSet::from_json(r#"{ "apple": "#).unwrap_err();
        assert!(matches!(err, GlyphError::Parse(_)));

        let missing_head = r#"{
            "apple": { "symbol": "@", "color": "red" },
            "body": { "symbol": "o", "color": "green" }
        }"#;
        assert!(matches!(
            GlyphSet::from_json(missing_head),
            Err(GlyphError::Parse(_))
        ));
    }

    #[test]
    fn test_multi_char_symbol_rejected() {
        let json = r#"{
            "apple": { "symbol": "@@", "color": "red" },
            "body": { "symbol": "o", "color": "green" },
            "head": { "symbol": "O", "color": "green" }
        }"#;

        let err = GlyphSet::from_json(json).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidSymbol { glyph: "apple", .. }));
    }

    #[test]
    fn test_unknown_colour_rejected() {
        let json = r#"{
            "apple": { "symbol": "@", "color": "red" },
            "body": { "symbol": "o", "color": "not-a-colour" },
            "head": { "symbol": "O", "color": "green" }
        }"#;

        let err = GlyphSet::from_json(json).unwrap_err();
        assert!(matches!(err, GlyphError::InvalidColor { glyph: "body", .. }));
    }
}
