//! # Parsed Song Types
//!
//! This module defines the structured projection of a ChordPro text.
//!
//! ## Type Hierarchy
//! ```text
//! ParsedSong
//!   ├── title, artist, key: String
//!   ├── capo: i32
//!   └── Vec<ParsedLine>
//!         ├── Empty
//!         ├── Comment(String)
//!         └── Lyric(LyricLine)
//!               ├── text: String (the trimmed source line)
//!               └── Vec<Segment>
//!                     ├── chord: Option<String>
//!                     ├── lyric: String
//!                     └── is_bold: bool
//! ```
//!
//! ## Key Concepts
//!
//! ### Derived, never stored
//! The song text is the single source of truth. A `ParsedSong` is recomputed
//! from it on every edit and is never edited in place.
//!
//! ### Segments
//! A lyric line is cut at every chord marker and every `*bold*` span.
//! Joining the `lyric` of all segments gives the line with its chords and
//! bold asterisks removed. A chord with nothing after it (or followed
//! directly by another chord) still gets a segment, with an empty lyric.
//!
//! ## Related Modules
//! - `parser` - Builds these types from text and serializes them back
//! - `lexer` - Splits lyric lines into chord markers and bold spans

use serde::Serialize;

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_ARTIST: &str = "Unknown";
pub const DEFAULT_KEY: &str = "C";

/// One piece of a lyric line: an optional chord over a run of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<String>,
    pub lyric: String,
    pub is_bold: bool,
}

impl Segment {
    pub fn text(lyric: impl Into<String>, is_bold: bool) -> Self {
        Self {
            chord: None,
            lyric: lyric.into(),
            is_bold,
        }
    }

    pub fn chord(chord: impl Into<String>, lyric: impl Into<String>, is_bold: bool) -> Self {
        Self {
            chord: Some(chord.into()),
            lyric: lyric.into(),
            is_bold,
        }
    }
}

/// A line containing lyrics, chords or both
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LyricLine {
    pub text: String,
    pub segments: Vec<Segment>,
}

impl LyricLine {
    /// The line's lyrics with chords and bold markers removed
    pub fn lyrics(&self) -> String {
        self.segments.iter().map(|s| s.lyric.as_str()).collect()
    }

    /// Chords of the line in reading order
    pub fn chords(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| s.chord.as_deref())
    }
}

/// A single output line of the parser
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParsedLine {
    Empty,
    Comment { text: String },
    Lyric(LyricLine),
}

/// Structured view of a ChordPro song
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedSong {
    pub title: String,
    pub artist: String,
    pub key: String,
    pub capo: i32,
    pub lines: Vec<ParsedLine>,
}

impl Default for ParsedSong {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            artist: DEFAULT_ARTIST.to_string(),
            key: DEFAULT_KEY.to_string(),
            capo: 0,
            lines: Vec::new(),
        }
    }
}

impl ParsedSong {
    /// Lyric lines only, in order
    pub fn lyric_lines(&self) -> impl Iterator<Item = &LyricLine> {
        self.lines.iter().filter_map(|line| match line {
            ParsedLine::Lyric(lyric) => Some(lyric),
            _ => None,
        })
    }
}
