//! # PDF Import
//!
//! Recovers ChordPro text from the text layer of a chord-sheet PDF.
//!
//! Rendering PDFs is out of scope: the caller hands over the positioned text
//! runs of each page (as produced by any PDF text extractor) and gets back
//! ChordPro text that goes through the same parser as hand-written songs.
//!
//! ## Pipeline
//! ```text
//! PageText (positioned runs)
//!   -> layout      lines rebuilt from Y buckets, gaps turned into spaces
//!   -> metadata    title / artist / key / capo lines pulled out
//!   -> body        section headings, chord-over-lyric merging
//!   -> ImportedSong { content, title, artist, key, capo }
//! ```
//!
//! Everything here is heuristic. A lyric line that happens to look like
//! chords comes out bracketed; that is accepted, never reported as an error.
//!
//! ## Usage
//! ```rust
//! use chordsheet::pdf_import::{import_lines, ImportOptions};
//!
//! let lines: Vec<String> = vec![
//!     "Amazing Grace".into(),
//!     "by John Newton".into(),
//!     "Key: G".into(),
//!     "G        C".into(),
//!     "Amazing grace".into(),
//! ];
//! let song = import_lines(&lines, Some("Amazing Grace"), &ImportOptions::default());
//! assert_eq!(song.artist.as_deref(), Some("John Newton"));
//! assert_eq!(
//!     song.content,
//!     "{title: Amazing Grace}\n{artist: John Newton}\n{key: G}\n\n[G]Amazing [C]grace"
//! );
//! ```

mod heuristics;
mod layout;
mod merge;
mod metadata;

#[cfg(test)]
mod tests;

pub use heuristics::{is_chord, is_chord_line, section_heading, separate_concatenated_chords};
pub use layout::{largest_text, reconstruct_lines};
pub use merge::merge_chord_line;
pub use metadata::SongMetadata;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ChordSheetError;

/// Y coordinates within this distance share a line
pub const Y_TOLERANCE: f64 = 5.0;

/// Gaps narrower than this fraction of a character are not spaces
pub const MIN_GAP_RATIO: f64 = 0.25;

/// Most spaces a single gap turns into
pub const MAX_GAP_SPACES: usize = 200;

/// Character width assumed for a line with no text or no usable widths
pub const FALLBACK_CHAR_WIDTH: f64 = 4.0;

/// Share of chord-like tokens above which a line is a chord line
pub const CHORD_LINE_RATIO: f64 = 0.7;

pub const MAX_CHORD_TOKEN_LEN: usize = 10;

/// How many columns a chord may sit to the right of the word it belongs to
pub const CHORD_ALIGNMENT_SLACK: usize = 2;

pub const MAX_HEADING_LEN: usize = 30;

/// A bare "Acordes" line shorter than this ends the song body
pub const CHORD_APPENDIX_MAX_LEN: usize = 15;

/// Lines after the title searched for the artist
pub const ARTIST_WINDOW: usize = 2;

/// A positioned run of text on a page.
///
/// Coordinates follow PDF user space: `y` grows towards the top of the page
/// and `height` stands in for the font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TextItem {
    pub fn new(text: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }
}

/// Text layer of one page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageText {
    pub items: Vec<TextItem>,
}

/// Read pages from a YAML list of `items` lists
pub fn pages_from_yaml(source: &str) -> Result<Vec<PageText>, ChordSheetError> {
    serde_yaml::from_str(source).map_err(|e| ChordSheetError::PageText(e.to_string()))
}

/// Tunable thresholds of the import heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ImportOptions {
    pub y_tolerance: f64,
    pub min_gap_ratio: f64,
    pub fallback_char_width: f64,
    pub chord_line_ratio: f64,
    pub max_chord_token_len: usize,
    pub chord_alignment_slack: usize,
    pub max_heading_len: usize,
    pub chord_appendix_max_len: usize,
    pub artist_window: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            y_tolerance: Y_TOLERANCE,
            min_gap_ratio: MIN_GAP_RATIO,
            fallback_char_width: FALLBACK_CHAR_WIDTH,
            chord_line_ratio: CHORD_LINE_RATIO,
            max_chord_token_len: MAX_CHORD_TOKEN_LEN,
            chord_alignment_slack: CHORD_ALIGNMENT_SLACK,
            max_heading_len: MAX_HEADING_LEN,
            chord_appendix_max_len: CHORD_APPENDIX_MAX_LEN,
            artist_window: ARTIST_WINDOW,
        }
    }
}

impl ImportOptions {
    /// Read overrides from YAML; missing keys keep their defaults
    pub fn from_yaml(source: &str) -> Result<Self, ChordSheetError> {
        Ok(serde_yaml::from_str(source)?)
    }
}

/// Result of an import
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportedSong {
    /// ChordPro text, directives first
    pub content: String,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<String>,
    pub capo: Option<i32>,
}

/// Import a song from the text layer of its pages.
///
/// The title is the tallest run on the first page.
pub fn import_pages(pages: &[PageText], options: &ImportOptions) -> ImportedSong {
    let lines: Vec<String> = pages
        .iter()
        .flat_map(|page| reconstruct_lines(&page.items, options))
        .collect();
    let title = pages
        .first()
        .and_then(|page| largest_text(&page.items))
        .map(|item| item.text.trim())
        .filter(|title| !title.is_empty());
    debug!("rebuilt {} lines from {} pages, title {:?}", lines.len(), pages.len(), title);
    import_lines(&lines, title, options)
}

/// Import a song from lines that already carry their spacing
pub fn import_lines(lines: &[String], title: Option<&str>, options: &ImportOptions) -> ImportedSong {
    let (metadata, body_lines) = metadata::strip_metadata(lines, title, options);
    let body = convert_body(&body_lines, options);

    let mut content = String::new();
    if let Some(title) = &metadata.title {
        content.push_str(&format!("{{title: {}}}\n", title));
    }
    if let Some(artist) = &metadata.artist {
        content.push_str(&format!("{{artist: {}}}\n", artist));
    }
    if let Some(key) = &metadata.key {
        content.push_str(&format!("{{key: {}}}\n", key));
    }
    if let Some(capo) = metadata.capo.filter(|capo| *capo != 0) {
        content.push_str(&format!("{{capo: {}}}\n", capo));
    }
    if !content.is_empty() {
        content.push('\n');
    }
    content.push_str(body.trim());

    ImportedSong {
        content,
        title: metadata.title,
        artist: metadata.artist,
        key: metadata.key,
        capo: metadata.capo,
    }
}

/// Rewrite the song body as ChordPro lines
fn convert_body(lines: &[&str], options: &ImportOptions) -> String {
    let mut body = String::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();
        i += 1;

        if trimmed.is_empty() {
            body.push('\n');
            continue;
        }

        if trimmed.to_lowercase().starts_with("acordes")
            && trimmed.chars().count() < options.chord_appendix_max_len
        {
            debug!("chord appendix at line {}, dropping the rest", i);
            break;
        }

        if let Some(heading) = section_heading(trimmed, options) {
            body.push_str(&format!("# {}\n", heading));
            continue;
        }

        let separated = separate_concatenated_chords(trimmed);
        let chord_line = if separated == trimmed {
            line.trim_end()
        } else {
            separated.as_ref()
        };

        if !is_chord_line(chord_line, options) {
            body.push_str(line);
            body.push('\n');
            continue;
        }

        match lines.get(i) {
            Some(next) if !next.trim().is_empty() && !is_chord_line(next.trim(), options) => {
                body.push_str(&merge_chord_line(chord_line, next, options));
                i += 1;
            }
            _ => {
                let chords: Vec<String> = chord_line
                    .split_whitespace()
                    .map(|chord| format!("[{}]", chord))
                    .collect();
                body.push_str(&chords.join(" "));
            }
        }
        body.push('\n');
    }
    body
}
