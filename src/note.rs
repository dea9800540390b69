use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ChordSheetError;

/// Spelling used when rendering a pitch class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    #[default]
    Sharps,
    Flats,
}

impl FromStr for Notation {
    type Err = ChordSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sharps" | "sharp" | "#" => Ok(Notation::Sharps),
            "flats" | "flat" | "b" => Ok(Notation::Flats),
            other => Err(ChordSheetError::InvalidArgument(format!(
                "unknown notation '{}', expected 'sharps' or 'flats'",
                other
            ))),
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::Sharps => write!(f, "sharps"),
            Notation::Flats => write!(f, "flats"),
        }
    }
}

pub const NOTES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
pub const NOTES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Irregular spellings that appear in neither table
const ENHARMONICS: [(&str, &str); 4] = [("B#", "C"), ("E#", "F"), ("Cb", "B"), ("Fb", "E")];

const MAJOR_SCALE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const MINOR_SCALE: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];

/// Pitch class (0 = C) of a note name such as `C#`, `Db`, `B#`.
///
/// Returns `None` for anything else so callers can pass unknown text through.
pub fn note_index(name: &str) -> Option<u8> {
    if let Some(i) = NOTES_SHARP.iter().position(|n| *n == name) {
        return Some(i as u8);
    }
    if let Some(i) = NOTES_FLAT.iter().position(|n| *n == name) {
        return Some(i as u8);
    }
    ENHARMONICS
        .iter()
        .find(|(alias, _)| *alias == name)
        .and_then(|(_, canonical)| NOTES_SHARP.iter().position(|n| n == canonical))
        .map(|i| i as u8)
}

/// Name of a pitch class in the requested spelling
pub fn note_name(pitch_class: u8, notation: Notation) -> &'static str {
    let i = (pitch_class % 12) as usize;
    match notation {
        Notation::Sharps => NOTES_SHARP[i],
        Notation::Flats => NOTES_FLAT[i],
    }
}

/// Move a pitch class by any number of semitones, wrapping into 0..12
pub fn shift(pitch_class: u8, semitones: i32) -> u8 {
    (pitch_class as i32 + semitones).rem_euclid(12) as u8
}

/// Pitch classes of the diatonic scale for a key such as `G`, `Bb` or `F#m`
pub fn key_scale(key: &str) -> Option<[u8; 7]> {
    let key = key.trim();
    let (root, minor) = match key.strip_suffix('m') {
        Some(root) => (root, true),
        None => (key, false),
    };
    let tonic = note_index(root)?;
    let intervals = if minor { MINOR_SCALE } else { MAJOR_SCALE };
    Some(intervals.map(|i| (tonic + i) % 12))
}
