//! Chord naming from fretboard shapes
//!
//! Suggests a name for a painted chord shape by matching the set of sounded
//! pitch classes against a table of interval formulas. This is a best-effort
//! classifier for common guitar voicings, not a complete harmonic analysis:
//! exotic voicings may get a surprising (but deterministic) name.
//!
//! # Algorithm
//! 1. Sounded strings are mapped to pitch classes in standard tuning.
//! 2. No sounded string gives no name; a single distinct pitch class gives
//!    just that note.
//! 3. The bass is the pitch class of the lowest sounded string.
//! 4. Each distinct pitch class is tried as the root (lowest string first),
//!    and the intervals above it must equal a formula exactly.
//! 5. A match scores [`BASE_SCORE`] minus the suffix length minus the number of
//!    intervals, plus [`ROOT_POSITION_BONUS`] when the root is the bass. The
//!    first highest score wins; formulas are tried in [`CHORD_FORMULAS`]
//!    order.
//! 6. Without any match, the bass note is returned.

use crate::note::{key_scale, note_name, Notation};
use crate::shape::ChordShape;

pub const BASE_SCORE: i32 = 100;

/// Bonus for voicings with the root in the bass
pub const ROOT_POSITION_BONUS: i32 = 20;

/// A chord quality and its intervals above the root in semitones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordFormula {
    pub suffix: &'static str,
    pub intervals: &'static [u8],
}

impl ChordFormula {
    const fn new(suffix: &'static str, intervals: &'static [u8]) -> Self {
        Self { suffix, intervals }
    }

    /// Intervals as a bitmask over the 12 pitch classes
    fn mask(&self) -> u16 {
        self.intervals.iter().fold(0, |mask, i| mask | 1 << i)
    }

    fn score(&self, root_is_bass: bool) -> i32 {
        let mut score = BASE_SCORE - self.suffix.len() as i32 - self.intervals.len() as i32;
        if root_is_bass {
            score += ROOT_POSITION_BONUS;
        }
        score
    }
}

/// Recognized formulas, most common first
pub static CHORD_FORMULAS: &[ChordFormula] = &[
    ChordFormula::new("", &[0, 4, 7]),
    ChordFormula::new("m", &[0, 3, 7]),
    ChordFormula::new("7", &[0, 4, 7, 10]),
    ChordFormula::new("m7", &[0, 3, 7, 10]),
    ChordFormula::new("maj7", &[0, 4, 7, 11]),
    ChordFormula::new("sus2", &[0, 2, 7]),
    ChordFormula::new("sus4", &[0, 5, 7]),
    ChordFormula::new("dim", &[0, 3, 6]),
    ChordFormula::new("aug", &[0, 4, 8]),
    ChordFormula::new("m7b5", &[0, 3, 6, 10]),
    ChordFormula::new("dim7", &[0, 3, 6, 9]),
    ChordFormula::new("6", &[0, 4, 7, 9]),
    ChordFormula::new("m6", &[0, 3, 7, 9]),
    ChordFormula::new("add9", &[0, 4, 7, 2]),
    ChordFormula::new("madd9", &[0, 3, 7, 2]),
    ChordFormula::new("9", &[0, 4, 7, 10, 2]),
    ChordFormula::new("m9", &[0, 3, 7, 10, 2]),
    ChordFormula::new("maj9", &[0, 4, 7, 11, 2]),
];

/// A formula matched at a root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordMatch {
    pub root: u8,
    pub bass: u8,
    pub formula: &'static ChordFormula,
    pub score: i32,
}

impl ChordMatch {
    /// `Root[Suffix][/Bass]` in the requested spelling
    pub fn name(&self, notation: Notation) -> String {
        let mut name = format!("{}{}", note_name(self.root, notation), self.formula.suffix);
        if self.root != self.bass {
            name.push('/');
            name.push_str(note_name(self.bass, notation));
        }
        name
    }
}

/// Distinct pitch classes in order of first appearance, low string first
fn distinct_pitch_classes(shape: &ChordShape) -> Vec<u8> {
    let mut distinct = Vec::new();
    for (_, pitch_class) in shape.sounded_pitch_classes() {
        if !distinct.contains(&pitch_class) {
            distinct.push(pitch_class);
        }
    }
    distinct
}

/// Every formula match for the shape, in search order
pub fn chord_matches(shape: &ChordShape) -> Vec<ChordMatch> {
    let pitch_classes = distinct_pitch_classes(shape);
    let Some(&bass) = pitch_classes.first() else {
        return Vec::new();
    };

    let mut matches = Vec::new();
    for &root in &pitch_classes {
        let mask = pitch_classes
            .iter()
            .fold(0u16, |mask, pc| mask | 1 << ((pc + 12 - root) % 12));
        for formula in CHORD_FORMULAS {
            if formula.mask() == mask {
                matches.push(ChordMatch {
                    root,
                    bass,
                    formula,
                    score: formula.score(root == bass),
                });
            }
        }
    }
    matches
}

/// Pick the best match: highest score, earliest on ties.
///
/// With a key, a tied match whose root belongs to the key's scale replaces
/// one whose root does not.
pub fn best_match(matches: &[ChordMatch], key: Option<&str>) -> Option<ChordMatch> {
    let scale = key.and_then(key_scale);
    let in_key = |m: &ChordMatch| scale.map_or(false, |s| s.contains(&m.root));

    let mut best: Option<ChordMatch> = None;
    for candidate in matches {
        best = match best {
            None => Some(*candidate),
            Some(current) if candidate.score > current.score => Some(*candidate),
            Some(current)
                if candidate.score == current.score && in_key(candidate) && !in_key(&current) =>
            {
                Some(*candidate)
            }
            keep => keep,
        };
    }
    best
}

/// Suggest a chord name for a shape.
///
/// # Example
/// ```rust
/// use chordsheet::{infer_chord_name, ChordShape, Notation};
///
/// let shape: ChordShape = "x 0 2 2 1 0".parse()?;
/// assert_eq!(infer_chord_name(&shape, Notation::Sharps, None), Some("Am".to_string()));
///
/// let muted: ChordShape = "x x x x x x".parse()?;
/// assert_eq!(infer_chord_name(&muted, Notation::Sharps, None), None);
/// # Ok::<(), chordsheet::ChordSheetError>(())
/// ```
pub fn infer_chord_name(shape: &ChordShape, notation: Notation, key: Option<&str>) -> Option<String> {
    let pitch_classes = distinct_pitch_classes(shape);
    let bass = *pitch_classes.first()?;
    if pitch_classes.len() == 1 {
        return Some(note_name(bass, notation).to_string());
    }

    match best_match(&chord_matches(shape), key) {
        Some(best) => Some(best.name(notation)),
        None => Some(note_name(bass, notation).to_string()),
    }
}
