use std::collections::HashSet;

use crate::lexer::{chord_tokens, Token};

/// Ordering of the chords returned by extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChordOrder {
    /// Order of first appearance in the text
    #[default]
    FirstSeen,
    /// Lexicographic order, as used by chord palettes
    Sorted,
}

fn collect_unique<'a>(chords: impl Iterator<Item = &'a str>, order: ChordOrder) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique: Vec<String> = chords
        .filter(|chord| seen.insert(*chord))
        .map(str::to_string)
        .collect();
    if order == ChordOrder::Sorted {
        unique.sort();
    }
    unique
}

fn chords_in(text: &str) -> impl Iterator<Item = &str> {
    chord_tokens(text).filter_map(|t| match t.token {
        Token::Chord(chord) => Some(chord),
        Token::Text(_) => None,
    })
}

/// Every distinct chord marker of a text, keyed by its full spelling.
///
/// # Example
/// ```rust
/// use chordsheet::{extract_unique, ChordOrder};
///
/// let chords = extract_unique("[G]a [C]b [G]c [Am/G]d", ChordOrder::FirstSeen);
/// assert_eq!(chords, vec!["G", "C", "Am/G"]);
/// ```
pub fn extract_unique(text: &str, order: ChordOrder) -> Vec<String> {
    collect_unique(chords_in(text), order)
}

/// Distinct chords with any slash bass removed (`C/G` counts as `C`)
pub fn extract_unique_roots(text: &str, order: ChordOrder) -> Vec<String> {
    collect_unique(
        chords_in(text).map(|chord| chord.split('/').next().unwrap_or(chord)),
        order,
    )
}
