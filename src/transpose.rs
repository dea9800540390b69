use crate::lexer::{Lexer, Token};
use crate::note::{note_index, note_name, shift, Notation};

/// Split a chord (or bass) into its root spelling and the rest.
///
/// The root is a capital `A`-`G` with an optional `#` or `b`; everything after
/// it is the suffix and is never interpreted.
pub fn split_root(chord: &str) -> Option<(&str, &str)> {
    let bytes = chord.as_bytes();
    match bytes.first() {
        Some(b'A'..=b'G') => {}
        _ => return None,
    }
    let root_len = match bytes.get(1) {
        Some(b'#') | Some(b'b') => 2,
        _ => 1,
    };
    Some(chord.split_at(root_len))
}

/// Transpose a single note name, or `None` if it is not a note
fn transpose_note(note: &str, semitones: i32, notation: Notation) -> Option<&'static str> {
    let index = note_index(note)?;
    Some(note_name(shift(index, semitones), notation))
}

/// Transpose a root-plus-suffix part, keeping the suffix verbatim
fn transpose_part(part: &str, semitones: i32, notation: Notation) -> Option<String> {
    let (root, suffix) = split_root(part)?;
    let new_root = transpose_note(root, semitones, notation)?;
    Some(format!("{}{}", new_root, suffix))
}

/// Transpose a chord symbol by a number of semitones.
///
/// Only the root and the slash bass change; the quality/extension text is
/// copied as-is. Anything that does not start with a note name is returned
/// unchanged, and so is a bass that is not a note.
///
/// # Example
/// ```rust
/// use chordsheet::{transpose_chord, Notation};
///
/// assert_eq!(transpose_chord("G/B", 2, Notation::Sharps), "A/C#");
/// assert_eq!(transpose_chord("C#m7b5", 1, Notation::Flats), "Dm7b5");
/// assert_eq!(transpose_chord("N.C.", 3, Notation::Sharps), "N.C.");
/// ```
pub fn transpose_chord(chord: &str, semitones: i32, notation: Notation) -> String {
    let (main, bass) = match chord.split_once('/') {
        Some((main, bass)) => (main, Some(bass)),
        None => (chord, None),
    };

    let Some(mut transposed) = transpose_part(main, semitones, notation) else {
        return chord.to_string();
    };

    if let Some(bass) = bass {
        transposed.push('/');
        match transpose_part(bass, semitones, notation) {
            Some(new_bass) => transposed.push_str(&new_bass),
            None => transposed.push_str(bass),
        }
    }

    transposed
}

/// Transpose every `[Chord]` marker of a ChordPro text.
///
/// All text outside the chord markers is copied byte for byte. A shift of
/// zero returns the text unchanged.
pub fn transpose_chordpro(text: &str, semitones: i32, notation: Notation) -> String {
    if semitones == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for located in Lexer::new(text).tokenize() {
        match located.token {
            Token::Text(literal) => out.push_str(literal),
            Token::Chord(chord) => {
                out.push('[');
                out.push_str(&transpose_chord(chord, semitones, notation));
                out.push(']');
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_basic() {
        assert_eq!(transpose_chord("C", 12, Notation::Sharps), "C");
        assert_eq!(transpose_chord("C", 1, Notation::Sharps), "C#");
        assert_eq!(transpose_chord("C", -1, Notation::Flats), "B");
        assert_eq!(transpose_chord("A", 3, Notation::Flats), "C");
        assert_eq!(transpose_chord("C", 0, Notation::Sharps), "C");
    }

    #[test]
    fn test_transpose_slash_chord() {
        assert_eq!(transpose_chord("G/B", 2, Notation::Sharps), "A/C#");
        assert_eq!(transpose_chord("D/F#", -2, Notation::Flats), "C/E");
        assert_eq!(transpose_chord("Am7/G", 5, Notation::Sharps), "Dm7/C");
    }

    #[test]
    fn test_suffix_preserved() {
        assert_eq!(transpose_chord("C#m7b5/G", 1, Notation::Sharps), "Dm7b5/G#");
        assert_eq!(transpose_chord("Bbmaj7(9)", 2, Notation::Sharps), "Cmaj7(9)");
        assert_eq!(transpose_chord("E7(13-)", -4, Notation::Flats), "C7(13-)");
    }

    #[test]
    fn test_enharmonic_inputs() {
        assert_eq!(transpose_chord("Db", 0, Notation::Sharps), "C#");
        assert_eq!(transpose_chord("B#", 1, Notation::Sharps), "C#");
        assert_eq!(transpose_chord("E#m", 0, Notation::Flats), "Fm");
        assert_eq!(transpose_chord("Cb", 1, Notation::Sharps), "C");
    }

    #[test]
    fn test_large_negative_shift() {
        assert_eq!(transpose_chord("C", -13, Notation::Sharps), "B");
        assert_eq!(transpose_chord("E", -28, Notation::Sharps), "C");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(transpose_chord("N.C.", 2, Notation::Sharps), "N.C.");
        assert_eq!(transpose_chord("am", 2, Notation::Sharps), "am");
        assert_eq!(transpose_chord("", 2, Notation::Sharps), "");
        assert_eq!(transpose_chord("/G", 2, Notation::Sharps), "/G");
        assert_eq!(transpose_chord("C/x", 2, Notation::Sharps), "D/x");
        assert_eq!(transpose_chord("C/", 2, Notation::Sharps), "D/");
    }

    #[test]
    fn test_round_trip_is_enharmonic() {
        let chords = ["C", "C#m", "Dbmaj7", "F#7/A#", "Bb6", "G/B", "Asus4", "E#", "Abm7b5/Gb"];
        for chord in chords {
            for n in -14..=14 {
                for notation in [Notation::Sharps, Notation::Flats] {
                    let there = transpose_chord(chord, n, notation);
                    let back = transpose_chord(&there, -n, notation);
                    // Transposing by zero normalizes the spelling of both sides
                    assert_eq!(
                        transpose_chord(&back, 0, notation),
                        transpose_chord(chord, 0, notation),
                        "{} by {}",
                        chord,
                        n
                    );
                }
            }
        }
    }

    #[test]
    fn test_transpose_chordpro_text() {
        let text = "{title: Song}\n# Chorus\n[C]Hola [G/B]mundo [x\n";
        assert_eq!(
            transpose_chordpro(text, 2, Notation::Sharps),
            "{title: Song}\n# Chorus\n[D]Hola [A/C#]mundo [x\n"
        );
    }

    #[test]
    fn test_transpose_chordpro_zero_is_identity() {
        let text = "[C]a [Z]b";
        assert_eq!(transpose_chordpro(text, 0, Notation::Flats), text);
    }

    #[test]
    fn test_split_root() {
        assert_eq!(split_root("C#m7"), Some(("C#", "m7")));
        assert_eq!(split_root("Bbsus4"), Some(("Bb", "sus4")));
        assert_eq!(split_root("Am"), Some(("A", "m")));
        assert_eq!(split_root("H7"), None);
    }
}
