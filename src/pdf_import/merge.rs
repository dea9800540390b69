use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use super::heuristics::is_chord;
use super::ImportOptions;

static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn token_regex() -> &'static Regex {
    TOKEN_REGEX.get_or_init(|| Regex::new(r"\S+").expect("invalid regex pattern"))
}

/// A whitespace-delimited token and where it sits on its line
struct Column<'a> {
    text: &'a str,
    /// Character column, used for alignment
    column: usize,
    /// Byte offset, used for insertion
    offset: usize,
}

fn columns(line: &str) -> Vec<Column<'_>> {
    token_regex()
        .find_iter(line)
        .map(|m| Column {
            text: m.as_str(),
            column: line[..m.start()].chars().count(),
            offset: m.start(),
        })
        .collect()
}

/// Merge a chord line into the lyric line printed under it.
///
/// Each chord goes in front of the first word starting no more than
/// `chord_alignment_slack` columns before it. A chord past the start of every
/// word attaches to the last word if it still lies over it, otherwise it is
/// appended to the line.
pub fn merge_chord_line(chord_line: &str, lyric_line: &str, options: &ImportOptions) -> String {
    let chords: Vec<Column<'_>> = columns(chord_line)
        .into_iter()
        .filter(|token| is_chord(token.text, options))
        .collect();
    if chords.is_empty() {
        return lyric_line.to_string();
    }

    let words = columns(lyric_line);
    let Some(last_word) = words.last() else {
        let chords: Vec<String> = chords.iter().map(|c| format!("[{}]", c.text)).collect();
        return chords.join(" ");
    };

    let mut insertions: BTreeMap<usize, String> = BTreeMap::new();
    for chord in &chords {
        let word = words
            .iter()
            .find(|word| word.column + options.chord_alignment_slack >= chord.column)
            .or_else(|| {
                let last_end = last_word.column + last_word.text.chars().count();
                (chord.column < last_end).then_some(last_word)
            });
        let offset = word.map_or(lyric_line.len(), |word| word.offset);
        insertions
            .entry(offset)
            .or_default()
            .push_str(&format!("[{}]", chord.text));
    }

    let mut merged = lyric_line.to_string();
    for (offset, chords) in insertions.into_iter().rev() {
        let trailing = offset == lyric_line.len() && !lyric_line.ends_with(char::is_whitespace);
        if trailing {
            merged.insert(offset, ' ');
            merged.insert_str(offset + 1, &chords);
        } else {
            merged.insert_str(offset, &chords);
        }
    }
    merged
}
