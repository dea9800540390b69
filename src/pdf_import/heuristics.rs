use std::borrow::Cow;
use std::sync::OnceLock;

use log::trace;
use regex::Regex;

use super::ImportOptions;

/// Root, accidental, quality, one digit, tensions and a slash bass
const CHORD_TOKEN_PATTERN: &str =
    r"(?i)^[A-G](b|#)?(m|maj|min|dim|aug|sus|add|M)?[0-9]?(\s*\(.*\))?(/[A-G](b|#)?)?$";

/// One chord inside a run of chords written without spaces
const CONCATENATED_CHORD_PATTERN: &str =
    r"[A-G](?:#|b)?(?:maj|min|m|dim|aug|sus|add)?[0-9]*(?:\([^)]*\))?(?:/[A-G](?:#|b)?)?";

const SECTION_PATTERN: &str = r"(?i)^\s*(\[?((intro|refrão|verso|estrofa|coro|puente|final|solo|interlúdio|parte|primeira|segunda|acordes|chords|chorus|verse|bridge)[^\]]*)\]?)\s*$";

static CHORD_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
static CONCATENATED_CHORD_REGEX: OnceLock<Regex> = OnceLock::new();
static SECTION_REGEX: OnceLock<Regex> = OnceLock::new();

fn chord_token_regex() -> &'static Regex {
    CHORD_TOKEN_REGEX.get_or_init(|| Regex::new(CHORD_TOKEN_PATTERN).expect("invalid regex pattern"))
}

fn concatenated_chord_regex() -> &'static Regex {
    CONCATENATED_CHORD_REGEX
        .get_or_init(|| Regex::new(CONCATENATED_CHORD_PATTERN).expect("invalid regex pattern"))
}

fn section_regex() -> &'static Regex {
    SECTION_REGEX.get_or_init(|| Regex::new(SECTION_PATTERN).expect("invalid regex pattern"))
}

/// Whether a whitespace-free token looks like a chord symbol
pub fn is_chord(token: &str, options: &ImportOptions) -> bool {
    token.chars().count() <= options.max_chord_token_len && chord_token_regex().is_match(token.trim())
}

/// Whether most tokens of a line look like chords
pub fn is_chord_line(line: &str, options: &ImportOptions) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return false;
    }
    let chords = tokens.iter().filter(|token| is_chord(token, options)).count();
    let ratio = chords as f64 / tokens.len() as f64;
    trace!("{} of {} tokens are chords: {:?}", chords, tokens.len(), line);
    ratio > options.chord_line_ratio
}

/// Put spaces back into a line of chords printed without them (`AmGC`).
///
/// Lines that already contain whitespace, or hold fewer than two chords,
/// come back unchanged.
pub fn separate_concatenated_chords(line: &str) -> Cow<'_, str> {
    if line.contains(char::is_whitespace) {
        return Cow::Borrowed(line);
    }
    let chords: Vec<&str> = concatenated_chord_regex()
        .find_iter(line)
        .map(|m| m.as_str())
        .collect();
    if chords.len() > 1 {
        Cow::Owned(chords.join(" "))
    } else {
        Cow::Borrowed(line)
    }
}

/// Heading text of a section marker line such as `[Coro]` or `Intro:`
pub fn section_heading(line: &str, options: &ImportOptions) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.chars().count() > options.max_heading_len {
        return None;
    }
    let caps = section_regex().captures(trimmed)?;
    let heading = caps.get(2).map_or(trimmed, |m| m.as_str());
    let heading: String = heading.chars().filter(|c| !matches!(*c, '[' | ']' | ':')).collect();
    Some(heading.trim().to_string())
}
