use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::ast::*;
use crate::lexer::{split_bold, Lexer, Token};

/// `{key}` or `{key: value}` at the start of a trimmed line
const DIRECTIVE_PATTERN: &str = r"^\{([^:}]+)(?::\s*(.*?))?\s*\}";

static DIRECTIVE_REGEX: OnceLock<Regex> = OnceLock::new();

fn directive_regex() -> &'static Regex {
    DIRECTIVE_REGEX.get_or_init(|| Regex::new(DIRECTIVE_PATTERN).expect("invalid regex pattern"))
}

/// A recognized directive line
#[derive(Debug, Clone, PartialEq)]
pub enum Directive<'a> {
    Title(&'a str),
    Artist(&'a str),
    Key(&'a str),
    /// `None` when the value is not a number; the directive is then ignored
    Capo(Option<i32>),
    Comment(&'a str),
    Unknown(&'a str),
}

/// Parse a trimmed line as a directive.
///
/// Keys are matched case-insensitively with their short aliases. A `c` or
/// `comment` directive whose value is purely numeric is a capo directive.
pub fn parse_directive(line: &str) -> Option<Directive<'_>> {
    let caps = directive_regex().captures(line)?;
    let key = caps.get(1).map_or("", |m| m.as_str()).trim();
    let value = caps.get(2).map_or("", |m| m.as_str()).trim();

    let directive = match key.to_lowercase().as_str() {
        "title" | "t" => Directive::Title(value),
        "artist" | "subtitle" | "st" => Directive::Artist(value),
        "key" | "k" => Directive::Key(value),
        "capo" => Directive::Capo(parse_leading_int(value)),
        "comment" | "c" => {
            if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
                match value.parse() {
                    Ok(capo) => Directive::Capo(Some(capo)),
                    Err(_) => Directive::Comment(value),
                }
            } else {
                Directive::Comment(value)
            }
        }
        _ => Directive::Unknown(key),
    };
    Some(directive)
}

/// Integer at the start of a value, e.g. `3` from `"3 frets"`
fn parse_leading_int(value: &str) -> Option<i32> {
    let sign_len = usize::from(value.starts_with(|c| c == '-' || c == '+'));
    let digits = value[sign_len..]
        .bytes()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    value[..sign_len + digits].parse().ok()
}

/// Split a trimmed lyric line into chord and bold segments
pub fn parse_segments(line: &str) -> Vec<Segment> {
    let tokens = Lexer::new(line).tokenize();
    let mut segments = Vec::new();
    let mut iter = tokens.iter().peekable();

    while let Some(located) = iter.next() {
        match located.token {
            Token::Chord(chord) => {
                let following = match iter.peek().map(|t| t.token) {
                    Some(Token::Text(text)) => {
                        iter.next();
                        split_bold(text)
                    }
                    _ => Vec::new(),
                };
                let mut pieces = following.into_iter();
                match pieces.next() {
                    Some((lyric, is_bold)) => segments.push(Segment::chord(chord, lyric, is_bold)),
                    None => segments.push(Segment::chord(chord, "", false)),
                }
                segments.extend(pieces.map(|(lyric, is_bold)| Segment::text(lyric, is_bold)));
            }
            Token::Text(text) => {
                segments.extend(
                    split_bold(text)
                        .into_iter()
                        .map(|(lyric, is_bold)| Segment::text(lyric, is_bold)),
                );
            }
        }
    }

    segments
}

/// Parse ChordPro text into a structured song.
///
/// Every input line yields one output line except directives, which only
/// update the song metadata (a non-numeric `{c: ...}` becomes a comment).
/// Parsing never fails; anything unrecognized is lyric text.
///
/// # Example
/// ```rust
/// use chordsheet::{parse, ParsedLine};
///
/// let song = parse("{title: Vida}\n{c: 2}\n# Intro\n[C]Hola [G]mundo");
/// assert_eq!(song.title, "Vida");
/// assert_eq!(song.capo, 2);
/// assert_eq!(song.lines.len(), 2);
/// assert!(matches!(song.lines[1], ParsedLine::Lyric(_)));
/// ```
pub fn parse(text: &str) -> ParsedSong {
    let mut song = ParsedSong::default();

    for line in text.split('\n') {
        let trimmed = line.trim();

        if let Some(directive) = parse_directive(trimmed) {
            match directive {
                Directive::Title(value) => song.title = value.to_string(),
                Directive::Artist(value) => song.artist = value.to_string(),
                Directive::Key(value) => song.key = value.to_string(),
                Directive::Capo(Some(capo)) => song.capo = capo,
                Directive::Capo(None) => debug!("ignoring non-numeric capo directive: {}", trimmed),
                Directive::Comment(value) => song.lines.push(ParsedLine::Comment {
                    text: value.to_string(),
                }),
                Directive::Unknown(key) => debug!("ignoring unknown directive '{}'", key),
            }
            continue;
        }

        if let Some(comment) = trimmed.strip_prefix('#') {
            song.lines.push(ParsedLine::Comment {
                text: comment.trim().to_string(),
            });
            continue;
        }

        if trimmed.is_empty() {
            song.lines.push(ParsedLine::Empty);
            continue;
        }

        song.lines.push(ParsedLine::Lyric(LyricLine {
            text: trimmed.to_string(),
            segments: parse_segments(trimmed),
        }));
    }

    song
}

/// Render a lyric line back to its ChordPro form
pub fn segments_to_chordpro(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        if let Some(chord) = &segment.chord {
            out.push('[');
            out.push_str(chord);
            out.push(']');
        }
        if segment.is_bold {
            out.push('*');
            out.push_str(&segment.lyric);
            out.push('*');
        } else {
            out.push_str(&segment.lyric);
        }
    }
    out
}

/// Serialize a parsed song back to ChordPro text.
///
/// Metadata is written as directives at the top; comments use the `#` form so
/// numeric comments are not re-read as a capo. Parsing the result yields a
/// song equal to the input.
pub fn to_chordpro(song: &ParsedSong) -> String {
    let mut out = vec![
        format!("{{title: {}}}", song.title),
        format!("{{artist: {}}}", song.artist),
        format!("{{key: {}}}", song.key),
    ];
    if song.capo != 0 {
        out.push(format!("{{capo: {}}}", song.capo));
    }

    for line in &song.lines {
        out.push(match line {
            ParsedLine::Empty => String::new(),
            ParsedLine::Comment { text } => format!("# {}", text),
            ParsedLine::Lyric(lyric) => segments_to_chordpro(&lyric.segments),
        });
    }

    out.join("\n")
}
