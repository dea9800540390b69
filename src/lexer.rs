/// Token types for a single line of ChordPro text
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// Literal lyric text, including any unmatched `[` or `]`
    Text(&'a str),
    /// Contents of a `[...]` chord marker, without the brackets
    Chord(&'a str),
}

/// A token with its byte range in the source
#[derive(Debug, Clone)]
pub struct LocatedToken<'a> {
    pub token: Token<'a>,
    pub start: usize,
    pub end: usize,
}

/// Splits text into chord markers and literal runs.
///
/// A chord marker is `[`, one or more characters other than `[`, `]` or a
/// newline, then `]`. Every other bracket is literal text, so `[[C]` lexes as
/// the text `[` followed by the chord `C`, and `[]` is text.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Byte offset of the `]` closing a chord opened at `open`, if any
    fn closing_bracket(&self, open: usize) -> Option<usize> {
        let bytes = self.input.as_bytes();
        let mut i = open + 1;
        while i < bytes.len() {
            match bytes[i] {
                b']' if i > open + 1 => return Some(i),
                b']' | b'[' | b'\n' => return None,
                _ => i += 1,
            }
        }
        None
    }

    pub fn tokenize(&mut self) -> Vec<LocatedToken<'a>> {
        let mut tokens = Vec::new();
        let bytes = self.input.as_bytes();
        let mut text_start = self.position;

        while self.position < bytes.len() {
            if bytes[self.position] != b'[' {
                self.position += 1;
                continue;
            }

            let open = self.position;
            match self.closing_bracket(open) {
                Some(close) => {
                    if text_start < open {
                        tokens.push(LocatedToken {
                            token: Token::Text(&self.input[text_start..open]),
                            start: text_start,
                            end: open,
                        });
                    }
                    tokens.push(LocatedToken {
                        token: Token::Chord(&self.input[open + 1..close]),
                        start: open,
                        end: close + 1,
                    });
                    self.position = close + 1;
                    text_start = self.position;
                }
                None => self.position += 1,
            }
        }

        if text_start < bytes.len() {
            tokens.push(LocatedToken {
                token: Token::Text(&self.input[text_start..]),
                start: text_start,
                end: bytes.len(),
            });
        }

        tokens
    }
}

/// Iterate over the chord markers of a text in reading order
pub fn chord_tokens(text: &str) -> impl Iterator<Item = LocatedToken<'_>> {
    Lexer::new(text)
        .tokenize()
        .into_iter()
        .filter(|t| matches!(t.token, Token::Chord(_)))
}

/// Split a lyric run on `*bold*` spans.
///
/// Returns `(text, is_bold)` pieces with the asterisks of bold spans removed.
/// Empty pieces are dropped; a lone or doubled `*` stays literal.
pub fn split_bold(text: &str) -> Vec<(&str, bool)> {
    let mut pieces = Vec::new();
    let bytes = text.as_bytes();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'*' {
            i += 1;
            continue;
        }
        let close = text[i + 1..].find('*').map(|offset| i + 1 + offset);
        match close {
            Some(close) if close > i + 1 => {
                if plain_start < i {
                    pieces.push((&text[plain_start..i], false));
                }
                pieces.push((&text[i + 1..close], true));
                i = close + 1;
                plain_start = i;
            }
            Some(_) => i += 1,
            None => break,
        }
    }

    if plain_start < bytes.len() {
        pieces.push((&text[plain_start..], false));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(input: &'a str) -> Vec<Token<'a>> {
        Lexer::new(input).tokenize().into_iter().map(|t| t.token).collect()
    }

    #[test]
    fn test_chords_and_text() {
        assert_eq!(
            kinds("[C]Hello [G]world"),
            vec![
                Token::Chord("C"),
                Token::Text("Hello "),
                Token::Chord("G"),
                Token::Text("world"),
            ]
        );
    }

    #[test]
    fn test_token_ranges() {
        let tokens = Lexer::new("ab[Am7]c").tokenize();
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        assert_eq!((tokens[1].start, tokens[1].end), (2, 7));
        assert_eq!((tokens[2].start, tokens[2].end), (7, 8));
    }

    #[test]
    fn test_unclosed_bracket_is_text() {
        assert_eq!(kinds("la [C la"), vec![Token::Text("la [C la")]);
    }

    #[test]
    fn test_stray_closing_bracket_is_text() {
        assert_eq!(
            kinds("la] [G]le"),
            vec![Token::Text("la] "), Token::Chord("G"), Token::Text("le")]
        );
    }

    #[test]
    fn test_nested_open_bracket() {
        assert_eq!(kinds("[[C]x"), vec![Token::Text("["), Token::Chord("C"), Token::Text("x")]);
    }

    #[test]
    fn test_empty_brackets_are_text() {
        assert_eq!(kinds("a[]b"), vec![Token::Text("a[]b")]);
    }

    #[test]
    fn test_chord_does_not_span_lines() {
        assert_eq!(kinds("[C\n]"), vec![Token::Text("[C\n]")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(kinds("").is_empty());
    }

    #[test]
    fn test_split_bold() {
        assert_eq!(split_bold("plain"), vec![("plain", false)]);
        assert_eq!(
            split_bold("a *strong* b"),
            vec![("a ", false), ("strong", true), (" b", false)]
        );
        assert_eq!(split_bold("*x**y*"), vec![("x", true), ("y", true)]);
    }

    #[test]
    fn test_split_bold_unmatched_markers() {
        assert_eq!(split_bold("5 * 3"), vec![("5 * 3", false)]);
        assert_eq!(split_bold("**"), vec![("**", false)]);
        assert_eq!(split_bold("**a*"), vec![("*", false), ("a", true)]);
        assert!(split_bold("").is_empty());
    }
}
