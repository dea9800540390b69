//! # Chord Shapes
//!
//! A chord shape is where each of the six guitar strings is played, listed
//! from the low E string to the high E string, plus the fret the diagram
//! window starts at.
//!
//! ## Positions
//! - `x` - muted string, not played
//! - `0` - open string
//! - `N` - fretted at absolute fret `N`, never below the base fret
//!
//! ## Text Form
//! Shapes are written as six space separated positions, optionally preceded
//! by `@N` for the base fret:
//!
//! ```rust
//! use chordsheet::ChordShape;
//!
//! let open_a: ChordShape = "x 0 2 2 2 0".parse()?;
//! let barre_c: ChordShape = "@3 x 3 5 5 4 3".parse()?;
//! let compact: ChordShape = "x32010".parse()?;
//!
//! assert_eq!(open_a.base_fret, 1);
//! assert_eq!(barre_c.to_string(), "@3 x 3 5 5 4 3");
//! assert_eq!(compact.to_string(), "x 3 2 0 1 0");
//! # Ok::<(), chordsheet::ChordSheetError>(())
//! ```
//!
//! Without `@N` the base fret is 1, unless the shape reaches past the
//! five-fret diagram window, in which case it starts at the lowest fretted
//! position.
//!
//! ## Barres
//! Barres are inferred, never stored. See [`ChordShape::barre`].

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ChordSheetError;

pub const STRING_COUNT: usize = 6;

/// Frets shown by a chord diagram
pub const FRET_WINDOW: u8 = 5;

/// Open-string pitch classes, low E to high E (E A D G B E)
pub const STANDARD_TUNING: [u8; STRING_COUNT] = [4, 9, 2, 7, 11, 4];

/// How a single string is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringPosition {
    Muted,
    Open,
    Fret(u8),
}

impl StringPosition {
    /// Absolute fret number, `None` for a muted string
    pub fn fret(self) -> Option<u8> {
        match self {
            StringPosition::Muted => None,
            StringPosition::Open => Some(0),
            StringPosition::Fret(n) => Some(n),
        }
    }

    fn from_fret(fret: u8) -> Self {
        if fret == 0 {
            StringPosition::Open
        } else {
            StringPosition::Fret(fret)
        }
    }
}

impl fmt::Display for StringPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fret() {
            Some(fret) => write!(f, "{}", fret),
            None => write!(f, "x"),
        }
    }
}

impl FromStr for StringPosition {
    type Err = ChordSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(StringPosition::Muted),
            token => token
                .parse::<u8>()
                .map(StringPosition::from_fret)
                .map_err(|_| ChordSheetError::InvalidShape {
                    message: format!("unknown string position '{}'", token),
                }),
        }
    }
}

impl Serialize for StringPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.fret() {
            Some(fret) => serializer.serialize_u8(fret),
            None => serializer.serialize_str("x"),
        }
    }
}

/// A barre: one finger across strings `from..=to` at `fret`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barre {
    pub fret: u8,
    pub from: usize,
    pub to: usize,
}

/// Fret positions of a chord on a six-string guitar
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawShape", rename_all = "kebab-case")]
pub struct ChordShape {
    pub base_fret: u8,
    pub positions: [StringPosition; STRING_COUNT],
}

/// Position as written in YAML: `x` or a fret number
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPosition {
    Fret(u8),
    Text(String),
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawShape {
    base_fret: Option<u8>,
    positions: Vec<RawPosition>,
}

impl TryFrom<RawShape> for ChordShape {
    type Error = ChordSheetError;

    fn try_from(raw: RawShape) -> Result<Self, Self::Error> {
        let positions = raw
            .positions
            .into_iter()
            .map(|p| match p {
                RawPosition::Fret(fret) => Ok(StringPosition::from_fret(fret)),
                RawPosition::Text(text) => text.parse(),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let positions = to_array(positions)?;
        let base_fret = raw.base_fret.unwrap_or_else(|| default_base_fret(&positions));
        ChordShape::new(base_fret, positions)
    }
}

fn to_array(positions: Vec<StringPosition>) -> Result<[StringPosition; STRING_COUNT], ChordSheetError> {
    let found = positions.len();
    positions
        .try_into()
        .map_err(|_| ChordSheetError::InvalidShape {
            message: format!("expected {} strings, found {}", STRING_COUNT, found),
        })
}

/// Base fret for a shape written without one
fn default_base_fret(positions: &[StringPosition]) -> u8 {
    let fretted = positions.iter().filter_map(|p| match p {
        StringPosition::Fret(n) => Some(*n),
        _ => None,
    });
    match (fretted.clone().min(), fretted.max()) {
        (Some(low), Some(high)) if high > FRET_WINDOW => low,
        _ => 1,
    }
}

impl ChordShape {
    /// Build a shape, checking that it can be drawn from `base_fret`
    pub fn new(base_fret: u8, positions: [StringPosition; STRING_COUNT]) -> Result<Self, ChordSheetError> {
        if base_fret == 0 {
            return Err(ChordSheetError::InvalidShape {
                message: "base fret must be at least 1".to_string(),
            });
        }
        for (string, position) in positions.iter().enumerate() {
            if let StringPosition::Fret(fret) = position {
                if *fret < base_fret {
                    return Err(ChordSheetError::InvalidShape {
                        message: format!(
                            "string {} is fretted at {}, below base fret {}",
                            string + 1,
                            fret,
                            base_fret
                        ),
                    });
                }
            }
        }
        Ok(Self { base_fret, positions })
    }

    /// Unchecked constructor for the built-in table
    pub(crate) const fn builtin(base_fret: u8, positions: [StringPosition; STRING_COUNT]) -> Self {
        Self { base_fret, positions }
    }

    /// Pitch class of every sounded string as `(string_index, pitch_class)`, low to high
    pub fn sounded_pitch_classes(&self) -> Vec<(usize, u8)> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(string, position)| {
                let fret = position.fret()?;
                Some((string, (STANDARD_TUNING[string] + fret % 12) % 12))
            })
            .collect()
    }

    /// Detect a barre.
    ///
    /// A barre needs at least three fretted strings, two or more of them at the
    /// lowest fret used. The outermost strings at that fret must be more than
    /// two string gaps apart, and every string between them must be fretted at
    /// or above the barre (no muted, open or lower string inside the span).
    pub fn barre(&self) -> Option<Barre> {
        let frets: Vec<Option<u8>> = self
            .positions
            .iter()
            .map(|p| match p {
                StringPosition::Fret(n) => Some(*n),
                _ => None,
            })
            .collect();

        let fretted: Vec<u8> = frets.iter().flatten().copied().collect();
        if fretted.len() < 3 {
            return None;
        }
        let min = *fretted.iter().min()?;
        if fretted.iter().filter(|f| **f == min).count() < 2 {
            return None;
        }

        let from = frets.iter().position(|f| *f == Some(min))?;
        let to = frets.iter().rposition(|f| *f == Some(min))?;
        if to - from <= 2 {
            return None;
        }

        let spans_cleanly = frets[from..=to]
            .iter()
            .all(|f| matches!(f, Some(fret) if *fret >= min));
        spans_cleanly.then_some(Barre { fret: min, from, to })
    }
}

impl fmt::Display for ChordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.base_fret != 1 {
            write!(f, "@{} ", self.base_fret)?;
        }
        for (i, position) in self.positions.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", position)?;
        }
        Ok(())
    }
}

impl FromStr for ChordShape {
    type Err = ChordSheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens: Vec<&str> = s.split_whitespace().collect();

        let mut base_fret = None;
        if let Some(first) = tokens.first() {
            if let Some(base) = first.strip_prefix('@') {
                base_fret = Some(base.parse::<u8>().map_err(|_| ChordSheetError::InvalidShape {
                    message: format!("invalid base fret '{}'", base),
                })?);
                tokens.remove(0);
            }
        }

        let positions = match tokens.as_slice() {
            [compact] if compact.len() == STRING_COUNT => compact
                .chars()
                .map(|c| c.to_string().parse())
                .collect::<Result<Vec<_>, _>>()?,
            _ => tokens
                .iter()
                .map(|t| t.parse())
                .collect::<Result<Vec<_>, _>>()?,
        };

        let positions = to_array(positions)?;
        let base_fret = base_fret.unwrap_or_else(|| default_base_fret(&positions));
        ChordShape::new(base_fret, positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::StringPosition::{Fret, Muted, Open};

    fn shape(s: &str) -> ChordShape {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_spaced() {
        let a = shape("x 0 2 2 2 0");
        assert_eq!(a.base_fret, 1);
        assert_eq!(a.positions, [Muted, Open, Fret(2), Fret(2), Fret(2), Open]);
    }

    #[test]
    fn test_parse_base_fret() {
        let cm = shape("@3 x 3 5 5 4 3");
        assert_eq!(cm.base_fret, 3);
        assert_eq!(cm.to_string(), "@3 x 3 5 5 4 3");
    }

    #[test]
    fn test_default_base_fret_past_window() {
        assert_eq!(shape("x 6 8 8 8 6").base_fret, 6);
        assert_eq!(shape("x 3 5 5 4 3").base_fret, 1);
    }

    #[test]
    fn test_parse_errors() {
        assert!("x 0 2 2".parse::<ChordShape>().is_err());
        assert!("x 0 2 2 2 q".parse::<ChordShape>().is_err());
        assert!("@0 x 0 2 2 2 0".parse::<ChordShape>().is_err());
        assert!("@5 x 3 5 5 4 3".parse::<ChordShape>().is_err());
    }

    #[test]
    fn test_sounded_pitch_classes() {
        let a = shape("x 0 2 2 2 0");
        assert_eq!(
            a.sounded_pitch_classes(),
            vec![(1, 9), (2, 4), (3, 9), (4, 1), (5, 4)]
        );
        assert!(shape("x x x x x x").sounded_pitch_classes().is_empty());
    }

    #[test]
    fn test_barre_full() {
        assert_eq!(shape("1 3 3 2 1 1").barre(), Some(Barre { fret: 1, from: 0, to: 5 }));
        assert_eq!(shape("x 1 3 3 3 1").barre(), Some(Barre { fret: 1, from: 1, to: 5 }));
        assert_eq!(shape("@2 x 2 4 4 3 2").barre(), Some(Barre { fret: 2, from: 1, to: 5 }));
    }

    #[test]
    fn test_no_barre_for_open_shapes() {
        assert_eq!(shape("x 0 2 2 2 0").barre(), None);
        assert_eq!(shape("x 3 2 0 1 0").barre(), None);
        assert_eq!(shape("x x 3 2 1 0").barre(), None);
    }

    #[test]
    fn test_no_barre_when_span_interrupted() {
        assert_eq!(shape("x 1 3 0 3 1").barre(), None);
        assert_eq!(shape("1 x 1 2 1 x").barre(), None);
    }

    #[test]
    fn test_yaml_round_trip() {
        let yaml = "base-fret: 3\npositions: [x, 3, 5, 5, 4, 3]\n";
        let parsed: ChordShape = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed, shape("@3 x 3 5 5 4 3"));
        let written = serde_yaml::to_string(&parsed).unwrap();
        let reread: ChordShape = serde_yaml::from_str(&written).unwrap();
        assert_eq!(reread, parsed);
    }

    #[test]
    fn test_yaml_rejects_wrong_length() {
        let result: Result<ChordShape, _> = serde_yaml::from_str("positions: [0, 2, 2]");
        assert!(result.is_err());
    }
}
