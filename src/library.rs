//! Built-in chord shapes and user chord libraries
//!
//! The built-in table holds common open and barre guitar voicings, keyed by
//! the chord name as it appears in song text. A [`ChordLibrary`] layers shapes
//! authored by the user on top of it.
//!
//! ## Lookup Order
//! 1. Custom shape with the exact name
//! 2. Built-in shape with the exact name
//! 3. Both again for the name without its slash bass (`C/G` uses `C`)
//!
//! ## YAML Form
//! ```yaml
//! Dmaj7(V):
//!   base-fret: 5
//!   positions: [x, 5, 7, 6, 7, x]
//! Esus4:
//!   positions: [0, 2, 2, 2, 0, 0]
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ChordSheetError;
use crate::extract::{extract_unique, ChordOrder};
use crate::naming::infer_chord_name;
use crate::note::Notation;
use crate::shape::{ChordShape, StringPosition};

macro_rules! fret {
    (x) => {
        StringPosition::Muted
    };
    (0) => {
        StringPosition::Open
    };
    ($n:literal) => {
        StringPosition::Fret($n)
    };
}

macro_rules! shape {
    ($base:literal; $($p:tt),+) => {
        ChordShape::builtin($base, [$(fret!($p)),+])
    };
}

static BUILTIN_SHAPES: &[(&str, ChordShape)] = &[
    ("A", shape!(1; x, 0, 2, 2, 2, 0)),
    ("A6", shape!(1; x, 0, 2, 2, 2, 2)),
    ("A7", shape!(1; x, 0, 2, 0, 2, 0)),
    ("A7(13)", shape!(1; x, 0, 2, 0, 2, 2)),
    ("A7(13-)", shape!(1; x, 0, 2, 0, 2, 1)),
    ("A7b13", shape!(1; x, 0, 2, 0, 2, 1)),
    ("Aadd9", shape!(1; x, 0, 2, 4, 2, 0)),
    ("Am", shape!(1; x, 0, 2, 2, 1, 0)),
    ("Am6", shape!(1; x, 0, 2, 2, 1, 2)),
    ("Am7", shape!(1; x, 0, 2, 0, 1, 0)),
    ("Am9", shape!(5; x, 0, 7, 5, 0, 0)),
    ("Amaj7", shape!(1; x, 0, 2, 1, 2, 0)),
    ("Amaj9", shape!(1; x, 0, 2, 1, 2, 4)),
    ("Asus2", shape!(1; x, 0, 2, 2, 0, 0)),
    ("Asus4", shape!(1; x, 0, 2, 2, 3, 0)),
    ("Adim", shape!(1; x, 0, 1, 2, 1, x)),
    ("Adim7", shape!(1; x, 0, 1, 2, 1, 2)),
    ("Aaug", shape!(1; x, 0, 3, 2, 2, 1)),
    ("Am/G", shape!(1; 3, 0, 2, 2, 1, 0)),

    ("Ab", shape!(4; 4, 6, 6, 5, 4, 4)),
    ("Ab7", shape!(4; 4, 6, 4, 5, 4, 4)),
    ("Abmaj7", shape!(1; x, x, 1, 1, 1, 3)),
    ("Abm", shape!(4; 4, 6, 6, 4, 4, 4)),
    ("Abm7", shape!(4; 4, 6, 4, 4, 4, 4)),
    ("Abaug", shape!(1; x, x, 2, 1, 1, 0)),

    ("Bb", shape!(1; x, 1, 3, 3, 3, 1)),
    ("Bb6", shape!(1; x, 1, 3, 3, 3, 3)),
    ("Bb7", shape!(1; x, 1, 3, 1, 3, 1)),
    ("Bb7M", shape!(1; x, 1, 3, 2, 3, 1)),
    ("Bbmaj7", shape!(1; x, 1, 3, 2, 3, 1)),
    ("Bbm", shape!(1; x, 1, 3, 3, 2, 1)),
    ("Bbm7", shape!(1; x, 1, 3, 1, 2, 1)),
    ("Bbsus2", shape!(1; x, 1, 3, 3, 1, 1)),
    ("Bbsus4", shape!(1; x, 1, 3, 3, 4, 1)),
    ("Bbdim", shape!(1; x, 1, 2, 3, 2, x)),
    ("Bbdim7", shape!(1; x, 1, 2, 0, 2, 0)),
    ("Bbaug", shape!(1; x, 1, 0, 3, 3, x)),

    ("B", shape!(2; x, 2, 4, 4, 4, 2)),
    ("B7", shape!(1; x, 2, 1, 2, 0, 2)),
    ("B7b9", shape!(1; x, 2, 1, 2, 1, 2)),
    ("Bm", shape!(2; x, 2, 4, 4, 3, 2)),
    ("Bm7", shape!(2; x, 2, 4, 2, 3, 2)),
    ("Bmaj7", shape!(2; x, 2, 4, 3, 4, 2)),
    ("Bsus2", shape!(2; x, 2, 4, 4, 2, 2)),
    ("Bsus4", shape!(2; x, 2, 4, 4, 5, 2)),
    ("Bdim", shape!(1; x, 2, 3, 4, 3, x)),
    ("Bdim7", shape!(1; x, 2, 0, 1, 0, 1)),
    ("Baug", shape!(1; x, 2, 1, 0, 0, 3)),

    ("C", shape!(1; x, 3, 2, 0, 1, 0)),
    ("C6", shape!(1; x, 3, 2, 2, 1, 0)),
    ("C7", shape!(1; x, 3, 2, 3, 1, 0)),
    ("C7(9)", shape!(1; x, 3, 2, 3, 3, 0)),
    ("C9", shape!(2; x, 3, 2, 3, 3, 3)),
    ("Cadd9", shape!(1; x, 3, 2, 0, 3, 3)),
    ("Cm", shape!(3; x, 3, 5, 5, 4, 3)),
    ("Cm7", shape!(3; x, 3, 5, 3, 4, 3)),
    ("Cmaj7", shape!(1; x, 3, 2, 0, 0, 0)),
    ("Cmaj9", shape!(2; x, 3, 2, 4, 3, x)),
    ("Csus4", shape!(1; x, 3, 3, 0, 1, 1)),
    ("Cdim", shape!(3; x, 3, 4, 5, 4, x)),
    ("Cdim7", shape!(2; x, 3, 4, 2, 4, x)),
    ("Caug", shape!(1; x, 3, 2, 1, 1, x)),
    ("C/E", shape!(1; 0, 3, 2, 0, 1, 0)),
    ("C/G", shape!(1; 3, 3, 2, 0, 1, 0)),

    ("C#", shape!(4; x, 4, 6, 6, 6, 4)),
    ("C#m", shape!(4; x, 4, 6, 6, 5, 4)),
    ("C#m7", shape!(4; x, 4, 6, 4, 5, 4)),
    ("Db", shape!(4; x, 4, 6, 6, 6, 4)),
    ("Db7", shape!(4; x, 4, 6, 4, 6, 4)),
    ("Dbmaj7", shape!(4; x, 4, 6, 5, 6, 4)),
    ("Dbm", shape!(4; x, 4, 6, 6, 5, 4)),
    ("Dbm7", shape!(4; x, 4, 6, 4, 5, 4)),
    ("Dbaug", shape!(1; x, 4, 3, 2, 2, x)),

    ("D", shape!(1; x, x, 0, 2, 3, 2)),
    ("D6", shape!(1; x, x, 0, 2, 0, 2)),
    ("D7", shape!(1; x, x, 0, 2, 1, 2)),
    ("D7M(9)", shape!(4; x, 5, 4, 6, 5, x)),
    ("D7b9", shape!(4; x, 5, 4, 5, 4, x)),
    ("D9", shape!(1; x, x, 0, 2, 1, 0)),
    ("Dadd9", shape!(1; x, x, 0, 2, 3, 0)),
    ("Dm", shape!(1; x, x, 0, 2, 3, 1)),
    ("Dm7", shape!(1; x, x, 0, 2, 1, 1)),
    ("Dmaj7", shape!(1; x, x, 0, 2, 2, 2)),
    ("Dmaj9", shape!(4; x, 5, 4, 6, 5, 5)),
    ("Dsus2", shape!(1; x, x, 0, 2, 3, 0)),
    ("Dsus4", shape!(1; x, x, 0, 2, 3, 3)),
    ("Ddim", shape!(1; x, x, 0, 1, 3, 1)),
    ("Ddim7", shape!(4; x, 5, 6, 4, 6, x)),
    ("Daug", shape!(1; x, x, 0, 3, 3, 2)),
    ("D/A", shape!(1; x, 0, 0, 2, 3, 2)),
    ("D/F#", shape!(1; 2, x, 0, 2, 3, 2)),

    ("Eb", shape!(6; x, 6, 8, 8, 8, 6)),
    ("Eb7", shape!(6; x, 6, 8, 6, 8, 6)),
    ("Ebmaj7", shape!(6; x, 6, 8, 7, 8, 6)),
    ("Ebm", shape!(6; x, 6, 8, 8, 7, 6)),
    ("Ebm7", shape!(6; x, 6, 8, 6, 7, 6)),
    ("Ebaug", shape!(1; x, x, 1, 0, 0, 3)),

    ("E", shape!(1; 0, 2, 2, 1, 0, 0)),
    ("E7", shape!(1; 0, 2, 0, 1, 0, 0)),
    ("E7(9)", shape!(1; 0, 2, 0, 1, 3, 0)),
    ("E9", shape!(1; 0, 2, 0, 1, 0, 2)),
    ("Eadd9", shape!(1; 0, 2, 2, 1, 0, 2)),
    ("Em", shape!(1; 0, 2, 2, 0, 0, 0)),
    ("Em7", shape!(1; 0, 2, 0, 0, 0, 0)),
    ("Em9", shape!(1; 0, 2, 0, 0, 0, 2)),
    ("Emaj7", shape!(1; 0, 2, 1, 1, 0, 0)),
    ("Esus2", shape!(1; 0, 2, 4, 4, 0, 0)),
    ("Esus4", shape!(1; 0, 2, 2, 2, 0, 0)),
    ("Edim", shape!(1; 0, 1, 2, 0, x, x)),
    ("Edim7", shape!(1; 0, 1, 2, 0, 2, 0)),
    ("Eaug", shape!(1; 0, 3, 2, 1, 1, 0)),

    ("F", shape!(1; 1, 3, 3, 2, 1, 1)),
    ("F6", shape!(1; 1, 3, 3, 2, 3, 1)),
    ("F6(9)", shape!(1; 1, 3, 1, 2, 3, x)),
    ("F7", shape!(1; 1, 3, 1, 2, 1, 1)),
    ("F7(13)", shape!(1; 1, 3, 1, 2, 3, 1)),
    ("F13", shape!(1; 1, 3, 1, 2, 3, 1)),
    ("F6/9", shape!(1; 1, x, 1, 2, 3, 3)),
    ("Fm", shape!(1; 1, 3, 3, 1, 1, 1)),
    ("Fm7", shape!(1; 1, 3, 1, 1, 1, 1)),
    ("Fmaj7", shape!(1; x, x, 3, 2, 1, 0)),
    ("Fsus2", shape!(1; 1, 3, 3, 0, 1, 1)),
    ("Fsus4", shape!(1; 1, 3, 3, 3, 1, 1)),
    ("Fdim", shape!(1; 1, 2, 3, 1, x, x)),
    ("Fdim7", shape!(1; 1, 2, 1, 2, x, x)),
    ("Faug", shape!(1; 1, 0, 3, 2, 2, x)),

    ("F#", shape!(2; 2, 4, 4, 3, 2, 2)),
    ("F#7", shape!(2; 2, 4, 2, 3, 2, 2)),
    ("F#7/C#", shape!(3; x, 4, 4, 3, 5, x)),
    ("F#m", shape!(2; 2, 4, 4, 2, 2, 2)),
    ("F#m7", shape!(2; 2, 4, 2, 2, 2, 2)),
    ("F#m7b5", shape!(1; 2, x, 2, 2, 1, x)),
    ("F#dim7", shape!(2; 2, 3, 2, 3, x, x)),
    ("Gb", shape!(2; 2, 4, 4, 3, 2, 2)),
    ("Gb7", shape!(2; 2, 4, 2, 3, 2, 2)),
    ("Gbmaj7", shape!(2; 2, 4, 3, 3, 2, 2)),
    ("Gbaug", shape!(2; x, x, 0, 3, 3, 2)),

    ("G", shape!(1; 3, 2, 0, 0, 0, 3)),
    ("G6", shape!(1; 3, 2, 0, 0, 0, 0)),
    ("G7", shape!(1; 3, 2, 0, 0, 0, 1)),
    ("G13", shape!(3; 3, 5, 3, 4, 5, 3)),
    ("Gadd9", shape!(1; 3, 2, 0, 2, 0, 3)),
    ("Gm", shape!(3; 3, 5, 5, 3, 3, 3)),
    ("Gm7", shape!(3; 3, 5, 3, 3, 3, 3)),
    ("Gmaj7", shape!(1; 3, 2, 0, 0, 0, 2)),
    ("Gsus2", shape!(1; 3, 0, 0, 0, 3, 3)),
    ("Gsus4", shape!(1; 3, 3, 0, 0, 1, 3)),
    ("Gdim", shape!(3; 3, 4, 5, 3, x, x)),
    ("Gdim7", shape!(2; 3, 4, 2, 3, x, x)),
    ("Gaug", shape!(1; 3, 2, 1, 0, 0, 3)),
    ("G/B", shape!(1; x, 2, 0, 0, 3, 3)),
    ("G/D", shape!(1; x, x, 0, 0, 0, 3)),

    ("G#m", shape!(4; 4, 6, 6, 4, 4, 4)),
    ("G#m7", shape!(4; 4, 6, 4, 4, 4, 4)),
];

static BUILTIN_INDEX: OnceLock<HashMap<&'static str, &'static ChordShape>> = OnceLock::new();

fn builtin_index() -> &'static HashMap<&'static str, &'static ChordShape> {
    BUILTIN_INDEX.get_or_init(|| BUILTIN_SHAPES.iter().map(|(name, shape)| (*name, shape)).collect())
}

/// Built-in shape for an exact chord name
pub fn builtin_shape(name: &str) -> Option<&'static ChordShape> {
    builtin_index().get(name).copied()
}

/// Names of all built-in shapes, sorted, for chord palettes
pub fn builtin_chord_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BUILTIN_SHAPES.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}

/// Name without a slash bass
fn without_bass(name: &str) -> &str {
    name.split('/').next().unwrap_or(name)
}

/// User-authored chord shapes layered over the built-in table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChordLibrary {
    custom: BTreeMap<String, ChordShape>,
}

impl ChordLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load custom shapes from a YAML mapping of name to shape
    pub fn from_yaml(source: &str) -> Result<Self, ChordSheetError> {
        let library: ChordLibrary = serde_yaml::from_str(source)?;
        debug!("loaded {} custom chord shapes", library.custom.len());
        Ok(library)
    }

    pub fn to_yaml(&self) -> Result<String, ChordSheetError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Add or replace a custom shape, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, shape: ChordShape) -> Option<ChordShape> {
        self.custom.insert(name.into(), shape)
    }

    pub fn remove(&mut self, name: &str) -> Option<ChordShape> {
        self.custom.remove(name)
    }

    /// Custom shapes in name order
    pub fn custom_shapes(&self) -> impl Iterator<Item = (&str, &ChordShape)> {
        self.custom.iter().map(|(name, shape)| (name.as_str(), shape))
    }

    fn exact(&self, name: &str) -> Option<&ChordShape> {
        self.custom.get(name).or_else(|| builtin_shape(name))
    }

    /// Shape to draw for a chord, falling back to the chord without its bass
    pub fn shape_for(&self, name: &str) -> Option<&ChordShape> {
        self.exact(name).or_else(|| self.exact(without_bass(name)))
    }

    /// Chords of a song text with their shapes, in order of first appearance.
    ///
    /// Chords with no known shape are left out.
    pub fn diagrams_for(&self, text: &str) -> Vec<(String, ChordShape)> {
        extract_unique(text, ChordOrder::FirstSeen)
            .into_iter()
            .filter_map(|name| {
                let shape = self.shape_for(&name)?.clone();
                Some((name, shape))
            })
            .collect()
    }

    /// Name for a painted shape: a custom chord with the same fingering if
    /// there is one, otherwise the inferred name
    pub fn name_for_shape(&self, shape: &ChordShape, notation: Notation, key: Option<&str>) -> Option<String> {
        self.custom
            .iter()
            .find(|(_, custom)| custom.positions == shape.positions)
            .map(|(name, _)| name.clone())
            .or_else(|| infer_chord_name(shape, notation, key))
    }
}
