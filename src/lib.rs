pub mod ast;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod library;
pub mod naming;
pub mod note;
pub mod parser;
pub mod pdf_import;
pub mod shape;
pub mod transpose;

pub use ast::*;
pub use error::*;
pub use extract::{extract_unique, extract_unique_roots, ChordOrder};
pub use library::{builtin_chord_names, builtin_shape, ChordLibrary};
pub use naming::infer_chord_name;
pub use note::Notation;
pub use parser::{parse, to_chordpro};
pub use pdf_import::{import_pages, ImportOptions, ImportedSong, PageText, TextItem};
pub use shape::{Barre, ChordShape, StringPosition};
pub use transpose::{transpose_chord, transpose_chordpro};

/// Transpose a song text and parse the result.
/// This is what a song view renders after the user changes the key.
pub fn parse_transposed(text: &str, semitones: i32, notation: Notation) -> ParsedSong {
    parse(&transpose_chordpro(text, semitones, notation))
}
