//! # Error Types
//!
//! This module defines the error type for the chordsheet library.
//!
//! The text pipeline itself (parsing, transposition, extraction, naming and
//! PDF text recovery) never fails: malformed song text degrades to literal
//! text. Errors only come from structured input handed to the library from
//! outside, such as chord shapes typed by a user or a YAML chord library.
//!
//! ## Error Types
//! - `InvalidShape` - A chord shape that cannot be placed on a six-string fretboard
//! - `Library` - A YAML chord library or option file that could not be read
//! - `PageText` - A page text dump for PDF import that could not be read
//! - `InvalidArgument` - A malformed value passed on the command line
//!
//! ## Usage
//! ```rust
//! use chordsheet::{ChordShape, ChordSheetError};
//!
//! match "x 0 2 2".parse::<ChordShape>() {
//!     Ok(shape) => println!("{}", shape),
//!     Err(ChordSheetError::InvalidShape { message }) => eprintln!("bad shape: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordSheetError {
    /// Chord shape error.
    ///
    /// Occurs when a shape does not have exactly six strings, uses an unknown
    /// fret token, or frets a string below its base fret.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::InvalidShape {
    ///     message: "expected 6 strings, found 4".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid chord shape: expected 6 strings, found 4");
    /// ```
    #[error("Invalid chord shape: {message}")]
    InvalidShape { message: String },

    /// Chord library or option file error.
    ///
    /// Wraps the YAML deserialization message.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::Library("missing field `positions`".to_string());
    /// assert_eq!(err.to_string(), "Invalid chord library: missing field `positions`");
    /// ```
    #[error("Invalid chord library: {0}")]
    Library(String),

    /// Page text dump error.
    ///
    /// Occurs when the positioned text runs handed to the PDF importer are
    /// not a list of pages with `text`, `x`, `y`, `width` and `height` items.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordSheetError;
    /// let err = ChordSheetError::PageText("missing field `items`".to_string());
    /// assert_eq!(err.to_string(), "Invalid page text: missing field `items`");
    /// ```
    #[error("Invalid page text: {0}")]
    PageText(String),

    /// Command line argument error.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<serde_yaml::Error> for ChordSheetError {
    fn from(err: serde_yaml::Error) -> Self {
        ChordSheetError::Library(err.to_string())
    }
}
