/*!
 * Error types for the hymnbook application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when parsing or dispatching on meter notation
#[derive(Error, Debug)]
pub enum MeterError {
    /// A comma-separated segment of the notation did not parse as an integer
    #[error("Malformed meter notation {notation:?}: segment {segment:?} is not numeric")]
    MalformedNotation {
        /// The offending segment
        segment: String,
        /// The full raw notation as read from the metadata table
        notation: String,
    },

    /// No indentation rule exists for the canonical notation
    #[error("Unsupported meter format: {notation:?}. Check your input data.")]
    Unsupported {
        /// The canonical notation that missed the table
        notation: String,
    },
}

/// Errors that can occur while reading the raw transcript into hymn blocks
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// A block-start marker was not followed by a hymn number line
    #[error("Hymn block at line {line} has no number line")]
    MissingNumber {
        /// 1-based transcript line of the block-start marker
        line: usize,
    },

    /// A hymn number line was not followed by a title line
    #[error("Hymn {number} has no title line")]
    MissingTitle {
        /// The hymn number label
        number: String,
    },

    /// The line where a hymn number was expected does not look like one
    #[error("Expected a hymn number line, got {line:?}")]
    InvalidNumber {
        /// The offending line content
        line: String,
    },

    /// A block-start marker was never closed
    #[error("Hymn block {number} is missing its end marker")]
    Unterminated {
        /// The hymn number label of the open block
        number: String,
    },
}

/// Errors raised while pairing transcript blocks with metadata rows
#[derive(Error, Debug)]
pub enum MatchError {
    /// Transcript and metadata titles disagree after normalization
    #[error("Title mismatch: transcript {transcript:?} vs metadata {metadata:?}")]
    TitleMismatch {
        /// The normalized transcript title
        transcript: String,
        /// The normalized metadata title
        metadata: String,
    },

    /// The author flag column held something other than the two recognized values
    #[error("Author flag not No or Yes: {flag:?}")]
    InvalidAuthorFlag {
        /// The value actually read
        flag: String,
    },

    /// The transcript has more hymn blocks than the metadata table has rows
    #[error("Metadata table exhausted at row {row}")]
    TableExhausted {
        /// The row index the cursor had reached
        row: usize,
    },

    /// A metadata row is too short for the configured column positions
    #[error("Metadata row {row} has {fields} fields, need column {column}")]
    MissingColumn {
        /// Row index in the table
        row: usize,
        /// Number of fields the row actually has
        fields: usize,
        /// The configured column that could not be read
        column: usize,
    },
}

/// Errors raised by the stanza segmentation and validation engine
#[derive(Error, Debug)]
pub enum StanzaError {
    /// A stanza's (doubling-adjusted) line count disagrees with the meter
    #[error("Hymn {hymn}: stanza {stanza} line count {actual} does not match expected meter line count {expected}")]
    LineCountMismatch {
        /// Hymn number label
        hymn: String,
        /// 1-based stanza ordinal
        stanza: usize,
        /// Line count after any doubling adjustment
        actual: usize,
        /// Nominal line count from the meter descriptor
        expected: usize,
    },

    /// A stanza ordinal fell outside the Roman numeral table (I through X)
    #[error("Hymn {hymn}: stanza ordinal {ordinal} is out of range (only I through X are defined)")]
    OrdinalOutOfRange {
        /// Hymn number label
        hymn: String,
        /// The offending ordinal
        ordinal: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error reading the metadata table
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from meter notation handling
    #[error("Meter error: {0}")]
    Meter(#[from] MeterError),

    /// Error from transcript block reading
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Error from record matching
    #[error("Match error: {0}")]
    Match(#[from] MatchError),

    /// Error from stanza processing
    #[error("Stanza error: {0}")]
    Stanza(#[from] StanzaError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
