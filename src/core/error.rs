//! Error types for cn-fragments
//!
//! Defines all hard error types used throughout the library. File-level
//! problems (missing file, wrong header) are not errors: they are logged
//! and the file is skipped.

use thiserror::Error;

/// Main error type for cn-fragments operations
#[derive(Debug, Error)]
pub enum CnFragmentsError {
    /// Target chromosome specification errors
    #[error("Target chromosome error: {0}")]
    TargetSpec(#[from] TargetSpecError),

    /// Data row parsing errors
    #[error("Row parse error: {0}")]
    RowParse(#[from] RowParseError),

    /// Output destination errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while resolving a target chromosome specification
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetSpecError {
    /// The specification contained no tokens at all
    #[error("Empty target chromosome specification")]
    EmptySpec,

    /// A range endpoint has no integer suffix, or the range is not `A:B`
    #[error("Malformed chromosome range '{token}': {message}")]
    MalformedRange { token: String, message: String },

    /// A range whose first bound is greater than its last
    #[error("Chromosome range '{token}' is reversed ({start} > {end})")]
    ReversedRange { token: String, start: u32, end: u32 },

    /// A range expanding to more chromosomes than any genome carries
    #[error("Chromosome range '{token}' spans {span} chromosomes (limit {limit})")]
    RangeTooLarge { token: String, span: u64, limit: u32 },
}

/// Header-level problems of a copy-number file
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// Errors raised while parsing a data row of a copy-number file
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowParseError {
    /// The row does not reach the column the layout asks for
    #[error("{file}, line {line}: expected at least {expected} fields, found {found}")]
    TooFewFields {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A numeric column does not hold an integer
    #[error("{file}, line {line}: invalid {field} value '{value}'")]
    InvalidNumber {
        file: String,
        line: usize,
        field: &'static str,
        value: String,
    },
}

/// Errors raised while resolving the report destination
#[derive(Debug, Error)]
pub enum OutputError {
    /// No console stream exists on this target and no output path was given
    #[error("No console output stream on platform '{0}'; pass -o/--out")]
    UnsupportedPlatform(&'static str),

    /// The output file could not be created
    #[error("Cannot create output file {path}: {source}")]
    Create {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for cn-fragments operations
pub type Result<T> = std::result::Result<T, CnFragmentsError>;

/// Result type alias for target resolution
pub type TargetResult<T> = std::result::Result<T, TargetSpecError>;

/// Result type alias for row parsing
pub type RowResult<T> = std::result::Result<T, RowParseError>;
