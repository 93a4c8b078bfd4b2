//! Core copy-number functionality
//!
//! This module contains target chromosome resolution, segment and gap
//! annotation, error types and the I/O plumbing shared by the adapters.

mod error;
pub mod io;
mod segment;
mod targets;

pub use error::{
    CnFragmentsError, HeaderError, OutputError, Result, RowParseError, RowResult, TargetResult,
    TargetSpecError,
};
pub use io::{detect_compression, open_input, CompressionFormat, NumberedLines, OutputTarget};
pub use segment::{annotate_gaps, AnnotatedEntry, Segment};
pub use targets::{TargetSet, CHR_X_ORDINAL, CHR_Y_ORDINAL, MAX_RANGE_SPAN};
