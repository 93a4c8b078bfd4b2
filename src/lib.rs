//! cn-fragments - fragmented chromosome finder for copy-number tables
//!
//! Scans tab-separated copy-number files and reports, per file, every target
//! chromosome whose calls are split over several segments, together with
//! the gaps between consecutive segments.
//!
//! # Example
//!
//! ```no_run
//! use cn_fragments::{InputSource, ReportWriter, ScanOptions, Scanner, TargetSet};
//!
//! let targets = TargetSet::parse("chr1:chr22,chrX")?;
//! let mut report = ReportWriter::new(std::io::stdout());
//! let stats = Scanner::new(&targets, ScanOptions::default())
//!     .scan(&InputSource::Directory("cn_calls".into()), &mut report)?;
//! println!("{} files with fragments", stats.files_with_fragments);
//! # Ok::<(), cn_fragments::CnFragmentsError>(())
//! ```

pub mod core;
pub mod formats;
pub mod scan;

// Re-export commonly used types
pub use core::{
    annotate_gaps, AnnotatedEntry, CnFragmentsError, OutputError, OutputTarget, Result,
    RowParseError, Segment, TargetSet, TargetSpecError,
};
pub use formats::{cn, report, CnColumnMode, FragmentTable, MalformedRowPolicy, ReportWriter};
pub use scan::{InputSource, ScanOptions, ScanStats, Scanner};
