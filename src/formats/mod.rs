//! File format adapters
//!
//! Adapters for copy-number tables (input) and the fragment report (output).

pub mod cn;
pub mod report;

pub use cn::{
    check_header, extract_fragments, validate_file, CnColumnLayout, CnColumnMode, CnRecordView,
    Extraction, FragmentTable, MalformedRowPolicy,
};
pub use report::{display_name, ReportWriter};
