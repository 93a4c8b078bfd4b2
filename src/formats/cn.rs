//! Copy-number table adapter
//!
//! Handles tab-separated copy-number files with a header row containing at
//! least the `Chromosome`, `Start`, `End` and `Cn` columns.
//!
//! ```text
//! Chromosome  Start  End  ...  Cn  ...  ...
//! chr1        100    200  ...  2   ...  ...
//! ```
//!
//! By default every column is located by its name in a tab-separated header,
//! so `Chromosome Start End Cn` with nothing after `Cn` reads the last field.
//! A header that only splits on spaces cannot pin positions; such files fall
//! back to the fixed layout, fields 0/1/2 and the third-from-last field, which
//! is also what `CnColumnMode::Offset` forces. `CnColumnMode::Header` rejects
//! files whose header cannot be resolved by name.

use crate::core::io::{open_input, read_first_line, NumberedLines};
use crate::core::{HeaderError, RowParseError, RowResult, Segment, TargetSet};
use indexmap::IndexMap;
use log::{debug, warn};
use memchr::memchr_iter;
use std::io::{self, BufRead};
use std::path::Path;

/// Header tokens every copy-number file must carry
pub const REQUIRED_COLUMNS: [&str; 4] = ["Chromosome", "Start", "End", "Cn"];

/// Position of the copy-number field counted from the end of a row
pub const CN_OFFSET_FROM_END: usize = 3;

/// How the copy-number column is located in a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CnColumnMode {
    /// Header names when the header is tab-separated, fixed layout otherwise
    #[default]
    Auto,
    /// Fixed layout: fields 0/1/2 and the third-from-last field
    Offset,
    /// Positions of the named header columns
    Header,
}

/// What to do with a retained row whose numbers do not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedRowPolicy {
    /// Stop the run with an error
    #[default]
    Abort,
    /// Log a warning and drop the row
    Skip,
}

/// Index of a column within a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnIndex {
    /// 0-based position from the start of the row
    Fixed(usize),
    /// 1-based position from the end of the row (`FromEnd(1)` is the last field)
    FromEnd(usize),
}

impl ColumnIndex {
    /// Concrete index for a row of `field_count` fields
    #[inline]
    pub fn resolve(&self, field_count: usize) -> Option<usize> {
        match *self {
            ColumnIndex::Fixed(i) if i < field_count => Some(i),
            ColumnIndex::FromEnd(k) if k >= 1 && k <= field_count => Some(field_count - k),
            _ => None,
        }
    }

    /// Smallest row width that reaches this column
    pub fn min_fields(&self) -> usize {
        match *self {
            ColumnIndex::Fixed(i) => i + 1,
            ColumnIndex::FromEnd(k) => k,
        }
    }
}

/// Column positions used to read a copy-number row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CnColumnLayout {
    pub chromosome: usize,
    pub start: usize,
    pub end: usize,
    pub copy_number: ColumnIndex,
}

impl Default for CnColumnLayout {
    fn default() -> Self {
        Self::offset()
    }
}

impl CnColumnLayout {
    /// Fixed layout: `Chromosome Start End ... Cn x x`
    pub fn offset() -> Self {
        Self {
            chromosome: 0,
            start: 1,
            end: 2,
            copy_number: ColumnIndex::FromEnd(CN_OFFSET_FROM_END),
        }
    }

    /// Resolve every column by its name in a tab-separated header
    pub fn from_header(header: &str) -> Result<Self, HeaderError> {
        let columns: Vec<&str> = header.trim().split('\t').map(str::trim).collect();

        let find_col = |name: &'static str| -> Result<usize, HeaderError> {
            columns
                .iter()
                .position(|&c| c == name)
                .ok_or(HeaderError::MissingColumn(name))
        };

        Ok(Self {
            chromosome: find_col("Chromosome")?,
            start: find_col("Start")?,
            end: find_col("End")?,
            copy_number: ColumnIndex::Fixed(find_col("Cn")?),
        })
    }

    /// Build the layout for a header according to `mode`
    pub fn for_mode(mode: CnColumnMode, header: &str) -> Result<Self, HeaderError> {
        match mode {
            CnColumnMode::Auto => Ok(Self::from_header(header).unwrap_or_else(|e| {
                debug!("header lookup failed ({}), using the fixed layout", e);
                Self::offset()
            })),
            CnColumnMode::Offset => Ok(Self::offset()),
            CnColumnMode::Header => Self::from_header(header),
        }
    }

    /// Smallest row width that reaches every column
    pub fn min_fields(&self) -> usize {
        [self.chromosome + 1, self.start + 1, self.end + 1, self.copy_number.min_fields()]
            .into_iter()
            .max()
            .unwrap_or(0)
    }
}

/// Required columns absent from a header, in `REQUIRED_COLUMNS` order
///
/// Tokens are whitespace-separated and must match whole, in any order.
pub fn missing_columns(header: &str) -> Vec<&'static str> {
    let tokens: Vec<&str> = header.split_whitespace().collect();
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !tokens.contains(col))
        .collect()
}

/// Whether a header carries all four required columns
pub fn check_header(header: &str) -> bool {
    missing_columns(header).is_empty()
}

/// Check a file's header and build its column layout
///
/// Returns `Ok(None)` (after logging a warning naming the file) when the
/// file is not a copy-number table. Only the first line is read.
pub fn validate_file<P: AsRef<Path>>(
    path: P,
    mode: CnColumnMode,
) -> io::Result<Option<CnColumnLayout>> {
    let path = path.as_ref();
    let name = crate::formats::report::display_name(path);
    let header = read_first_line(path)?;

    let missing = missing_columns(&header);
    if !missing.is_empty() {
        warn!("The file \"{}\" is not in the right format.", name);
        debug!("{}: missing header columns {:?}", name, missing);
        return Ok(None);
    }

    match CnColumnLayout::for_mode(mode, &header) {
        Ok(layout) => Ok(Some(layout)),
        Err(e) => {
            warn!("The file \"{}\" is not in the right format: {}", name, e);
            Ok(None)
        }
    }
}

/// Borrowed view over the tab-separated fields of one row
pub struct CnRecordView<'a> {
    fields: Vec<&'a str>,
}

impl<'a> CnRecordView<'a> {
    /// Split a row on tabs after trimming surrounding whitespace
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        let bytes = line.as_bytes();

        let mut fields = Vec::with_capacity(16);
        let mut start_pos = 0;
        for tab_pos in memchr_iter(b'\t', bytes) {
            fields.push(&line[start_pos..tab_pos]);
            start_pos = tab_pos + 1;
        }
        fields.push(&line[start_pos..]);

        Self { fields }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Chromosome key of the row
    pub fn chrom(&self, layout: &CnColumnLayout) -> Option<&'a str> {
        self.field(layout.chromosome)
    }

    /// Parse start, end and copy number into a segment
    pub fn segment(&self, layout: &CnColumnLayout, file: &str, line: usize) -> RowResult<Segment> {
        let found = self.field_count();
        let too_few = || RowParseError::TooFewFields {
            file: file.to_string(),
            line,
            expected: layout.min_fields(),
            found,
        };

        let cn_index = layout.copy_number.resolve(found).ok_or_else(too_few)?;
        let start = self.field(layout.start).ok_or_else(too_few)?;
        let end = self.field(layout.end).ok_or_else(too_few)?;
        let cn = self.field(cn_index).ok_or_else(too_few)?;

        let number = |field: &'static str, value: &str| -> RowResult<i64> {
            value.trim().parse().map_err(|_| RowParseError::InvalidNumber {
                file: file.to_string(),
                line,
                field,
                value: value.to_string(),
            })
        };

        Ok(Segment::new(
            number("start", start)?,
            number("end", end)?,
            number("copy number", cn)?,
        ))
    }
}

/// Segments of each retained chromosome, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentTable {
    entries: IndexMap<String, Vec<Segment>>,
}

impl FragmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment to a chromosome, creating its entry if absent
    pub fn push(&mut self, chrom: &str, segment: Segment) {
        match self.entries.get_mut(chrom) {
            Some(segments) => segments.push(segment),
            None => {
                self.entries.insert(chrom.to_string(), vec![segment]);
            }
        }
    }

    pub fn get(&self, chrom: &str) -> Option<&[Segment]> {
        self.entries.get(chrom).map(Vec::as_slice)
    }

    /// All entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Segment])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Entries split into two or more segments, in insertion order
    pub fn fragmented(&self) -> impl Iterator<Item = (&str, &[Segment])> {
        self.iter().filter(|(_, segments)| segments.len() > 1)
    }

    /// Number of chromosomes with at least one segment
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_segments(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Result of one extraction pass
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub table: FragmentTable,
    /// Data rows read (header and blank lines excluded)
    pub rows_read: usize,
    /// Rows dropped under `MalformedRowPolicy::Skip`
    pub rows_skipped: usize,
}

/// Collect target segments from a reader positioned at the header row
///
/// `name` is used in error messages only.
pub fn extract_from_reader<R: BufRead>(
    reader: R,
    name: &str,
    targets: &TargetSet,
    layout: &CnColumnLayout,
    policy: MalformedRowPolicy,
) -> crate::core::Result<Extraction> {
    let mut lines = NumberedLines::new(reader);
    let mut extraction = Extraction::default();

    // Header row
    if let Some(header) = lines.next_line() {
        header?;
    }

    while let Some(next) = lines.next_line() {
        let (line_number, line) = next?;
        if line.trim().is_empty() {
            continue;
        }
        extraction.rows_read += 1;

        let record = CnRecordView::parse(line);
        let chrom = match record.chrom(layout) {
            Some(chrom) if targets.contains(chrom) => chrom,
            _ => continue,
        };

        match record.segment(layout, name, line_number) {
            Ok(segment) => extraction.table.push(chrom, segment),
            Err(e) => match policy {
                MalformedRowPolicy::Abort => return Err(e.into()),
                MalformedRowPolicy::Skip => {
                    warn!("Skipping malformed row: {}", e);
                    extraction.rows_skipped += 1;
                }
            },
        }
    }

    debug!(
        "{}: {} rows, {} retained segments on {} chromosomes",
        name,
        extraction.rows_read,
        extraction.table.total_segments(),
        extraction.table.len()
    );
    Ok(extraction)
}

/// Collect target segments from a validated copy-number file
pub fn extract_fragments<P: AsRef<Path>>(
    path: P,
    targets: &TargetSet,
    layout: &CnColumnLayout,
    policy: MalformedRowPolicy,
) -> crate::core::Result<Extraction> {
    let path = path.as_ref();
    let name = crate::formats::report::display_name(path);
    let reader = open_input(path)?;
    extract_from_reader(reader, &name, targets, layout, policy)
}
