//! Target chromosome resolution
//!
//! Turns a user specification such as `chr1,chr5:chr7,chrX` into the set of
//! chromosome keys a scan retains.
//!
//! # Specification syntax
//!
//! ```text
//! spec   := token ("," token)*
//! token  := name | name ":" name
//! ```
//!
//! - A single name is kept verbatim, no normalization.
//! - A range expands every integer between its bounds (inclusive) into
//!   `chr<N>`. Inside a range `chrX` counts as 23 and `chrY` as 24, so
//!   `chr22:chrY` yields `chr22`, `chr23` and `chr24`, never `chrX`/`chrY`.

use crate::core::error::{TargetResult, TargetSpecError};
use std::collections::HashSet;

/// Ordinal used for `chrX` inside a range
pub const CHR_X_ORDINAL: u32 = 23;

/// Ordinal used for `chrY` inside a range
pub const CHR_Y_ORDINAL: u32 = 24;

/// Most chromosomes a single range may expand to
pub const MAX_RANGE_SPAN: u32 = 10_000;

/// Set of chromosome keys a scan keeps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    chroms: HashSet<String>,
}

impl TargetSet {
    /// Parse a comma-separated target specification
    ///
    /// # Examples
    /// ```
    /// use cn_fragments::core::TargetSet;
    ///
    /// let targets = TargetSet::parse("chr1:chr3,chrX").unwrap();
    /// assert!(targets.contains("chr2"));
    /// assert!(targets.contains("chrX"));
    /// assert!(!targets.contains("chr4"));
    /// ```
    pub fn parse(spec: &str) -> TargetResult<Self> {
        if spec.trim().is_empty() {
            return Err(TargetSpecError::EmptySpec);
        }

        let mut chroms = HashSet::new();
        for token in spec.split(',') {
            if token.contains(':') {
                let (start, end) = parse_range(token)?;
                chroms.extend((start..=end).map(|n| format!("chr{}", n)));
            } else {
                chroms.insert(token.to_string());
            }
        }

        Ok(Self { chroms })
    }

    /// Exact-match membership test
    #[inline]
    pub fn contains(&self, chrom: &str) -> bool {
        self.chroms.contains(chrom)
    }

    pub fn len(&self) -> usize {
        self.chroms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chroms.is_empty()
    }

    /// Iterate the keys in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.chroms.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TargetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            chroms: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Split `chrA:chrB` into its numeric bounds
fn parse_range(token: &str) -> TargetResult<(u32, u32)> {
    let mut parts = token.split(':');
    let (first, last) = match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(last), None) => (first, last),
        _ => {
            return Err(TargetSpecError::MalformedRange {
                token: token.to_string(),
                message: "expected exactly two bounds separated by ':'".to_string(),
            })
        }
    };

    let start = range_bound(token, first)?;
    let end = range_bound(token, last)?;
    if start > end {
        return Err(TargetSpecError::ReversedRange {
            token: token.to_string(),
            start,
            end,
        });
    }

    let span = u64::from(end - start) + 1;
    if span > u64::from(MAX_RANGE_SPAN) {
        return Err(TargetSpecError::RangeTooLarge {
            token: token.to_string(),
            span,
            limit: MAX_RANGE_SPAN,
        });
    }

    Ok((start, end))
}

/// Numeric position of one range endpoint
///
/// `chrX`/`chrY` map to 23/24; everything else must be `chr` (any case)
/// followed by an unsigned integer.
fn range_bound(token: &str, endpoint: &str) -> TargetResult<u32> {
    match endpoint {
        "chrX" => return Ok(CHR_X_ORDINAL),
        "chrY" => return Ok(CHR_Y_ORDINAL),
        _ => {}
    }

    let suffix = match (endpoint.get(..3), endpoint.get(3..)) {
        (Some(prefix), Some(rest)) if prefix.eq_ignore_ascii_case("chr") => rest,
        _ => {
            return Err(TargetSpecError::MalformedRange {
                token: token.to_string(),
                message: format!("bound '{}' does not start with 'chr'", endpoint),
            })
        }
    };

    suffix.parse().map_err(|_| TargetSpecError::MalformedRange {
        token: token.to_string(),
        message: format!("bound '{}' has no integer suffix", endpoint),
    })
}
