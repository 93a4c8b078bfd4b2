//! Copy-number segments and inter-segment gaps
//!
//! A chromosome whose calls are split across several rows is annotated by
//! interleaving the distance between consecutive segments:
//!
//! ```text
//! [seg0, gap0, seg1, gap1, ..., gapN-2, segN-1]
//! gap_i = seg(i+1).start - seg(i).end
//! ```
//!
//! Segments keep file order; gaps are never clamped, so overlapping calls
//! give negative gaps.

/// One copy-number call for a chromosome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    pub start: i64,
    pub end: i64,
    pub copy_number: i64,
}

impl Segment {
    pub fn new(start: i64, end: i64, copy_number: i64) -> Self {
        Self {
            start,
            end,
            copy_number,
        }
    }

    /// Distance from the end of this segment to the start of `next`
    #[inline]
    pub fn gap_to(&self, next: &Segment) -> i64 {
        next.start - self.end
    }
}

/// Element of an annotated segment sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotatedEntry {
    Segment(Segment),
    Gap(i64),
}

impl AnnotatedEntry {
    pub fn as_segment(&self) -> Option<&Segment> {
        match self {
            AnnotatedEntry::Segment(seg) => Some(seg),
            AnnotatedEntry::Gap(_) => None,
        }
    }

    pub fn as_gap(&self) -> Option<i64> {
        match self {
            AnnotatedEntry::Gap(len) => Some(*len),
            AnnotatedEntry::Segment(_) => None,
        }
    }
}

/// Interleave gap lengths between consecutive segments
///
/// Builds a fresh sequence; the input is left untouched. For `N` segments
/// the output holds `2N - 1` entries (an empty input gives an empty output).
///
/// # Examples
/// ```
/// use cn_fragments::core::{annotate_gaps, AnnotatedEntry, Segment};
///
/// let segs = [Segment::new(10, 20, 2), Segment::new(30, 40, 3)];
/// let annotated = annotate_gaps(&segs);
/// assert_eq!(annotated, vec![
///     AnnotatedEntry::Segment(segs[0]),
///     AnnotatedEntry::Gap(10),
///     AnnotatedEntry::Segment(segs[1]),
/// ]);
/// ```
pub fn annotate_gaps(segments: &[Segment]) -> Vec<AnnotatedEntry> {
    let mut annotated = Vec::with_capacity(segments.len().saturating_mul(2).saturating_sub(1));

    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            annotated.push(AnnotatedEntry::Gap(segments[i - 1].gap_to(seg)));
        }
        annotated.push(AnnotatedEntry::Segment(*seg));
    }

    annotated
}
