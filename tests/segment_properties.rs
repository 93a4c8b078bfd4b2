//! Property-based tests for gap annotation
//!
//! N segments give 2N-1 entries, segments at even positions, gaps at odd
//! positions equal to next.start - prev.end.

use cn_fragments::core::{annotate_gaps, AnnotatedEntry, Segment};
use proptest::prelude::*;

fn arb_segment() -> impl Strategy<Value = Segment> {
    (0i64..250_000_000, 1i64..5_000_000, 0i64..8)
        .prop_map(|(start, len, cn)| Segment::new(start, start + len, cn))
}

fn arb_segments() -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec(arb_segment(), 2..40)
}

proptest! {
    /// Property: output length is 2N - 1
    #[test]
    fn prop_annotated_length(segments in arb_segments()) {
        let annotated = annotate_gaps(&segments);
        prop_assert_eq!(annotated.len(), 2 * segments.len() - 1);
    }

    /// Property: dropping the gaps recovers the input unchanged
    #[test]
    fn prop_segments_recovered(segments in arb_segments()) {
        let annotated = annotate_gaps(&segments);
        let recovered: Vec<Segment> = annotated
            .iter()
            .filter_map(|entry| entry.as_segment().copied())
            .collect();
        prop_assert_eq!(recovered, segments);
    }

    /// Property: entries alternate segment, gap, segment
    #[test]
    fn prop_entries_alternate(segments in arb_segments()) {
        let annotated = annotate_gaps(&segments);
        for (i, entry) in annotated.iter().enumerate() {
            if i % 2 == 0 {
                prop_assert!(entry.as_segment().is_some());
            } else {
                prop_assert!(entry.as_gap().is_some());
            }
        }
    }

    /// Property: every gap is next.start - prev.end, sign included
    #[test]
    fn prop_gap_values(segments in arb_segments()) {
        let annotated = annotate_gaps(&segments);
        let gaps: Vec<i64> = annotated.iter().filter_map(AnnotatedEntry::as_gap).collect();
        prop_assert_eq!(gaps.len(), segments.len() - 1);
        for (i, gap) in gaps.iter().enumerate() {
            prop_assert_eq!(*gap, segments[i + 1].start - segments[i].end);
        }
    }

    /// Property: the input slice is not modified
    #[test]
    fn prop_input_untouched(segments in arb_segments()) {
        let before = segments.clone();
        let _ = annotate_gaps(&segments);
        prop_assert_eq!(segments, before);
    }
}

#[test]
fn test_two_segment_example() {
    let segments = vec![Segment::new(10, 20, 2), Segment::new(30, 40, 3)];
    assert_eq!(
        annotate_gaps(&segments),
        vec![
            AnnotatedEntry::Segment(Segment::new(10, 20, 2)),
            AnnotatedEntry::Gap(10),
            AnnotatedEntry::Segment(Segment::new(30, 40, 3)),
        ]
    );
}
