//! Fragment report writer
//!
//! Renders the fragmented chromosomes of each scanned file:
//!
//! ```text
//! <file> <chrom>\t<N> fragments
//! Fragment position\t<start>-<end>\tCn <cn>
//! Gap position\t<prev end>-<next start>\tLength <gap>
//! Fragment position\t<start>-<end>\tCn <cn>
//! <blank>
//! ```
//!
//! Each chromosome block is followed by one blank line, and a file that
//! reported at least one chromosome gets one more, so consecutive files are
//! separated by two blank lines. Files without fragmented chromosomes write
//! nothing.

use crate::core::{annotate_gaps, AnnotatedEntry, Segment};
use crate::formats::cn::FragmentTable;
use std::io::{self, Write};
use std::path::Path;

/// File name without its directory, splitting on both `/` and `\`
pub fn display_name(path: &Path) -> String {
    let full = path.to_string_lossy();
    full.rsplit(&['/', '\\'][..]).next().unwrap_or("").to_string()
}

/// Start and end of the gap at `index`, read from its neighbouring segments
fn gap_bounds(annotated: &[AnnotatedEntry], index: usize) -> Option<(i64, i64)> {
    let prev = annotated.get(index.checked_sub(1)?)?.as_segment()?;
    let next = annotated.get(index + 1)?.as_segment()?;
    Some((prev.end, next.start))
}

/// Writes fragment reports for any number of files into one stream
pub struct ReportWriter<W: Write> {
    out: W,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one chromosome block, including its trailing blank line
    pub fn write_chromosome(
        &mut self,
        file_name: &str,
        chrom: &str,
        segments: &[Segment],
    ) -> io::Result<()> {
        writeln!(self.out, "{} {}\t{} fragments", file_name, chrom, segments.len())?;

        let annotated = annotate_gaps(segments);
        for (i, entry) in annotated.iter().enumerate() {
            match entry {
                AnnotatedEntry::Segment(seg) => writeln!(
                    self.out,
                    "Fragment position\t{}-{}\tCn {}",
                    seg.start, seg.end, seg.copy_number
                )?,
                AnnotatedEntry::Gap(len) => {
                    let (gap_start, gap_end) = gap_bounds(&annotated, i).ok_or_else(|| {
                        io::Error::new(io::ErrorKind::InvalidData, "gap without flanking segments")
                    })?;
                    writeln!(self.out, "Gap position\t{}-{}\tLength {}", gap_start, gap_end, len)?;
                }
            }
        }

        writeln!(self.out)
    }

    /// Write every fragmented chromosome of one file
    ///
    /// Returns the number of chromosomes reported.
    pub fn write_file(&mut self, file_name: &str, table: &FragmentTable) -> io::Result<usize> {
        let mut reported = 0;
        for (chrom, segments) in table.fragmented() {
            self.write_chromosome(file_name, chrom, segments)?;
            reported += 1;
        }

        let file_had_fragments = reported > 0;
        if file_had_fragments {
            writeln!(self.out)?;
        }
        Ok(reported)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(file_name: &str, rows: &[(&str, Segment)]) -> String {
        let mut table = FragmentTable::new();
        for (chrom, seg) in rows {
            table.push(chrom, *seg);
        }
        let mut writer = ReportWriter::new(Vec::new());
        writer.write_file(file_name, &table).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("data/run1/sample.txt")), "sample.txt");
        assert_eq!(display_name(Path::new(r"C:\data\sample.txt")), "sample.txt");
        assert_eq!(display_name(Path::new("data\\mixed/sample.txt")), "sample.txt");
        assert_eq!(display_name(Path::new("sample.txt")), "sample.txt");
    }

    #[test]
    fn test_single_fragmented_chromosome() {
        let out = render(
            "filename.txt",
            &[
                ("chr1", Segment::new(100, 200, 2)),
                ("chr1", Segment::new(300, 400, 3)),
            ],
        );
        assert_eq!(
            out,
            "filename.txt chr1\t2 fragments\n\
             Fragment position\t100-200\tCn 2\n\
             Gap position\t200-300\tLength 100\n\
             Fragment position\t300-400\tCn 3\n\
             \n\
             \n"
        );
    }

    #[test]
    fn test_unfragmented_file_writes_nothing() {
        let out = render(
            "a.txt",
            &[("chr1", Segment::new(1, 2, 3)), ("chr2", Segment::new(4, 5, 6))],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_two_chromosomes_single_blank_between() {
        let out = render(
            "a.txt",
            &[
                ("chr2", Segment::new(1, 2, 1)),
                ("chr3", Segment::new(1, 2, 1)),
                ("chr2", Segment::new(5, 6, 1)),
                ("chr3", Segment::new(9, 10, 1)),
            ],
        );
        let expected = "a.txt chr2\t2 fragments\n\
                        Fragment position\t1-2\tCn 1\n\
                        Gap position\t2-5\tLength 3\n\
                        Fragment position\t5-6\tCn 1\n\
                        \n\
                        a.txt chr3\t2 fragments\n\
                        Fragment position\t1-2\tCn 1\n\
                        Gap position\t2-9\tLength 7\n\
                        Fragment position\t9-10\tCn 1\n\
                        \n\
                        \n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_negative_gap() {
        let mut writer = ReportWriter::new(Vec::new());
        writer
            .write_chromosome(
                "b.txt",
                "chrX",
                &[Segment::new(100, 500, 2), Segment::new(400, 900, 1)],
            )
            .unwrap();
        let out = String::from_utf8(writer.into_inner()).unwrap();
        assert!(out.contains("Gap position\t500-400\tLength -100\n"));
    }

    #[test]
    fn test_write_file_count() {
        let mut table = FragmentTable::new();
        table.push("chr1", Segment::new(1, 2, 3));
        table.push("chr1", Segment::new(4, 5, 6));
        table.push("chr2", Segment::new(1, 2, 3));
        let mut writer = ReportWriter::new(Vec::new());
        assert_eq!(writer.write_file("x", &table).unwrap(), 1);
    }
}
