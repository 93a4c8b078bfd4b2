//! Scan driver
//!
//! Runs the per-file pipeline (existence check, header validation, fragment
//! extraction, report) over a single file or every entry of a directory,
//! writing all reports into one shared stream.
//!
//! Missing files and files with the wrong header are soft failures: they are
//! logged, counted and skipped. Malformed rows and I/O errors abort the scan.

use crate::core::{Result, TargetSet};
use crate::formats::cn::{extract_fragments, validate_file, CnColumnMode, MalformedRowPolicy};
use crate::formats::report::{display_name, ReportWriter};
use log::{debug, info, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// What to scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// One copy-number file
    File(PathBuf),
    /// Every entry of a directory, non-recursively
    Directory(PathBuf),
}

/// Per-run scan settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub cn_column: CnColumnMode,
    pub on_malformed: MalformedRowPolicy,
}

/// Scan statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Paths considered (directory entries or the single input)
    pub files_seen: usize,
    pub files_missing: usize,
    pub files_not_regular: usize,
    /// Files whose header lacks a required column
    pub files_invalid: usize,
    /// Files fully extracted and reported on
    pub files_scanned: usize,
    pub files_with_fragments: usize,
    pub chromosomes_reported: usize,
    pub rows_read: usize,
    pub rows_skipped: usize,
}

/// Drives the pipeline for one run
pub struct Scanner<'a> {
    targets: &'a TargetSet,
    options: ScanOptions,
}

impl<'a> Scanner<'a> {
    pub fn new(targets: &'a TargetSet, options: ScanOptions) -> Self {
        Self { targets, options }
    }

    /// Scan `source`, appending every report to `report`
    pub fn scan<W: Write>(
        &self,
        source: &InputSource,
        report: &mut ReportWriter<W>,
    ) -> Result<ScanStats> {
        let mut stats = ScanStats::default();

        match source {
            InputSource::File(path) => {
                self.scan_file(path, report, &mut stats)?;
            }
            InputSource::Directory(dir) => {
                if !dir.is_dir() {
                    warn!("The directory \"{}\" was not found.", dir.display());
                    return Ok(stats);
                }
                for path in list_directory(dir)? {
                    self.scan_file(&path, report, &mut stats)?;
                }
            }
        }

        Ok(stats)
    }

    /// Run the pipeline on one path, updating `stats`
    pub fn scan_file<W: Write>(
        &self,
        path: &Path,
        report: &mut ReportWriter<W>,
        stats: &mut ScanStats,
    ) -> Result<()> {
        stats.files_seen += 1;

        if !path.exists() {
            warn!("The file \"{}\" was not found.", path.display());
            stats.files_missing += 1;
            return Ok(());
        }
        if !path.is_file() {
            warn!("\"{}\" is not a regular file, skipped.", path.display());
            stats.files_not_regular += 1;
            return Ok(());
        }

        let layout = match validate_file(path, self.options.cn_column)? {
            Some(layout) => layout,
            None => {
                stats.files_invalid += 1;
                return Ok(());
            }
        };

        let name = display_name(path);
        info!("Scanning {}", name);
        let extraction = extract_fragments(path, self.targets, &layout, self.options.on_malformed)?;
        let reported = report.write_file(&name, &extraction.table)?;
        debug!("{}: {} fragmented chromosomes", name, reported);

        stats.files_scanned += 1;
        stats.rows_read += extraction.rows_read;
        stats.rows_skipped += extraction.rows_skipped;
        stats.chromosomes_reported += reported;
        if reported > 0 {
            stats.files_with_fragments += 1;
        }
        Ok(())
    }
}

/// Entries of a directory joined onto its path, sorted by file name
pub fn list_directory(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const HEADER: &str = "Chromosome\tStart\tEnd\tCn\n";

    fn run(source: &InputSource, spec: &str, options: ScanOptions) -> (String, ScanStats) {
        let targets = TargetSet::parse(spec).unwrap();
        let mut report = ReportWriter::new(Vec::new());
        let stats = Scanner::new(&targets, options).scan(source, &mut report).unwrap();
        (String::from_utf8(report.into_inner()).unwrap(), stats)
    }

    #[test]
    fn test_scan_single_file() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("filename.txt");
        fs::write(
            &path,
            format!("{HEADER}chr1\t100\t200\t2\nchr1\t300\t400\t3\nchr2\t50\t60\t2\n"),
        )?;

        let (out, stats) = run(&InputSource::File(path), "chr1", ScanOptions::default());
        assert_eq!(
            out,
            "filename.txt chr1\t2 fragments\n\
             Fragment position\t100-200\tCn 2\n\
             Gap position\t200-300\tLength 100\n\
             Fragment position\t300-400\tCn 3\n\
             \n\
             \n"
        );
        assert_eq!(stats.files_scanned, 1);
        assert_eq!(stats.chromosomes_reported, 1);
        assert_eq!(stats.rows_read, 3);
        Ok(())
    }

    #[test]
    fn test_scan_missing_file_is_soft() {
        let (out, stats) = run(
            &InputSource::File(PathBuf::from("/definitely/not/here.txt")),
            "chr1",
            ScanOptions::default(),
        );
        assert!(out.is_empty());
        assert_eq!(stats.files_missing, 1);
        assert_eq!(stats.files_scanned, 0);
    }

    #[test]
    fn test_scan_missing_directory_is_soft() {
        let (out, stats) = run(
            &InputSource::Directory(PathBuf::from("/definitely/not/here")),
            "chr1",
            ScanOptions::default(),
        );
        assert!(out.is_empty());
        assert_eq!(stats, ScanStats::default());
    }

    #[test]
    fn test_scan_directory() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("a.txt"),
            format!("{HEADER}chr1\t1\t10\t2\nchr1\t20\t30\t3\n"),
        )?;
        fs::write(dir.path().join("b.txt"), format!("{HEADER}chr1\t1\t10\t2\n"))?;
        fs::write(dir.path().join("c.txt"), "not\ta\tcopy\tnumber\tfile\n")?;
        fs::write(
            dir.path().join("d.txt"),
            format!("{HEADER}chr1\t5\t6\t1\nchr1\t8\t9\t1\n"),
        )?;
        fs::create_dir(dir.path().join("nested"))?;

        let (out, stats) = run(
            &InputSource::Directory(dir.path().to_path_buf()),
            "chr1",
            ScanOptions::default(),
        );

        let expected = "a.txt chr1\t2 fragments\n\
                        Fragment position\t1-10\tCn 2\n\
                        Gap position\t10-20\tLength 10\n\
                        Fragment position\t20-30\tCn 3\n\
                        \n\
                        \n\
                        d.txt chr1\t2 fragments\n\
                        Fragment position\t5-6\tCn 1\n\
                        Gap position\t6-8\tLength 2\n\
                        Fragment position\t8-9\tCn 1\n\
                        \n\
                        \n";
        assert_eq!(out, expected);
        assert_eq!(stats.files_seen, 5);
        assert_eq!(stats.files_scanned, 3);
        assert_eq!(stats.files_invalid, 1);
        assert_eq!(stats.files_not_regular, 1);
        assert_eq!(stats.files_with_fragments, 2);
        Ok(())
    }

    #[test]
    fn test_scan_malformed_row_aborts() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bad.txt");
        fs::write(&path, format!("{HEADER}chr1\t1\tten\t2\n"))?;

        let targets = TargetSet::parse("chr1").unwrap();
        let mut report = ReportWriter::new(Vec::new());
        let result = Scanner::new(&targets, ScanOptions::default())
            .scan(&InputSource::File(path), &mut report);
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_scan_header_mode() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("wide.txt");
        fs::write(
            &path,
            "Sample\tChromosome\tStart\tEnd\tCn\n\
             s1\tchr4\t1\t5\t2\n\
             s1\tchr4\t9\t12\t4\n",
        )?;

        let options = ScanOptions {
            cn_column: CnColumnMode::Header,
            ..ScanOptions::default()
        };
        let (out, _) = run(&InputSource::File(path), "chr4", options);
        assert!(out.starts_with("wide.txt chr4\t2 fragments\n"));
        assert!(out.contains("Fragment position\t9-12\tCn 4\n"));
        assert!(out.contains("Gap position\t5-9\tLength 4\n"));
        Ok(())
    }

    #[test]
    fn test_list_directory_sorted() -> io::Result<()> {
        let dir = tempfile::tempdir()?;
        for name in ["c", "a", "b"] {
            fs::write(dir.path().join(name), "")?;
        }
        let names: Vec<String> = list_directory(dir.path())?
            .iter()
            .map(|p| display_name(p))
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        Ok(())
    }
}
