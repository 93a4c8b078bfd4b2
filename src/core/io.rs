//! I/O plumbing
//!
//! Input side: buffered readers with transparent gzip/bzip2 decoding and a
//! numbered line reader that reuses its buffer. Output side: resolution of the
//! report destination (file or console stream).

use crate::core::error::OutputError;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Compression applied to an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

/// Detect compression by extension first, then by magic bytes
pub fn detect_compression(path: &Path) -> io::Result<CompressionFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => return Ok(CompressionFormat::Gzip),
        Some("bz2") => return Ok(CompressionFormat::Bzip2),
        _ => {}
    }

    let mut magic = Vec::with_capacity(3);
    File::open(path)?.take(3).read_to_end(&mut magic)?;

    Ok(match magic.as_slice() {
        [0x1f, 0x8b, ..] => CompressionFormat::Gzip,
        b"BZh" => CompressionFormat::Bzip2,
        _ => CompressionFormat::Plain,
    })
}

/// Open an input file, decompressing on the fly when needed
pub fn open_input<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let format = detect_compression(path)?;
    let file = File::open(path)?;

    Ok(match format {
        CompressionFormat::Gzip => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            flate2::read::MultiGzDecoder::new(file),
        )),
        CompressionFormat::Bzip2 => Box::new(BufReader::with_capacity(
            DEFAULT_BUFFER_SIZE,
            bzip2::read::BzDecoder::new(file),
        )),
        CompressionFormat::Plain => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
    })
}

/// Read the first line of a file without failing on invalid UTF-8
///
/// Returns an empty string for an empty file.
pub fn read_first_line<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let mut reader = open_input(path)?;
    let mut buffer = Vec::with_capacity(256);
    reader.read_until(b'\n', &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Line reader that numbers lines from 1 and reuses one buffer
///
/// Trailing `\n` / `\r\n` are stripped.
pub struct NumberedLines<R: BufRead> {
    reader: R,
    buffer: String,
    line_number: usize,
}

impl<R: BufRead> NumberedLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::with_capacity(1024),
            line_number: 0,
        }
    }

    /// Next line with its 1-based number, `None` at end of input
    pub fn next_line(&mut self) -> Option<io::Result<(usize, &str)>> {
        self.buffer.clear();
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                let content = self.buffer.trim_end_matches(&['\n', '\r'][..]).len();
                self.buffer.truncate(content);
                Some(Ok((self.line_number, self.buffer.as_str())))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Where the report goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to a file, truncating it
    File(PathBuf),
    /// Write to the process console stream
    Stdout,
}

impl OutputTarget {
    /// Pick the destination: an explicit path, otherwise the console stream
    ///
    /// Fails with `UnsupportedPlatform` on targets without a console stream.
    pub fn resolve(path: Option<PathBuf>) -> Result<Self, OutputError> {
        match path {
            Some(path) => Ok(OutputTarget::File(path)),
            None if cfg!(any(unix, windows)) => Ok(OutputTarget::Stdout),
            None => Err(OutputError::UnsupportedPlatform(std::env::consts::OS)),
        }
    }

    /// Open the destination as a buffered writer held for the whole run
    pub fn open(&self) -> Result<BufWriter<Box<dyn Write>>, OutputError> {
        let sink: Box<dyn Write> = match self {
            OutputTarget::File(path) => {
                let file = File::create(path).map_err(|source| OutputError::Create {
                    path: path.display().to_string(),
                    source,
                })?;
                Box::new(file)
            }
            OutputTarget::Stdout => Box::new(io::stdout()),
        };
        Ok(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, sink))
    }
}
