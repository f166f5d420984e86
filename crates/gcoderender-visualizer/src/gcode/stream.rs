//! Line streaming over files and readers
//!
//! Files are read in two sequential passes: one to count lines for buffer
//! sizing, one to parse. Bytes that are not valid UTF-8 are replaced rather
//! than rejected, since comments in some slicer output use legacy encodings.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use gcoderender_core::Result;

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// A toolpath file on disk
#[derive(Debug, Clone)]
pub struct ToolpathFile {
    path: PathBuf,
    file_size: u64,
}

impl ToolpathFile {
    /// Open a toolpath file
    ///
    /// # Errors
    /// Returns an I/O error if the file does not exist or cannot be accessed
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Path is not a file: {}", path.display()),
            )
            .into());
        }

        Ok(Self {
            path,
            file_size: metadata.len(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    fn reader(&self) -> Result<BufReader<File>> {
        let file = File::open(&self.path)?;
        Ok(BufReader::with_capacity(READ_BUFFER_SIZE, file))
    }

    /// First pass: number of lines in the file
    pub fn count_lines(&self) -> Result<usize> {
        count_lines(self.reader()?)
    }

    /// Second pass: call `f` with each 1-based line number and line text
    pub fn for_each_line<F>(&self, f: F) -> Result<usize>
    where
        F: FnMut(usize, &str) -> Result<()>,
    {
        for_each_line(self.reader()?, f)
    }
}

/// Count lines; a trailing line without a newline counts
pub fn count_lines<R: BufRead>(mut reader: R) -> Result<usize> {
    let mut lines = 0;
    let mut pending = false;

    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            break;
        }
        lines += chunk.iter().filter(|&&b| b == b'\n').count();
        pending = chunk.last() != Some(&b'\n');
        let consumed = chunk.len();
        reader.consume(consumed);
    }

    Ok(lines + usize::from(pending))
}

/// Feed every line (without its terminator) to `f`, returning the line count
///
/// Stops at the first error returned by `f`.
pub fn for_each_line<R, F>(mut reader: R, mut f: F) -> Result<usize>
where
    R: BufRead,
    F: FnMut(usize, &str) -> Result<()>,
{
    let mut buf = Vec::with_capacity(256);
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let line = trim_line_ending(&buf);
        match std::str::from_utf8(line) {
            Ok(text) => f(line_number, text)?,
            Err(_) => f(line_number, &String::from_utf8_lossy(line))?,
        }
    }

    Ok(line_number)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
