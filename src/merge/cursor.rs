//! Single-line lookahead over one input.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{MergeError, Result};

/// Read position in one input file.
///
/// At most one line is buffered: [`Cursor::peek`] fills the buffer if it is
/// empty and [`Cursor::consume`] takes it. Dropping the cursor closes the
/// underlying file.
#[derive(Debug)]
pub struct Cursor<R> {
    path: PathBuf,
    reader: R,
    lookahead: Option<String>,
    line_number: usize,
    exhausted: bool,
    skip_newline: bool,
}

impl Cursor<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| MergeError::Io { path: path.to_path_buf(), source })?;
        tracing::debug!("Opened {}", path.display());
        Ok(Self::new(path, BufReader::new(file)))
    }
}

impl<R: BufRead> Cursor<R> {
    /// Wrap any buffered reader; `path` is only used to name the source in errors.
    pub fn new(path: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            path: path.into(),
            reader,
            lookahead: None,
            line_number: 0,
            exhausted: false,
            skip_newline: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 1-based number of the most recently read line; 0 before the first read.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Next unconsumed line, reading it if the buffer is empty.
    /// `None` means the input is exhausted.
    pub fn peek(&mut self) -> Result<Option<&str>> {
        if self.lookahead.is_none() && !self.exhausted {
            self.lookahead = self.read_line()?;
            self.exhausted = self.lookahead.is_none();
        }
        Ok(self.lookahead.as_deref())
    }

    /// The buffered line, without reading.
    pub fn buffered(&self) -> Option<&str> {
        self.lookahead.as_deref()
    }

    /// Take the buffered line.
    pub fn consume(&mut self) -> Option<String> {
        self.lookahead.take()
    }

    /// Read up to the next `\n`, `\r\n` or lone `\r`.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = Vec::new();
        let mut read_any = false;

        loop {
            let available = self
                .reader
                .fill_buf()
                .map_err(|source| MergeError::Io { path: self.path.clone(), source })?;
            if available.is_empty() {
                break;
            }

            // `\n` completing a `\r\n` that was split from the previous line.
            if self.skip_newline {
                self.skip_newline = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            read_any = true;
            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(pos) => {
                    buf.extend_from_slice(&available[..pos]);
                    self.skip_newline = available[pos] == b'\r';
                    self.reader.consume(pos + 1);
                    break;
                }
                None => {
                    let len = available.len();
                    buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }

        if !read_any {
            return Ok(None);
        }

        self.line_number += 1;
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Open one cursor per path, in order.
///
/// Stops at the first path that cannot be opened; cursors opened before it are
/// closed when the partial list is dropped.
pub fn open_cursors<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Cursor<BufReader<File>>>> {
    paths.iter().map(Cursor::<BufReader<File>>::open).collect()
}
