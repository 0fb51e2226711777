//! Input file discovery and lazy line reading.
//!
//! Job output directories hold `part-*` files next to bookkeeping files such
//! as `_SUCCESS` or `.part-00000.crc`; only the former are data.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stats_core::error::{Result, StatsError};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Whether a file name marks a hidden or bookkeeping file.
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('_') || name.starts_with('.')
}

/// List the data files directly inside `dir`, sorted by path.
///
/// Sub-directories are not descended into.
pub fn find_data_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(StatsError::DataPathNotFound(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file() && !is_hidden_name(&entry.file_name().to_string_lossy())
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!("Found {} data files in {}", files.len(), dir.display());
    Ok(files)
}

// ── SourceLine ────────────────────────────────────────────────────────────────

/// One line of input and where it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// File the line came from.
    pub path: Arc<Path>,
    /// 1-based line number within `path`.
    pub line_no: usize,
    /// Line text without its terminator.
    pub text: String,
}

impl SourceLine {
    pub fn new(path: Arc<Path>, line_no: usize, text: impl Into<String>) -> Self {
        Self {
            path,
            line_no,
            text: text.into(),
        }
    }

    /// A [`StatsError::MalformedRecord`] pointing at this line.
    pub fn malformed(&self, reason: impl ToString) -> StatsError {
        StatsError::MalformedRecord {
            path: self.path.to_path_buf(),
            line_no: self.line_no,
            line: self.text.trim_end().to_string(),
            reason: reason.to_string(),
        }
    }
}

// ── LineSource ────────────────────────────────────────────────────────────────

/// An open file and the number of lines read from it so far.
struct OpenFile {
    path: Arc<Path>,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

/// Lazy sequence of text lines across every data file of a directory.
///
/// Files are opened one at a time, in path order, and line numbers restart
/// at 1 for each file. The first I/O failure is yielded as an error and ends
/// the sequence.
pub struct LineSource {
    files: std::vec::IntoIter<PathBuf>,
    current: Option<OpenFile>,
    failed: bool,
}

impl LineSource {
    /// Discover the data files of `dir`. Nothing is read until iteration.
    pub fn open(dir: &Path) -> Result<Self> {
        Ok(Self::from_files(find_data_files(dir)?))
    }

    /// Read an explicit list of files, in the given order.
    pub fn from_files(files: Vec<PathBuf>) -> Self {
        Self {
            files: files.into_iter(),
            current: None,
            failed: false,
        }
    }

    fn advance_file(&mut self) -> Option<Result<()>> {
        let path = self.files.next()?;
        match File::open(&path) {
            Ok(file) => {
                debug!("Reading {}", path.display());
                self.current = Some(OpenFile {
                    path: Arc::from(path),
                    lines: BufReader::new(file).lines(),
                    line_no: 0,
                });
                Some(Ok(()))
            }
            Err(source) => Some(Err(StatsError::FileRead { path, source })),
        }
    }
}

impl Iterator for LineSource {
    type Item = Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(open) = self.current.as_mut() {
                match open.lines.next() {
                    Some(Ok(text)) => {
                        open.line_no += 1;
                        return Some(Ok(SourceLine::new(
                            Arc::clone(&open.path),
                            open.line_no,
                            text,
                        )));
                    }
                    Some(Err(source)) => {
                        self.failed = true;
                        return Some(Err(StatsError::FileRead {
                            path: open.path.to_path_buf(),
                            source,
                        }));
                    }
                    None => {}
                }
                self.current = None;
            }

            match self.advance_file()? {
                Ok(()) => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}

/// In-memory lines numbered as if read from one file named `part-00000`.
#[cfg(test)]
pub(crate) fn numbered_lines(lines: &[&str]) -> Vec<Result<SourceLine>> {
    let path: Arc<Path> = Arc::from(Path::new("part-00000"));
    lines
        .iter()
        .enumerate()
        .map(|(idx, text)| Ok(SourceLine::new(Arc::clone(&path), idx + 1, *text)))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
