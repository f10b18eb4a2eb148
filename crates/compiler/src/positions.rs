//! Position registry: maps the scanner's monotonic scalar counter back to
//! `(file, line, column, line_text)` for diagnostics.
//!
//! Grounded on the line-start binary search used by the `typhon-source` crate's
//! `SourceFile`, generalized to a *registry* of files addressed by a single
//! scalar counter that keeps advancing across file boundaries (the scanner
//! itself only ever calls `step()` once per consumed character and
//! `current_position()` to stamp a token or diagnostic).

use anyhow::{bail, Result};

/// One registered input file and the data needed to resolve a scalar position
/// that falls within it back to line/column.
#[derive(Debug)]
struct FileEntry {
    name: String,
    /// Scalar position at which this file's content begins.
    start: u32,
    content: String,
    /// Byte offsets (relative to `content`) of line starts; first is always 0.
    line_starts: Vec<u32>,
}

impl FileEntry {
    fn new(name: String, start: u32, content: String) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in content.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { name, start, content, line_starts }
    }

    fn resolve(&self, pos: u32) -> PositionInfo {
        let offset = pos.saturating_sub(self.start) as usize;
        let offset = offset.min(self.content.len());

        let line = match self.line_starts.binary_search(&(offset as u32)) {
            Ok(line) => line,
            Err(line) => line - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|&s| s as usize - 1)
            .unwrap_or(self.content.len());
        let line_text = &self.content[line_start..line_end.max(line_start)];

        PositionInfo {
            file: self.name.clone(),
            line: line as u32 + 1,
            column: (offset - line_start) as u32 + 1,
            line_length: line_text.len() as u32,
            line_text: line_text.to_string(),
        }
    }
}

/// Resolved human-readable location, returned by [`Positions::info`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionInfo {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub line_length: u32,
    pub line_text: String,
}

/// The shared position registry. One instance is created per compilation run
/// and handed to every `Scanner` (and eventually parser, error sink, etc.) so
/// that positions stamped by different components remain comparable.
#[derive(Debug, Default)]
pub struct Positions {
    files: Vec<FileEntry>,
    cursor: u32,
}

impl Positions {
    pub fn new() -> Self {
        Self { files: Vec::new(), cursor: 0 }
    }

    /// Registers a filename boundary at the current scalar position. `content`
    /// is the full text of the file being opened, used only for later
    /// line/column lookups — the scanner itself still reads through its own
    /// reader callback, one character at a time.
    pub fn open_source_file(&mut self, name: impl Into<String>, content: impl Into<String>) {
        let start = self.cursor;
        self.files.push(FileEntry::new(name.into(), start, content.into()));
    }

    /// Advances the monotonic counter by one consumed character.
    pub fn step(&mut self) {
        self.cursor += 1;
    }

    /// The scalar position of the next character to be consumed.
    pub fn current_position(&self) -> u32 {
        self.cursor
    }

    /// Resolves a scalar position to `(file, line, column, line_text)`.
    pub fn info(&self, pos: u32) -> Result<PositionInfo> {
        for file in self.files.iter().rev() {
            if pos >= file.start {
                return Ok(file.resolve(pos));
            }
        }
        bail!("position {pos} does not belong to any registered file")
    }
}
