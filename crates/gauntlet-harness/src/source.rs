//! Source access and context-snippet construction.
//!
//! Reading the failing test's own source is inherently filesystem
//! coupled, so it sits behind the [`SourceLocator`] trait: the runner
//! uses [`FsSource`], reporter tests use [`MemorySource`].

use std::collections::HashMap;
use std::fs;
use std::io;

/// Tab stops used when measuring snippet lines.
pub const TAB_WIDTH: usize = 4;

/// Resolves a recorded file path to its source text.
pub trait SourceLocator {
    fn read(&self, path: &str) -> io::Result<String>;
}

/// Locator backed by the real filesystem.
#[derive(Debug, Default)]
pub struct FsSource;

impl SourceLocator for FsSource {
    fn read(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// In-memory locator for tests of the reporter itself.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }
}

impl SourceLocator for MemorySource {
    fn read(&self, path: &str) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no such source: {path}"))
        })
    }
}

/// Expand tabs to spaces, column-aware, so box widths measure what a
/// terminal would show.
pub fn expand_tabs(line: &str, tab_width: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = tab_width - (column % tab_width);
            out.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            out.push(ch);
            column += 1;
        }
    }
    out
}

/// Collect the context lines for a failure at `line` (1-based).
///
/// Re-anchors on the most recent line at or above the failing one that
/// contains `needle`, so a call split across lines is shown from its
/// opening line rather than mid-expression.
pub fn context_window(source: &str, line: usize, needle: Option<&str>) -> Vec<String> {
    if line == 0 {
        return Vec::new();
    }
    let lines: Vec<&str> = source.lines().take(line).collect();
    if lines.len() < line {
        // Recorded line is past the end of what we can read
        return Vec::new();
    }

    let mut anchor = line - 1;
    if let Some(needle) = needle {
        for idx in (0..line).rev() {
            if lines[idx].contains(needle) {
                anchor = idx;
                break;
            }
        }
    }

    lines[anchor..line]
        .iter()
        .map(|l| expand_tabs(l, TAB_WIDTH))
        .collect()
}

/// Render collected context lines inside a box: common indentation
/// stripped, every line between vertical bars, right-padded to the
/// longest line.
pub fn boxed(lines: &[String]) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }

    // Margin and width are counted in chars, not bytes: indentation may
    // contain multi-byte whitespace, and `{:<width$}` pads per char.
    // Blank lines would force the margin to zero, skip them.
    let margin = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.chars().count() - l.trim_start().chars().count())
        .min()
        .unwrap_or(0);

    let trimmed: Vec<String> = lines
        .iter()
        .map(|l| l.chars().skip(margin).collect())
        .collect();
    let width = trimmed
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    let border = format!("+{}+", "-".repeat(width + 2));
    let mut out = Vec::with_capacity(trimmed.len() + 2);
    out.push(border.clone());
    for line in trimmed {
        out.push(format!("| {:<width$} |", line, width = width));
    }
    out.push(border);
    out
}
