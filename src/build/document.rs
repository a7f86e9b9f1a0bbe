use std::path::PathBuf;

use super::paths::is_markdown;

// =============================================================================
// Source files (pages and assets)
// =============================================================================

/// What a discovered file turns into in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A Markdown page rendered through the layout
    Page,
    /// Any other file, copied as-is
    Asset,
}

/// A regular file found under the pages directory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Full path as produced by the walk (pages directory joined with the
    /// relative path)
    pub path: PathBuf,
    /// Page or asset
    pub kind: FileKind,
}

impl SourceFile {
    /// Classify a file by its name.
    pub fn new(path: PathBuf) -> Self {
        let kind = if is_markdown(&path) {
            FileKind::Page
        } else {
            FileKind::Asset
        };
        Self { path, kind }
    }

    pub fn is_page(&self) -> bool {
        self.kind == FileKind::Page
    }
}
