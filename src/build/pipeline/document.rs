//! Document types for pipeline processing.

use std::path::PathBuf;

use crate::build::document::SourceFile;
use crate::build::paths::page_title;

/// A page being processed through the pipeline.
///
/// Mutable state evolves through the stages:
///
/// 1. Initially: `content` = raw markdown
/// 2. After lists: `content` = markdown with bullet items blank-line separated
/// 3. After markdown: `content` = HTML fragment
/// 4. After template: `output_html` = final page HTML
/// 5. After write: `output_path` = file written
#[derive(Debug)]
pub struct ProcessingDocument {
    /// The source file this page comes from
    pub source: SourceFile,

    /// Title derived from the file name
    pub title: String,

    /// Content being processed.
    pub content: String,

    /// Final HTML output after template rendering.
    ///
    /// None until the template stage populates it.
    pub output_html: Option<String>,

    /// Where the page was written.
    ///
    /// None until the write stage populates it.
    pub output_path: Option<PathBuf>,
}

impl ProcessingDocument {
    /// Create a processing document from a source file and its contents.
    pub fn new(source: SourceFile, raw_content: String) -> Self {
        let title = page_title(&source.path);
        Self {
            source,
            title,
            content: raw_content,
            output_html: None,
            output_path: None,
        }
    }

    /// Read a source file from disk. Invalid UTF-8 sequences are replaced
    /// with U+FFFD rather than rejected.
    pub fn read(source: SourceFile) -> std::io::Result<Self> {
        let bytes = std::fs::read(&source.path)?;
        let raw_content = String::from_utf8_lossy(&bytes).into_owned();
        Ok(Self::new(source, raw_content))
    }
}
