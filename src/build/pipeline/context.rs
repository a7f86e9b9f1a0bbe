//! Pipeline context for sharing state across stages.

use std::path::Path;

use crate::build::markdown::MarkdownRenderer;
use crate::build::render::Renderer;

/// Shared context for pipeline stages.
///
/// Built once per build and borrowed by every page.
pub struct PipelineContext<'a> {
    /// Directory where output files are written
    pub output_dir: &'a Path,

    /// Parsed layout template
    pub renderer: &'a Renderer,

    /// Markdown converter with the configured extensions
    pub markdown: &'a MarkdownRenderer,

    /// Author stamped onto every page
    pub author: &'a str,
}

impl<'a> PipelineContext<'a> {
    pub fn new(
        output_dir: &'a Path,
        renderer: &'a Renderer,
        markdown: &'a MarkdownRenderer,
        author: &'a str,
    ) -> Self {
        Self {
            output_dir,
            renderer,
            markdown,
            author,
        }
    }
}
