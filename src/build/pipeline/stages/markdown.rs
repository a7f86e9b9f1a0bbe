//! Content rendering stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that renders page content to HTML.
///
/// Tag-delimited HTML regions in the source survive untouched; the rest is
/// converted as Markdown. After this stage, `doc.content` contains HTML.
pub struct MarkdownStage;

impl Stage for MarkdownStage {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        doc.content = ctx.markdown.transform(&doc.content);
        Ok(())
    }
}
