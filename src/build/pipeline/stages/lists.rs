//! List spacing stage.

use crate::build::markdown::space_list_items;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that rewrites every `"\n- "` to `"\n\n- "` before rendering, so
/// bullet items written without blank lines still form a list.
pub struct ListSpacingStage;

impl Stage for ListSpacingStage {
    fn name(&self) -> &'static str {
        "lists"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        _ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        doc.content = space_list_items(&doc.content);
        Ok(())
    }
}
