//! File writing stage.
//!
//! Writes the final HTML output to the filesystem.

use crate::build::paths::page_output_path;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that writes rendered pages to the output directory.
///
/// Pages land directly in the output directory as `<Title>.html`; an existing
/// file with the same name is overwritten.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let html = doc.output_html.as_ref().ok_or_else(|| {
            PipelineError::stage(
                "write",
                format!(
                    "page '{}' has no output HTML (was template stage run?)",
                    doc.source.path.display()
                ),
            )
        })?;

        let output_path = page_output_path(&doc.title, ctx.output_dir);
        std::fs::write(&output_path, html)?;
        doc.output_path = Some(output_path);

        Ok(())
    }
}
