//! Layout rendering stage.

use chrono::Local;

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::render::Page;

/// Stage that applies the layout to rendered content.
///
/// The page is stamped with the current local time and the configured author.
/// After this stage, `doc.output_html` contains the complete HTML page.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        let page = Page::new(
            doc.title.clone(),
            std::mem::take(&mut doc.content),
            ctx.author.to_string(),
            Local::now(),
        );

        doc.output_html = Some(ctx.renderer.render_page(&page)?);
        Ok(())
    }
}
