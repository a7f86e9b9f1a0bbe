//! Page pipeline.
//!
//! Each Markdown page goes through a series of stages:
//! 1. List spacing (textual rewrite of loose bullet lists)
//! 2. Markdown rendering (to HTML, embedded HTML passed through)
//! 3. Template rendering (layout wrapper)
//! 4. File writing (output to disk)
//!
//! Pages run through the pipeline one at a time, so a failure in any stage
//! only loses that page.

mod context;
mod document;
mod error;
mod stages;

pub use context::PipelineContext;
pub use document::ProcessingDocument;
pub use error::PipelineError;

use stages::{ListSpacingStage, MarkdownStage, TemplateStage, WriteStage};

/// A stage in the page processing pipeline.
pub trait Stage {
    /// Unique name for this stage (used in error messages).
    fn name(&self) -> &'static str;

    /// Process one page through this stage.
    ///
    /// The page is passed by mutable reference so the stage can transform
    /// its content in place. The `ctx` provides access to shared resources
    /// like the layout renderer.
    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError>;
}

/// The page processing pipeline.
///
/// The default pipeline is: lists → markdown → template → write.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Create the default pipeline with standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline.add_stage(ListSpacingStage);
        pipeline.add_stage(MarkdownStage);
        pipeline.add_stage(TemplateStage);
        pipeline.add_stage(WriteStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Run one page through every stage, stopping at the first failure.
    pub fn run(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &PipelineContext,
    ) -> Result<(), PipelineError> {
        for stage in &self.stages {
            stage
                .process(doc, ctx)
                .map_err(|e| e.within(stage.name()))?;
        }
        Ok(())
    }

    /// Get the names of all stages in order.
    #[cfg(test)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
