//! Pipeline error types.

use crate::build::render::RenderError;

/// Errors that can occur while a document moves through the pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("template rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }

    /// Attribute an error to the stage it came from, unless it already is.
    pub(crate) fn within(self, stage: &str) -> Self {
        match self {
            Self::Stage { .. } => self,
            other => Self::stage(stage, other.to_string()),
        }
    }
}
