//! Default pipeline stages.
//!
//! The standard page pipeline consists of:
//!
//! 1. **ListSpacingStage** - Blank-line separate loosely written bullet items
//! 2. **MarkdownStage** - Convert markdown to HTML, keeping embedded HTML
//! 3. **TemplateStage** - Wrap content in the layout
//! 4. **WriteStage** - Write final HTML to the output directory

mod lists;
mod markdown;
mod template;
mod write;

pub use lists::ListSpacingStage;
pub use markdown::MarkdownStage;
pub use template::TemplateStage;
pub use write::WriteStage;
