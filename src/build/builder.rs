use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::Settings;

use super::markdown::{MarkdownError, MarkdownRenderer};
use super::paths::asset_output_path;
use super::pipeline::{Pipeline, PipelineContext, ProcessingDocument};
use super::render::{RenderError, Renderer};
use super::source::{SourceError, SourceTree};

/// Errors that abort a whole build.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("markdown error: {0}")]
    Markdown(#[from] MarkdownError),

    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A file that was skipped during a build.
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.reason)
    }
}

/// Outcome of a build that ran to completion.
#[derive(Debug)]
pub struct BuildReport {
    pub output_dir: PathBuf,
    /// Pages rendered and written
    pub pages: usize,
    /// Assets copied
    pub assets: usize,
    /// Files left out of the output, with the reason
    pub failures: Vec<ItemFailure>,
}

impl BuildReport {
    fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            pages: 0,
            assets: 0,
            failures: Vec::new(),
        }
    }

    fn skip(&mut self, path: &Path, reason: impl Into<String>) {
        let failure = ItemFailure {
            path: path.to_path_buf(),
            reason: reason.into(),
        };
        warn!("Skipping {failure}");
        self.failures.push(failure);
    }
}

/// Runs the two passes of a build: render pages, then copy assets.
pub struct Builder {
    settings: Settings,
    pipeline: Pipeline,
}

impl Builder {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            pipeline: Pipeline::default(),
        }
    }

    /// Build the whole site.
    ///
    /// The layout is read and parsed on every call so a rebuild picks up
    /// layout edits. Per-file problems end up in `BuildReport::failures`.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let general = &self.settings.general;

        // Step 1: Load layout and markdown options
        let renderer = Renderer::from_layout_file(&general.layout_file)?;
        let markdown = MarkdownRenderer::new(&self.settings.markdown)?;

        // Step 2: Create output directory
        let output_dir = &general.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|e| BuildError::OutputDir {
            path: output_dir.clone(),
            source: e,
        })?;

        let tree = SourceTree::new(general.pages_dir.clone()).excluding(output_dir);
        let mut report = BuildReport::new(output_dir.clone());

        // Step 3: Render every markdown page
        let ctx = PipelineContext::new(output_dir, &renderer, &markdown, &general.author);
        self.render_pages(&tree, &ctx, &mut report)?;

        // Step 4: Copy everything else
        self.copy_assets(&tree, &mut report)?;

        info!(
            "Wrote {} page(s) and {} asset(s) to {}",
            report.pages,
            report.assets,
            output_dir.display()
        );

        Ok(report)
    }

    fn render_pages(
        &self,
        tree: &SourceTree,
        ctx: &PipelineContext,
        report: &mut BuildReport,
    ) -> Result<(), BuildError> {
        let discovery = tree.discover()?;

        // Unreadable directories are reported once, here; the asset pass
        // walks the same tree.
        for skipped in &discovery.skipped {
            report.skip(skipped.path(), skipped.to_string());
        }

        for file in discovery.pages() {
            info!("Processing {}", file.path.display());

            let mut doc = match ProcessingDocument::read(file.clone()) {
                Ok(doc) => doc,
                Err(e) => {
                    report.skip(&file.path, format!("failed to read file: {e}"));
                    continue;
                }
            };

            if let Err(e) = self.pipeline.run(&mut doc, ctx) {
                report.skip(&file.path, e.to_string());
                continue;
            }

            if let Some(output_path) = &doc.output_path {
                info!("Rendered {}", output_path.display());
            }
            report.pages += 1;
        }

        Ok(())
    }

    fn copy_assets(&self, tree: &SourceTree, report: &mut BuildReport) -> Result<(), BuildError> {
        let discovery = tree.discover()?;
        let output_dir = &self.settings.general.output_dir;

        for file in discovery.assets() {
            let output_path = match asset_output_path(&file.path, tree.root(), output_dir) {
                Ok(path) => path,
                Err(e) => {
                    report.skip(&file.path, format!("failed to compute relative path: {e}"));
                    continue;
                }
            };

            if let Some(parent) = output_path.parent() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    report.skip(
                        &file.path,
                        format!("failed to create directory {}: {e}", parent.display()),
                    );
                    continue;
                }
            }

            match copy_file(&file.path, &output_path) {
                Ok(_) => {
                    info!(
                        "Copied {} -> {}",
                        file.path.display(),
                        output_path.display()
                    );
                    report.assets += 1;
                }
                Err(e) => report.skip(
                    &file.path,
                    format!("failed to copy to {}: {e}", output_path.display()),
                ),
            }
        }

        Ok(())
    }
}

/// Copy by reading the whole source before writing, so a source that is also
/// the destination (output directory == pages directory) keeps its bytes.
fn copy_file(from: &Path, to: &Path) -> std::io::Result<()> {
    let bytes = std::fs::read(from)?;
    std::fs::write(to, bytes)
}
