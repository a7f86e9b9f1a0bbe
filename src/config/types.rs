//! Configuration type definitions.
//!
//! These types are pure data. Defaults live here as constants so the layered
//! loader in `load` can seed the builder with them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGES_DIR: &str = "pages";
pub const DEFAULT_OUTPUT_DIR: &str = "dist";
pub const DEFAULT_LAYOUT_FILE: &str = "layout.html";
pub const DEFAULT_AUTHOR: &str = "easyPages Team";
pub const DEFAULT_WATCH_DELAY_SECS: i64 = 5;

// =============================================================================
// Resolved settings
// =============================================================================

/// Fully resolved settings for one run.
///
/// Built once at startup from defaults, the optional config file and the
/// command-line overrides, in that order of precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub general: GeneralConfig,
    pub watch: WatchConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
}

impl Settings {
    /// Make every configured path absolute, resolving relative ones against `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.general.pages_dir,
            &mut self.general.output_dir,
            &mut self.general.layout_file,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

// =============================================================================
// General configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding the Markdown sources and assets
    pub pages_dir: PathBuf,
    /// Directory the site is written to
    pub output_dir: PathBuf,
    /// Tera template every page is rendered through
    pub layout_file: PathBuf,
    /// Author exposed to the layout as `author`
    pub author: String,
}

// =============================================================================
// Watch configuration
// =============================================================================

/// Configuration for the modification-time poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Keep running and rebuild whenever a source file changes.
    pub enabled: bool,
    /// Seconds to sleep between scans.
    pub delay: u64,
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
    /// Render every newline inside a paragraph as `<br />`
    #[serde(default = "default_hard_breaks")]
    pub hard_breaks: bool,
}

pub(crate) fn default_markdown_extensions() -> Vec<String> {
    vec![
        "definition_lists".to_string(),
        "heading_attributes".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
    ]
}

fn default_hard_breaks() -> bool {
    true
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
            hard_breaks: default_hard_breaks(),
        }
    }
}
