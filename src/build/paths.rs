//! Path conversion utilities.
//!
//! This module handles conversions between:
//! - Source file paths (files found under the pages directory)
//! - Page titles (derived from Markdown file names)
//! - Output file paths (where files are written in the output directory)

use std::path::{Path, PathBuf, StripPrefixError};

use crate::util::capitalize_first;

/// Whether a file is a Markdown page: its name ends in ".md", in any case.
pub fn is_markdown(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().ends_with(".md"))
        .unwrap_or(false)
}

/// Derive a page title from a source file name.
///
/// Everything from the last `.` of the base name is dropped and the first
/// character is upper-cased.
///
/// # Examples
/// ```ignore
/// page_title("pages/hello.md") => "Hello"
/// page_title("pages/guide/release.notes.md") => "Release.notes"
/// page_title("pages/Note.MD") => "Note"
/// ```
pub fn page_title(path: &Path) -> String {
    let base_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match base_name.rfind('.') {
        Some(dot) => &base_name[..dot],
        None => base_name.as_str(),
    };
    capitalize_first(stem)
}

/// Output file for a page. Pages are written flat into the output directory,
/// so two sources with the same title share one output file.
///
/// # Examples
/// ```ignore
/// page_output_path("Hello", "/site") => "/site/Hello.html"
/// ```
pub fn page_output_path(title: &str, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{title}.html"))
}

/// Output file for an asset, mirroring its position under the source root.
///
/// # Examples
/// ```ignore
/// asset_output_path("/src/img/a.png", "/src", "/site") => "/site/img/a.png"
/// ```
pub fn asset_output_path(
    path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<PathBuf, StripPrefixError> {
    let relative = path.strip_prefix(source_root)?;
    Ok(output_dir.join(relative))
}
