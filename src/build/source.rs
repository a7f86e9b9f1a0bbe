use std::path::{Path, PathBuf};

use log::debug;

use super::document::SourceFile;

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("source path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("source path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SourceError {
    /// The path the error is about.
    pub fn path(&self) -> &Path {
        match self {
            SourceError::PathNotFound(path) | SourceError::NotADirectory(path) => path,
            SourceError::ReadDir { path, .. } | SourceError::ReadEntry { path, .. } => path,
        }
    }
}

// =============================================================================
// Source tree
// =============================================================================

/// Everything found by one walk of the pages directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Regular files, in directory-listing order
    pub files: Vec<SourceFile>,
    /// Subdirectories or entries below the root that could not be read
    pub skipped: Vec<SourceError>,
}

impl Discovery {
    pub fn pages(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|file| file.is_page())
    }

    pub fn assets(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|file| !file.is_page())
    }
}

/// The pages directory, walked recursively on every build and every poll.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf,
    /// Canonical path of a directory to leave out (the output directory when
    /// it is nested in the source tree)
    exclude: Option<PathBuf>,
}

impl SourceTree {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            exclude: None,
        }
    }

    /// Skip `dir` during walks. Has no effect unless `dir` exists.
    pub fn excluding(mut self, dir: &Path) -> Self {
        self.exclude = dir.canonicalize().ok();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and collect every regular file.
    ///
    /// Only a root that is missing, not a directory or unreadable is an error;
    /// problems further down are collected in `Discovery::skipped`.
    pub fn discover(&self) -> Result<Discovery, SourceError> {
        if !self.root.exists() {
            return Err(SourceError::PathNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(SourceError::NotADirectory(self.root.clone()));
        }

        let entries = std::fs::read_dir(&self.root).map_err(|e| SourceError::ReadDir {
            path: self.root.clone(),
            source: e,
        })?;

        let mut discovery = Discovery::default();
        self.walk_entries(&self.root, entries, &mut discovery);
        Ok(discovery)
    }

    /// Recursively walk a directory and collect files.
    fn walk_directory(&self, dir: &Path, discovery: &mut Discovery) {
        match std::fs::read_dir(dir) {
            Ok(entries) => self.walk_entries(dir, entries, discovery),
            Err(e) => discovery.skipped.push(SourceError::ReadDir {
                path: dir.to_path_buf(),
                source: e,
            }),
        }
    }

    fn walk_entries(&self, dir: &Path, entries: std::fs::ReadDir, discovery: &mut Discovery) {
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    discovery.skipped.push(SourceError::ReadEntry {
                        path: dir.to_path_buf(),
                        source: e,
                    });
                    continue;
                }
            };

            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                Err(e) => {
                    discovery.skipped.push(SourceError::ReadEntry { path, source: e });
                    continue;
                }
            };

            if file_type.is_dir() {
                if self.is_excluded(&path) {
                    debug!("Skipping output directory {}", path.display());
                    continue;
                }
                self.walk_directory(&path, discovery);
            } else if file_type.is_file() || (file_type.is_symlink() && path.is_file()) {
                // Symlinked files count, symlinked directories are not followed
                discovery.files.push(SourceFile::new(path));
            }
        }
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        match &self.exclude {
            Some(exclude) => dir.canonicalize().is_ok_and(|canonical| &canonical == exclude),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, relative).unwrap();
    }

    fn relative_paths<'a>(
        root: &Path,
        files: impl Iterator<Item = &'a SourceFile>,
    ) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = files
            .map(|f| f.path.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        paths.sort();
        paths
    }

    #[test]
    fn test_discover_recurses_and_classifies() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "index.md");
        touch(dir.path(), "style.css");
        touch(dir.path(), "guide/Intro.MD");
        touch(dir.path(), "assets/img/a.png");

        let discovery = SourceTree::new(dir.path().to_path_buf()).discover().unwrap();

        assert_eq!(
            relative_paths(dir.path(), discovery.pages()),
            vec![PathBuf::from("guide/Intro.MD"), PathBuf::from("index.md")]
        );
        assert_eq!(
            relative_paths(dir.path(), discovery.assets()),
            vec![PathBuf::from("assets/img/a.png"), PathBuf::from("style.css")]
        );
        assert!(discovery.skipped.is_empty());
    }

    #[test]
    fn test_discover_empty_directory() {
        let dir = TempDir::new().unwrap();
        let discovery = SourceTree::new(dir.path().to_path_buf()).discover().unwrap();

        assert!(discovery.files.is_empty());
        assert!(discovery.skipped.is_empty());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = SourceTree::new(missing.clone()).discover();
        assert!(matches!(result, Err(SourceError::PathNotFound(p)) if p == missing));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "file.md");

        let result = SourceTree::new(dir.path().join("file.md")).discover();
        assert!(matches!(result, Err(SourceError::NotADirectory(_))));
    }

    #[test]
    fn test_excluded_directory_is_skipped() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "page.md");
        touch(dir.path(), "dist/Page.html");

        let tree = SourceTree::new(dir.path().to_path_buf()).excluding(&dir.path().join("dist"));
        let discovery = tree.discover().unwrap();

        assert_eq!(
            relative_paths(dir.path(), discovery.files.iter()),
            vec![PathBuf::from("page.md")]
        );
    }
}
