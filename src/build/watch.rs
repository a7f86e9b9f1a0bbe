//! Polling for source changes.
//!
//! There is no file-system event subscription: every `interval` the whole
//! pages directory and the layout file are re-stat'ed and compared against a
//! `ModTimeIndex`. Any new or newer file triggers one full rebuild.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};

use super::cache::ModTimeIndex;
use super::source::SourceTree;
use crate::config::Settings;

/// Periodically compares modification times and triggers rebuilds.
///
/// Two states: idle (sleeping for `interval`) and scanning. A scan that finds
/// any change calls the rebuild callback exactly once.
pub struct ChangePoller {
    tree: SourceTree,
    layout_file: PathBuf,
    interval: Duration,
    index: ModTimeIndex,
}

impl ChangePoller {
    pub fn new(tree: SourceTree, layout_file: PathBuf, interval: Duration) -> Self {
        Self {
            tree,
            layout_file,
            interval,
            index: ModTimeIndex::new(),
        }
    }

    /// Watch the configured pages directory and layout, leaving out the output
    /// directory when it is nested in the sources.
    pub fn from_settings(settings: &Settings) -> Self {
        let tree = SourceTree::new(settings.general.pages_dir.clone())
            .excluding(&settings.general.output_dir);
        Self::new(
            tree,
            settings.general.layout_file.clone(),
            Duration::from_secs(settings.watch.delay),
        )
    }

    /// Record the current state of every watched file without reporting
    /// changes. Returns the number of files tracked.
    pub fn prime(&mut self) -> usize {
        self.scan();
        self.index.len()
    }

    /// Compare every watched file against the index, updating it.
    ///
    /// Returns the files that are new or have a newer modification time.
    /// Errors are logged; a file that cannot be stat'ed is simply not
    /// reported this cycle.
    pub fn scan(&mut self) -> Vec<PathBuf> {
        let mut changed = Vec::new();

        match self.tree.discover() {
            Ok(discovery) => {
                for skipped in &discovery.skipped {
                    debug!("Not watching {}: {}", skipped.path().display(), skipped);
                }
                for file in discovery.files {
                    if self.observe(&file.path) {
                        changed.push(file.path);
                    }
                }
            }
            Err(e) => warn!("Failed to scan {}: {}", self.tree.root().display(), e),
        }

        let layout_file = self.layout_file.clone();
        if self.observe(&layout_file) {
            changed.push(layout_file);
        }

        changed
    }

    /// Run one scan and call `rebuild` once if anything changed.
    pub fn poll_once<F: FnMut()>(&mut self, rebuild: &mut F) -> bool {
        let changed = self.scan();
        if changed.is_empty() {
            return false;
        }

        for path in &changed {
            info!("Detected change: {}", path.display());
        }
        rebuild();
        true
    }

    /// Sleep, scan, rebuild on change; forever.
    pub async fn run<F: FnMut()>(mut self, mut rebuild: F) {
        info!(
            "Watching {} file(s), checking every {}s. Press Ctrl+C to stop.",
            self.index.len(),
            self.interval.as_secs()
        );

        loop {
            tokio::time::sleep(self.interval).await;
            self.poll_once(&mut rebuild);
        }
    }

    fn observe(&mut self, path: &Path) -> bool {
        match std::fs::metadata(path).and_then(|meta| meta.modified()) {
            Ok(modified) => self.index.observe(path, modified),
            Err(e) => {
                debug!("Cannot stat {}: {}", path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    struct Fixture {
        dir: TempDir,
        poller: ChangePoller,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            std::fs::create_dir(dir.path().join("pages")).unwrap();
            std::fs::write(dir.path().join("pages/a.md"), "# A").unwrap();
            std::fs::write(dir.path().join("pages/b.md"), "# B").unwrap();
            std::fs::write(dir.path().join("layout.html"), "{{ content }}").unwrap();

            let poller = ChangePoller::new(
                SourceTree::new(dir.path().join("pages")),
                dir.path().join("layout.html"),
                Duration::from_secs(1),
            );
            Self { dir, poller }
        }

        fn path(&self, relative: &str) -> PathBuf {
            self.dir.path().join(relative)
        }
    }

    /// Push a file's modification time forward without touching its content.
    fn bump(path: &Path) {
        let file = File::options().write(true).open(path).unwrap();
        let later = file.metadata().unwrap().modified().unwrap() + Duration::from_secs(10);
        file.set_modified(later).unwrap();
    }

    #[test]
    fn test_prime_tracks_sources_and_layout() {
        let mut fx = Fixture::new();
        assert_eq!(fx.poller.prime(), 3);
    }

    #[test]
    fn test_no_change_no_rebuild() {
        let mut fx = Fixture::new();
        fx.poller.prime();

        let mut rebuilds = 0;
        assert!(!fx.poller.poll_once(&mut || rebuilds += 1));
        assert_eq!(rebuilds, 0);
    }

    #[test]
    fn test_newer_mtime_triggers_rebuild() {
        let mut fx = Fixture::new();
        fx.poller.prime();

        bump(&fx.path("pages/a.md"));
        assert_eq!(fx.poller.scan(), vec![fx.path("pages/a.md")]);
        // Index was updated, so the next scan is quiet
        assert!(fx.poller.scan().is_empty());
    }

    #[test]
    fn test_many_changes_one_rebuild() {
        let mut fx = Fixture::new();
        fx.poller.prime();

        bump(&fx.path("pages/a.md"));
        bump(&fx.path("pages/b.md"));
        std::fs::write(fx.path("pages/c.css"), "body {}").unwrap();

        let mut rebuilds = 0;
        assert!(fx.poller.poll_once(&mut || rebuilds += 1));
        assert_eq!(rebuilds, 1);
    }

    #[test]
    fn test_new_file_is_a_change() {
        let mut fx = Fixture::new();
        fx.poller.prime();

        std::fs::create_dir(fx.path("pages/sub")).unwrap();
        std::fs::write(fx.path("pages/sub/new.md"), "new").unwrap();

        assert_eq!(fx.poller.scan(), vec![fx.path("pages/sub/new.md")]);
    }

    #[test]
    fn test_layout_change_is_a_change() {
        let mut fx = Fixture::new();
        fx.poller.prime();

        bump(&fx.path("layout.html"));
        assert_eq!(fx.poller.scan(), vec![fx.path("layout.html")]);
    }

    #[test]
    fn test_deleted_file_is_not_a_change() {
        let mut fx = Fixture::new();
        fx.poller.prime();

        std::fs::remove_file(fx.path("pages/b.md")).unwrap();
        assert!(fx.poller.scan().is_empty());
    }

    #[test]
    fn test_missing_root_keeps_polling_layout() {
        let mut fx = Fixture::new();
        fx.poller.prime();

        std::fs::remove_dir_all(fx.path("pages")).unwrap();
        bump(&fx.path("layout.html"));

        assert_eq!(fx.poller.scan(), vec![fx.path("layout.html")]);
    }
}
