//! Configuration loading from files.
//!
//! Settings are layered with the `config` crate: built-in defaults first, then
//! the optional TOML file, then whatever the command line set explicitly.

use std::path::{Path, PathBuf};

use config::{File, FileFormat, FileSourceFile};
use log::{info, warn};

use super::types::{
    DEFAULT_AUTHOR, DEFAULT_LAYOUT_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_PAGES_DIR,
    DEFAULT_WATCH_DELAY_SECS, default_markdown_extensions,
};
use super::{ConfigError, Settings};

/// Key names used by easyPages config files, mapped to the current ones.
const LEGACY_KEYS: [(&str, &str); 3] = [
    ("general.pagesDir", "general.pages_dir"),
    ("general.outputDir", "general.output_dir"),
    ("general.layoutFile", "general.layout_file"),
];

/// Explicit command-line overrides. `None` (or `false` for `watch`) leaves the
/// lower layers untouched.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub pages_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub layout_file: Option<PathBuf>,
    pub author: Option<String>,
    pub watch: bool,
    pub delay: Option<u64>,
}

impl Settings {
    /// Load settings, resolving relative paths against the current directory.
    pub fn load_from_arg(config_file: &Path, overrides: &Overrides) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CwdFailure)?;
        let config_file = if config_file.is_relative() {
            cwd.join(config_file)
        } else {
            config_file.to_path_buf()
        };

        let mut settings = Self::load_from_file(&config_file, overrides)?;
        settings.resolve_paths(&cwd);
        Ok(settings)
    }

    /// Load settings from `config_file` if it exists.
    ///
    /// A file that exists but cannot be parsed is reported and skipped; the
    /// defaults and overrides still apply.
    pub(crate) fn load_from_file(
        config_file: &Path,
        overrides: &Overrides,
    ) -> Result<Self, ConfigError> {
        if !config_file.is_file() {
            info!(
                "Config file {} not found, using defaults",
                config_file.display()
            );
            return Self::layered(None, overrides);
        }

        match Self::layered(Some(config_file), overrides) {
            Ok(settings) => {
                info!("Loaded settings from {}", config_file.display());
                Ok(settings)
            }
            Err(ConfigError::Deserialize(e)) => {
                warn!(
                    "Could not parse config file {}: {e}; using defaults",
                    config_file.display()
                );
                Self::layered(None, overrides)
            }
            Err(e) => Err(e),
        }
    }

    fn layered(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("general.pages_dir", DEFAULT_PAGES_DIR)?
            .set_default("general.output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("general.layout_file", DEFAULT_LAYOUT_FILE)?
            .set_default("general.author", DEFAULT_AUTHOR)?
            .set_default("watch.enabled", false)?
            .set_default("watch.delay", DEFAULT_WATCH_DELAY_SECS)?
            .set_default("markdown.extensions", default_markdown_extensions())?
            .set_default("markdown.hard_breaks", true)?;

        if let Some(path) = config_file {
            let file = File::new(&path.to_string_lossy(), FileFormat::Toml);
            // Legacy keys sit below the command-line overrides, which are set
            // afterwards and replace them.
            for (key, value) in legacy_values(file.clone())? {
                builder = builder.set_override(key, value)?;
            }
            builder = builder.add_source(file);
        }

        let delay = overrides
            .delay
            .map(|d| {
                i64::try_from(d).map_err(|_| {
                    ConfigError::Validation(format!("invalid delay: {d} seconds is out of range"))
                })
            })
            .transpose()?;

        let settings: Settings = builder
            .set_override_option("general.pages_dir", path_value(&overrides.pages_dir))?
            .set_override_option("general.output_dir", path_value(&overrides.output_dir))?
            .set_override_option("general.layout_file", path_value(&overrides.layout_file))?
            .set_override_option("general.author", overrides.author.clone())?
            .set_override_option("watch.enabled", overrides.watch.then_some(true))?
            .set_override_option("watch.delay", delay)?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.watch.delay == 0 {
            return Err(ConfigError::Validation(
                "invalid config: 'watch.delay' must be at least 1 second".to_string(),
            ));
        }
        Ok(())
    }
}

/// Values of legacy keys present in `file`, keyed by their current name.
///
/// The lookup tries the camelCase name and its lower-cased form, since
/// `config` may normalise key case.
fn legacy_values(
    file: File<FileSourceFile, FileFormat>,
) -> Result<Vec<(&'static str, String)>, ConfigError> {
    let legacy = config::Config::builder().add_source(file).build()?;

    Ok(LEGACY_KEYS
        .iter()
        .filter_map(|(old, new)| {
            legacy
                .get_string(old)
                .or_else(|_| legacy.get_string(&old.to_lowercase()))
                .ok()
                .map(|value| (*new, value))
        })
        .collect())
}

fn path_value(path: &Option<PathBuf>) -> Option<String> {
    path.as_ref().map(|p| p.to_string_lossy().into_owned())
}
