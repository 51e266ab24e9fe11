//! Configuration management for Quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`]; they take
//! precedence over file values, which take precedence over the built-in
//! defaults (`content`, `docs`, `templates`, `statics`).
//!
//! Relative paths in a config file resolve against the file's directory, so
//! a build behaves the same regardless of the working directory it was
//! invoked from.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory for rendered pages.
    pub output_dir: Option<PathBuf>,
    /// Override layout template directory.
    pub template_dir: Option<PathBuf>,
    /// Override static assets directory.
    pub assets_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site directory configuration.
    pub site: SiteSection,

    /// Path to the config file (set after loading, `None` for defaults).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[site]` table: directory roots for one build.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteSection {
    /// Root directory containing markdown sources.
    pub source_dir: PathBuf,
    /// Root directory receiving rendered pages.
    pub output_dir: PathBuf,
    /// Directory containing the layout template.
    pub template_dir: PathBuf,
    /// Static assets directory mirrored into the output tree.
    pub assets_dir: PathBuf,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("docs"),
            template_dir: PathBuf::from("templates"),
            assets_dir: PathBuf::from("statics"),
        }
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Config file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Config file is not valid TOML.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Load configuration.
    ///
    /// With an explicit `path` the file must exist. Otherwise `quill.toml`
    /// is searched from the current directory upward; when none is found
    /// the defaults apply. CLI settings override file values last.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing, or if a config file
    /// cannot be read or parsed.
    pub fn load(path: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Self::from_file(path)?
            }
            None => match env::current_dir().ok().and_then(|dir| discover(&dir)) {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        if let Some(cli) = cli {
            config.apply_cli(cli);
        }
        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// Relative paths in the file resolve against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.site.resolve_against(base);
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn apply_cli(&mut self, cli: &CliSettings) {
        if let Some(dir) = &cli.source_dir {
            self.site.source_dir = dir.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.site.output_dir = dir.clone();
        }
        if let Some(dir) = &cli.template_dir {
            self.site.template_dir = dir.clone();
        }
        if let Some(dir) = &cli.assets_dir {
            self.site.assets_dir = dir.clone();
        }
    }
}

impl SiteSection {
    fn resolve_against(&mut self, base: &Path) {
        for dir in [
            &mut self.source_dir,
            &mut self.output_dir,
            &mut self.template_dir,
            &mut self.assets_dir,
        ] {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }
}

/// Search for `quill.toml` in `start` and its ancestors.
fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}
