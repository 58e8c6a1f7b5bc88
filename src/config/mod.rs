//! Configuration module for opengithub
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `~/.config/opengithub/config.toml` (optional)
//! 3. `OPENGITHUB_*` environment variables (`OPENGITHUB_ROOT`,
//!    `OPENGITHUB_BRANCH`, `OPENGITHUB_OPEN`, `OPENGITHUB_QUIET`)
//! 4. command-line flags, applied with [`Settings::with_overrides`]
//!
//! Empty strings count as unset at every layer.

use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Prefix of the environment variables read as settings
pub const ENV_PREFIX: &str = "OPENGITHUB";

/// Application settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory relative paths are searched from (default: current directory)
    pub root: Option<PathBuf>,

    /// Branch to link to (default: the checked-out branch)
    pub branch: Option<String>,

    /// Open the URL in the default browser
    pub open: bool,

    /// Suppress progress output
    pub quiet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: None,
            branch: None,
            open: true,
            quiet: false,
        }
    }
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub root: Option<PathBuf>,
    pub branch: Option<String>,
    pub open: Option<bool>,
    pub quiet: bool,
}

impl Settings {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("opengithub").join("config.toml"))
    }

    /// Load settings from the config file and the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be parsed or a value
    /// has the wrong type (e.g. `OPENGITHUB_OPEN=maybe`).
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path().ok();
        Self::load_from(config_path.as_deref(), Environment::with_prefix(ENV_PREFIX))
    }

    /// Load settings from an explicit file and environment source
    ///
    /// A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or deserialized.
    pub fn load_from(file: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        let settings: Self = builder.add_source(env).build()?.try_deserialize()?;
        Ok(settings.normalized())
    }

    /// Apply command-line values on top of the loaded settings
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(root) = overrides.root {
            self.root = Some(root);
        }
        if let Some(branch) = overrides.branch {
            self.branch = Some(branch);
        }
        if let Some(open) = overrides.open {
            self.open = open;
        }
        self.quiet = self.quiet || overrides.quiet;
        self.normalized()
    }

    fn normalized(mut self) -> Self {
        self.root = self.root.filter(|r| !r.as_os_str().is_empty());
        self.branch = self
            .branch
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty());
        self
    }
}
