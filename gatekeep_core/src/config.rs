//! Review settings.
//!
//! Settings come from built-in defaults, an optional `gatekeep.toml`, and
//! `GATEKEEP_*` environment variables, in increasing precedence.

use camino::Utf8Path;
use serde::Deserialize;
use tracing::debug;

use crate::api::ViewMode;
use crate::diff::DEFAULT_MAX_CELLS;
use crate::window::DEFAULT_CONTEXT_RADIUS;
use crate::{Error, Result};

/// The config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "gatekeep.toml";

const ENV_CONTEXT_RADIUS: &str = "GATEKEEP_CONTEXT_RADIUS";
const ENV_MAX_CELLS: &str = "GATEKEEP_MAX_CELLS";
const ENV_DEFAULT_VIEW: &str = "GATEKEEP_DEFAULT_VIEW";

/// Settings consumed by [`crate::ReviewController`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReviewConfig {
    /// Unchanged lines shown around each change.
    pub context_radius: usize,

    /// Largest alignment table the diff engine will build.
    pub max_cells: usize,

    /// View shown when a proposal is first presented.
    pub default_view: ViewMode,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            context_radius: DEFAULT_CONTEXT_RADIUS,
            max_cells: DEFAULT_MAX_CELLS,
            default_view: ViewMode::Unified,
        }
    }
}

impl ReviewConfig {
    /// Load settings from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file exists but cannot be read and
    /// [`Error::Config`] if it is not valid TOML for these settings.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        if !path.exists() {
            debug!("no config file found at {}", path);
            return Ok(Self::default());
        }

        debug!("found config file at {}", path);
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_string(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| Error::Config {
            path: path.to_string(),
            source,
        })
    }

    /// Apply `GATEKEEP_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] for a variable that does not parse.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(std::env::vars())
    }

    /// Apply overrides from `(name, value)` pairs; unknown names are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetting`] for a value that does not parse.
    pub fn apply_overrides<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                ENV_CONTEXT_RADIUS => self.context_radius = parse_number(key, value)?,
                ENV_MAX_CELLS => self.max_cells = parse_number(key, value)?,
                ENV_DEFAULT_VIEW => self.default_view = parse_view(key, value)?,
                _ => continue,
            }
            debug!(key, value, "applied config override");
        }
        Ok(self)
    }
}

fn parse_number(key: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_view(key: &str, value: &str) -> Result<ViewMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "unified" => Ok(ViewMode::Unified),
        "side_by_side" | "side-by-side" | "split" => Ok(ViewMode::SideBySide),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> Error {
    Error::InvalidSetting {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}
