//! Configuration management with layered loading
//!
//! Only the command-line tool reads configuration; the tree library itself
//! has none.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/karytree/karytree.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `KARYTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::domain::{HeapifyMode, DEFAULT_MAX_CHILDREN};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Load(#[from] ConfigError),

    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Unified configuration for karytree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Arity of trees built from the command line (default: 2)
    pub max_children: usize,
    /// Heapify behavior (default: single-pass)
    pub heapify_mode: HeapifyMode,
    /// Separator between values when printing a traversal
    pub separator: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_children: DEFAULT_MAX_CHILDREN,
            heapify_mode: HeapifyMode::default(),
            separator: ", ".to_string(),
        }
    }
}

/// Get the XDG config directory for karytree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "karytree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("karytree.toml"))
}

impl Settings {
    /// Load settings from all layers.
    #[instrument(level = "debug")]
    pub fn load(explicit: Option<&Path>) -> SettingsResult<Self> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_from(global.as_deref(), explicit)
    }

    /// Load settings with an explicit global file location.
    ///
    /// `explicit` must exist; a missing global file is skipped.
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> SettingsResult<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("max_children", defaults.max_children as u64)?
            .set_default("heapify_mode", defaults.heapify_mode.to_string())?
            .set_default("separator", defaults.separator)?;

        if let Some(global_path) = global {
            debug!(path = %global_path.display(), "global config");
            builder = builder.add_source(
                File::from(global_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SettingsError::NotFound(path.to_path_buf()));
            }
            debug!(path = %path.display(), "explicit config");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("KARYTREE")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> SettingsResult<()> {
        if self.max_children == 0 {
            return Err(SettingsError::Invalid {
                key: "max_children",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# karytree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/karytree/karytree.toml
#   Local:  file passed with --config
#   Env:    KARYTREE_* environment variables (e.g. KARYTREE_MAX_CHILDREN=3)

# Maximum number of children per node for trees built on the command line
# max_children = 2

# Heapify behavior: "single-pass" (one swap per edge) or "sift-down" (full min-heap)
# heapify_mode = "single-pass"

# Separator printed between traversal values
# separator = ", "
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None, None).expect("load defaults");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_default_settings_when_serialized_then_kebab_case_mode() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("max_children = 2"));
        assert!(toml.contains("heapify_mode = \"single-pass\""));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let parsed: Settings = toml::from_str(&Settings::template()).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
