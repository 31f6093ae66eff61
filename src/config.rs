//! Configuration for the `treekit` binary with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treekit/treekit.toml`
//! 3. Explicit config file passed with `--config`
//! 4. Environment variables: `TREEKIT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How records of an input file are turned into a forest and printed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Record field holding the record's key, also used as node id
    pub key_field: String,
    /// Record field holding the key of the parent record
    pub parent_field: String,
    /// Record field printed for a node (default: `key_field`)
    pub label_field: Option<String>,
    /// Pretty-print JSON output
    pub pretty_json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_field: "name".into(),
            parent_field: "boss".into(),
            label_field: None,
            pretty_json: true,
        }
    }
}

/// Get the XDG config directory for treekit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treekit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treekit.toml"))
}

impl Settings {
    /// Field used to label nodes in output.
    pub fn label_key(&self) -> &str {
        self.label_field.as_deref().unwrap_or(&self.key_field)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load settings with layered precedence.
    ///
    /// `config_file`, when given, must exist; the global file is optional.
    #[instrument(level = "debug")]
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let global = global_config_path().filter(|path| path.exists());
        Self::load_layers(global.as_deref(), config_file)
    }

    fn load_layers(global: Option<&Path>, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("key_field", defaults.key_field)?
            .set_default("parent_field", defaults.parent_field)?
            .set_default("pretty_json", defaults.pretty_json)?;

        if let Some(path) = global {
            debug!("Global config: {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = config_file {
            debug!("Config file: {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("TREEKIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_key_falls_back_to_key_field() {
        let mut settings = Settings::default();
        assert_eq!(settings.label_key(), "name");
        settings.label_field = Some("title".into());
        assert_eq!(settings.label_key(), "title");
    }

    #[test]
    fn test_explicit_file_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.toml");
        let local = dir.path().join("local.toml");
        std::fs::write(&global, "key_field = \"id\"\nparent_field = \"parent_id\"\n").unwrap();
        std::fs::write(&local, "parent_field = \"manager\"\npretty_json = false\n").unwrap();

        let settings = Settings::load_layers(Some(&global), Some(&local)).unwrap();
        assert_eq!(settings.key_field, "id");
        assert_eq!(settings.parent_field, "manager");
        assert!(!settings.pretty_json);
        assert_eq!(settings.label_field, None);
    }

    #[test]
    fn test_to_toml_lists_effective_fields() {
        let text = Settings::default().to_toml().unwrap();
        assert!(text.contains("key_field = \"name\""));
        assert!(text.contains("parent_field = \"boss\""));
        assert!(text.contains("pretty_json = true"));
        assert!(!text.contains("label_field"));
    }
}
