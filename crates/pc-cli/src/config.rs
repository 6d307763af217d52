//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use pc_core::DEFAULT_NAMESPACE;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Program definition to use instead of the bundled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_path: Option<PathBuf>,

    /// Exercise library to use instead of the bundled one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,

    /// Prefix for every key written to the database.
    pub namespace: String,

    /// Ring the terminal bell when a segment changes.
    pub bell: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("program_path", &self.program_path)
            .field("library_path", &self.library_path)
            .field("namespace", &self.namespace)
            .field("bell", &self.bell)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("pc.db"),
            program_path: None,
            library_path: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            bell: true,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (PC_*)
        figment = figment.merge(Env::prefixed("PC_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for pc.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pc"))
}

/// Returns the platform-specific data directory for pc.
///
/// On Linux: `~/.local/share/pc`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("pc"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_pc() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "pc");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("pc.db"));
        assert_eq!(config.namespace, "pc");
        assert!(config.bell);
        assert!(config.program_path.is_none());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(
            &path,
            "namespace = \"gym\"\nbell = false\nprogram_path = \"/tmp/program.json\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.namespace, "gym");
        assert!(!config.bell);
        assert_eq!(
            config.program_path.as_deref(),
            Some(Path::new("/tmp/program.json"))
        );
        assert!(config.library_path.is_none());
    }
}
