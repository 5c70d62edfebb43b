//! rota.toml configuration parser.
//!
//! Everything here is optional; command-line flags always win over the
//! config file, and a missing file just means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotaConfig {
    pub store: Option<StoreConfig>,
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the roster database file.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Organization used when --org is not given.
    pub organization: Option<String>,
}

impl RotaConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: RotaConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read the config file if it exists; otherwise fall back to defaults.
    /// A file that exists but fails to parse is an error, not a silent default.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: RotaConfig = toml::from_str(
            r#"
            [store]
            path = "/var/lib/rota/roster.redb"

            [defaults]
            organization = "st-marys"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.store.unwrap().path.unwrap(),
            PathBuf::from("/var/lib/rota/roster.redb")
        );
        assert_eq!(
            config.defaults.unwrap().organization.as_deref(),
            Some("st-marys")
        );
    }

    #[test]
    fn empty_config_is_valid() {
        let config: RotaConfig = toml::from_str("").unwrap();
        assert!(config.store.is_none());
        assert!(config.defaults.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = RotaConfig::load_or_default(Path::new("/nonexistent/rota.toml")).unwrap();
        assert!(config.store.is_none());
    }
}
