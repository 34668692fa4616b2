//! Application configuration.

use std::path::{Path, PathBuf};

use accrue_engine::ProlongationPolicy;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Application configuration, read from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deposit book (JSON)
    #[serde(default = "default_deposits_path")]
    pub deposits_path: PathBuf,

    /// Ledger file deposit operations are appended to
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    /// Commodity symbol written in front of ledger amounts
    #[serde(default = "default_commodity")]
    pub ledger_commodity: String,

    /// When term deposits may be prolonged
    #[serde(default)]
    pub prolongation: ProlongationPolicy,
}

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("accrue")
}

fn default_deposits_path() -> PathBuf {
    data_dir().join("deposits.json")
}

fn default_ledger_path() -> PathBuf {
    data_dir().join("transactions.ledger")
}

fn default_commodity() -> String {
    accrue_ext_file::DEFAULT_COMMODITY.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deposits_path: default_deposits_path(),
            ledger_path: default_ledger_path(),
            ledger_commodity: default_commodity(),
            prolongation: ProlongationPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content).map_err(|e| CliError::Config(format!("{}: {e}", path.display())))
    }

    /// Parse configuration from TOML text, expanding `~` in paths.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        config.deposits_path = expand_tilde(&config.deposits_path);
        config.ledger_path = expand_tilde(&config.ledger_path);
        Ok(config)
    }

    /// Resolves the configuration to use.
    ///
    /// An explicit path must exist. Otherwise the default location is read if
    /// present, and built-in defaults apply when it is not.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            tracing::debug!("loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!("loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                tracing::debug!("no configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// `<config_dir>/accrue/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("accrue").join("config.toml"))
}

/// Replaces a leading `~` with the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.ledger_commodity, "₽");
        assert_eq!(config.prolongation.lead_days, 7);
        assert_eq!(config.prolongation.grace_days, None);
    }

    #[test]
    fn test_full_config() {
        let config = AppConfig::from_toml(
            r#"
            deposits_path = "/data/deposits.json"
            ledger_path = "/data/main.ledger"
            ledger_commodity = "RUB "

            [prolongation]
            grace_days = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.deposits_path, PathBuf::from("/data/deposits.json"));
        assert_eq!(config.ledger_path, PathBuf::from("/data/main.ledger"));
        assert_eq!(config.ledger_commodity, "RUB ");
        assert_eq!(config.prolongation.lead_days, 7);
        assert_eq!(config.prolongation.grace_days, Some(30));
    }

    #[test]
    fn test_tilde_expansion() {
        let expanded = expand_tilde(Path::new("~/finances/deposits.json"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expanded, home.join("finances/deposits.json"));
        }
        assert_eq!(expand_tilde(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        assert_eq!(expand_tilde(Path::new("~user/x")), PathBuf::from("~user/x"));
    }

    #[test]
    fn test_rejects_unknown_types() {
        assert!(AppConfig::from_toml("deposits_path = 5").is_err());
    }

    #[test]
    fn test_missing_explicit_file() {
        let err = AppConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
