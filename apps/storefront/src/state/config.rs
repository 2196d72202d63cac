//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`HEARTH_*`)
//! 2. Config file (`hearth.toml`, platform config dir or explicit path)
//! 3. Defaults (this file)
//!
//! ## Example `hearth.toml`
//! ```toml
//! store_name = "Hearth"
//! currency_symbol = "₽"
//! courier_fee = 500
//! default_language = "ru"
//!
//! [latency]
//! auth_ms = 1000
//! products_ms = 1000
//! promotions_ms = 800
//! checkout_ms = 2000
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use hearth_core::i18n::Language;
use hearth_core::money::DEFAULT_CURRENCY_SYMBOL;
use hearth_core::{Money, MOCK_PASSWORD};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "hearth.toml";

// =============================================================================
// Errors
// =============================================================================

/// Errors while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("No config path available")]
    NoPath,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Latency
// =============================================================================

/// Artificial delays standing in for a real backend, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Login, register and profile update.
    #[serde(default = "default_auth_ms")]
    pub auth_ms: u64,

    #[serde(default = "default_products_ms")]
    pub products_ms: u64,

    #[serde(default = "default_promotions_ms")]
    pub promotions_ms: u64,

    /// Payment processing on checkout.
    #[serde(default = "default_checkout_ms")]
    pub checkout_ms: u64,
}

fn default_auth_ms() -> u64 {
    1000
}

fn default_products_ms() -> u64 {
    1000
}

fn default_promotions_ms() -> u64 {
    800
}

fn default_checkout_ms() -> u64 {
    2000
}

impl Default for LatencyConfig {
    fn default() -> Self {
        LatencyConfig {
            auth_ms: default_auth_ms(),
            products_ms: default_products_ms(),
            promotions_ms: default_promotions_ms(),
            checkout_ms: default_checkout_ms(),
        }
    }
}

impl LatencyConfig {
    /// No delays at all (tests, scripted CLI use).
    pub fn none() -> Self {
        LatencyConfig {
            auth_ms: 0,
            products_ms: 0,
            promotions_ms: 0,
            checkout_ms: 0,
        }
    }

    pub fn auth(&self) -> Duration {
        Duration::from_millis(self.auth_ms)
    }

    pub fn products(&self) -> Duration {
        Duration::from_millis(self.products_ms)
    }

    pub fn promotions(&self) -> Duration {
        Duration::from_millis(self.promotions_ms)
    }

    pub fn checkout(&self) -> Duration {
        Duration::from_millis(self.checkout_ms)
    }
}

// =============================================================================
// ConfigState
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigState {
    /// Store name (CLI banner)
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Currency symbol (for display)
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Courier delivery fee added at checkout
    #[serde(default = "default_courier_fee")]
    pub courier_fee: Money,

    /// Language used until the user picks one
    #[serde(default)]
    pub default_language: Language,

    /// The one password every mock account accepts
    #[serde(default = "default_mock_password")]
    pub mock_password: String,

    /// Snapshot directory. `None` uses the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub latency: LatencyConfig,
}

fn default_store_name() -> String {
    "Hearth".to_string()
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

fn default_courier_fee() -> Money {
    hearth_core::checkout::COURIER_FEE
}

fn default_mock_password() -> String {
    MOCK_PASSWORD.to_string()
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            store_name: default_store_name(),
            currency_symbol: default_currency_symbol(),
            courier_fee: default_courier_fee(),
            default_language: Language::default(),
            mock_password: default_mock_password(),
            data_dir: None,
            latency: LatencyConfig::default(),
        }
    }
}

impl ConfigState {
    /// Loads configuration: defaults, then the TOML file, then `HEARTH_*`
    /// environment variables.
    ///
    /// A missing file is not an error; a malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file without environment overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.mock_password.is_empty() {
            return Err(ConfigError::Invalid("mock_password must not be empty".into()));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "currency_symbol must not be empty".into(),
            ));
        }
        if self.courier_fee.is_negative() {
            return Err(ConfigError::Invalid(
                "courier_fee must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// ## Environment Variables
    /// - `HEARTH_STORE_NAME`
    /// - `HEARTH_CURRENCY_SYMBOL`
    /// - `HEARTH_COURIER_FEE` (whole units)
    /// - `HEARTH_LANGUAGE` (`en` / `ru`)
    /// - `HEARTH_MOCK_PASSWORD`
    /// - `HEARTH_DATA_DIR`
    /// - `HEARTH_LATENCY_MS` (sets every delay at once)
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("HEARTH_STORE_NAME") {
            self.store_name = name;
        }

        if let Ok(symbol) = std::env::var("HEARTH_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Ok(fee) = std::env::var("HEARTH_COURIER_FEE") {
            if let Ok(units) = fee.parse::<i64>() {
                debug!(courier_fee = units, "Overriding courier fee from environment");
                self.courier_fee = Money::from_units(units);
            }
        }

        if let Ok(language) = std::env::var("HEARTH_LANGUAGE") {
            if let Ok(parsed) = language.parse() {
                debug!(language = %language, "Overriding default language from environment");
                self.default_language = parsed;
            }
        }

        if let Ok(password) = std::env::var("HEARTH_MOCK_PASSWORD") {
            self.mock_password = password;
        }

        if let Ok(dir) = std::env::var("HEARTH_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(ms) = std::env::var("HEARTH_LATENCY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.latency = LatencyConfig {
                    auth_ms: ms,
                    products_ms: ms,
                    promotions_ms: ms,
                    checkout_ms: ms,
                };
            }
        }
    }

    /// Platform config file location.
    ///
    /// - **Linux**: `~/.config/hearth/hearth.toml`
    /// - **macOS**: `~/Library/Application Support/com.hearth.storefront/hearth.toml`
    /// - **Windows**: `%APPDATA%\hearth\storefront\config\hearth.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "hearth", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Formats an amount with the configured currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use hearth_core::Money;
    /// use hearth_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_money(Money::from_units(89_990)), "89 990 ₽");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ConfigState::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.courier_fee, Money::from_units(500));
        assert_eq!(config.mock_password, "password");
        assert_eq!(config.latency.promotions(), Duration::from_millis(800));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ConfigState = toml::from_str(
            r#"
            store_name = "Hearth Outlet"
            default_language = "ru"

            [latency]
            checkout_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Hearth Outlet");
        assert_eq!(config.default_language, Language::Ru);
        assert_eq!(config.currency_symbol, "₽");
        assert_eq!(config.latency.checkout_ms, 10);
        assert_eq!(config.latency.auth_ms, 1000);
    }

    #[test]
    fn test_validate_rejects_empty_password() {
        let config = ConfigState {
            mock_password: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = ConfigState {
            courier_fee: Money::from_units(750),
            latency: LatencyConfig::none(),
            ..Default::default()
        };
        config.save(Some(path.clone())).unwrap();

        let loaded = ConfigState::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "courier_fee = \"lots\"").unwrap();

        assert!(matches!(
            ConfigState::from_file(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_format_money() {
        let config = ConfigState {
            currency_symbol: "$".into(),
            ..Default::default()
        };
        assert_eq!(config.format_money(Money::from_units(1500)), "1 500 $");
    }
}
