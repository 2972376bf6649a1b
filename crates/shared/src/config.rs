//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Document sequence configuration.
    #[serde(default)]
    pub sequence: SequenceConfig,
    /// Currency configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
}

/// Document sequence configuration.
///
/// References are formatted as `{prefix}-{counter}` with the counter
/// zero-padded to `padding` digits (e.g. `PR-00042`).
#[derive(Debug, Clone, Deserialize)]
pub struct SequenceConfig {
    /// Prefix for purchase request references.
    #[serde(default = "default_request_prefix")]
    pub request_prefix: String,
    /// Prefix for cash movement references.
    #[serde(default = "default_movement_prefix")]
    pub movement_prefix: String,
    /// Zero-padding width of the counter.
    #[serde(default = "default_padding")]
    pub padding: usize,
}

fn default_request_prefix() -> String {
    "PR".to_string()
}

fn default_movement_prefix() -> String {
    "MOV".to_string()
}

fn default_padding() -> usize {
    5
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            request_prefix: default_request_prefix(),
            movement_prefix: default_movement_prefix(),
            padding: default_padding(),
        }
    }
}

/// Currency configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code of the company currency.
    #[serde(default = "default_currency_code")]
    pub default_code: String,
}

fn default_currency_code() -> String {
    "MXN".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            default_code: default_currency_code(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CENTAVO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
