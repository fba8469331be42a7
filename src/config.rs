//! Library configuration loaded from environment variables.
//!
//! The embedding application calls `Config::from_env()` once at startup
//! and hands the result to `FootprintCore::new`.

use chrono::Offset;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::models::Language;

/// Default debounce window for viewport change events.
pub const DEFAULT_VIEWPORT_DEBOUNCE_MS: u64 = 300;

/// Library configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reference country (ISO code or any accepted alias)
    pub reference_country: String,
    /// Language used for display names, titles, and locked-badge ordering
    pub language: Language,
    /// Window for coalescing viewport change events
    pub viewport_debounce_ms: u64,
    /// Optional override for the bundled alias table
    pub alias_table_path: Option<PathBuf>,
    /// Offset applied to visit dates before extracting calendar years
    pub utc_offset_minutes: i32,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            reference_country: "CN".to_string(),
            language: Language::English,
            viewport_debounce_ms: DEFAULT_VIEWPORT_DEBOUNCE_MS,
            alias_table_path: None,
            utc_offset_minutes: 0,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let language = match env::var("FOOTPRINT_LANGUAGE") {
            Ok(v) => v
                .parse::<Language>()
                .map_err(|_| ConfigError::Invalid("FOOTPRINT_LANGUAGE", v))?,
            Err(_) => Language::English,
        };

        let viewport_debounce_ms = match env::var("FOOTPRINT_VIEWPORT_DEBOUNCE_MS") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("FOOTPRINT_VIEWPORT_DEBOUNCE_MS", v))?,
            Err(_) => DEFAULT_VIEWPORT_DEBOUNCE_MS,
        };

        let utc_offset_minutes: i32 = match env::var("FOOTPRINT_UTC_OFFSET_MINUTES") {
            Ok(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("FOOTPRINT_UTC_OFFSET_MINUTES", v))?,
            Err(_) => 0,
        };
        if utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ConfigError::Invalid(
                "FOOTPRINT_UTC_OFFSET_MINUTES",
                utc_offset_minutes.to_string(),
            ));
        }

        Ok(Self {
            reference_country: env::var("FOOTPRINT_REFERENCE_COUNTRY")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| "CN".to_string()),
            language,
            viewport_debounce_ms,
            alias_table_path: env::var("FOOTPRINT_ALIAS_TABLE").ok().map(PathBuf::from),
            utc_offset_minutes,
        })
    }

    /// Debounce window as a `Duration`.
    pub fn viewport_debounce(&self) -> Duration {
        Duration::from_millis(self.viewport_debounce_ms)
    }

    /// Fixed offset used when extracting visit years.
    pub fn utc_offset(&self) -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or(chrono::Utc.fix())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("FOOTPRINT_REFERENCE_COUNTRY", " JP ");
        env::set_var("FOOTPRINT_LANGUAGE", "zh");
        env::set_var("FOOTPRINT_VIEWPORT_DEBOUNCE_MS", "150");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.reference_country, "JP");
        assert_eq!(config.language, Language::Chinese);
        assert_eq!(config.viewport_debounce(), Duration::from_millis(150));
        assert_eq!(config.utc_offset_minutes, 0);

        // Invalid values are rejected, naming the variable
        env::set_var("FOOTPRINT_LANGUAGE", "klingon");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("FOOTPRINT_LANGUAGE", _))
        ));
        env::set_var("FOOTPRINT_LANGUAGE", "en");

        env::set_var("FOOTPRINT_VIEWPORT_DEBOUNCE_MS", "soon");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("FOOTPRINT_VIEWPORT_DEBOUNCE_MS", _))
        ));
        env::set_var("FOOTPRINT_VIEWPORT_DEBOUNCE_MS", "150");

        env::set_var("FOOTPRINT_UTC_OFFSET_MINUTES", "1440");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("FOOTPRINT_UTC_OFFSET_MINUTES", _))
        ));
        env::set_var("FOOTPRINT_UTC_OFFSET_MINUTES", "-480");
        assert_eq!(
            Config::from_env().unwrap().utc_offset().local_minus_utc(),
            -480 * 60
        );

        env::remove_var("FOOTPRINT_REFERENCE_COUNTRY");
        env::remove_var("FOOTPRINT_LANGUAGE");
        env::remove_var("FOOTPRINT_VIEWPORT_DEBOUNCE_MS");
        env::remove_var("FOOTPRINT_UTC_OFFSET_MINUTES");
    }

    #[test]
    fn test_default_utc_offset_is_zero() {
        let config = Config::default();
        assert_eq!(config.utc_offset().local_minus_utc(), 0);
    }
}
