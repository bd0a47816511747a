//! Runtime configuration read from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::catalog;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_DISPLAY_DELAY_MS: u64 = 800;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SPEECH_LOCALE: &str = "en-US";
pub const DEFAULT_LOG_FILE: &str = "rxguard.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    File,
    Stdout,
    /// File when stdout is a terminal (the TUI owns the screen), stdout otherwise.
    Auto,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub default_language: String,
    /// Pause between a successful response and showing it; zero disables.
    pub display_delay: Duration,
    pub request_timeout_secs: u64,
    pub speech_command: Option<String>,
    pub speech_locale: String,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Problems found while reading the environment, logged once logging is up.
    pub warnings: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            display_delay: Duration::from_millis(DEFAULT_DISPLAY_DELAY_MS),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            speech_command: None,
            speech_locale: DEFAULT_SPEECH_LOCALE.to_string(),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            warnings: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = get("RXGUARD_API_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(language) = get("RXGUARD_LANGUAGE") {
            if catalog::language_index(&language).is_some() {
                config.default_language = language.to_ascii_lowercase();
            } else {
                config
                    .warnings
                    .push(format!("Unknown RXGUARD_LANGUAGE {language:?}; using {DEFAULT_LANGUAGE}"));
            }
        }

        if let Some(raw) = get("RXGUARD_DISPLAY_DELAY_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => config.display_delay = Duration::from_millis(ms),
                Err(_) => config.warnings.push(format!(
                    "Invalid RXGUARD_DISPLAY_DELAY_MS {raw:?}; using {DEFAULT_DISPLAY_DELAY_MS}"
                )),
            }
        }

        if let Some(raw) = get("RXGUARD_REQUEST_TIMEOUT_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout_secs = secs,
                _ => config.warnings.push(format!(
                    "Invalid RXGUARD_REQUEST_TIMEOUT_SECS {raw:?}; using {DEFAULT_REQUEST_TIMEOUT_SECS}"
                )),
            }
        }

        config.speech_command = get("RXGUARD_SPEECH_COMMAND");

        if let Some(locale) = get("RXGUARD_SPEECH_LOCALE") {
            config.speech_locale = locale;
        }

        if let Some(mode) = get("RXGUARD_LOG_MODE") {
            config.log_mode = match mode.to_ascii_lowercase().as_str() {
                "file" => LogMode::File,
                "stdout" => LogMode::Stdout,
                "auto" => LogMode::Auto,
                _ => {
                    config
                        .warnings
                        .push(format!("Unknown RXGUARD_LOG_MODE {mode:?}; using auto"));
                    LogMode::Auto
                }
            };
        }

        if let Some(path) = get("RXGUARD_LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.default_language, "en");
        assert_eq!(config.display_delay, Duration::from_millis(800));
        assert_eq!(config.request_timeout_secs, 120);
        assert!(config.speech_command.is_none());
        assert_eq!(config.log_mode, LogMode::Auto);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RXGUARD_API_URL", "https://rx.example.org/"),
            ("RXGUARD_LANGUAGE", "HI"),
            ("RXGUARD_DISPLAY_DELAY_MS", "0"),
            ("RXGUARD_REQUEST_TIMEOUT_SECS", "30"),
            ("RXGUARD_SPEECH_COMMAND", "listen --once"),
            ("RXGUARD_LOG_MODE", "stdout"),
        ]);
        assert_eq!(config.api_base_url, "https://rx.example.org");
        assert_eq!(config.default_language, "hi");
        assert!(config.display_delay.is_zero());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.speech_command.as_deref(), Some("listen --once"));
        assert_eq!(config.log_mode, LogMode::Stdout);
    }

    #[test]
    fn test_invalid_values_fall_back_with_warning() {
        let config = config_from(&[
            ("RXGUARD_DISPLAY_DELAY_MS", "soon"),
            ("RXGUARD_REQUEST_TIMEOUT_SECS", "0"),
            ("RXGUARD_LANGUAGE", "klingon"),
            ("RXGUARD_LOG_MODE", "syslog"),
            ("RXGUARD_SPEECH_COMMAND", "   "),
        ]);
        assert_eq!(config.display_delay, Duration::from_millis(DEFAULT_DISPLAY_DELAY_MS));
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(config.default_language, DEFAULT_LANGUAGE);
        assert_eq!(config.log_mode, LogMode::Auto);
        assert!(config.speech_command.is_none());
        assert_eq!(config.warnings.len(), 4);
    }
}
