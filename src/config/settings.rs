//! User settings loaded from a JSON file.
//!
//! Every field has a default; a missing file yields the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{is_valid_date_format, DEFAULT_DATE_FORMAT};

/// Endpoint used when neither the file nor the command line names one
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/member/query";

/// Errors that can occur loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Query endpoint
    pub endpoint: String,
    /// Request timeout in seconds; none waits indefinitely
    pub timeout_secs: Option<u64>,
    /// strftime pattern for date fields
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::ReadError {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| SettingsError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply command line values over file values.
    pub fn apply_overrides(&mut self, endpoint: Option<String>, timeout_secs: Option<u64>) {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
    }

    /// Reject settings that would fail at use time.
    pub fn validate(&self) -> Result<(), SettingsError> {
        reqwest::Url::parse(&self.endpoint)
            .map_err(|e| SettingsError::InvalidEndpoint(format!("{}: {}", self.endpoint, e)))?;
        if !is_valid_date_format(&self.date_format) {
            return Err(SettingsError::InvalidDateFormat(self.date_format.clone()));
        }
        Ok(())
    }

    /// Request timeout; zero means none.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_settings(r#"{ "timeout_secs": 5 }"#);
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_settings("{ endpoint: ");
        assert!(matches!(
            Settings::load(file.path()),
            Err(SettingsError::ParseError { .. })
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = write_settings(
            r#"{ "endpoint": "http://file.example/q", "timeout_secs": 5 }"#,
        );
        let mut settings = Settings::load(file.path()).unwrap();

        settings.apply_overrides(None, None);
        assert_eq!(settings.endpoint, "http://file.example/q");
        assert_eq!(settings.timeout_secs, Some(5));

        settings.apply_overrides(Some("http://cli.example/q".into()), Some(30));
        assert_eq!(settings.endpoint, "http://cli.example/q");
        assert_eq!(settings.timeout_secs, Some(30));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let settings = Settings {
            timeout_secs: Some(0),
            ..Settings::default()
        };
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn test_validate() {
        assert!(Settings::default().validate().is_ok());

        let bad_url = Settings {
            endpoint: "not a url".into(),
            ..Settings::default()
        };
        assert!(matches!(
            bad_url.validate(),
            Err(SettingsError::InvalidEndpoint(_))
        ));

        let bad_format = Settings {
            date_format: "%Q".into(),
            ..Settings::default()
        };
        assert!(matches!(
            bad_format.validate(),
            Err(SettingsError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn test_validate_rejects_time_of_day_format() {
        let settings = Settings {
            date_format: "%Y %H:%M".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SettingsError::InvalidDateFormat(f)) if f == "%Y %H:%M"
        ));
    }
}
