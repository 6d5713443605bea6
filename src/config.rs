//! Configuration for the browser, loaded from an optional TOML file.
//!
//! ```toml
//! [network]
//! ssid = "home"
//! password = "hunter2"
//! timeout_seconds = 15
//!
//! [session]
//! default_term = "MicroPython"
//!
//! [services]
//! timeout_seconds = 10
//! hn_story_count = 5
//!
//! [services.endpoints]
//! ip = "https://api.ipify.org"
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use upb_services::ServiceConfig;

use crate::error::{BrowserError, Result};

/// Network name that marks the credentials as not filled in.
pub const PLACEHOLDER_SSID: &str = "YOUR_WIFI_SSID";
/// Secret that marks the credentials as not filled in.
pub const PLACEHOLDER_PASSWORD: &str = "YOUR_WIFI_PASSWORD";

/// Top-level browser configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Wireless association before the command loop.
    pub network: NetworkConfig,
    /// Command loop settings.
    pub session: SessionConfig,
    /// Upstream services (timeouts, endpoints).
    pub services: ServiceConfig,
}

/// Wireless credentials and association timeout.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub ssid: String,
    pub password: String,
    /// How long to wait for the association to complete.
    pub timeout_seconds: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ssid: PLACEHOLDER_SSID.to_string(),
            password: PLACEHOLDER_PASSWORD.to_string(),
            timeout_seconds: 15,
        }
    }
}

// Keep the secret out of logs and panics.
impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("ssid", &self.ssid)
            .field("password", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

impl NetworkConfig {
    /// Returns `true` if real credentials were configured.
    ///
    /// Placeholder or empty values short-circuit the association step.
    pub fn has_credentials(&self) -> bool {
        !self.ssid.trim().is_empty()
            && self.ssid != PLACEHOLDER_SSID
            && self.password != PLACEHOLDER_PASSWORD
    }
}

/// Command loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Encyclopedia term shown by `reload` before any `search`.
    pub default_term: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_term: "MicroPython".to_string(),
        }
    }
}

impl BrowserConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| BrowserError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BrowserError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/upb/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("upb").join("config.toml"))
    }

    /// Resolve the configuration for a run.
    ///
    /// An explicit path must exist. Otherwise the default path is used if a
    /// file is present there, and built-in defaults if not.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path).map_err(|e| {
                BrowserError::Config(format!("{}: {e}", path.display()))
            });
        }
        match Self::default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_placeholders() {
        let config = BrowserConfig::default();
        assert_eq!(config.network.ssid, "YOUR_WIFI_SSID");
        assert_eq!(config.network.password, "YOUR_WIFI_PASSWORD");
        assert!(!config.network.has_credentials());
        assert_eq!(config.session.default_term, "MicroPython");
        assert_eq!(config.network.timeout_seconds, 15);
    }

    #[test]
    fn real_credentials_detected() {
        let network = NetworkConfig {
            ssid: "home".into(),
            password: "secret".into(),
            ..Default::default()
        };
        assert!(network.has_credentials());
    }

    #[test]
    fn blank_ssid_is_not_credentials() {
        let network = NetworkConfig {
            ssid: "  ".into(),
            password: "secret".into(),
            ..Default::default()
        };
        assert!(!network.has_credentials());
    }

    #[test]
    fn debug_redacts_password() {
        let network = NetworkConfig {
            ssid: "home".into(),
            password: "hunter2".into(),
            ..Default::default()
        };
        let shown = format!("{network:?}");
        assert!(shown.contains("home"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut config = BrowserConfig::default();
        config.network.ssid = "office".into();
        config.session.default_term = "Rust".into();
        config.services.hn_story_count = 3;

        config.save_to_file(&path).expect("save");
        let loaded = BrowserConfig::from_file(&path).expect("load");
        assert_eq!(loaded.network.ssid, "office");
        assert_eq!(loaded.session.default_term, "Rust");
        assert_eq!(loaded.services.hn_story_count, 3);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\ndefault_term = \"Ferris\"\n\n[services.endpoints]\nip = \"http://localhost:8080\"\n",
        )
        .expect("write");

        let config = BrowserConfig::from_file(&path).expect("load");
        assert_eq!(config.session.default_term, "Ferris");
        assert_eq!(config.services.endpoints.ip, "http://localhost:8080");
        assert_eq!(config.services.endpoints.xkcd, "https://xkcd.com");
        assert_eq!(config.network.ssid, PLACEHOLDER_SSID);
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = BrowserConfig::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").expect("write");
        assert!(BrowserConfig::from_file(&path).is_err());
    }

    #[test]
    fn load_with_missing_explicit_path_fails() {
        let err = BrowserConfig::load(Some(Path::new("/nonexistent/upb.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/upb.toml"));
    }
}
