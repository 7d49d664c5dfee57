//! Settings file and paths.
//!
//! An optional JSON file supplies defaults that command-line flags override.
//! Looked up under the XDG config directory unless a path is given.

use crate::config::KnockConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::knocker::Transport;
use crate::types::AddressFamily;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use super::knock::{DEFAULT_DELAY_MS, DEFAULT_TIMEOUT_MS};

/// Global paths singleton.
static PATHS: OnceLock<Option<Paths>> = OnceLock::new();

/// Application directory paths following the XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/toctoc)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Get the global paths instance, if a home directory can be found.
    pub fn get() -> Option<&'static Paths> {
        PATHS.get_or_init(Self::discover).as_ref()
    }

    fn discover() -> Option<Self> {
        let project = ProjectDirs::from("com", "toctoc", "toctoc")?;
        Some(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Knock defaults read from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Default TCP connect timeout in milliseconds.
    pub timeout_ms: u64,
    /// Default delay between ports in milliseconds.
    pub delay_ms: u64,
    /// Default transport.
    pub transport: Transport,
    /// Default address family.
    pub family: AddressFamily,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            delay_ms: DEFAULT_DELAY_MS,
            transport: Transport::Tcp,
            family: AddressFamily::Any,
        }
    }
}

impl AppSettings {
    /// Load settings from the given file, or from the default location.
    ///
    /// A missing default file yields the built-in defaults; a file named
    /// explicitly must exist.
    pub fn resolve(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }

    /// Load settings from the default location.
    pub fn load() -> ConfigResult<Self> {
        let Some(paths) = Paths::get() else {
            return Ok(Self::default());
        };

        let file = paths.settings_file();
        if !file.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Build the knock configuration these settings describe.
    pub fn knock_config(&self) -> KnockConfig {
        KnockConfig::default()
            .with_family(self.family)
            .with_transport(self.transport)
            .with_timeout(Duration::from_millis(self.timeout_ms))
            .with_delay(Duration::from_millis(self.delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.timeout_ms, 200);
        assert_eq!(settings.delay_ms, 200);
        assert_eq!(settings.knock_config(), KnockConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = settings_file(r#"{"delay_ms": 50, "transport": "udp"}"#);
        let settings = AppSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.delay_ms, 50);
        assert_eq!(settings.timeout_ms, 200);
        assert_eq!(settings.transport, Transport::Udp);
        assert_eq!(settings.family, AddressFamily::Any);
    }

    #[test]
    fn test_family_aliases() {
        let file = settings_file(r#"{"family": "inet6"}"#);
        let settings = AppSettings::load_from(file.path()).unwrap();
        assert_eq!(settings.family, AddressFamily::Ipv6);
    }

    #[test]
    fn test_malformed_file() {
        let file = settings_file("{ not json");
        let result = AppSettings::load_from(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppSettings::resolve(Some(&dir.path().join("absent.json")));
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }

    #[test]
    fn test_settings_serialization() {
        let settings = AppSettings {
            transport: Transport::Udp,
            ..AppSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
