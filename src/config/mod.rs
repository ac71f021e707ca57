// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Configuration loading and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Credential, LightId};

/// Binds a hotkey to one light.
///
/// Created during configuration; immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceBinding {
    /// Bridge-assigned light identifier.
    pub light: LightId,
    /// Key combination specification, e.g. `"ctrl+shift+l"`.
    pub hotkey: String,
    /// Display name for log output.
    pub name: String,
}

/// Persisted application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Hostname or IP address of the bridge.
    pub bridge_host: String,
    /// Credential from a previous pairing, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<Credential>,
    /// Hotkey bindings, one per managed light.
    #[serde(default)]
    pub devices: Vec<DeviceBinding>,
}

impl AppConfig {
    /// Returns the default configuration file path.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("huekey");
            path.push("config.json");
            path
        })
    }

    /// Loads the configuration from disk.
    ///
    /// Unlike optional settings, a missing or unreadable file is an error:
    /// the core cannot run without a bridge address and device list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Json`] when it is not valid JSON, and
    /// [`ConfigError::Missing`] when the bridge host is empty.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;

        if config.bridge_host.is_empty() {
            return Err(ConfigError::Missing("bridge_host"));
        }

        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves the configuration to disk as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when directories or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> AppConfig {
        AppConfig {
            bridge_host: "192.168.1.2".to_string(),
            credential: Some(Credential::new("token")),
            devices: vec![DeviceBinding {
                light: LightId::from("1"),
                hotkey: "ctrl+shift+l".to_string(),
                name: "Desk lamp".to_string(),
            }],
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("huekey-test-{}-{name}", std::process::id()));
        path.push("config.json");
        path
    }

    #[test]
    fn json_round_trip() {
        let config = sample_config();
        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.bridge_host, config.bridge_host);
        assert_eq!(back.credential, config.credential);
        assert_eq!(back.devices, config.devices);
    }

    #[test]
    fn credential_is_optional_in_file() {
        let json = r#"{
            "bridge_host": "192.168.1.2",
            "devices": [{"light": "1", "hotkey": "ctrl+a", "name": "Lamp"}]
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert!(config.credential.is_none());
        assert_eq!(config.devices.len(), 1);
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("save-load");
        let config = sample_config();

        config.save(&path).unwrap();
        let back = AppConfig::load(&path).unwrap();
        assert_eq!(back.devices, config.devices);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let result = AppConfig::load(Path::new("/nonexistent/huekey/config.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_rejects_empty_bridge_host() {
        let path = temp_path("empty-host");
        let config = AppConfig {
            bridge_host: String::new(),
            ..AppConfig::default()
        };
        config.save(&path).unwrap();

        let result = AppConfig::load(&path);
        assert!(matches!(result, Err(ConfigError::Missing("bridge_host"))));

        let _ = fs::remove_file(&path);
    }
}
