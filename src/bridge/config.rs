// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connection configuration for the bridge.

use std::time::Duration;

use reqwest::Client;

use crate::error::ProtocolError;

use super::BridgeClient;

/// Configuration for connecting to a Hue bridge.
///
/// Every command is an independent HTTP request with a bounded timeout; there
/// is no persistent connection.
///
/// # Examples
///
/// ```
/// use huekey::BridgeConfig;
/// use std::time::Duration;
///
/// // Simple configuration
/// let config = BridgeConfig::new("192.168.1.2");
///
/// // With all options
/// let config = BridgeConfig::new("192.168.1.2")
///     .with_port(8080)
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    host: String,
    port: u16,
    timeout: Duration,
}

impl BridgeConfig {
    /// Default HTTP port.
    pub const DEFAULT_PORT: u16 = 80;
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a new configuration for the specified bridge host.
    ///
    /// # Arguments
    ///
    /// * `host` - The hostname or IP address of the bridge
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.port == Self::DEFAULT_PORT {
            format!("http://{}", self.host)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }

    /// Creates a [`BridgeClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAddress`] if the host is empty, or a
    /// [`ProtocolError::Http`] if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<BridgeClient, ProtocolError> {
        if self.host.is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "bridge host must not be empty".to_string(),
            ));
        }

        let base_url = self.base_url();
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(BridgeClient::from_parts(base_url, client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = BridgeConfig::new("192.168.1.2");
        assert_eq!(config.host(), "192.168.1.2");
        assert_eq!(config.port(), 80);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn base_url_default_port() {
        let config = BridgeConfig::new("192.168.1.2");
        assert_eq!(config.base_url(), "http://192.168.1.2");
    }

    #[test]
    fn base_url_custom_port() {
        let config = BridgeConfig::new("192.168.1.2").with_port(8080);
        assert_eq!(config.base_url(), "http://192.168.1.2:8080");
    }

    #[test]
    fn with_timeout() {
        let config = BridgeConfig::new("192.168.1.2").with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn empty_host_is_rejected() {
        let result = BridgeConfig::new("").into_client();
        assert!(result.is_err());
    }

    #[test]
    fn into_client_keeps_base_url() {
        let client = BridgeConfig::new("192.168.1.2").into_client().unwrap();
        assert_eq!(client.base_url(), "http://192.168.1.2");
    }
}
