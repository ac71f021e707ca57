// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for `huekey`.
//!
//! This module provides the error hierarchy for failures across the crate:
//! bridge communication, response parsing, pairing, hotkey registration,
//! and configuration handling.

use thiserror::Error;

/// The main error type for this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred while talking to the bridge.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while parsing a bridge response.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error occurred during hotkey registration or dispatch.
    #[error("hotkey error: {0}")]
    Hotkey(#[from] HotkeyError),

    /// Error occurred while loading or saving configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The bridge link button was not pressed within the pairing deadline.
    #[error("registration timed out after {waited_secs} s without a link button press")]
    RegistrationTimeout {
        /// Seconds elapsed before giving up.
        waited_secs: u64,
    },

    /// Two bindings reference the same light or the same hotkey.
    #[error("duplicate binding: {0}")]
    DuplicateBinding(String),

    /// An I/O error outside of configuration handling.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to communication with the bridge.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed (connection refused, DNS, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The bridge answered with a non-success HTTP status.
    #[error("bridge returned HTTP {code}")]
    Status {
        /// The HTTP status code.
        code: u16,
    },

    /// Invalid bridge address.
    #[error("invalid bridge address: {0}")]
    InvalidAddress(String),
}

/// Errors related to parsing bridge responses.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the response.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// The bridge answered with an in-band API error object.
    #[error("bridge API error: {0}")]
    ApiError(String),

    /// Unexpected response format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),
}

/// Errors related to global hotkey handling.
#[derive(Debug, Error)]
pub enum HotkeyError {
    /// The platform hotkey backend failed.
    #[error("hotkey backend error: {0}")]
    Backend(#[from] global_hotkey::Error),

    /// A hotkey specification could not be parsed.
    #[error("invalid hotkey spec '{spec}': {message}")]
    InvalidSpec {
        /// The specification as configured.
        spec: String,
        /// Description of the parse failure.
        message: String,
    },

    /// The hotkey event channel was closed.
    #[error("hotkey event channel closed")]
    ChannelClosed,
}

/// Errors related to configuration handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the configuration file failed.
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required configuration value is absent.
    #[error("missing configuration value: {0}")]
    Missing(&'static str),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_timeout_display() {
        let err = Error::RegistrationTimeout { waited_secs: 30 };
        assert_eq!(
            err.to_string(),
            "registration timed out after 30 s without a link button press"
        );
    }

    #[test]
    fn protocol_status_display() {
        let err = ProtocolError::Status { code: 503 };
        assert_eq!(err.to_string(), "bridge returned HTTP 503");
    }

    #[test]
    fn error_from_parse_error() {
        let parse_err = ParseError::MissingField("state.on".to_string());
        let err: Error = parse_err.into();
        assert!(matches!(err, Error::Parse(ParseError::MissingField(_))));
    }

    #[test]
    fn hotkey_invalid_spec_display() {
        let err = HotkeyError::InvalidSpec {
            spec: "ctrl+++".to_string(),
            message: "empty token".to_string(),
        };
        assert_eq!(err.to_string(), "invalid hotkey spec 'ctrl+++': empty token");
    }

    #[test]
    fn config_missing_display() {
        let err = ConfigError::Missing("bridge_host");
        assert_eq!(err.to_string(), "missing configuration value: bridge_host");
    }
}
