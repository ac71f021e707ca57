// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Communication with the Hue bridge.
//!
//! This module provides the HTTP client for the bridge's REST API and the
//! timed pairing protocol that exchanges a physical link button press for a
//! long-lived [`Credential`](crate::Credential).
//!
//! # REST surface
//!
//! - `POST /api` — pairing request
//! - `GET /api/{credential}/lights` — light enumeration
//! - `GET /api/{credential}/lights/{id}` — single light state
//! - `PUT /api/{credential}/lights/{id}/state` — state command

mod client;
mod config;
mod registration;

pub use client::BridgeClient;
pub use config::BridgeConfig;
pub use registration::{PollOutcome, Registrar, validate_credential};

use serde::Deserialize;

/// State block reported by the bridge for a single light.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LightState {
    /// Whether the light is currently on.
    pub on: bool,
}

/// A light as reported by the bridge.
#[derive(Debug, Clone, Deserialize)]
pub struct LightInfo {
    /// Current reported state.
    pub state: LightState,
    /// Human-readable name configured on the bridge.
    #[serde(default)]
    pub name: String,
    /// Device type string (e.g. `"Extended color light"`).
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// One element of the list the bridge returns for a pairing request.
///
/// A reply carries either a `success` object with the freshly minted
/// credential or an `error` object describing why pairing is still pending.
#[derive(Debug, Clone, Deserialize)]
pub struct PairingReply {
    /// Present when pairing succeeded.
    #[serde(default)]
    pub success: Option<PairingSuccess>,
    /// Present when the bridge rejected the request.
    #[serde(default)]
    pub error: Option<ApiError>,
}

/// Success payload of a pairing reply.
#[derive(Debug, Clone, Deserialize)]
pub struct PairingSuccess {
    /// The credential issued by the bridge.
    pub username: String,
}

/// In-band error object used throughout the bridge API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    /// Human-readable description (e.g. `"link button not pressed"`).
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_info_deserializes_state_and_metadata() {
        let json = r#"{
            "state": {"on": true, "bri": 254, "reachable": true},
            "type": "Extended color light",
            "name": "Desk lamp",
            "modelid": "LCT007"
        }"#;

        let info: LightInfo = serde_json::from_str(json).unwrap();
        assert!(info.state.on);
        assert_eq!(info.name, "Desk lamp");
        assert_eq!(info.kind, "Extended color light");
    }

    #[test]
    fn light_info_requires_state_block() {
        let json = r#"{"name": "Desk lamp"}"#;
        assert!(serde_json::from_str::<LightInfo>(json).is_err());
    }

    #[test]
    fn pairing_reply_success() {
        let json = r#"[{"success": {"username": "newtoken"}}]"#;
        let reply: Vec<PairingReply> = serde_json::from_str(json).unwrap();
        assert_eq!(reply[0].success.as_ref().unwrap().username, "newtoken");
        assert!(reply[0].error.is_none());
    }

    #[test]
    fn pairing_reply_error() {
        let json = r#"[{"error": {"type": 101, "address": "", "description": "link button not pressed"}}]"#;
        let reply: Vec<PairingReply> = serde_json::from_str(json).unwrap();
        assert!(reply[0].success.is_none());
        assert_eq!(
            reply[0].error.as_ref().unwrap().description,
            "link button not pressed"
        );
    }
}
