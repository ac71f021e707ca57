// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for the bridge's REST API.

use std::collections::HashMap;

use reqwest::Client;

use crate::error::{Error, ParseError, ProtocolError, Result};
use crate::types::{Credential, LightId};

use super::{ApiError, LightInfo, PairingReply};

/// Client for the bridge's REST API.
///
/// All operations are single blocking-style requests bounded by the timeout
/// configured via [`BridgeConfig`](super::BridgeConfig). The client performs
/// no retries itself; callers decide retry policy.
///
/// # Examples
///
/// ```no_run
/// use huekey::{BridgeConfig, Credential, LightId};
///
/// # async fn example() -> huekey::Result<()> {
/// let client = BridgeConfig::new("192.168.1.2").into_client()?;
/// let credential = Credential::new("existing-token");
///
/// let info = client.get_light(&credential, &LightId::from("1")).await?;
/// println!("light 1 is {}", if info.state.on { "on" } else { "off" });
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BridgeClient {
    base_url: String,
    client: Client,
}

impl BridgeClient {
    /// Assembles a client from a prebuilt base URL and reqwest client.
    pub(crate) fn from_parts(base_url: String, client: Client) -> Self {
        Self { base_url, client }
    }

    /// Returns the base URL of the bridge.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the current reported state and metadata of a single light.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] for network failures and non-success HTTP
    /// statuses, or a [`ParseError`] when the body does not carry the
    /// expected `state.on` shape (including in-band bridge error objects).
    pub async fn get_light(&self, credential: &Credential, id: &LightId) -> Result<LightInfo> {
        let url = format!(
            "{}/api/{}/lights/{}",
            self.base_url,
            credential.as_str(),
            id
        );
        let body = self.get_text(&url).await?;
        parse_object(&body).map_err(Error::Parse)
    }

    /// Enumerates all lights known to the bridge.
    ///
    /// Used during configuration and credential validation, not during
    /// steady-state toggling.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`get_light`](Self::get_light).
    pub async fn list_lights(
        &self,
        credential: &Credential,
    ) -> Result<HashMap<LightId, LightInfo>> {
        let url = format!("{}/api/{}/lights", self.base_url, credential.as_str());
        let body = self.get_text(&url).await?;
        parse_object(&body).map_err(Error::Parse)
    }

    /// Commands a light on or off.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] for network failures and non-success HTTP
    /// statuses. The acknowledgement body is logged at debug level but not
    /// interpreted; the caller issues a confirmation read instead.
    pub async fn set_light_state(
        &self,
        credential: &Credential,
        id: &LightId,
        on: bool,
    ) -> Result<()> {
        let url = format!(
            "{}/api/{}/lights/{}/state",
            self.base_url,
            credential.as_str(),
            id
        );

        tracing::debug!(url = %url, on, "Sending state command");

        let response = self
            .client
            .put(&url)
            .json(&serde_json::json!({ "on": on }))
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
            }
            .into());
        }

        let ack = response.text().await.map_err(ProtocolError::Http)?;
        tracing::debug!(body = %ack, "Received state acknowledgement");

        Ok(())
    }

    /// Sends a pairing request.
    ///
    /// The bridge always answers pairing requests with HTTP 200 and encodes
    /// the outcome in-band, so the caller inspects the returned list.
    ///
    /// # Errors
    ///
    /// Returns a [`ProtocolError`] for network failures and non-success HTTP
    /// statuses, or a [`ParseError`] for a body that is not a reply list.
    pub async fn pair(&self, device_type: &str) -> Result<Vec<PairingReply>> {
        let url = format!("{}/api", self.base_url);

        tracing::debug!(url = %url, device_type, "Sending pairing request");

        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "devicetype": device_type }))
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;
        tracing::debug!(body = %body, "Received pairing response");

        serde_json::from_str(&body).map_err(|e| Error::Parse(ParseError::Json(e)))
    }

    /// Issues a GET and returns the body of a successful response.
    async fn get_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url = %url, "Sending bridge request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProtocolError::Status {
                code: status.as_u16(),
            }
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;
        tracing::debug!(body = %body, "Received bridge response");

        Ok(body)
    }
}

/// Parses a bridge object response, surfacing in-band error lists.
///
/// Lookups with a bad credential come back as HTTP 200 with a one-element
/// error list instead of the requested object, so a failed object parse is
/// retried as an error list before giving up.
fn parse_object<T: serde::de::DeserializeOwned>(body: &str) -> std::result::Result<T, ParseError> {
    match serde_json::from_str::<T>(body) {
        Ok(value) => Ok(value),
        Err(object_err) => match serde_json::from_str::<Vec<PairingReply>>(body) {
            Ok(items) => Err(ParseError::ApiError(describe_errors(&items))),
            Err(_) => Err(ParseError::Json(object_err)),
        },
    }
}

/// Extracts a readable description from an in-band error list.
fn describe_errors(items: &[PairingReply]) -> String {
    items
        .iter()
        .filter_map(|item| item.error.as_ref())
        .map(|ApiError { description }| description.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_accepts_light_info() {
        let body = r#"{"state": {"on": false}, "name": "Shelf"}"#;
        let info: LightInfo = parse_object(body).unwrap();
        assert!(!info.state.on);
        assert_eq!(info.name, "Shelf");
    }

    #[test]
    fn parse_object_surfaces_in_band_error() {
        let body = r#"[{"error": {"type": 1, "description": "unauthorized user"}}]"#;
        let result: std::result::Result<LightInfo, _> = parse_object(body);
        match result {
            Err(ParseError::ApiError(message)) => assert_eq!(message, "unauthorized user"),
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn parse_object_reports_json_error_for_garbage() {
        let result: std::result::Result<LightInfo, _> = parse_object("not json");
        assert!(matches!(result, Err(ParseError::Json(_))));
    }

    #[test]
    fn parse_object_reads_light_map() {
        let body = r#"{
            "1": {"state": {"on": true}, "name": "Desk"},
            "2": {"state": {"on": false}, "name": "Shelf"}
        }"#;
        let map: HashMap<LightId, LightInfo> = parse_object(body).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map[&LightId::from("1")].state.on);
        assert!(!map[&LightId::from("2")].state.on);
    }
}
