// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Timed pairing protocol against the bridge.
//!
//! Pairing requires a physical link button press on the bridge. The
//! [`Registrar`] polls the pairing endpoint at a fixed interval until the
//! bridge hands out a credential or a deadline elapses. Individual request
//! failures are treated as transient; the bridge may be momentarily busy.

use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Error, Result};
use crate::types::Credential;

use super::{BridgeClient, PairingReply};

/// Outcome of a single pairing poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The bridge issued a credential.
    Registered(Credential),
    /// Pairing is not complete yet; carries the reason reported by the
    /// bridge, or a transport failure description for transient errors.
    Pending(String),
}

/// Performs the timed pairing handshake.
///
/// # Examples
///
/// ```no_run
/// use huekey::{BridgeConfig, Registrar};
///
/// # async fn example() -> huekey::Result<()> {
/// let client = BridgeConfig::new("192.168.1.2").into_client()?;
/// let credential = Registrar::new(client).register().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Registrar {
    client: BridgeClient,
    device_type: String,
    interval: Duration,
    deadline: Duration,
}

impl Registrar {
    /// Default interval between pairing attempts.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);
    /// Default overall deadline for a link button press.
    pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(30);

    /// Creates a registrar with default interval and deadline.
    #[must_use]
    pub fn new(client: BridgeClient) -> Self {
        Self {
            client,
            device_type: "huekey#pc".to_string(),
            interval: Self::DEFAULT_INTERVAL,
            deadline: Self::DEFAULT_DEADLINE,
        }
    }

    /// Sets the device type announced to the bridge.
    #[must_use]
    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = device_type.into();
        self
    }

    /// Sets the interval between pairing attempts.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the overall deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Polls the bridge until it issues a credential or the deadline elapses.
    ///
    /// The deadline is checked after each attempt, so the result is never
    /// returned significantly before the configured deadline and at least one
    /// attempt is always made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistrationTimeout`] when the link button was not
    /// pressed in time. Transport and parse failures during individual polls
    /// are logged and retried, never fatal.
    pub async fn register(&self) -> Result<Credential> {
        tracing::info!("Pairing with the bridge; press the link button");

        let start = Instant::now();
        loop {
            match self.poll_once().await {
                PollOutcome::Registered(credential) => {
                    tracing::info!("Pairing complete");
                    return Ok(credential);
                }
                PollOutcome::Pending(reason) => {
                    tracing::info!(reason = %reason, "Pairing pending");
                }
            }

            if start.elapsed() >= self.deadline {
                return Err(Error::RegistrationTimeout {
                    waited_secs: start.elapsed().as_secs(),
                });
            }
            tokio::time::sleep(self.interval).await;
        }
    }

    /// Issues a single pairing request and classifies the reply.
    ///
    /// Transport and parse failures are folded into
    /// [`PollOutcome::Pending`]; they are transient from the protocol's point
    /// of view.
    pub async fn poll_once(&self) -> PollOutcome {
        match self.client.pair(&self.device_type).await {
            Ok(reply) => classify(&reply),
            Err(e) => {
                tracing::debug!(error = %e, "Pairing request failed; retrying");
                PollOutcome::Pending(format!("transient bridge failure: {e}"))
            }
        }
    }
}

/// Classifies a pairing reply list into a poll outcome.
fn classify(reply: &[PairingReply]) -> PollOutcome {
    for item in reply {
        if let Some(success) = &item.success {
            return PollOutcome::Registered(Credential::new(success.username.clone()));
        }
    }

    let reason = reply
        .iter()
        .find_map(|item| item.error.as_ref())
        .map_or_else(
            || "bridge replied without success or error object".to_string(),
            |e| e.description.clone(),
        );
    PollOutcome::Pending(reason)
}

/// Checks whether an existing credential still authorizes bridge access.
///
/// A non-empty successful light enumeration counts as valid; anything else
/// (including network failure or an empty bridge) triggers fallback to full
/// registration at the caller.
pub async fn validate_credential(client: &BridgeClient, credential: &Credential) -> bool {
    match client.list_lights(credential).await {
        Ok(lights) if !lights.is_empty() => true,
        Ok(_) => {
            tracing::warn!("Credential check returned no lights; treating as invalid");
            false
        }
        Err(e) => {
            tracing::warn!(error = %e, "Credential check failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{ApiError, PairingSuccess};

    fn success_item(token: &str) -> PairingReply {
        serde_json::from_str(&format!(r#"{{"success": {{"username": "{token}"}}}}"#)).unwrap()
    }

    fn error_item(description: &str) -> PairingReply {
        serde_json::from_str(&format!(r#"{{"error": {{"description": "{description}"}}}}"#))
            .unwrap()
    }

    #[test]
    fn classify_success_extracts_credential() {
        let outcome = classify(&[success_item("tok-1")]);
        assert_eq!(outcome, PollOutcome::Registered(Credential::new("tok-1")));
    }

    #[test]
    fn classify_error_is_pending_with_description() {
        let outcome = classify(&[error_item("link button not pressed")]);
        assert_eq!(
            outcome,
            PollOutcome::Pending("link button not pressed".to_string())
        );
    }

    #[test]
    fn classify_prefers_success_over_error() {
        let outcome = classify(&[error_item("stale"), success_item("tok-2")]);
        assert_eq!(outcome, PollOutcome::Registered(Credential::new("tok-2")));
    }

    #[test]
    fn classify_empty_reply_is_pending() {
        let outcome = classify(&[]);
        assert!(matches!(outcome, PollOutcome::Pending(_)));
    }

    #[test]
    fn reply_items_build_as_expected() {
        // Sanity-check the helper constructors against the wire shapes.
        let PairingSuccess { username } = success_item("t").success.unwrap();
        assert_eq!(username, "t");
        let ApiError { description } = error_item("d").error.unwrap();
        assert_eq!(description, "d");
    }
}
