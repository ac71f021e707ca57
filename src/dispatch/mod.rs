// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Toggle dispatch against the bridge.
//!
//! The dispatcher turns a key press into a state-change command: it computes
//! the desired state from the [`StateCache`], commands the bridge, commits
//! the cache optimistically, then reconciles against a confirmation read.
//! The bridge's answer is authoritative.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::bridge::BridgeClient;
use crate::error::Result;
use crate::state::StateCache;
use crate::types::{Credential, LightId};

/// Maps key presses to per-light toggle commands.
///
/// Toggles for the same light are serialized through a per-light async lock;
/// two rapid presses would otherwise both read the same stale cached state
/// and collapse into a no-op. Toggles for distinct lights run in parallel.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use huekey::{BridgeConfig, Credential, LightId, StateCache, ToggleDispatcher};
///
/// # async fn example() -> huekey::Result<()> {
/// let client = BridgeConfig::new("192.168.1.2").into_client()?;
/// let dispatcher = Arc::new(ToggleDispatcher::new(
///     client,
///     Credential::new("token"),
///     StateCache::new(),
/// ));
///
/// let id = LightId::from("1");
/// dispatcher.seed(&id).await;
/// dispatcher.toggle(&id).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ToggleDispatcher {
    client: BridgeClient,
    credential: Credential,
    cache: StateCache,
    /// Per-light serialization locks; the outer lock is never held across
    /// an await point.
    locks: parking_lot::Mutex<HashMap<LightId, Arc<Mutex<()>>>>,
}

impl ToggleDispatcher {
    /// Creates a dispatcher over an existing client, credential and cache.
    #[must_use]
    pub fn new(client: BridgeClient, credential: Credential, cache: StateCache) -> Self {
        Self {
            client,
            credential,
            cache,
            locks: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// Returns the state cache.
    #[must_use]
    pub fn cache(&self) -> &StateCache {
        &self.cache
    }

    /// Seeds the cache with the bridge's current state for a light.
    ///
    /// Called once per configured light before hotkey dispatch begins. A
    /// failed fetch defaults the light to off instead of failing startup.
    pub async fn seed(&self, id: &LightId) {
        match self.client.get_light(&self.credential, id).await {
            Ok(info) => {
                tracing::info!(light = %id, on = info.state.on, "Seeded light state");
                self.cache.write(id.clone(), info.state.on);
            }
            Err(e) => {
                tracing::warn!(light = %id, error = %e, "Seeding failed; defaulting to off");
                self.cache.write(id.clone(), false);
            }
        }
    }

    /// Flips a light relative to its cached state and reconciles the cache
    /// with the bridge's confirmed answer.
    ///
    /// Sequence, while holding the per-light lock:
    ///
    /// 1. `desired = !cached`
    /// 2. command the bridge; on failure the cache keeps the old value, so
    ///    the next press retries the same direction
    /// 3. on success commit `desired` optimistically
    /// 4. confirmation read; on disagreement adopt the confirmed value, on
    ///    read failure keep the optimistic value until the next successful
    ///    confirmation
    ///
    /// Returns the state the cache believes after reconciliation.
    ///
    /// # Errors
    ///
    /// Returns the underlying failure when the state command itself fails.
    /// A failed confirmation read is logged, not surfaced.
    pub async fn toggle(&self, id: &LightId) -> Result<bool> {
        let lock = self.lock_for(id);
        let _guard = lock.lock().await;

        let desired = !self.cache.read(id);
        tracing::info!(light = %id, desired, "Toggling light");

        if let Err(e) = self
            .client
            .set_light_state(&self.credential, id, desired)
            .await
        {
            tracing::warn!(light = %id, error = %e, "State command failed; cache unchanged");
            return Err(e);
        }

        self.cache.write(id.clone(), desired);

        match self.client.get_light(&self.credential, id).await {
            Ok(info) => {
                let confirmed = info.state.on;
                if confirmed != desired {
                    tracing::warn!(
                        light = %id,
                        desired,
                        confirmed,
                        "Bridge disagrees with commanded state; adopting bridge answer"
                    );
                    self.cache.write(id.clone(), confirmed);
                }
                Ok(confirmed)
            }
            Err(e) => {
                tracing::warn!(
                    light = %id,
                    error = %e,
                    "Confirmation read failed; keeping optimistic state"
                );
                Ok(desired)
            }
        }
    }

    /// Returns the serialization lock for a light, creating it on first use.
    fn lock_for(&self, id: &LightId) -> Arc<Mutex<()>> {
        Arc::clone(
            self.locks
                .lock()
                .entry(id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::BridgeConfig;

    fn dispatcher() -> ToggleDispatcher {
        let client = BridgeConfig::new("127.0.0.1").into_client().unwrap();
        ToggleDispatcher::new(client, Credential::new("t"), StateCache::new())
    }

    #[test]
    fn lock_for_is_stable_per_light() {
        let d = dispatcher();
        let a = d.lock_for(&LightId::from("1"));
        let b = d.lock_for(&LightId::from("1"));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn distinct_lights_get_distinct_locks() {
        let d = dispatcher();
        let a = d.lock_for(&LightId::from("1"));
        let b = d.lock_for(&LightId::from("2"));
        assert!(!Arc::ptr_eq(&a, &b));
    }
}
