// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Last-known light state tracking.
//!
//! The cache holds the locally believed on/off state per light so a toggle
//! means "flip from what we last observed" instead of requiring a fresh read
//! on every key press. It is populated once at startup (seeding) and mutated
//! only by the toggle dispatcher afterwards. Nothing is persisted; every
//! process start re-fetches from the bridge.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::types::LightId;

/// Last-known on/off state per light.
///
/// Reads for unknown lights default to off rather than erroring: the absence
/// of a light turning on is less surprising than an unexpected command.
///
/// The lock is never held across await points; per-light ordering of the
/// read-modify-write toggle sequence is enforced by the dispatcher.
///
/// # Examples
///
/// ```
/// use huekey::{LightId, StateCache};
///
/// let cache = StateCache::new();
/// let id = LightId::from("1");
///
/// assert!(!cache.read(&id));
/// cache.write(id.clone(), true);
/// assert!(cache.read(&id));
/// ```
#[derive(Debug, Default)]
pub struct StateCache {
    states: RwLock<HashMap<LightId, bool>>,
}

impl StateCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the believed state of a light, defaulting to off.
    #[must_use]
    pub fn read(&self, id: &LightId) -> bool {
        self.states.read().get(id).copied().unwrap_or(false)
    }

    /// Returns whether a light has been seeded or written at least once.
    #[must_use]
    pub fn contains(&self, id: &LightId) -> bool {
        self.states.read().contains_key(id)
    }

    /// Unconditionally overwrites the believed state of a light.
    pub fn write(&self, id: LightId, on: bool) {
        self.states.write().insert(id, on);
    }

    /// Returns a copy of the full mapping.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<LightId, bool> {
        self.states.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_light_reads_off() {
        let cache = StateCache::new();
        assert!(!cache.read(&LightId::from("99")));
        assert!(!cache.contains(&LightId::from("99")));
    }

    #[test]
    fn write_then_read() {
        let cache = StateCache::new();
        let id = LightId::from("1");

        cache.write(id.clone(), true);
        assert!(cache.read(&id));
        assert!(cache.contains(&id));

        cache.write(id.clone(), false);
        assert!(!cache.read(&id));
    }

    #[test]
    fn seeded_off_is_distinguishable_from_unknown() {
        let cache = StateCache::new();
        let id = LightId::from("2");

        cache.write(id.clone(), false);
        assert!(!cache.read(&id));
        assert!(cache.contains(&id));
    }

    #[test]
    fn snapshot_reflects_all_lights() {
        let cache = StateCache::new();
        cache.write(LightId::from("1"), true);
        cache.write(LightId::from("2"), false);

        let snap = cache.snapshot();
        assert_eq!(snap.len(), 2);
        assert!(snap[&LightId::from("1")]);
        assert!(!snap[&LightId::from("2")]);
    }
}
