// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light identifier type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a light as assigned by the bridge.
///
/// The bridge addresses lights by short opaque strings (typically `"1"`,
/// `"2"`, ...). This wrapper provides a distinct type so light identifiers
/// cannot be confused with other strings such as hotkey specifications.
///
/// # Examples
///
/// ```
/// use huekey::LightId;
///
/// let id = LightId::from("3");
/// assert_eq!(id.as_str(), "3");
/// println!("Light: {}", id);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(String);

impl LightId {
    /// Creates a light identifier from a bridge-assigned string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LightId({})", self.0)
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LightId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for LightId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_raw_id() {
        let id = LightId::from("7");
        assert_eq!(id.to_string(), "7");
    }

    #[test]
    fn equality() {
        assert_eq!(LightId::from("1"), LightId::new("1"));
        assert_ne!(LightId::from("1"), LightId::from("2"));
    }

    #[test]
    fn hashable() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(LightId::from("4"));
        assert!(set.contains(&LightId::from("4")));
    }

    #[test]
    fn serde_transparent() {
        let id: LightId = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(id, LightId::from("12"));
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"12\"");
    }
}
