// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge credential type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Authorization token obtained from the bridge during pairing.
///
/// The token grants full control over the bridge, so it is treated as a
/// capability: the `Debug` representation is redacted and no log statement
/// in this crate prints it above debug level.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wraps an existing token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the raw token for embedding into request paths.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

impl From<&str> for Credential {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for Credential {
    fn from(token: String) -> Self {
        Self(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let cred = Credential::new("s3cr3t-token");
        let debug = format!("{cred:?}");
        assert_eq!(debug, "Credential(***)");
        assert!(!debug.contains("s3cr3t"));
    }

    #[test]
    fn raw_token_round_trip() {
        let cred = Credential::from("abc123");
        assert_eq!(cred.as_str(), "abc123");
    }

    #[test]
    fn serde_transparent() {
        let cred: Credential = serde_json::from_str("\"tok\"").unwrap();
        assert_eq!(cred, Credential::new("tok"));
        assert_eq!(serde_json::to_string(&cred).unwrap(), "\"tok\"");
    }
}
