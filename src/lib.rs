// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `huekey` - bind global keyboard shortcuts to Philips Hue light toggling.
//!
//! This crate talks to a local Hue bridge over its REST API, keeps a local
//! belief about each managed light's on/off state, and flips that state when
//! the bound hotkey fires. "Toggle" means "invert what we last observed":
//! the cached state is committed optimistically after every accepted command
//! and reconciled against a confirmation read, with the bridge's answer
//! winning on disagreement.
//!
//! # Components
//!
//! - [`BridgeClient`]: HTTP wrapper over the bridge's REST surface
//! - [`Registrar`]: timed pairing handshake for obtaining a [`Credential`]
//! - [`StateCache`]: last-known on/off state per light
//! - [`ToggleDispatcher`]: optimistic-write + confirm-reconcile toggle engine
//! - [`HotkeyRouter`]: global hotkey bindings and the blocking event loop
//!
//! # Quick Start
//!
//! ## Pairing with a bridge
//!
//! ```no_run
//! use huekey::{BridgeConfig, Registrar};
//!
//! #[tokio::main]
//! async fn main() -> huekey::Result<()> {
//!     let client = BridgeConfig::new("192.168.1.2").into_client()?;
//!
//!     // Blocks until the physical link button is pressed (or 30 s pass).
//!     let credential = Registrar::new(client).register().await?;
//!     # let _ = credential;
//!     Ok(())
//! }
//! ```
//!
//! ## Toggling a light
//!
//! ```no_run
//! use std::sync::Arc;
//! use huekey::{BridgeConfig, Credential, LightId, StateCache, ToggleDispatcher};
//!
//! #[tokio::main]
//! async fn main() -> huekey::Result<()> {
//!     let client = BridgeConfig::new("192.168.1.2").into_client()?;
//!     let dispatcher = Arc::new(ToggleDispatcher::new(
//!         client,
//!         Credential::new("existing-token"),
//!         StateCache::new(),
//!     ));
//!
//!     let desk_lamp = LightId::from("1");
//!     dispatcher.seed(&desk_lamp).await;
//!     dispatcher.toggle(&desk_lamp).await?;
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod hotkey;
pub mod state;
pub mod types;

pub use bridge::{
    ApiError, BridgeClient, BridgeConfig, LightInfo, LightState, PairingReply, PairingSuccess,
    PollOutcome, Registrar, validate_credential,
};
pub use config::{AppConfig, DeviceBinding};
pub use dispatch::ToggleDispatcher;
pub use error::{ConfigError, Error, HotkeyError, ParseError, ProtocolError, Result};
pub use hotkey::{HotkeyRouter, parse_hotkey};
pub use state::StateCache;
pub use types::{Credential, LightId};
