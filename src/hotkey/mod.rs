// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Global hotkey routing.
//!
//! Binds each configured hotkey to its light at registration time through an
//! explicit id-to-light table (no shared-environment closures), then runs
//! the blocking event loop until the exit key fires. Toggles are spawned on
//! the async runtime so presses on different lights overlap.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use global_hotkey::hotkey::{Code, HotKey};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

use crate::config::DeviceBinding;
use crate::dispatch::ToggleDispatcher;
use crate::error::{Error, HotkeyError, Result};
use crate::types::LightId;

/// Parses a hotkey specification such as `"ctrl+shift+l"`.
///
/// # Errors
///
/// Returns [`HotkeyError::InvalidSpec`] when the specification is not a
/// valid modifier/key combination.
pub fn parse_hotkey(spec: &str) -> Result<HotKey> {
    spec.parse::<HotKey>().map_err(|e| {
        Error::Hotkey(HotkeyError::InvalidSpec {
            spec: spec.to_string(),
            message: e.to_string(),
        })
    })
}

/// Parses all bindings into an ordered `(hotkey, light)` table.
///
/// Each light id is captured by value here, at registration time. Duplicate
/// lights and duplicate hotkeys are rejected; two bindings racing on the
/// same light or key would otherwise shadow each other silently.
fn route_table(bindings: &[DeviceBinding]) -> Result<Vec<(HotKey, LightId)>> {
    let mut seen_lights = HashSet::new();
    let mut seen_keys = HashSet::new();
    let mut routes = Vec::with_capacity(bindings.len());

    for binding in bindings {
        if !seen_lights.insert(binding.light.clone()) {
            return Err(Error::DuplicateBinding(format!(
                "light {} is bound more than once",
                binding.light
            )));
        }

        let hotkey = parse_hotkey(&binding.hotkey)?;
        if !seen_keys.insert(hotkey.id()) {
            return Err(Error::DuplicateBinding(format!(
                "hotkey '{}' is bound more than once",
                binding.hotkey
            )));
        }

        routes.push((hotkey, binding.light.clone()));
    }

    Ok(routes)
}

/// Owns the platform hotkey registrations and the blocking event loop.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use huekey::{
///     BridgeConfig, Credential, DeviceBinding, HotkeyRouter, LightId, StateCache,
///     ToggleDispatcher,
/// };
///
/// # fn example(runtime: tokio::runtime::Handle) -> huekey::Result<()> {
/// let client = BridgeConfig::new("192.168.1.2").into_client()?;
/// let dispatcher = Arc::new(ToggleDispatcher::new(
///     client,
///     Credential::new("token"),
///     StateCache::new(),
/// ));
/// let bindings = vec![DeviceBinding {
///     light: LightId::from("1"),
///     hotkey: "ctrl+shift+l".to_string(),
///     name: "Desk lamp".to_string(),
/// }];
///
/// let router = HotkeyRouter::bind(runtime, dispatcher, &bindings)?;
/// router.run()?; // blocks until escape is pressed
/// # Ok(())
/// # }
/// ```
pub struct HotkeyRouter {
    /// Keeps the platform registrations alive for the router's lifetime.
    _manager: GlobalHotKeyManager,
    routes: HashMap<u32, LightId>,
    exit_id: u32,
    dispatcher: Arc<ToggleDispatcher>,
    runtime: tokio::runtime::Handle,
}

impl HotkeyRouter {
    /// Registers all bindings plus the escape exit key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateBinding`] for repeated lights or hotkeys,
    /// [`HotkeyError::InvalidSpec`] for unparseable specifications, and
    /// [`HotkeyError::Backend`] when the platform refuses a registration.
    pub fn bind(
        runtime: tokio::runtime::Handle,
        dispatcher: Arc<ToggleDispatcher>,
        bindings: &[DeviceBinding],
    ) -> Result<Self> {
        let table = route_table(bindings)?;

        let manager = GlobalHotKeyManager::new().map_err(HotkeyError::Backend)?;
        let mut routes = HashMap::new();
        for ((hotkey, light), binding) in table.into_iter().zip(bindings) {
            manager.register(hotkey).map_err(HotkeyError::Backend)?;
            tracing::info!(
                hotkey = %binding.hotkey,
                light = %light,
                name = %binding.name,
                "Registered hotkey"
            );
            routes.insert(hotkey.id(), light);
        }

        let exit = HotKey::new(None, Code::Escape);
        manager.register(exit).map_err(HotkeyError::Backend)?;

        Ok(Self {
            _manager: manager,
            routes,
            exit_id: exit.id(),
            dispatcher,
            runtime,
        })
    }

    /// Blocks on the hotkey event stream until the exit key is pressed.
    ///
    /// Each press spawns its toggle on the runtime; a failed toggle is
    /// logged and the loop keeps running so the user can simply press again.
    ///
    /// # Errors
    ///
    /// Returns [`HotkeyError::ChannelClosed`] if the platform event channel
    /// shuts down unexpectedly.
    pub fn run(&self) -> Result<()> {
        let receiver = GlobalHotKeyEvent::receiver();
        tracing::info!("Listening for hotkeys; press escape to exit");

        loop {
            let event = receiver.recv().map_err(|_| HotkeyError::ChannelClosed)?;
            if event.state != HotKeyState::Pressed {
                continue;
            }
            if event.id == self.exit_id {
                tracing::info!("Exit key pressed; shutting down");
                return Ok(());
            }
            let Some(light) = self.routes.get(&event.id) else {
                continue;
            };

            let light = light.clone();
            let dispatcher = Arc::clone(&self.dispatcher);
            self.runtime.spawn(async move {
                if let Err(e) = dispatcher.toggle(&light).await {
                    tracing::warn!(light = %light, error = %e, "Toggle failed; press again to retry");
                }
            });
        }
    }
}
