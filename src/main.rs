// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `huekey` binary: load config, pair if needed, seed light states, and run
//! the hotkey loop until escape is pressed.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use huekey::{
    AppConfig, BridgeClient, BridgeConfig, ConfigError, Credential, HotkeyRouter, Registrar,
    Result, StateCache, ToggleDispatcher, validate_credential,
};

/// Toggle Hue lights with global keyboard shortcuts.
#[derive(Debug, Parser)]
#[command(name = "huekey", version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force a fresh pairing even when a credential is already configured.
    #[arg(long)]
    register: bool,

    /// List the lights known to the bridge and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "huekey exited with an error");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let path = cli
        .config
        .clone()
        .or_else(AppConfig::default_path)
        .ok_or(ConfigError::Missing("config path"))?;
    let mut config = AppConfig::load(&path)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let client = BridgeConfig::new(&config.bridge_host).into_client()?;
    let credential = runtime.block_on(obtain_credential(&client, &config, cli.register))?;
    if config.credential.as_ref() != Some(&credential) {
        config.credential = Some(credential.clone());
        config.save(&path)?;
    }

    if cli.list {
        return runtime.block_on(list_lights(&client, &credential));
    }

    if config.devices.is_empty() {
        return Err(ConfigError::Missing("devices").into());
    }

    let dispatcher = Arc::new(ToggleDispatcher::new(client, credential, StateCache::new()));
    runtime.block_on(async {
        for binding in &config.devices {
            dispatcher.seed(&binding.light).await;
        }
    });

    // The event loop blocks this thread; toggles run on the runtime.
    let router = HotkeyRouter::bind(runtime.handle().clone(), dispatcher, &config.devices)?;
    router.run()
}

/// Reuses a validated existing credential or runs the pairing protocol.
async fn obtain_credential(
    client: &BridgeClient,
    config: &AppConfig,
    force_register: bool,
) -> Result<Credential> {
    if !force_register
        && let Some(existing) = &config.credential
    {
        if validate_credential(client, existing).await {
            tracing::info!("Using existing credential");
            return Ok(existing.clone());
        }
        tracing::warn!("Configured credential is no longer valid; re-pairing");
    }

    Registrar::new(client.clone()).register().await
}

/// Prints the bridge's light inventory, sorted by id.
async fn list_lights(client: &BridgeClient, credential: &Credential) -> Result<()> {
    let lights = client.list_lights(credential).await?;

    let mut entries: Vec<_> = lights.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (id, info) in entries {
        println!(
            "{id}\t{}\t({})\t{}",
            info.name,
            info.kind,
            if info.state.on { "on" } else { "off" }
        );
    }
    Ok(())
}
