// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! KCS headless client
//!
//! Runs the dashboard lifecycle once against the configured backend and
//! prints the resulting screen state as JSON. Useful for checking a
//! deployment's base URL and credentials without the mobile UI.

use anyhow::Context;
use kcs_vehicle_history::{
    config::ClientConfig, navigation::Navigator, screens::VehiclesScreen, AppState,
    ScreenController, SessionStatus,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = ClientConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        platform = ?config.platform,
        api = %config.api_base_url,
        "Starting KCS client"
    );

    let (navigator, mut intents) = Navigator::channel();
    tokio::spawn(async move {
        while let Some(intent) = intents.recv().await {
            tracing::info!(intent = ?intent, "Router received intent");
        }
    });

    let state = Arc::new(AppState::new(config, navigator).context("Failed to build client")?);

    if state.session.initialize().await == SessionStatus::Anonymous {
        match (std::env::var("KCS_EMAIL"), std::env::var("KCS_PASSWORD")) {
            (Ok(email), Ok(password)) => state
                .login(&email, &password)
                .await
                .context("Login failed")?,
            _ => tracing::warn!("No stored session and no KCS_EMAIL/KCS_PASSWORD set"),
        }
    }

    let profile = state.session.profile().await;
    tracing::info!(name = %profile.display_name, "Session profile");

    let dashboard = ScreenController::new(VehiclesScreen, state.clone());
    dashboard.activate().await;

    println!("{}", serde_json::to_string_pretty(&dashboard.state())?);
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kcs_vehicle_history=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
