// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! KCS Vehicle History: client core for the customer app.
//!
//! This crate provides the session handling, backend client and per-screen
//! data lifecycle behind the vehicle, service history, work order and
//! warranty screens. Rendering and routing live in the UI layer.

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod navigation;
pub mod screens;
pub mod services;
pub mod storage;

use config::ClientConfig;
use error::ApiError;
use navigation::{NavigationIntent, Navigator};
use services::ApiClient;
use storage::SessionStore;

pub use auth::{Session, SessionStatus};
pub use controller::{Activation, ScreenController, ScreenState};

/// Shared client state.
pub struct AppState {
    pub config: ClientConfig,
    pub api: ApiClient,
    pub session: Session,
    pub navigator: Navigator,
}

impl AppState {
    /// Wire up the client from configuration.
    pub fn new(config: ClientConfig, navigator: Navigator) -> Result<Self, ApiError> {
        let store = SessionStore::from_config(&config);
        Self::with_store(config, store, navigator)
    }

    /// Wire up the client around an existing session store.
    pub fn with_store(
        config: ClientConfig,
        store: SessionStore,
        navigator: Navigator,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            api: ApiClient::new(&config)?,
            session: Session::new(store),
            config,
            navigator,
        })
    }

    /// Log in and send the user to the dashboard.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), error::LoginError> {
        self.session.login(&self.api, email, password).await?;
        self.navigator.navigate(NavigationIntent::Dashboard);
        Ok(())
    }

    /// Log out and send the user to the login screen.
    pub async fn logout(&self) {
        self.session.logout().await;
        self.navigator.navigate(NavigationIntent::Login);
    }
}
