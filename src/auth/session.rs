// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-wide login state.
//!
//! [`Session`] is the single source of truth for "is someone logged in".
//! It starts `Unknown`, is resolved once at startup from the session store,
//! and afterwards changes only through login and logout.

use crate::error::LoginError;
use crate::models::ProfileView;
use crate::services::ApiClient;
use crate::storage::SessionStore;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Store not read yet
    Unknown,
    Authenticated,
    Anonymous,
}

#[derive(Clone)]
pub struct Session {
    store: SessionStore,
    status: Arc<watch::Sender<SessionStatus>>,
}

impl Session {
    pub fn new(store: SessionStore) -> Self {
        let (status, _) = watch::channel(SessionStatus::Unknown);
        Self {
            store,
            status: Arc::new(status),
        }
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    /// Watch status changes (for the navigation layer).
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Resolve `Unknown` from the store. Later calls return the current status.
    pub async fn initialize(&self) -> SessionStatus {
        if self.status() != SessionStatus::Unknown {
            return self.status();
        }

        let status = match self.store.get().await {
            Some(_) => SessionStatus::Authenticated,
            None => SessionStatus::Anonymous,
        };
        tracing::info!(status = ?status, "Session state initialized");
        self.status.send_replace(status);
        status
    }

    /// The stored token, if any.
    pub async fn token(&self) -> Option<String> {
        self.store.get().await
    }

    /// Log in and persist the returned token.
    pub async fn login(
        &self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<(), LoginError> {
        let token = api.login(email, password).await?;
        self.store.set(&token).await?;
        self.status.send_replace(SessionStatus::Authenticated);
        tracing::info!("Session started");
        Ok(())
    }

    /// Forget the stored token.
    pub async fn logout(&self) {
        self.store.clear().await;
        self.status.send_replace(SessionStatus::Anonymous);
        tracing::info!("Session ended");
    }

    /// Profile card for whoever is stored, guest otherwise.
    pub async fn profile(&self) -> ProfileView {
        ProfileView::from_token(self.token().await.as_deref())
    }
}
