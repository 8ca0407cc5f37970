// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation intents for the external router.
//!
//! Controllers never navigate themselves; they send an intent and the router
//! that owns the receiving end decides what to do with it.

use serde::Serialize;
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum NavigationIntent {
    Login,
    Dashboard,
    VehicleDetail { vin: String },
}

/// Sending half of the router channel.
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<NavigationIntent>,
}

impl Navigator {
    /// Create a navigator and the receiver the router should drain.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NavigationIntent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn navigate(&self, intent: NavigationIntent) {
        tracing::debug!(intent = ?intent, "Navigation requested");
        if let Err(e) = self.tx.send(intent) {
            tracing::warn!(intent = ?e.0, "Router is gone, dropping navigation intent");
        }
    }
}
