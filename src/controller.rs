// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-screen data lifecycle.
//!
//! One [`ScreenController`] belongs to one mounted screen. An activation
//! walks `Idle → Loading → Loaded | Error | Unauthenticated`:
//!
//! 1. Read the session token (absent → `Unauthenticated`, go to login)
//! 2. Decode claims if the screen needs the customer id
//! 3. Fetch and shape-check the payload
//! 4. Map rows to view records
//!
//! A backend rejection of the token logs the user out everywhere. A trigger
//! while `Loading` is ignored, and results that land after [`teardown`]
//! are dropped. An activation whose future is dropped before it settles puts
//! the screen back to `Idle` so the next trigger starts fresh.
//!
//! [`teardown`]: ScreenController::teardown

use crate::auth::claims;
use crate::error::{ApiError, ErrorReason};
use crate::navigation::NavigationIntent;
use crate::screens::{map_list, ScreenResource};
use crate::AppState;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ScreenState<V> {
    Idle,
    Loading,
    Loaded(Vec<V>),
    Error(ErrorReason),
    Unauthenticated,
}

impl<V> ScreenState<V> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenState::Loading)
    }
}

/// Whether a trigger started a new activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Started,
    /// Already loading, or the screen was torn down
    Ignored,
}

/// How an activation ended, before it is applied.
enum Outcome<V> {
    Loaded(Vec<V>),
    Failed(ErrorReason),
    /// No usable identity; go to login
    SignedOut,
    /// Backend rejected the token; clear it and go to login
    Rejected,
}

pub struct ScreenController<R: ScreenResource> {
    resource: R,
    app: Arc<AppState>,
    state: watch::Sender<ScreenState<R::View>>,
    alive: AtomicBool,
}

impl<R: ScreenResource> ScreenController<R> {
    pub fn new(resource: R, app: Arc<AppState>) -> Self {
        let (state, _) = watch::channel(ScreenState::Idle);
        Self {
            resource,
            app,
            state,
            alive: AtomicBool::new(true),
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    /// Current state snapshot.
    pub fn state(&self) -> ScreenState<R::View> {
        self.state.borrow().clone()
    }

    /// Watch state transitions.
    pub fn subscribe(&self) -> watch::Receiver<ScreenState<R::View>> {
        self.state.subscribe()
    }

    /// Text for an empty `Loaded` list.
    pub fn empty_message(&self) -> &'static str {
        R::EMPTY_MESSAGE
    }

    /// Mark the screen unmounted. Any in-flight result is discarded.
    pub fn teardown(&self) {
        // Flip under the state lock so a concurrent settle sees it
        self.state.send_if_modified(|_| {
            self.alive.store(false, Ordering::SeqCst);
            false
        });
        tracing::debug!(screen = self.resource.name(), "Screen torn down");
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Run one activation to completion.
    pub async fn activate(&self) -> Activation {
        let mut started = false;
        self.state.send_if_modified(|state| {
            if !self.is_alive() || state.is_loading() {
                return false;
            }
            *state = ScreenState::Loading;
            started = true;
            true
        });

        if !started {
            tracing::debug!(
                screen = self.resource.name(),
                "Activation ignored, already loading or torn down"
            );
            return Activation::Ignored;
        }

        let mut guard = LoadingGuard {
            state: &self.state,
            screen: self.resource.name(),
            armed: true,
        };
        let outcome = self.load().await;
        self.settle(outcome).await;
        guard.armed = false;
        Activation::Started
    }

    /// Run an activation on its own task.
    pub fn spawn_activate(self: &Arc<Self>) -> JoinHandle<Activation> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.activate().await })
    }

    async fn load(&self) -> Outcome<R::View> {
        let screen = self.resource.name();

        let Some(token) = self.app.session.token().await else {
            tracing::info!(screen, "No session token, redirecting to login");
            return Outcome::SignedOut;
        };

        let claims = if R::REQUIRES_IDENTITY {
            match claims::decode(&token) {
                Ok(claims) => Some(claims),
                Err(e) => {
                    tracing::warn!(screen, error = %e, "Session token has no usable identity");
                    return Outcome::SignedOut;
                }
            }
        } else {
            None
        };

        let Some(path) = self.resource.path(claims.as_ref()) else {
            tracing::warn!(screen, "Request needs an identity the session does not carry");
            return Outcome::SignedOut;
        };

        let result = async {
            let payload = self.app.api.fetch(&path, &token, R::LIST_FIELD).await?;
            self.resource.check_envelope(&payload)?;
            map_list::<R>(&payload)
        }
        .await;

        match result {
            Ok(views) => {
                tracing::debug!(screen, count = views.len(), "Screen data loaded");
                Outcome::Loaded(views)
            }
            Err(ApiError::Unauthorized) => Outcome::Rejected,
            Err(ApiError::Unauthenticated) => Outcome::SignedOut,
            Err(e) => {
                tracing::error!(screen, error = %e, "Screen data failed to load");
                Outcome::Failed(e.reason())
            }
        }
    }

    async fn settle(&self, outcome: Outcome<R::View>) {
        let screen = self.resource.name();

        // A rejected token is dead for every screen, mounted or not
        if matches!(outcome, Outcome::Rejected) {
            tracing::warn!(screen, "Session rejected by backend, logging out");
            self.app.session.logout().await;
        }

        let redirect = matches!(outcome, Outcome::SignedOut | Outcome::Rejected);
        let next = match outcome {
            Outcome::Loaded(views) => ScreenState::Loaded(views),
            Outcome::Failed(reason) => ScreenState::Error(reason),
            Outcome::SignedOut | Outcome::Rejected => ScreenState::Unauthenticated,
        };

        // Liveness is checked under the state lock; teardown takes the same lock
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if !self.is_alive() {
                return false;
            }
            *state = next;
            applied = true;
            true
        });

        if !applied {
            tracing::debug!(screen, "Discarding result for torn-down screen");
            return;
        }
        if redirect {
            self.app.navigator.navigate(NavigationIntent::Login);
        }
    }
}

/// Resets `Loading` to `Idle` when an activation is dropped before settling.
struct LoadingGuard<'a, V> {
    state: &'a watch::Sender<ScreenState<V>>,
    screen: &'static str,
    armed: bool,
}

impl<V> Drop for LoadingGuard<'_, V> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let reset = self.state.send_if_modified(|state| {
            if !state.is_loading() {
                return false;
            }
            *state = ScreenState::Idle;
            true
        });
        if reset {
            tracing::debug!(screen = self.screen, "Activation cancelled, back to idle");
        }
    }
}
