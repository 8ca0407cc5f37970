// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use kcs_vehicle_history::config::ClientConfig;
use kcs_vehicle_history::navigation::{NavigationIntent, Navigator};
use kcs_vehicle_history::storage::{MemoryStore, SessionStore};
use kcs_vehicle_history::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Everything a test needs to drive screens against a mock backend.
#[allow(dead_code)]
pub struct TestApp {
    pub state: Arc<AppState>,
    pub store: SessionStore,
    pub intents: UnboundedReceiver<NavigationIntent>,
}

#[allow(dead_code)]
impl TestApp {
    /// Intents sent so far, without waiting.
    pub fn drain_intents(&mut self) -> Vec<NavigationIntent> {
        let mut out = Vec::new();
        while let Ok(intent) = self.intents.try_recv() {
            out.push(intent);
        }
        out
    }
}

/// Config pointed at a mock server.
#[allow(dead_code)]
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        api_base_url: base_url.to_string(),
        request_timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    }
}

/// Create a test app with in-memory session storage.
#[allow(dead_code)]
pub fn create_test_app(base_url: &str) -> TestApp {
    create_test_app_with_config(test_config(base_url))
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: ClientConfig) -> TestApp {
    let store = SessionStore::new(Arc::new(MemoryStore::new()), config.session_key.clone());
    let (navigator, intents) = Navigator::channel();
    let state = AppState::with_store(config, store.clone(), navigator)
        .expect("Failed to build test app");

    TestApp {
        state: Arc::new(state),
        store,
        intents,
    }
}

/// Claims as the KCS identity provider issues them.
#[allow(dead_code)]
pub fn customer_claims(customer_number: &str) -> Value {
    json!({
        "CUSTOMER_NUMBER": customer_number,
        "FIRST_NAME": "Grace",
        "LAST_NAME": "Hopper",
        "EMAILADDRESS": "grace@example.com",
        "iat": 1_700_000_000,
        "exp": 4_000_000_000u64,
    })
}

/// Sign arbitrary claims. The key is irrelevant to the client.
#[allow(dead_code)]
pub fn create_test_jwt(claims: &Value) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(b"test_signing_key_32_bytes_long!!"),
    )
    .expect("Failed to create JWT")
}

/// A stored, decodable token for customer `C-1001`.
#[allow(dead_code)]
pub fn valid_token() -> String {
    create_test_jwt(&customer_claims("C-1001"))
}
