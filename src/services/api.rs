// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! KCS backend client.
//!
//! Handles:
//! - Bearer-authenticated requests for screen data
//! - Login and signup (the only unauthenticated calls)
//! - Mapping transport and HTTP failures onto [`ApiError`]
//!
//! Every call is a single attempt; retrying is left to the user.

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::models::{LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

/// Backend paths.
pub mod paths {
    pub const LOGIN: &str = "/api/auth/login";
    pub const SIGNUP: &str = "/api/auth/signup";
    pub const VEHICLES: &str = "/api/vehicles";
    pub const VEHICLE_HISTORY: &str = "/api/vehicles/history";
    pub const ESTIMATES: &str = "/api/estimates";
    pub const WARRANTIES: &str = "/api/warranties";
}

/// KCS backend API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the configured backend with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Absolute URL for a backend path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Perform one authenticated request and return the parsed JSON body.
    ///
    /// An empty token fails with [`ApiError::Unauthenticated`] before any I/O.
    pub async fn request(
        &self,
        path: &str,
        method: Method,
        token: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        if token.trim().is_empty() {
            tracing::warn!(path, "Refusing to call backend without a session token");
            return Err(ApiError::Unauthenticated);
        }

        let mut builder = self
            .http
            .request(method.clone(), self.url(path))
            .bearer_auth(token);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        tracing::debug!(%method, path, "Backend request");
        let response = builder.send().await.map_err(transport_error)?;
        self.check_response_json(response).await
    }

    /// GET a payload and check it carries `field` at the top level.
    pub async fn fetch(&self, path: &str, token: &str, field: &str) -> Result<Value> {
        let payload = self.request(path, Method::GET, token, None).await?;
        if payload.get(field).is_none() {
            tracing::warn!(path, field, "Backend response missing expected field");
            return Err(ApiError::MalformedResponse(format!(
                "missing top-level field `{}`",
                field
            )));
        }
        Ok(payload)
    }

    /// Exchange credentials for a session token.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        request
            .validate()
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;

        let response: LoginResponse = self.post_json(paths::LOGIN, &request).await?;

        match response.token {
            Some(token) if !token.trim().is_empty() => {
                tracing::info!("Login succeeded");
                Ok(token)
            }
            _ => Err(ApiError::MalformedResponse(
                response
                    .message
                    .unwrap_or_else(|| "login response has no token".to_string()),
            )),
        }
    }

    /// Register a new customer account. Returns the backend's message.
    pub async fn signup(&self, request: &SignupRequest) -> Result<String> {
        request
            .validate()
            .map_err(|e| ApiError::InvalidInput(e.to_string()))?;

        let response: SignupResponse = self.post_json(paths::SIGNUP, request).await?;
        tracing::info!("Signup succeeded");
        Ok(response
            .message
            .unwrap_or_else(|| "Account created successfully.".to_string()))
    }

    /// Unauthenticated JSON POST.
    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let payload = self.check_response_json(response).await?;
        serde_json::from_value(payload)
            .map_err(|e| ApiError::MalformedResponse(format!("JSON shape error: {}", e)))
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or(body);

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                tracing::warn!(status = %status, message = %message, "Backend rejected session");
                return Err(ApiError::Unauthorized);
            }

            tracing::error!(status = %status, message = %message, "Backend request failed");
            return Err(ApiError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "Backend returned non-JSON body");
            ApiError::MalformedResponse(format!("JSON parse error: {}", e))
        })
    }
}

/// Connection failures and timeouts both surface as network errors.
fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        tracing::warn!(error = %e, "Backend request timed out");
    } else {
        tracing::warn!(error = %e, "Backend unreachable");
    }
    ApiError::Network(e.to_string())
}
