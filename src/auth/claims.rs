// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Unverified token claims.
//!
//! Only the payload segment is inspected. The signature and expiry belong to
//! the backend, which checks them on every request; the values here are for
//! display and must never drive an authorization decision.

use crate::error::DecodeError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Claims decoded from a session token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Claims {
    /// Customer number (`CUSTOMER_NUMBER` or `customerId`)
    pub customer_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Issued at (`iat`)
    pub issued_at: Option<DateTime<Utc>>,
    /// Expiration time (`exp`), advisory only
    pub expires_at: Option<DateTime<Utc>>,
}

/// Payload as the identity provider writes it.
#[derive(Deserialize)]
struct RawClaims {
    #[serde(rename = "CUSTOMER_NUMBER")]
    customer_number: Option<Value>,
    #[serde(rename = "customerId")]
    customer_id: Option<Value>,
    #[serde(rename = "FIRST_NAME")]
    first_name: Option<Value>,
    #[serde(rename = "LAST_NAME")]
    last_name: Option<Value>,
    #[serde(rename = "EMAILADDRESS")]
    email: Option<Value>,
    iat: Option<Value>,
    exp: Option<Value>,
}

impl Claims {
    /// Whether the token claims to have expired at `now`.
    ///
    /// Tokens without an `exp` claim never report as expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

/// Decode the payload segment of a `header.payload.signature` token.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(DecodeError::Empty);
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::Segments(segments.len()));
    }

    // Some issuers keep base64 padding on the segments
    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|_| DecodeError::Base64)?;

    let raw: RawClaims =
        serde_json::from_slice(&payload).map_err(|e| DecodeError::Json(e.to_string()))?;

    let customer_id = raw
        .customer_number
        .as_ref()
        .and_then(identifier)
        .or_else(|| raw.customer_id.as_ref().and_then(identifier))
        .ok_or(DecodeError::MissingCustomerId)?;

    Ok(Claims {
        customer_id,
        first_name: raw.first_name.as_ref().and_then(identifier),
        last_name: raw.last_name.as_ref().and_then(identifier),
        email: raw.email.as_ref().and_then(identifier),
        issued_at: raw.iat.as_ref().and_then(numeric_date),
        expires_at: raw.exp.as_ref().and_then(numeric_date),
    })
}

/// Claim values arrive as either strings or numbers; anything else is absent.
fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn numeric_date(value: &Value) -> Option<DateTime<Utc>> {
    let secs = value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))?;
    DateTime::from_timestamp(secs, 0)
}
