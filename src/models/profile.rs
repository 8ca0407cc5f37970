//! Profile card built from the session token's claims.

use crate::auth::claims::{self, Claims};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const GUEST_NAME: &str = "Guest";
pub const PROFILE_ERROR: &str = "Error loading profile";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "ui/src/generated/")
)]
pub struct ProfileView {
    pub display_name: String,
    pub email: String,
    pub customer_number: Option<String>,
}

impl ProfileView {
    pub fn from_claims(claims: &Claims) -> Self {
        let display_name = format!(
            "{} {}",
            claims.first_name.as_deref().unwrap_or("Unknown"),
            claims.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();

        Self {
            display_name,
            email: claims.email.clone().unwrap_or_default(),
            customer_number: Some(claims.customer_id.clone()),
        }
    }

    /// Profile for an optional stored token. Never fails: a missing token
    /// renders as guest and an undecodable one as an error line.
    pub fn from_token(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Self::placeholder(GUEST_NAME);
        };

        match claims::decode(token) {
            Ok(claims) => Self::from_claims(&claims),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode session token for profile");
                Self::placeholder(PROFILE_ERROR)
            }
        }
    }

    fn placeholder(name: &str) -> Self {
        Self {
            display_name: name.to_string(),
            email: String::new(),
            customer_number: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_fallbacks() {
        assert_eq!(ProfileView::from_token(None).display_name, GUEST_NAME);
        assert_eq!(
            ProfileView::from_token(Some("garbage")).display_name,
            PROFILE_ERROR
        );
    }

    #[test]
    fn test_profile_name_defaults() {
        let claims = Claims {
            customer_id: "C-9".to_string(),
            first_name: None,
            last_name: Some("Smith".to_string()),
            email: None,
            issued_at: None,
            expires_at: None,
        };

        let profile = ProfileView::from_claims(&claims);
        assert_eq!(profile.display_name, "Unknown Smith");
        assert_eq!(profile.email, "");
        assert_eq!(profile.customer_number.as_deref(), Some("C-9"));
    }
}
