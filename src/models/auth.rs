//! Login and signup payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /api/auth/login` body.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub message: Option<String>,
}

/// `POST /api/auth/signup` body.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_serializes_camel_case() {
        let request = SignupRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        assert!(request.validate().is_ok());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
    }

    #[test]
    fn test_invalid_login_rejected() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
