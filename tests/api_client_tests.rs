// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend client error mapping against a mock server.

use kcs_vehicle_history::error::ApiError;
use kcs_vehicle_history::models::SignupRequest;
use kcs_vehicle_history::services::ApiClient;
use reqwest::Method;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::test_config;

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&test_config(&server.uri())).unwrap()
}

#[tokio::test]
async fn test_empty_token_fails_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cars": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    for token in ["", "   "] {
        let result = client.request("/api/vehicles", Method::GET, token, None).await;
        assert_eq!(result, Err(ApiError::Unauthenticated));
    }

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bearer_header_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles"))
        .and(header("authorization", "Bearer tok.en.sig"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cars": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let payload = client.fetch("/api/vehicles", "tok.en.sig", "cars").await.unwrap();

    assert_eq!(payload, json!({ "cars": [] }));
}

#[tokio::test]
async fn test_request_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vehicles"))
        .and(body_json(json!({ "VIN_NUMBER": "123" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body = json!({ "VIN_NUMBER": "123" });
    let payload = client
        .request("/api/vehicles", Method::POST, "t.o.k", Some(&body))
        .await
        .unwrap();

    assert_eq!(payload["ok"], true);
}

#[tokio::test]
async fn test_auth_statuses_map_to_unauthorized() {
    for status in [401u16, 403] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(status).set_body_json(json!({ "message": "jwt expired" })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch("/api/vehicles", "t.o.k", "cars").await;
        assert_eq!(result, Err(ApiError::Unauthorized), "status {status}");
    }
}

#[tokio::test]
async fn test_other_statuses_map_to_server_error() {
    for status in [400u16, 404, 500, 503] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.fetch("/api/vehicles", "t.o.k", "cars").await;
        assert_eq!(result, Err(ApiError::ServerError { status }));
    }
}

#[tokio::test]
async fn test_non_json_success_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.fetch("/api/vehicles", "t.o.k", "cars").await;
    assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_missing_field_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "vehicles": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.fetch("/api/vehicles", "t.o.k", "cars").await;
    assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_timeout_maps_to_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "cars": [] }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let mut config = test_config(&server.uri());
    config.request_timeout = Duration::from_millis(200);
    let client = ApiClient::new(&config).unwrap();

    let result = client.fetch("/api/vehicles", "t.o.k", "cars").await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_network() {
    // Nothing listens on port 1
    let client = ApiClient::new(&test_config("http://127.0.0.1:1")).unwrap();

    let result = client.fetch("/api/vehicles", "t.o.k", "cars").await;
    assert!(matches!(result, Err(ApiError::Network(_))));
}

#[tokio::test]
async fn test_query_string_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/vehicles/history"))
        .and(query_param("vin", "1HGCM82633A004352"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "history": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client
        .fetch(
            "/api/vehicles/history?vin=1HGCM82633A004352",
            "t.o.k",
            "history",
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_returns_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "grace@example.com", "password": "cobol" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": "new.session.token" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let token = client.login(" grace@example.com ", "cobol").await.unwrap();
    assert_eq!(token, "new.session.token");
}

#[tokio::test]
async fn test_login_rejected_and_invalid_input() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;

    let result = client.login("grace@example.com", "wrong").await;
    assert_eq!(result, Err(ApiError::Unauthorized));

    // Validation happens before any request
    let result = client.login("not an email", "pw").await;
    assert!(matches!(result, Err(ApiError::InvalidInput(_))));
}

#[tokio::test]
async fn test_login_without_token_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client.login("grace@example.com", "cobol").await;
    assert!(matches!(result, Err(ApiError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_signup_posts_camel_case() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/signup"))
        .and(body_json(json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "password": "cobol"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Welcome!" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let request = SignupRequest {
        first_name: "Grace".to_string(),
        last_name: "Hopper".to_string(),
        email: "grace@example.com".to_string(),
        password: "cobol".to_string(),
    };

    assert_eq!(client.signup(&request).await.unwrap(), "Welcome!");

    let incomplete = SignupRequest {
        first_name: String::new(),
        ..request
    };
    assert!(matches!(
        client.signup(&incomplete).await,
        Err(ApiError::InvalidInput(_))
    ));
}
