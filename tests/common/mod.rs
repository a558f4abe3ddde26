//! Shared fixtures: an in-memory app, token helpers, request helpers.

#![allow(dead_code, missing_docs, clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tower::ServiceExt;
use uuid::Uuid;

use stax_gateway::api;
use stax_gateway::app_state::AppState;
use stax_gateway::auth::{AdminTokenService, IdentityVerifier, hash_password_with_cost};
use stax_gateway::domain::{AdminAccount, SessionUser};
use stax_gateway::persistence::MemoryStore;
use stax_gateway::service::{AdminAuthService, RegistrationService};
use stax_gateway::storage::MemoryObjectStorage;

pub const IDENTITY_SECRET: &str = "identity-test-secret";
pub const ADMIN_SECRET: &str = "admin-test-secret";
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024;
pub const BOUNDARY: &str = "----staxgatewayboundary";

#[derive(Debug)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub storage: Arc<MemoryObjectStorage>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let storage = Arc::new(MemoryObjectStorage::default());
    let admin_tokens = Arc::new(AdminTokenService::new(
        ADMIN_SECRET,
        chrono::Duration::hours(24),
    ));
    let state = AppState {
        registrations: Arc::new(RegistrationService::new(
            Arc::clone(&store) as _,
            Arc::clone(&storage) as _,
            MAX_UPLOAD_BYTES,
        )),
        admin_auth: Arc::new(AdminAuthService::new(
            Arc::clone(&store) as _,
            Arc::clone(&admin_tokens),
        )),
        admin_tokens,
        identity: Arc::new(IdentityVerifier::new(IDENTITY_SECRET, "authenticated")),
    };
    let router = api::build_router(MAX_UPLOAD_BYTES).with_state(state);
    TestApp {
        router,
        store,
        storage,
    }
}

impl TestApp {
    pub async fn seed_admin(&self, username: &str, password: &str) -> AdminAccount {
        let Ok(password_hash) = hash_password_with_cost(password, 4) else {
            panic!("hashing failed");
        };
        let account = AdminAccount {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            full_name: Some("Panitia".to_string()),
            last_login: None,
        };
        self.store.insert_admin(account.clone()).await;
        account
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});
        let status = response.status();
        let Ok(collected) = response.into_body().collect().await else {
            panic!("body read failed");
        };
        let bytes = collected.to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    /// Logs in through the API and returns the admin token.
    pub async fn admin_token(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .send(json_request(
                "POST",
                "/api/admin/login",
                None,
                &serde_json::json!({ "username": username, "password": password }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        let Some(token) = body["token"].as_str() else {
            panic!("no token in {body}");
        };
        token.to_string()
    }
}

pub fn user(email: &str, full_name: &str) -> SessionUser {
    SessionUser {
        id: Uuid::new_v4(),
        email: Some(email.to_string()),
        full_name: Some(full_name.to_string()),
    }
}

/// Signs a token the way the identity provider does.
pub fn identity_token(user: &SessionUser) -> String {
    let claims = serde_json::json!({
        "sub": user.id,
        "aud": "authenticated",
        "exp": chrono::Utc::now().timestamp() + 3600,
        "email": user.email,
        "user_metadata": { "full_name": user.full_name },
    });
    let Ok(token) = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(IDENTITY_SECRET.as_bytes()),
    ) else {
        panic!("signing failed");
    };
    token
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let Ok(request) = builder.body(Body::empty()) else {
        panic!("request build failed");
    };
    request
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    raw_json_request(method, uri, token, &body.to_string())
}

/// Like [`json_request`], but with the body sent verbatim.
pub fn raw_json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let Ok(request) = builder.body(Body::from(body.to_string())) else {
        panic!("request build failed");
    };
    request
}

/// A proof file part: (file name, content type, bytes).
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

pub fn multipart_request(
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    proof: Option<FilePart<'_>>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = proof {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"proof\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let Ok(request) = builder.body(Body::from(body)) else {
        panic!("request build failed");
    };
    request
}
