#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use adscript_api::auth::jwt::{generate_access_token, JwtConfig};
use adscript_api::config::ServerConfig;
use adscript_api::router::build_app_router;
use adscript_api::state::AppState;
use adscript_core::roles::ROLE_PLATFORM_ADMIN;
use adscript_core::types::DbId;
use adscript_db::models::api_settings::UpdateApiSettings;
use adscript_db::models::organization::CreateOrganization;
use adscript_db::models::user::UpsertProfile;
use adscript_db::repositories::{ApiSettingsRepo, OrganizationRepo, UserRepo};
use adscript_llm::{Endpoints, LlmClient};

/// Build a test `ServerConfig` with safe defaults.
///
/// Every vendor endpoint points at `llm_base` (normally a wiremock server).
pub fn test_config(llm_base: &str) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
        },
        llm_endpoints: Endpoints::all(llm_base),
        default_model: "gemini-1.5-flash".to_string(),
    }
}

/// Build the full application router, wired to a real [`LlmClient`].
///
/// Uses the same middleware stack as `main.rs`.
pub fn build_test_app(pool: PgPool, llm_base: &str) -> Router {
    let config = test_config(llm_base);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        generator: Arc::new(LlmClient::new(config.llm_endpoints.clone())),
    };
    build_app_router(state, &config)
}

/// Router whose vendor endpoints are unreachable. For tests that must not
/// reach a vendor.
pub fn build_offline_app(pool: PgPool) -> Router {
    build_test_app(pool, "http://127.0.0.1:9")
}

/// Bearer token for `user_id`, signed with the test secret.
pub fn token_for(user_id: DbId) -> String {
    token_with_role(user_id, "authenticated")
}

/// Bearer token carrying an explicit `role` claim.
pub fn token_with_role(user_id: DbId, role: &str) -> String {
    generate_access_token(user_id, role, 15, &test_config("http://unused").jwt)
        .expect("token generation should succeed")
}

/// Bearer token of a platform operator.
pub fn platform_admin_token(user_id: DbId) -> String {
    token_with_role(user_id, ROLE_PLATFORM_ADMIN)
}

/// Insert a profile for `user_id`.
pub async fn seed_user(pool: &PgPool, user_id: DbId, email: &str) {
    UserRepo::upsert_profile(
        pool,
        user_id,
        &UpsertProfile {
            email: email.to_string(),
            full_name: None,
        },
    )
    .await
    .expect("profile insert should succeed");
}

/// Insert a profile for `user_id` and make them admin of a new organization.
pub async fn seed_org_admin(pool: &PgPool, user_id: DbId) -> DbId {
    seed_user(pool, user_id, &format!("user{user_id}@example.com")).await;
    OrganizationRepo::create_with_owner(
        pool,
        &CreateOrganization {
            name: format!("Org of {user_id}"),
        },
        user_id,
    )
    .await
    .expect("organization insert should succeed")
    .id
}

/// Store a Gemini key so generations with the default model can run.
pub async fn seed_gemini_key(pool: &PgPool) {
    ApiSettingsRepo::update(
        pool,
        &UpdateApiSettings {
            gemini_api_key: Some("test-gemini-key".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("settings update should succeed");
}

/// Store an OpenAI key for tests that override the model.
pub async fn seed_openai_key(pool: &PgPool) {
    ApiSettingsRepo::update(
        pool,
        &UpdateApiSettings {
            openai_api_key: Some("test-openai-key".to_string()),
            ..Default::default()
        },
    )
    .await
    .expect("settings update should succeed");
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user_id: Option<DbId>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    send_with_token(app, method, uri, user_id.map(token_for), body).await
}

/// Send a request with an arbitrary bearer token (or none).
pub async fn send_with_token(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<String>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, user_id: DbId, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(user_id), None).await
}

pub async fn post_as(app: Router, user_id: DbId, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(user_id), None).await
}

pub async fn post_json_as(
    app: Router,
    user_id: DbId,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(user_id), Some(body)).await
}

pub async fn put_json_as(
    app: Router,
    user_id: DbId,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(user_id), Some(body)).await
}

pub async fn patch_json_as(
    app: Router,
    user_id: DbId,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(user_id), Some(body)).await
}

pub async fn delete_as(app: Router, user_id: DbId, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(user_id), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
