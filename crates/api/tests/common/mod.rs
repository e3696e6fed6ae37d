use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use partsdesk_blob::MemoryBlobStore;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use partsdesk_api::auth::jwt::{generate_access_token, JwtConfig};
use partsdesk_api::config::{BlobConfig, ServerConfig};
use partsdesk_api::routes;
use partsdesk_api::state::AppState;
use partsdesk_core::types::DbId;

/// Base URL the in-memory blob store mints object URLs under.
pub const TEST_BLOB_BASE_URL: &str = "https://blobs.test";

/// Signing secret shared by [`test_config`] and [`auth_token`].
const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Boundary used by [`post_multipart_auth`].
const MULTIPART_BOUNDARY: &str = "----partsdesk-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and the in-memory blob backend.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
        blob: BlobConfig::Memory {
            base_url: TEST_BLOB_BASE_URL.to_string(),
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool).0
}

/// Like [`build_test_app`], but also hands back the in-memory blob store so
/// tests can assert which objects survived a request.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app_with_store(pool: PgPool) -> (Router, Arc<MemoryBlobStore>) {
    let config = test_config();
    let store = Arc::new(MemoryBlobStore::new(TEST_BLOB_BASE_URL));

    let state = AppState {
        pool,
        config: Arc::new(config),
        blob: store.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state);

    (app, store)
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a user and assign the named role, returning the user id.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> DbId {
    let user_id = seed_user_without_role(pool, email).await;

    sqlx::query(
        "INSERT INTO user_roles (user_id, role_id)
         SELECT $1, id FROM roles WHERE name = $2",
    )
    .bind(user_id)
    .bind(role)
    .execute(pool)
    .await
    .expect("role assignment should succeed");

    user_id
}

/// Insert a user with no role assignment, returning the user id.
pub async fn seed_user_without_role(pool: &PgPool, email: &str) -> DbId {
    let (user_id,): (DbId,) = sqlx::query_as("INSERT INTO users (email) VALUES ($1) RETURNING id")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("user insert should succeed");
    user_id
}

/// Generate a valid access token for the given user id, signed with the
/// same secret [`test_config`] configures the app with.
pub fn auth_token(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

/// Insert a minimal product row with the given code, returning its id.
/// Unlisted columns take their schema defaults.
pub async fn seed_product(pool: &PgPool, code: &str) -> DbId {
    let (id,): (DbId,) = sqlx::query_as(
        "INSERT INTO products (code, name, price, stock)
         VALUES ($1, $2, 10.0, 5) RETURNING id",
    )
    .bind(code)
    .bind(format!("Product {code}"))
    .fetch_one(pool)
    .await
    .expect("product insert should succeed");
    id
}

/// Insert a legacy `product_codes` row with the given JSONB payloads,
/// returning its id.
pub async fn seed_code(
    pool: &PgPool,
    compatibility: Option<serde_json::Value>,
    description: Option<serde_json::Value>,
    product_code: Option<serde_json::Value>,
) -> DbId {
    let (id,): (DbId,) = sqlx::query_as(
        "INSERT INTO product_codes (compatibility_data, description_data, product_code_data)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(compatibility)
    .bind(description)
    .bind(product_code)
    .fetch_one(pool)
    .await
    .expect("product_code insert should succeed");
    id
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, path: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, path: &str, token: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an empty-body POST request without authentication.
pub async fn post(app: Router, path: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an empty-body POST request with a bearer token.
pub async fn post_auth(app: Router, path: &str, token: &str) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PATCH request with a JSON body and no authentication.
pub async fn patch_json(
    app: Router,
    path: &str,
    body: serde_json::Value,
) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PATCH request with a JSON body and a bearer token.
pub async fn patch_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a JSON body and a bearer token.
pub async fn delete_json_auth(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: &str,
) -> axum::response::Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a single-file multipart form (field name `file`) with a bearer token.
pub async fn post_multipart_auth(
    app: Router,
    path: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
    token: &str,
) -> axum::response::Response {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}
