use partsdesk_blob::S3Settings;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret and the S3 settings have defaults
/// suitable for local development. In production, override via environment
/// variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Image blob store backend selection.
    pub blob: BlobConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();
        let blob = BlobConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt,
            blob,
        }
    }
}

/// Which blob store backend to use for product images.
#[derive(Debug, Clone)]
pub enum BlobConfig {
    /// S3-compatible bucket (production).
    S3(S3Settings),
    /// Process-local in-memory store (local development only).
    Memory { base_url: String },
}

impl BlobConfig {
    /// Load blob store configuration from environment variables.
    ///
    /// | Env Var               | Applies to | Required | Default  |
    /// |-----------------------|------------|----------|----------|
    /// | `BLOB_BACKEND`        | both       | no       | `s3`     |
    /// | `S3_BUCKET`           | s3         | **yes**  | --       |
    /// | `S3_PUBLIC_BASE_URL`  | s3         | **yes**  | --       |
    /// | `S3_ENDPOINT_URL`     | s3         | no       | --       |
    /// | `S3_FORCE_PATH_STYLE` | s3         | no       | `true`   |
    /// | `MEMORY_BLOB_BASE_URL`| memory     | no       | `http://localhost:3000/blobs` |
    ///
    /// # Panics
    ///
    /// Panics on an unknown `BLOB_BACKEND` or a missing required variable,
    /// so misconfiguration fails at startup rather than on first upload.
    pub fn from_env() -> Self {
        let backend = std::env::var("BLOB_BACKEND").unwrap_or_else(|_| "s3".into());
        match backend.as_str() {
            "s3" => BlobConfig::S3(S3Settings {
                bucket: std::env::var("S3_BUCKET")
                    .expect("S3_BUCKET must be set when BLOB_BACKEND=s3"),
                public_base_url: std::env::var("S3_PUBLIC_BASE_URL")
                    .expect("S3_PUBLIC_BASE_URL must be set when BLOB_BACKEND=s3"),
                endpoint_url: std::env::var("S3_ENDPOINT_URL").ok(),
                force_path_style: std::env::var("S3_FORCE_PATH_STYLE")
                    .map(|v| v == "true" || v == "1")
                    .unwrap_or(true),
            }),
            "memory" => BlobConfig::Memory {
                base_url: std::env::var("MEMORY_BLOB_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:3000/blobs".into()),
            },
            other => panic!("BLOB_BACKEND must be 's3' or 'memory', got '{other}'"),
        }
    }
}
