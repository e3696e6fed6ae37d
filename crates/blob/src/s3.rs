//! Blob store backed by an S3-compatible bucket.

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::{BlobError, BlobStore};

/// Connection settings for [`S3BlobStore::connect`].
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    /// Base URL under which stored objects are publicly reachable.
    pub public_base_url: String,
    /// Custom endpoint for S3-compatible services such as MinIO.
    pub endpoint_url: Option<String>,
    /// Path-style addressing, required by most S3-compatible services.
    pub force_path_style: bool,
}

/// Product image store writing to an S3-compatible bucket.
///
/// Objects are assumed publicly readable under `public_base_url`; the
/// store maps URLs back to keys by stripping that prefix, so URLs from
/// any other origin are rejected as foreign.
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl S3BlobStore {
    /// Build a store from ambient AWS credentials and the given settings.
    pub async fn connect(settings: S3Settings) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(settings.force_path_style);
        if let Some(endpoint) = &settings.endpoint_url {
            builder = builder.endpoint_url(endpoint);
        }
        let client = Client::from_conf(builder.build());

        Self {
            client,
            bucket: settings.bucket,
            public_base_url: settings.public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base_url)
    }

    fn key_for<'a>(&self, url: &'a str) -> Result<&'a str, BlobError> {
        key_within(&self.public_base_url, url)
            .ok_or_else(|| BlobError::ForeignUrl(url.to_string()))
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, BlobError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|error| BlobError::Backend(DisplayErrorContext(&error).to_string()))?;

        Ok(self.url_for(key))
    }

    async fn delete(&self, url: &str) -> Result<(), BlobError> {
        let key = self.key_for(url)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|error| BlobError::Backend(DisplayErrorContext(&error).to_string()))?;

        Ok(())
    }
}

/// Extract the object key from `url` if it lives under `public_base_url`.
fn key_within<'a>(public_base_url: &str, url: &'a str) -> Option<&'a str> {
    url.strip_prefix(public_base_url)
        .map(|rest| rest.trim_start_matches('/'))
        .filter(|key| !key.is_empty())
}
