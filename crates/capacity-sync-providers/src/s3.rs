// crates/capacity-sync-providers/src/s3.rs
// ============================================================================
// Module: S3 Object Store
// Description: Object store backed by S3-compatible HEAD requests.
// Purpose: Report object sizes without transferring object bodies.
// Dependencies: capacity-sync-core, aws-config, aws-sdk-s3
// ============================================================================

//! ## Overview
//! Object sizes come from `HeadObject` responses. Keys are prefixed with the
//! configured bucket prefix. A missing object maps to
//! [`ObjectStoreError::NotFound`]; every other failure is a backend error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::Region;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use capacity_sync_core::ObjectKey;
use capacity_sync_core::ObjectStore;
use capacity_sync_core::ObjectStoreError;

use crate::error::ProviderError;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the S3 object store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3ObjectStoreConfig {
    /// Bucket holding the objects.
    pub bucket: String,
    /// Optional region (defaults to environment).
    pub region: Option<String>,
    /// Optional S3-compatible endpoint.
    pub endpoint: Option<String>,
    /// Force path-style addressing.
    pub force_path_style: bool,
    /// Optional key prefix.
    pub prefix: Option<String>,
    /// Per-operation timeout.
    pub timeout: Duration,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// S3-backed object store.
pub struct S3ObjectStore {
    /// Underlying S3 client.
    client: Client,
    /// Bucket name.
    bucket: String,
    /// Normalized key prefix; empty or ending in `/`.
    prefix: String,
}

impl S3ObjectStore {
    /// Builds a store from configuration, resolving credentials from the
    /// standard AWS environment chain.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the bucket or prefix is unusable.
    pub async fn connect(config: S3ObjectStoreConfig) -> Result<Self, ProviderError> {
        if config.bucket.trim().is_empty() {
            return Err(ProviderError::Invalid("object store bucket must be set".to_string()));
        }
        let prefix = normalize_prefix(config.prefix.as_deref().unwrap_or(""))?;
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .timeout_config(TimeoutConfig::builder().operation_timeout(config.timeout).build());
        if let Some(region) = config.region {
            loader = loader.region(Region::new(region));
        }
        if let Some(endpoint) = config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let shared_config = loader.load().await;
        let mut s3_builder = aws_sdk_s3::config::Builder::from(&shared_config);
        if config.force_path_style {
            s3_builder = s3_builder.force_path_style(true);
        }
        Ok(Self {
            client: Client::from_conf(s3_builder.build()),
            bucket: config.bucket,
            prefix,
        })
    }

    /// Applies the configured prefix to a key.
    fn prefixed_key(&self, key: &ObjectKey) -> String {
        format!("{}{}", self.prefix, key.as_str())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn head_size(&self, key: &ObjectKey) -> Result<u64, ObjectStoreError> {
        let output = match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(self.prefixed_key(key))
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                return Err(match err.as_service_error() {
                    Some(service) if service.is_not_found() => {
                        ObjectStoreError::NotFound(key.to_string())
                    }
                    _ => ObjectStoreError::Backend(format!("{key}: {}", DisplayErrorContext(&err))),
                });
            }
        };
        object_size(key, output.content_length())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Converts a reported content length into a sample size.
///
/// A missing length is reported as `0`, which the estimator treats as
/// unmeasured.
fn object_size(key: &ObjectKey, length: Option<i64>) -> Result<u64, ObjectStoreError> {
    let Some(length) = length else {
        return Ok(0);
    };
    u64::try_from(length)
        .map_err(|_| ObjectStoreError::Invalid(format!("{key}: negative content length")))
}

/// Normalizes a key prefix to empty or `segment/.../`.
pub(crate) fn normalize_prefix(raw: &str) -> Result<String, ProviderError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed.starts_with('/') {
        return Err(ProviderError::Invalid(
            "prefix must be relative (no leading slash)".to_string(),
        ));
    }
    if trimmed.contains('\\') {
        return Err(ProviderError::Invalid("prefix must not contain backslashes".to_string()));
    }
    let normalized = trimmed.trim_end_matches('/');
    if normalized.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(ProviderError::Invalid("prefix contains an empty or relative segment".to_string()));
    }
    Ok(format!("{normalized}/"))
}
