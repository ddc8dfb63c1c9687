// crates/capacity-sync-providers/src/wordpress.rs
// ============================================================================
// Module: WordPress Catalog Client
// Description: Catalog service backed by a WordPress-style REST collection.
// Purpose: List, fetch, and patch catalog entries over HTTP.
// Dependencies: capacity-sync-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! Entries live under `{base_url}/{collection}`. Listings are requested with
//! `per_page`, `page`, `orderby` and `order` query parameters; detail records
//! carry a `meta` object whose variant-group list sits under a configured key.
//! Write-backs send a partial update containing only that key.
//!
//! A page number past the end of the collection is answered by the catalog
//! with `400 rest_post_invalid_page_number`; it is reported as an empty page.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use capacity_sync_core::CatalogEntry;
use capacity_sync_core::CatalogError;
use capacity_sync_core::CatalogListing;
use capacity_sync_core::CatalogService;
use capacity_sync_core::EntryId;
use capacity_sync_core::EntryMetadata;
use capacity_sync_core::PageRequest;
use capacity_sync_core::VariantGroup;
use reqwest::Client;
use reqwest::RequestBuilder;
use reqwest::Response;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;
use url::Url;

use crate::error::ProviderError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Error code returned for a page number past the last page.
const INVALID_PAGE_CODE: &str = "rest_post_invalid_page_number";
/// Longest response body excerpt kept in error messages.
const MAX_ERROR_BODY_CHARS: usize = 512;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Basic-auth credentials for catalog writes.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    /// User name.
    pub username: String,
    /// Application password.
    pub password: String,
}

/// Configuration for the WordPress catalog client.
///
/// # Invariants
/// - `collection` is a single path segment.
#[derive(Clone)]
pub struct WordPressCatalogConfig {
    /// REST API root, e.g. `https://example.org/wp-json/wp/v2`.
    pub base_url: String,
    /// Path segment of the entry collection.
    pub collection: String,
    /// Metadata key holding the variant-group list.
    pub variant_groups_key: String,
    /// Optional basic-auth credentials.
    pub credentials: Option<BasicCredentials>,
    /// Per-request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

// ============================================================================
// SECTION: Wire Records
// ============================================================================

/// Rendered text field.
#[derive(Debug, Default, Deserialize)]
struct Rendered {
    /// Rendered HTML text.
    #[serde(default)]
    rendered: String,
}

/// Listing record.
#[derive(Debug, Deserialize)]
struct ListingRecord {
    /// Entry identifier.
    id: u64,
    /// Entry title.
    #[serde(default)]
    title: Rendered,
}

/// Detail record.
#[derive(Debug, Deserialize)]
struct EntryRecord {
    /// Entry identifier.
    id: u64,
    /// Entry title.
    #[serde(default)]
    title: Rendered,
    /// Raw metadata object.
    #[serde(default)]
    meta: Option<Value>,
}

/// Error body returned by the REST API.
#[derive(Debug, Deserialize)]
struct ErrorRecord {
    /// Machine-readable error code.
    #[serde(default)]
    code: String,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Catalog service backed by a WordPress REST collection.
pub struct WordPressCatalog {
    /// HTTP client with timeout applied.
    client: Client,
    /// Collection URL without query.
    collection_url: Url,
    /// Metadata key holding the variant-group list.
    variant_groups_key: String,
    /// Optional basic-auth credentials.
    credentials: Option<BasicCredentials>,
}

impl WordPressCatalog {
    /// Creates a catalog client.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the URL is unusable or the HTTP client
    /// cannot be built.
    pub fn new(config: WordPressCatalogConfig) -> Result<Self, ProviderError> {
        let collection_url = collection_url(&config.base_url, &config.collection)?;
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|err| ProviderError::Client(err.to_string()))?;
        Ok(Self {
            client,
            collection_url,
            variant_groups_key: config.variant_groups_key,
            credentials: config.credentials,
        })
    }

    /// Returns the URL of a single entry.
    fn entry_url(&self, id: EntryId) -> Result<Url, CatalogError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|()| CatalogError::Invalid("catalog url cannot carry a path".to_string()))?
            .push(&id.to_string());
        Ok(url)
    }

    /// Applies credentials to a request.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(credentials) => {
                request.basic_auth(&credentials.username, Some(&credentials.password))
            }
            None => request,
        }
    }
}

#[async_trait]
impl CatalogService for WordPressCatalog {
    async fn list_page(&self, request: &PageRequest) -> Result<Vec<CatalogListing>, CatalogError> {
        let mut url = self.collection_url.clone();
        url.query_pairs_mut()
            .append_pair("per_page", &request.page_size.to_string())
            .append_pair("page", &request.page.to_string())
            .append_pair("orderby", &request.order_by)
            .append_pair("order", request.order.as_str());
        let response = self.authorize(self.client.get(url)).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::BAD_REQUEST && error_code(&body) == INVALID_PAGE_CODE {
                return Ok(Vec::new());
            }
            return Err(status_error(status, &body));
        }
        let records: Vec<ListingRecord> = decode(response).await?;
        Ok(records
            .into_iter()
            .map(|record| CatalogListing {
                id: EntryId::new(record.id),
                title: record.title.rendered,
            })
            .collect())
    }

    async fn get_entry(&self, id: EntryId) -> Result<CatalogEntry, CatalogError> {
        let url = self.entry_url(id)?;
        let response = self.authorize(self.client.get(url)).send().await.map_err(transport)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        let record: EntryRecord = decode(response).await?;
        let meta = EntryMetadata::from_json(record.meta, &self.variant_groups_key)
            .map_err(|err| CatalogError::Invalid(format!("entry {id} metadata: {err}")))?;
        Ok(CatalogEntry {
            id: EntryId::new(record.id),
            title: record.title.rendered,
            meta,
        })
    }

    async fn patch_variant_groups(
        &self,
        id: EntryId,
        groups: &[VariantGroup],
    ) -> Result<(), CatalogError> {
        let url = self.entry_url(id)?;
        let groups = serde_json::to_value(groups)
            .map_err(|err| CatalogError::Invalid(format!("variant groups: {err}")))?;
        let mut meta = Map::new();
        meta.insert(self.variant_groups_key.clone(), groups);
        let mut body = Map::new();
        body.insert("meta".to_string(), Value::Object(meta));
        let response = self
            .authorize(self.client.patch(url))
            .json(&Value::Object(body))
            .send()
            .await
            .map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        Err(status_error(status, &body))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the collection URL from the API root and collection segment.
fn collection_url(base_url: &str, collection: &str) -> Result<Url, ProviderError> {
    let mut url = Url::parse(base_url.trim())
        .map_err(|err| ProviderError::Invalid(format!("catalog base url: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ProviderError::Invalid("catalog base url must be http(s)".to_string()));
    }
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|()| ProviderError::Invalid("catalog base url cannot carry a path".to_string()))?
        .pop_if_empty()
        .push(collection.trim());
    Ok(url)
}

/// Maps a transport failure.
fn transport(err: reqwest::Error) -> CatalogError {
    CatalogError::Transport(err.to_string())
}

/// Maps an unsuccessful status with its body excerpt.
fn status_error(status: StatusCode, body: &str) -> CatalogError {
    CatalogError::Status {
        status: status.as_u16(),
        body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

/// Extracts the REST error code from an error body.
fn error_code(body: &str) -> String {
    serde_json::from_str::<ErrorRecord>(body).map(|record| record.code).unwrap_or_default()
}

/// Decodes a successful JSON response.
async fn decode<T>(response: Response) -> Result<T, CatalogError>
where
    T: for<'de> Deserialize<'de>,
{
    response.json::<T>().await.map_err(|err| CatalogError::Invalid(err.to_string()))
}
