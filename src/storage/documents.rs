//! Document store backends
//!
//! Scenario configurations and ROI reports are persisted as opaque JSON
//! documents keyed by id within a partition. The trait keeps the persistence
//! seam swappable: an in-process map for tests and local development, and a
//! Cosmos DB REST client for deployments.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use dashmap::DashMap;
use hmac::{Hmac, Mac};
use reqwest::StatusCode;
use serde_json::Value;
use sha2::Sha256;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::DocumentStoreConfig;
use crate::utils::error::{GatewayError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Async document persistence seam
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert or replace a document within a partition, generating an `id`
    /// when the document carries none. Returns the effective id.
    async fn upsert(&self, partition: &str, document: Value) -> Result<String>;

    /// Point-read a document by id. A missing document is `Ok(None)`,
    /// not an error.
    async fn read(&self, partition: &str, id: &str) -> Result<Option<Value>>;
}

/// Ensure the document is a JSON object carrying a string `id`
fn ensure_id(document: &mut Value) -> Result<String> {
    let object = document
        .as_object_mut()
        .ok_or_else(|| GatewayError::bad_request("Document must be a JSON object"))?;

    match object.get("id").and_then(Value::as_str) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => {
            let id = Uuid::new_v4().to_string();
            object.insert("id".to_string(), Value::String(id.clone()));
            Ok(id)
        }
    }
}

/// In-process document store backed by a concurrent map
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: DashMap<(String, String), Value>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn upsert(&self, partition: &str, mut document: Value) -> Result<String> {
        let id = ensure_id(&mut document)?;
        self.documents
            .insert((partition.to_string(), id.clone()), document);
        Ok(id)
    }

    async fn read(&self, partition: &str, id: &str) -> Result<Option<Value>> {
        Ok(self
            .documents
            .get(&(partition.to_string(), id.to_string()))
            .map(|entry| entry.value().clone()))
    }
}

/// Cosmos DB REST client with master-key authorization
///
/// Documents live in a single container; the partition key value
/// distinguishes scenario configurations from ROI reports.
pub struct CosmosDocumentStore {
    http_client: reqwest::Client,
    endpoint: String,
    key: Vec<u8>,
    database: String,
    container: String,
}

impl CosmosDocumentStore {
    const API_VERSION: &'static str = "2018-12-31";

    pub fn new(config: &DocumentStoreConfig) -> Result<Self> {
        let key = STANDARD
            .decode(config.key.trim())
            .map_err(|e| GatewayError::crypto(format!("Invalid document store key: {}", e)))?;

        Ok(Self {
            http_client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            key,
            database: config.database.clone(),
            container: config.container.clone(),
        })
    }

    fn collection_link(&self) -> String {
        format!("dbs/{}/colls/{}", self.database, self.container)
    }

    /// Master-key authorization token for one request
    ///
    /// Signs `verb\nresourcetype\nresourcelink\ndate\n\n` (verb and date
    /// lowercased) with HMAC-SHA256 over the base64-decoded account key.
    fn auth_token(&self, verb: &str, resource_link: &str, date: &str) -> Result<String> {
        let string_to_sign = format!(
            "{}\ndocs\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| GatewayError::crypto(format!("Invalid signing key length: {}", e)))?;
        mac.update(string_to_sign.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let token = format!("type=master&ver=1.0&sig={}", signature);
        Ok(url::form_urlencoded::byte_serialize(token.as_bytes()).collect())
    }

    fn rfc1123_now() -> String {
        chrono::Utc::now()
            .format("%a, %d %b %Y %H:%M:%S GMT")
            .to_string()
    }

    fn partition_header(partition: &str) -> String {
        // Partition key header is a JSON array of key values
        serde_json::to_string(&[partition]).unwrap_or_else(|_| format!("[\"{}\"]", partition))
    }
}

#[async_trait]
impl DocumentStore for CosmosDocumentStore {
    async fn upsert(&self, partition: &str, mut document: Value) -> Result<String> {
        let id = ensure_id(&mut document)?;
        let date = Self::rfc1123_now();
        let auth = self.auth_token("POST", &self.collection_link(), &date)?;
        let url = format!("{}/{}/docs", self.endpoint, self.collection_link());

        debug!(id = %id, partition = %partition, "Upserting document");

        let response = self
            .http_client
            .post(&url)
            .header("authorization", auth)
            .header("x-ms-date", date)
            .header("x-ms-version", Self::API_VERSION)
            .header("x-ms-documentdb-is-upsert", "true")
            .header("x-ms-documentdb-partitionkey", Self::partition_header(partition))
            .json(&document)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Document upsert failed");
            return Err(GatewayError::document_store(format!(
                "Upsert failed with status {}: {}",
                status, body
            )));
        }

        let stored: Value = response.json().await?;
        Ok(stored
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(id))
    }

    async fn read(&self, partition: &str, id: &str) -> Result<Option<Value>> {
        let resource_link = format!("{}/docs/{}", self.collection_link(), id);
        let date = Self::rfc1123_now();
        let auth = self.auth_token("GET", &resource_link, &date)?;
        let url = format!("{}/{}", self.endpoint, resource_link);

        let response = self
            .http_client
            .get(&url)
            .header("authorization", auth)
            .header("x-ms-date", date)
            .header("x-ms-version", Self::API_VERSION)
            .header("x-ms-documentdb-partitionkey", Self::partition_header(partition))
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(GatewayError::document_store(format!(
                    "Read failed with status {}: {}",
                    status, body
                )))
            }
        }
    }
}
