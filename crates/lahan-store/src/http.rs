use async_trait::async_trait;
use lahan_core::config::LayeredConfig;
use lahan_core::error::{LahanError, Result};
use lahan_core::models::{NewParcel, NewWarehouse, Parcel, ParcelId, Warehouse, WarehouseId};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::ports::ParcelStore;
use crate::wire::{CreateGudang, CreateLahan, GudangRecord, LahanRecord};

/// HTTP+JSON adapter for the remote parcel store
#[derive(Debug)]
pub struct HttpParcelStore {
    /// Base URL for the store API (e.g., "http://localhost:8000/api")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpParcelStore {
    /// Create a store client without a request timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a store client; `timeout` bounds every request when set
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| LahanError::Transport {
            reason: format!("Failed to build HTTP client: {}", e),
        })?;

        let base_url: String = base_url.into();
        if base_url.trim().is_empty() {
            return Err(LahanError::ConfigMissing { key: "store_url".to_string() });
        }

        Ok(Self { base_url: base_url.trim_end_matches('/').to_string(), client })
    }

    /// Create from layered configuration
    pub fn from_config(config: &LayeredConfig) -> Result<Self> {
        Self::with_timeout(config.store_url.value.clone(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = Self::check_status(response).await?;
        response.json().await.map_err(|e| {
            LahanError::Serialization(format!("Failed to parse store response: {}", e))
        })
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = Self::check_status(response).await?;
        response.json().await.map_err(|e| {
            LahanError::Serialization(format!("Failed to parse store response: {}", e))
        })
    }

    async fn delete_path(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        Self::check_status(response).await.map(|_| ())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(LahanError::Store { status, body })
    }

    fn transport_error(&self, e: reqwest::Error) -> LahanError {
        let reason = if e.is_timeout() {
            format!("Request to {} timed out", self.base_url)
        } else {
            format!("Failed to reach store at {}: {}", self.base_url, e)
        };
        LahanError::Transport { reason }
    }
}

#[async_trait]
impl ParcelStore for HttpParcelStore {
    async fn list_parcels(&self) -> Result<Vec<Parcel>> {
        let records: Vec<LahanRecord> = self.get_json("lahan").await?;
        let total = records.len();

        let parcels: Vec<Parcel> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match Parcel::try_from(record) {
                    Ok(parcel) => Some(parcel),
                    Err(e) => {
                        tracing::warn!(id = %id, error = %e, "Skipping malformed parcel record");
                        None
                    }
                }
            })
            .collect();

        tracing::debug!(total, loaded = parcels.len(), "Fetched parcels");
        Ok(parcels)
    }

    async fn create_parcel(&self, parcel: &NewParcel) -> Result<Parcel> {
        let record: LahanRecord = self.post_json("lahan", &CreateLahan::from(parcel)).await?;
        Parcel::try_from(record)
    }

    async fn delete_parcel(&self, id: &ParcelId) -> Result<()> {
        self.delete_path(&format!("lahan/{}", id)).await
    }

    async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let records: Vec<GudangRecord> = self.get_json("gudang").await?;

        Ok(records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match Warehouse::try_from(record) {
                    Ok(warehouse) => Some(warehouse),
                    Err(e) => {
                        tracing::warn!(id = %id, error = %e, "Skipping malformed warehouse record");
                        None
                    }
                }
            })
            .collect())
    }

    async fn create_warehouse(&self, warehouse: &NewWarehouse) -> Result<Warehouse> {
        let record: GudangRecord =
            self.post_json("gudang", &CreateGudang::from(warehouse)).await?;
        Warehouse::try_from(record)
    }

    async fn delete_warehouse(&self, id: &WarehouseId) -> Result<()> {
        self.delete_path(&format!("gudang/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let store = HttpParcelStore::new("http://localhost:8000/api/").unwrap();
        assert_eq!(store.base_url(), "http://localhost:8000/api");
        assert_eq!(store.url("lahan"), "http://localhost:8000/api/lahan");
    }

    #[test]
    fn test_from_config() {
        let config = LayeredConfig::with_defaults();
        let store = HttpParcelStore::from_config(&config).unwrap();
        assert_eq!(store.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_empty_store_url_is_missing_config() {
        let mut config = LayeredConfig::with_defaults();
        config.store_url.update(String::new(), lahan_core::config::ConfigSource::Cli);

        let err = HttpParcelStore::from_config(&config).unwrap_err();
        assert!(matches!(err, LahanError::ConfigMissing { ref key } if key == "store_url"));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_transport_error() {
        // Port 9 (discard) is not expected to serve HTTP
        let store =
            HttpParcelStore::with_timeout("http://127.0.0.1:9/api", Some(Duration::from_secs(2)))
                .unwrap();
        let err = store.list_parcels().await.unwrap_err();
        assert!(matches!(err, LahanError::Transport { .. }));
    }
}
