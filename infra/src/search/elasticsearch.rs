//! Elasticsearch-compatible driver index over plain HTTP

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use da_core::domain::entities::{DeviceDetails, Driver, DriverStatus};
use da_core::errors::DomainError;
use da_core::repositories::DriverSearchRepository;
use da_shared::config::SearchConfig;

use crate::InfrastructureError;

/// Indexed representation of a driver; never carries the one-time code
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverDocument<'a> {
    pub id: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone_number: &'a str,
    pub status: DriverStatus,
    pub devices: &'a [DeviceDetails],
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Driver> for DriverDocument<'a> {
    fn from(driver: &'a Driver) -> Self {
        Self {
            id: &driver.id,
            first_name: driver.first_name.as_deref(),
            last_name: driver.last_name.as_deref(),
            email: driver.email.as_deref(),
            phone_number: &driver.phone_number,
            status: driver.status,
            devices: &driver.devices,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}

/// Writes driver documents with `PUT {url}/{index}/_doc/{id}`
pub struct ElasticsearchDriverIndex {
    client: reqwest::Client,
    config: SearchConfig,
}

impl ElasticsearchDriverIndex {
    /// Build an index client from configuration
    pub fn new(config: SearchConfig) -> Result<Self, InfrastructureError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    async fn put_document(&self, driver: &Driver) -> Result<(), InfrastructureError> {
        let url = self.config.document_url(&driver.id);
        let response = self
            .client
            .put(&url)
            .json(&DriverDocument::from(driver))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(InfrastructureError::General(format!(
                "Search index rejected document {} with status {}",
                driver.id, status
            )));
        }

        tracing::debug!(driver_id = %driver.id, event = "search_indexed", "Driver document indexed");
        Ok(())
    }
}

#[async_trait]
impl DriverSearchRepository for ElasticsearchDriverIndex {
    async fn index(&self, driver: &Driver) -> Result<(), DomainError> {
        self.put_document(driver).await.map_err(DomainError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Driver {
        Driver::invite("+14016369040".into(), "482913".into(), Utc::now(), 30)
            .with_name(Some("Ada".into()), None)
    }

    #[test]
    fn test_document_omits_one_time_code() {
        let driver = driver();
        let json = serde_json::to_value(DriverDocument::from(&driver)).unwrap();

        assert_eq!(json["phoneNumber"], "+14016369040");
        assert_eq!(json["status"], "INVITED");
        assert_eq!(json["firstName"], "Ada");
        assert!(json.get("oneTimeCode").is_none());
        assert!(json.get("oneTimeExpirationTime").is_none());
    }

    #[tokio::test]
    async fn test_unreachable_cluster_is_an_error() {
        let config = SearchConfig {
            url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 1,
            ..Default::default()
        };
        let index = ElasticsearchDriverIndex::new(config).unwrap();

        let result = index.index(&driver()).await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
    }
}
