//! MySQL implementation of the DeviceRepository trait.

use async_trait::async_trait;
use sqlx::MySqlPool;

use da_core::domain::entities::DeviceDetails;
use da_core::errors::DomainError;
use da_core::repositories::DeviceRepository;

/// MySQL implementation of DeviceRepository
pub struct MySqlDeviceRepository {
    pool: MySqlPool,
}

impl MySqlDeviceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceRepository for MySqlDeviceRepository {
    async fn create(&self, device: DeviceDetails) -> Result<DeviceDetails, DomainError> {
        sqlx::query("INSERT INTO device_details (id, device_id, created_at) VALUES (?, ?, ?)")
            .bind(&device.id)
            .bind(&device.device_id)
            .bind(device.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "db_query_failed", "Failed to create device");
                DomainError::Internal {
                    message: format!("Failed to create device: {}", e),
                }
            })?;

        Ok(device)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM device_details WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, event = "db_query_failed", "Failed to delete device");
                DomainError::Internal {
                    message: format!("Failed to delete device: {}", e),
                }
            })?;

        Ok(())
    }
}
