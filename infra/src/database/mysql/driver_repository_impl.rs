//! MySQL implementation of the DriverRepository trait.
//!
//! Drivers live in `drivers`; the devices registered for a driver are linked
//! through `driver_devices`. A driver and its links are always written in one
//! transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Row, Transaction};

use da_core::domain::entities::{DeviceDetails, Driver, DriverStatus};
use da_core::errors::DomainError;
use da_core::repositories::DriverRepository;

/// MySQL implementation of DriverRepository
pub struct MySqlDriverRepository {
    /// Database connection pool
    pool: MySqlPool,
}

fn query_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, context, event = "db_query_failed", "Driver store query failed");
    DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

impl MySqlDriverRepository {
    /// Create a new MySQL driver repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a `drivers` row to a Driver entity without devices
    fn row_to_driver(row: &MySqlRow) -> Result<Driver, DomainError> {
        let status: String = row.try_get("status").map_err(|e| column_error("status", e))?;
        let status = status
            .parse::<DriverStatus>()
            .map_err(|message| DomainError::Internal { message })?;

        Ok(Driver {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            first_name: row.try_get("first_name").map_err(|e| column_error("first_name", e))?,
            last_name: row.try_get("last_name").map_err(|e| column_error("last_name", e))?,
            email: row.try_get("email").map_err(|e| column_error("email", e))?,
            phone_number: row
                .try_get("phone_number")
                .map_err(|e| column_error("phone_number", e))?,
            status,
            one_time_code: row
                .try_get("one_time_code")
                .map_err(|e| column_error("one_time_code", e))?,
            one_time_expiration_time: row
                .try_get::<Option<DateTime<Utc>>, _>("one_time_expiration_time")
                .map_err(|e| column_error("one_time_expiration_time", e))?,
            devices: Vec::new(),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| column_error("updated_at", e))?,
        })
    }

    fn row_to_device(row: &MySqlRow) -> Result<DeviceDetails, DomainError> {
        Ok(DeviceDetails {
            id: row.try_get("id").map_err(|e| column_error("id", e))?,
            device_id: row.try_get("device_id").map_err(|e| column_error("device_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }

    async fn load_devices(&self, driver_id: &str) -> Result<Vec<DeviceDetails>, DomainError> {
        let query = r#"
            SELECT d.id, d.device_id, d.created_at
            FROM device_details d
            INNER JOIN driver_devices dd ON dd.device_details_id = d.id
            WHERE dd.driver_id = ?
            ORDER BY d.created_at
        "#;

        let rows = sqlx::query(query)
            .bind(driver_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to load driver devices", e))?;

        rows.iter().map(Self::row_to_device).collect()
    }

    /// Replace the device links of a driver inside `tx`
    async fn replace_device_links(
        tx: &mut Transaction<'_, MySql>,
        driver: &Driver,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM driver_devices WHERE driver_id = ?")
            .bind(&driver.id)
            .execute(&mut **tx)
            .await
            .map_err(|e| query_error("Failed to clear driver devices", e))?;

        for device in &driver.devices {
            sqlx::query("INSERT INTO driver_devices (driver_id, device_details_id) VALUES (?, ?)")
                .bind(&driver.id)
                .bind(&device.id)
                .execute(&mut **tx)
                .await
                .map_err(|e| query_error("Failed to link driver device", e))?;
        }

        Ok(())
    }
}

#[async_trait]
impl DriverRepository for MySqlDriverRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Driver>, DomainError> {
        let query = r#"
            SELECT id, first_name, last_name, email, phone_number, status,
                   one_time_code, one_time_expiration_time, created_at, updated_at
            FROM drivers
            WHERE id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to load driver", e))?;

        match row {
            Some(row) => {
                let mut driver = Self::row_to_driver(&row)?;
                driver.devices = self.load_devices(id).await?;
                Ok(Some(driver))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, driver: Driver) -> Result<Driver, DomainError> {
        let query = r#"
            INSERT INTO drivers (
                id, first_name, last_name, email, phone_number, status,
                one_time_code, one_time_expiration_time, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        sqlx::query(query)
            .bind(&driver.id)
            .bind(&driver.first_name)
            .bind(&driver.last_name)
            .bind(&driver.email)
            .bind(&driver.phone_number)
            .bind(driver.status.as_str())
            .bind(&driver.one_time_code)
            .bind(driver.one_time_expiration_time)
            .bind(driver.created_at)
            .bind(driver.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to create driver", e))?;

        Self::replace_device_links(&mut tx, &driver).await?;

        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit driver", e))?;

        Ok(driver)
    }

    async fn update_if_status(
        &self,
        driver: Driver,
        expected: DriverStatus,
    ) -> Result<Option<Driver>, DomainError> {
        let query = r#"
            UPDATE drivers SET
                first_name = ?,
                last_name = ?,
                email = ?,
                phone_number = ?,
                status = ?,
                one_time_code = ?,
                one_time_expiration_time = ?,
                updated_at = ?
            WHERE id = ? AND status = ?
        "#;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| query_error("Failed to begin transaction", e))?;

        let result = sqlx::query(query)
            .bind(&driver.first_name)
            .bind(&driver.last_name)
            .bind(&driver.email)
            .bind(&driver.phone_number)
            .bind(driver.status.as_str())
            .bind(&driver.one_time_code)
            .bind(driver.one_time_expiration_time)
            .bind(driver.updated_at)
            .bind(&driver.id)
            .bind(expected.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to update driver", e))?;

        // Zero rows: missing, or another writer moved the status first
        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| query_error("Failed to roll back driver update", e))?;
            return Ok(None);
        }

        Self::replace_device_links(&mut tx, &driver).await?;

        tx.commit()
            .await
            .map_err(|e| query_error("Failed to commit driver update", e))?;

        Ok(Some(driver))
    }
}
