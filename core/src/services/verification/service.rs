//! Main verification service implementation

use std::sync::Arc;

use da_shared::phone::{is_valid_phone, mask_phone_number, normalize_phone_number};

use crate::domain::entities::device::{DeviceDetails, MAX_DEVICE_ID_LENGTH};
use crate::domain::entities::driver::{Driver, DriverStatus};
use crate::errors::{DomainResult, VerificationError};
use crate::repositories::{DeviceRepository, DriverRepository, DriverSearchRepository};

use super::config::VerificationServiceConfig;
use super::traits::{Clock, CodeGenerator, RandomCodeGenerator, SystemClock};
use super::types::{InviteDriver, VerifyCode};

/// Verification service for inviting drivers and confirming their one-time codes
pub struct VerificationService<D, V, S>
where
    D: DriverRepository,
    V: DeviceRepository,
    S: DriverSearchRepository,
{
    /// Authoritative driver store
    drivers: Arc<D>,
    /// Device record store
    devices: Arc<V>,
    /// Best-effort search mirror
    search: Arc<S>,
    /// Source of new one-time codes
    code_generator: Arc<dyn CodeGenerator>,
    /// Source of the current instant
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<D, V, S> VerificationService<D, V, S>
where
    D: DriverRepository,
    V: DeviceRepository,
    S: DriverSearchRepository,
{
    /// Create a new verification service using the OS RNG and the wall clock
    ///
    /// # Arguments
    ///
    /// * `drivers` - Driver store
    /// * `devices` - Device store
    /// * `search` - Search mirror
    /// * `config` - Service configuration
    pub fn new(
        drivers: Arc<D>,
        devices: Arc<V>,
        search: Arc<S>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            drivers,
            devices,
            search,
            code_generator: Arc::new(RandomCodeGenerator),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    /// Replace the code generator
    pub fn with_code_generator(mut self, code_generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    /// Replace the clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Invite a driver by phone number
    ///
    /// Stores a new driver in INVITED state with a generated code valid for
    /// `code_ttl_minutes`.
    ///
    /// # Returns
    ///
    /// * `Ok(Driver)` - The stored driver
    /// * `Err(DomainError)` - `IdExists` or `InvalidPhone`, or a store failure
    pub async fn invite(&self, request: InviteDriver) -> DomainResult<Driver> {
        if request.id.is_some() {
            tracing::warn!(event = "invite_rejected", reason = "idexists", "Invite request carried an ID");
            return Err(VerificationError::IdExists.into());
        }

        let phone = normalize_phone_number(&request.phone_number);
        if !is_valid_phone(&phone) {
            tracing::warn!(
                phone = %mask_phone_number(&phone),
                event = "invite_rejected",
                reason = "invalidPhone",
                "Invite request carried an invalid phone number"
            );
            return Err(VerificationError::InvalidPhone {
                phone: request.phone_number,
            }
            .into());
        }

        let code = self.code_generator.generate();
        let now = self.clock.now();
        let driver = Driver::invite(phone, code, now, self.config.code_ttl_minutes)
            .with_name(request.first_name, request.last_name)
            .with_email(request.email);

        let driver = self.drivers.create(driver).await?;

        tracing::info!(
            driver_id = %driver.id,
            phone = %mask_phone_number(&driver.phone_number),
            expires_at = ?driver.one_time_expiration_time,
            event = "driver_invited",
            "Issued one-time code for invited driver"
        );

        self.mirror(&driver).await;
        Ok(driver)
    }

    /// Verify a one-time code and confirm the driver
    ///
    /// Checks run in order and stop at the first failure:
    /// 1. The request names a driver (`IdNotPresent`), before any store access
    /// 2. The driver exists (`DriverNotFound`)
    /// 3. The driver is INVITED (`AlreadyConfirmed`)
    /// 4. The code has not expired (`CodeExpired`)
    /// 5. The code matches ignoring case (`CodeMismatch`)
    /// 6. The device ID fits the device store (`InvalidDeviceId`)
    ///
    /// On success a new device record replaces the driver's devices, the
    /// driver becomes CONFIRMED and the write is applied only if the stored
    /// status is still INVITED; losing that race is reported as
    /// `AlreadyConfirmed` and the unlinked device record is removed.
    pub async fn verify(&self, request: VerifyCode) -> DomainResult<Driver> {
        let driver_id = match request.driver_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                tracing::warn!(event = "verify_rejected", reason = "idnotpresent", "Verify request without driver ID");
                return Err(VerificationError::IdNotPresent.into());
            }
        };

        let mut driver = self
            .drivers
            .find_by_id(&driver_id)
            .await?
            .ok_or_else(|| VerificationError::DriverNotFound {
                id: driver_id.clone(),
            })?;

        if !driver.is_invited() {
            tracing::warn!(
                driver_id = %driver_id,
                status = %driver.status,
                event = "verify_rejected",
                reason = "alreadyConfirmed",
                "Driver is not awaiting verification"
            );
            return Err(VerificationError::AlreadyConfirmed.into());
        }

        let now = self.clock.now();
        if driver.is_code_expired(now) {
            tracing::warn!(
                driver_id = %driver_id,
                expires_at = ?driver.one_time_expiration_time,
                event = "verify_rejected",
                reason = "codeExpired",
                "One-time code expired"
            );
            return Err(VerificationError::CodeExpired.into());
        }

        let code_ok = request
            .one_time_code
            .as_deref()
            .map(|code| driver.code_matches(code))
            .unwrap_or(false);
        if !code_ok {
            tracing::warn!(
                driver_id = %driver_id,
                event = "verify_rejected",
                reason = "codeMisMatch",
                "One-time code mismatch"
            );
            return Err(VerificationError::CodeMismatch.into());
        }

        let device_id = request
            .device_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| self.config.default_device_id.clone());
        if device_id.chars().count() > MAX_DEVICE_ID_LENGTH {
            tracing::warn!(
                driver_id = %driver_id,
                length = device_id.chars().count(),
                event = "verify_rejected",
                reason = "invalidDeviceId",
                "Device ID too long"
            );
            return Err(VerificationError::InvalidDeviceId {
                max: MAX_DEVICE_ID_LENGTH,
            }
            .into());
        }
        let device = self.devices.create(DeviceDetails::new(device_id, now)).await?;
        let device_record_id = device.id.clone();

        driver.confirm(device, now);

        // The device row is only linked by a successful conditional write
        let driver = match self
            .drivers
            .update_if_status(driver, DriverStatus::Invited)
            .await
        {
            Ok(Some(driver)) => driver,
            Ok(None) => {
                tracing::warn!(
                    driver_id = %driver_id,
                    event = "verify_conflict",
                    "Driver was confirmed by a concurrent request"
                );
                self.discard_device(&device_record_id).await;
                return Err(VerificationError::AlreadyConfirmed.into());
            }
            Err(e) => {
                self.discard_device(&device_record_id).await;
                return Err(e);
            }
        };

        tracing::info!(
            driver_id = %driver.id,
            device_id = driver.devices.first().map(|d| d.device_id.as_str()).unwrap_or_default(),
            event = "driver_confirmed",
            "Driver phone number verified"
        );

        self.mirror(&driver).await;
        Ok(driver)
    }

    /// Remove a device record left unlinked by a failed confirmation
    async fn discard_device(&self, device_record_id: &str) {
        if let Err(e) = self.devices.delete(device_record_id).await {
            tracing::warn!(
                device_record_id,
                error = %e,
                event = "device_cleanup_failed",
                "Failed to remove unlinked device record"
            );
        }
    }

    /// Hand the driver to the search mirror; failures are logged only
    async fn mirror(&self, driver: &Driver) {
        if let Err(e) = self.search.index(driver).await {
            tracing::warn!(
                driver_id = %driver.id,
                error = %e,
                event = "search_index_failed",
                "Failed to mirror driver into search index"
            );
        }
    }
}
