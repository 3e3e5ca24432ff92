//! Device business logic service.
//!
//! Handles validation and orchestration for device CRUD, including the
//! detail view that bundles a device with its tags and alarms.

use crate::database::models::{CreateDevice, Device, DeviceWithChildren, UpdateDevice};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::alarm_repository::AlarmRepository;
use crate::repositories::device_repository::DeviceRepository;
use crate::repositories::tag_repository::TagRepository;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

/// Service layer for device operations.
pub struct DeviceService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
}

impl<'a> DeviceService<'a> {
    /// Creates a new DeviceService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a device owned by the authenticated user.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` when required fields are missing
    pub async fn create_device(
        &self,
        user_id: &str,
        create_device: CreateDevice,
    ) -> ServiceResult<Device> {
        create_device
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let repo = DeviceRepository::new(self.pool);
        let device = repo.create_device(user_id, create_device).await?;

        info!(device_id = %device.id, user_id, "Device created");
        Ok(device)
    }

    pub async fn list_devices(&self) -> ServiceResult<Vec<Device>> {
        let repo = DeviceRepository::new(self.pool);
        Ok(repo.list_devices().await?)
    }

    /// Retrieves a device by ID, returning error if not found.
    pub async fn get_device_required(&self, id: &str) -> ServiceResult<Device> {
        let repo = DeviceRepository::new(self.pool);
        let device = repo
            .get_device_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Device", id))?;
        Ok(device)
    }

    /// Retrieves a device together with its tags and alarms.
    pub async fn get_device_with_children(&self, id: &str) -> ServiceResult<DeviceWithChildren> {
        let device = self.get_device_required(id).await?;
        let tags = TagRepository::new(self.pool)
            .list_tags_by_device(id)
            .await?;
        let alarms = AlarmRepository::new(self.pool)
            .list_alarms_by_device(id)
            .await?;

        Ok(DeviceWithChildren {
            device,
            tags,
            alarms,
        })
    }

    /// Applies a partial update to an existing device.
    pub async fn update_device(&self, id: &str, update: UpdateDevice) -> ServiceResult<Device> {
        update
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let mut device = self.get_device_required(id).await?;
        update.apply(&mut device);

        let repo = DeviceRepository::new(self.pool);
        repo.update_device(&device)
            .await?
            .ok_or_else(|| ServiceError::not_found("Device", id))
    }

    /// Deletes a device along with its tags and alarms.
    pub async fn delete_device(&self, id: &str) -> ServiceResult<()> {
        let repo = DeviceRepository::new(self.pool);
        if !repo.delete_device(id).await? {
            return Err(ServiceError::not_found("Device", id));
        }

        info!(device_id = id, "Device deleted");
        Ok(())
    }

    /// Fails with `NotFound` unless a live device has this id.
    pub async fn ensure_device_exists(&self, id: &str) -> ServiceResult<()> {
        let repo = DeviceRepository::new(self.pool);
        if repo.device_exists(id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Device", id))
        }
    }
}
