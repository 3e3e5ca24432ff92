//! Database repository for device operations.
//!
//! Provides CRUD operations for devices. Deleting a device also soft-deletes
//! the tags and alarms attached to it.

use crate::database::models::{CreateDevice, Device};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const DEVICE_COLUMNS: &str = "id, user_id, name, device_type, model, ip, status, location, \
     last_seen, description, created_at, updated_at, deleted_at";

/// Repository for device database operations.
pub struct DeviceRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> DeviceRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a device owned by `user_id`.
    pub async fn create_device(&self, user_id: &str, device: CreateDevice) -> Result<Device> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO devices (id, user_id, name, device_type, model, ip, status, location,
                                  last_seen, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {DEVICE_COLUMNS}"
        );

        let device = sqlx::query_as::<_, Device>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(user_id)
            .bind(device.name)
            .bind(device.device_type)
            .bind(device.model)
            .bind(device.ip)
            .bind(device.status.unwrap_or_else(|| "offline".to_string()))
            .bind(device.location)
            .bind(device.last_seen)
            .bind(device.description)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(device)
    }

    pub async fn get_device_by_id(&self, id: &str) -> Result<Option<Device>> {
        let query =
            format!("SELECT {DEVICE_COLUMNS} FROM devices WHERE id = ? AND deleted_at IS NULL");

        let device = sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(device)
    }

    /// Lists all live devices, newest first.
    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        let query = format!(
            "SELECT {DEVICE_COLUMNS} FROM devices WHERE deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        );

        let devices = sqlx::query_as::<_, Device>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(devices)
    }

    /// Writes back every mutable column of `device`.
    ///
    /// # Returns
    /// `None` when the device was deleted since it was read
    pub async fn update_device(&self, device: &Device) -> Result<Option<Device>> {
        let query = format!(
            "UPDATE devices
             SET name = ?, device_type = ?, model = ?, ip = ?, status = ?, location = ?,
                 last_seen = ?, description = ?, updated_at = ?
             WHERE id = ? AND deleted_at IS NULL
             RETURNING {DEVICE_COLUMNS}"
        );

        let device = sqlx::query_as::<_, Device>(&query)
            .bind(&device.name)
            .bind(&device.device_type)
            .bind(&device.model)
            .bind(&device.ip)
            .bind(&device.status)
            .bind(&device.location)
            .bind(device.last_seen)
            .bind(&device.description)
            .bind(Utc::now())
            .bind(&device.id)
            .fetch_optional(self.pool)
            .await?;

        Ok(device)
    }

    /// Soft-deletes a device and its children in one transaction.
    ///
    /// # Returns
    /// `false` when no live device had this id
    pub async fn delete_device(&self, id: &str) -> Result<bool> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE devices SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        for table in ["tags", "alarms"] {
            let query = format!(
                "UPDATE {table} SET deleted_at = ?, updated_at = ?
                 WHERE device_id = ? AND deleted_at IS NULL"
            );
            sqlx::query(&query)
                .bind(now)
                .bind(now)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(true)
    }

    pub async fn device_exists(&self, id: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM devices WHERE id = ? AND deleted_at IS NULL")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(count > 0)
    }
}
