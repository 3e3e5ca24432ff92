//! Database repository for device alarms.

use crate::database::models::{Alarm, CreateAlarm};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const ALARM_COLUMNS: &str =
    "id, device_id, message, severity, timestamp, acknowledged, created_at, updated_at, deleted_at";

pub struct AlarmRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AlarmRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_alarm(&self, alarm: CreateAlarm) -> Result<Alarm> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO alarms (id, device_id, message, severity, timestamp, acknowledged,
                                 created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {ALARM_COLUMNS}"
        );

        let alarm = sqlx::query_as::<_, Alarm>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(alarm.device_id)
            .bind(alarm.message)
            .bind(alarm.severity)
            .bind(alarm.timestamp.unwrap_or(now))
            .bind(alarm.acknowledged)
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(alarm)
    }

    pub async fn get_alarm_by_id(&self, id: &str) -> Result<Option<Alarm>> {
        let query =
            format!("SELECT {ALARM_COLUMNS} FROM alarms WHERE id = ? AND deleted_at IS NULL");

        let alarm = sqlx::query_as::<_, Alarm>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(alarm)
    }

    /// Lists live alarms, most recent first.
    pub async fn list_alarms(&self) -> Result<Vec<Alarm>> {
        let query = format!(
            "SELECT {ALARM_COLUMNS} FROM alarms WHERE deleted_at IS NULL
             ORDER BY timestamp DESC, id DESC"
        );

        let alarms = sqlx::query_as::<_, Alarm>(&query)
            .fetch_all(self.pool)
            .await?;

        Ok(alarms)
    }

    pub async fn list_alarms_by_device(&self, device_id: &str) -> Result<Vec<Alarm>> {
        let query = format!(
            "SELECT {ALARM_COLUMNS} FROM alarms WHERE device_id = ? AND deleted_at IS NULL
             ORDER BY timestamp DESC, id DESC"
        );

        let alarms = sqlx::query_as::<_, Alarm>(&query)
            .bind(device_id)
            .fetch_all(self.pool)
            .await?;

        Ok(alarms)
    }

    pub async fn update_alarm(&self, alarm: &Alarm) -> Result<Option<Alarm>> {
        let query = format!(
            "UPDATE alarms
             SET message = ?, severity = ?, timestamp = ?, acknowledged = ?, updated_at = ?
             WHERE id = ? AND deleted_at IS NULL
             RETURNING {ALARM_COLUMNS}"
        );

        let alarm = sqlx::query_as::<_, Alarm>(&query)
            .bind(&alarm.message)
            .bind(&alarm.severity)
            .bind(alarm.timestamp)
            .bind(alarm.acknowledged)
            .bind(Utc::now())
            .bind(&alarm.id)
            .fetch_optional(self.pool)
            .await?;

        Ok(alarm)
    }

    /// # Returns
    /// `false` when no live alarm had this id
    pub async fn delete_alarm(&self, id: &str) -> Result<bool> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE alarms SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
