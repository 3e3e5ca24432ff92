//! Alarm business logic service.

use crate::database::models::{Alarm, CreateAlarm, UpdateAlarm};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::alarm_repository::AlarmRepository;
use crate::services::device_service::DeviceService;
use sqlx::SqlitePool;
use tracing::info;
use validator::Validate;

pub struct AlarmService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AlarmService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Raises an alarm against an existing device.
    pub async fn create_alarm(&self, create_alarm: CreateAlarm) -> ServiceResult<Alarm> {
        create_alarm
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        DeviceService::new(self.pool)
            .ensure_device_exists(&create_alarm.device_id)
            .await?;

        let repo = AlarmRepository::new(self.pool);
        let alarm = repo.create_alarm(create_alarm).await?;

        info!(alarm_id = %alarm.id, device_id = %alarm.device_id, severity = %alarm.severity, "Alarm raised");
        Ok(alarm)
    }

    pub async fn list_alarms(&self) -> ServiceResult<Vec<Alarm>> {
        let repo = AlarmRepository::new(self.pool);
        Ok(repo.list_alarms().await?)
    }

    pub async fn get_alarm_required(&self, id: &str) -> ServiceResult<Alarm> {
        let repo = AlarmRepository::new(self.pool);
        let alarm = repo
            .get_alarm_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Alarm", id))?;
        Ok(alarm)
    }

    pub async fn update_alarm(&self, id: &str, update: UpdateAlarm) -> ServiceResult<Alarm> {
        update
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let mut alarm = self.get_alarm_required(id).await?;
        update.apply(&mut alarm);

        let repo = AlarmRepository::new(self.pool);
        repo.update_alarm(&alarm)
            .await?
            .ok_or_else(|| ServiceError::not_found("Alarm", id))
    }

    pub async fn delete_alarm(&self, id: &str) -> ServiceResult<()> {
        let repo = AlarmRepository::new(self.pool);
        if !repo.delete_alarm(id).await? {
            return Err(ServiceError::not_found("Alarm", id));
        }
        Ok(())
    }
}
