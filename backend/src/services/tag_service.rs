//! Tag business logic service.

use crate::database::models::{CreateTag, Tag, UpdateTag};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::tag_repository::TagRepository;
use crate::services::device_service::DeviceService;
use sqlx::SqlitePool;
use validator::Validate;

pub struct TagService<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TagService<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a tag on an existing device.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - A `device_id` that does not reference a live device
    pub async fn create_tag(&self, create_tag: CreateTag) -> ServiceResult<Tag> {
        create_tag
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        DeviceService::new(self.pool)
            .ensure_device_exists(&create_tag.device_id)
            .await?;

        let repo = TagRepository::new(self.pool);
        Ok(repo.create_tag(create_tag).await?)
    }

    pub async fn list_tags(&self) -> ServiceResult<Vec<Tag>> {
        let repo = TagRepository::new(self.pool);
        Ok(repo.list_tags().await?)
    }

    pub async fn get_tag_required(&self, id: &str) -> ServiceResult<Tag> {
        let repo = TagRepository::new(self.pool);
        let tag = repo
            .get_tag_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Tag", id))?;
        Ok(tag)
    }

    pub async fn update_tag(&self, id: &str, update: UpdateTag) -> ServiceResult<Tag> {
        update
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let mut tag = self.get_tag_required(id).await?;
        update.apply(&mut tag);

        let repo = TagRepository::new(self.pool);
        repo.update_tag(&tag)
            .await?
            .ok_or_else(|| ServiceError::not_found("Tag", id))
    }

    pub async fn delete_tag(&self, id: &str) -> ServiceResult<()> {
        let repo = TagRepository::new(self.pool);
        if !repo.delete_tag(id).await? {
            return Err(ServiceError::not_found("Tag", id));
        }
        Ok(())
    }
}
