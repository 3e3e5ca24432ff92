//! Database repository for device tags.

use crate::database::models::{CreateTag, Tag};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const TAG_COLUMNS: &str = "id, device_id, name, address, data_type, value, unit, access, \
     created_at, updated_at, deleted_at";

pub struct TagRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TagRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_tag(&self, tag: CreateTag) -> Result<Tag> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO tags (id, device_id, name, address, data_type, value, unit, access,
                               created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {TAG_COLUMNS}"
        );

        let tag = sqlx::query_as::<_, Tag>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(tag.device_id)
            .bind(tag.name)
            .bind(tag.address)
            .bind(tag.data_type)
            .bind(tag.value)
            .bind(tag.unit)
            .bind(tag.access.unwrap_or_else(|| "Read Only".to_string()))
            .bind(now)
            .bind(now)
            .fetch_one(self.pool)
            .await?;

        Ok(tag)
    }

    pub async fn get_tag_by_id(&self, id: &str) -> Result<Option<Tag>> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags WHERE id = ? AND deleted_at IS NULL");

        let tag = sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(tag)
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let query = format!(
            "SELECT {TAG_COLUMNS} FROM tags WHERE deleted_at IS NULL
             ORDER BY created_at DESC, id DESC"
        );

        let tags = sqlx::query_as::<_, Tag>(&query).fetch_all(self.pool).await?;

        Ok(tags)
    }

    pub async fn list_tags_by_device(&self, device_id: &str) -> Result<Vec<Tag>> {
        let query = format!(
            "SELECT {TAG_COLUMNS} FROM tags WHERE device_id = ? AND deleted_at IS NULL
             ORDER BY created_at ASC, id ASC"
        );

        let tags = sqlx::query_as::<_, Tag>(&query)
            .bind(device_id)
            .fetch_all(self.pool)
            .await?;

        Ok(tags)
    }

    pub async fn update_tag(&self, tag: &Tag) -> Result<Option<Tag>> {
        let query = format!(
            "UPDATE tags
             SET name = ?, address = ?, data_type = ?, value = ?, unit = ?, access = ?,
                 updated_at = ?
             WHERE id = ? AND deleted_at IS NULL
             RETURNING {TAG_COLUMNS}"
        );

        let tag = sqlx::query_as::<_, Tag>(&query)
            .bind(&tag.name)
            .bind(&tag.address)
            .bind(&tag.data_type)
            .bind(&tag.value)
            .bind(&tag.unit)
            .bind(&tag.access)
            .bind(Utc::now())
            .bind(&tag.id)
            .fetch_optional(self.pool)
            .await?;

        Ok(tag)
    }

    /// # Returns
    /// `false` when no live tag had this id
    pub async fn delete_tag(&self, id: &str) -> Result<bool> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE tags SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
