//! PostgreSQL implementation of StoryRepository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::rows::{story_from_rows, NotificationRow, StoryRow, STORY_COLUMNS};
use crate::domain::adoption::AdoptionError;
use crate::domain::foundation::{DomainError, PetId, SuccessStoryId, UserId};
use crate::domain::success_story::SuccessStory;
use crate::ports::StoryRepository;

pub struct PostgresStoryRepository {
    pool: PgPool,
}

impl PostgresStoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_notifications(&self, story_id: &Uuid) -> Result<Vec<NotificationRow>, DomainError> {
        sqlx::query_as(
            "SELECT user_id, delivered FROM success_story_notifications WHERE story_id = $1",
        )
        .bind(story_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load story notifications", e))
    }
}

#[async_trait]
impl StoryRepository for PostgresStoryRepository {
    async fn find_by_id(&self, id: &SuccessStoryId) -> Result<Option<SuccessStory>, DomainError> {
        let row: Option<StoryRow> = sqlx::query_as(&format!(
            "SELECT {} FROM success_stories WHERE id = $1",
            STORY_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load success story", e))?;

        match row {
            Some(row) => {
                let notifications = self.load_notifications(&row.id).await?;
                story_from_rows(row, notifications).map(Some)
            }
            None => Ok(None),
        }
    }

    async fn find_by_pet(&self, pet_id: &PetId) -> Result<Vec<SuccessStory>, DomainError> {
        let rows: Vec<StoryRow> = sqlx::query_as(&format!(
            "SELECT {} FROM success_stories WHERE pet_id = $1 ORDER BY created_at",
            STORY_COLUMNS
        ))
        .bind(pet_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load success stories", e))?;

        let mut stories = Vec::with_capacity(rows.len());
        for row in rows {
            let notifications = self.load_notifications(&row.id).await?;
            stories.push(story_from_rows(row, notifications)?);
        }
        Ok(stories)
    }

    async fn record_delivery(
        &self,
        story_id: &SuccessStoryId,
        user_id: &UserId,
    ) -> Result<(), DomainError> {
        // Rows exist only for affected users; a repeat delivery leaves the
        // first delivered_at in place.
        let result = sqlx::query(
            r#"
            UPDATE success_story_notifications
            SET delivered = TRUE, delivered_at = COALESCE(delivered_at, NOW())
            WHERE story_id = $1 AND user_id = $2
            "#,
        )
        .bind(story_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to record notification delivery", e))?;

        if result.rows_affected() == 0 {
            return Err(AdoptionError::NotAffected {
                story_id: *story_id,
                user_id: *user_id,
            }
            .into());
        }
        Ok(())
    }
}
