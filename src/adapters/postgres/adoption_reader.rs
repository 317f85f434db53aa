//! PostgreSQL implementation of AdoptionReader.

use async_trait::async_trait;
use sqlx::PgPool;

use super::rows::{
    PetRow, RequestRow, ShelterRow, UserRow, DONATION_COMPLETED, PET_COLUMNS, REQUEST_COLUMNS,
    SHELTER_COLUMNS, USER_COLUMNS,
};
use crate::domain::adoption::{AdoptionRequest, AdoptionRequestStatus, Pet, Shelter};
use crate::domain::foundation::{AdoptionRequestId, DomainError, PetId, ShelterId, UserId};
use crate::ports::{AdoptionReader, UserRecord};

/// Read-side queries over adoption requests and the surrounding catalog.
pub struct PostgresAdoptionReader {
    pool: PgPool,
}

impl PostgresAdoptionReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_requests(
        &self,
        sql: &str,
        id: &uuid::Uuid,
        status: Option<&str>,
    ) -> Result<Vec<AdoptionRequest>, DomainError> {
        let mut query = sqlx::query_as::<_, RequestRow>(sql).bind(id);
        if let Some(status) = status {
            query = query.bind(status);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to list adoption requests", e))?;

        rows.into_iter().map(AdoptionRequest::try_from).collect()
    }

    async fn fetch_latest(
        &self,
        sql: &str,
        user_id: &UserId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        let row: Option<RequestRow> = sqlx::query_as(sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to load adoption history", e))?;

        row.map(AdoptionRequest::try_from).transpose()
    }

    async fn exists(&self, sql: &str, id: &uuid::Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check pending requests", e))
    }
}

#[async_trait]
impl AdoptionReader for PostgresAdoptionReader {
    async fn find_user(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to load user", e))?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_pet(&self, id: &PetId) -> Result<Option<Pet>, DomainError> {
        let row: Option<PetRow> =
            sqlx::query_as(&format!("SELECT {} FROM pets WHERE id = $1", PET_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to load pet", e))?;

        row.map(Pet::try_from).transpose()
    }

    async fn find_shelter(&self, id: &ShelterId) -> Result<Option<Shelter>, DomainError> {
        let row: Option<ShelterRow> =
            sqlx::query_as(&format!("SELECT {} FROM shelters WHERE id = $1", SHELTER_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database("Failed to load shelter", e))?;

        Ok(row.map(Shelter::from))
    }

    async fn find_request(
        &self,
        id: &AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        let row: Option<RequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM adoption_requests WHERE id = $1",
            REQUEST_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load adoption request", e))?;

        row.map(AdoptionRequest::try_from).transpose()
    }

    async fn has_pending_request_for_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM adoption_requests WHERE user_id = $1 AND status = 'pending')",
            user_id.as_uuid(),
        )
        .await
    }

    async fn has_pending_request_for_pet(&self, pet_id: &PetId) -> Result<bool, DomainError> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM adoption_requests WHERE pet_id = $1 AND status = 'pending')",
            pet_id.as_uuid(),
        )
        .await
    }

    async fn has_completed_donation(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM donations WHERE user_id = $1 AND pet_id = $2 AND status = $3
            )
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(pet_id.as_uuid())
        .bind(DONATION_COMPLETED)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to check donations", e))
    }

    async fn most_recent_cancelled(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        self.fetch_latest(
            &format!(
                "SELECT {} FROM adoption_requests \
                 WHERE user_id = $1 AND status = 'cancelled' \
                 ORDER BY COALESCE(cancelled_at, updated_at) DESC LIMIT 1",
                REQUEST_COLUMNS
            ),
            user_id,
        )
        .await
    }

    async fn most_recent_updated(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        self.fetch_latest(
            &format!(
                "SELECT {} FROM adoption_requests WHERE user_id = $1 \
                 ORDER BY updated_at DESC LIMIT 1",
                REQUEST_COLUMNS
            ),
            user_id,
        )
        .await
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AdoptionRequest>, DomainError> {
        self.fetch_requests(
            &format!(
                "SELECT {} FROM adoption_requests WHERE user_id = $1 ORDER BY created_at DESC",
                REQUEST_COLUMNS
            ),
            user_id.as_uuid(),
            None,
        )
        .await
    }

    async fn list_by_shelter(
        &self,
        shelter_id: &ShelterId,
        status: Option<AdoptionRequestStatus>,
    ) -> Result<Vec<AdoptionRequest>, DomainError> {
        let filter = if status.is_some() { " AND status = $2" } else { "" };
        self.fetch_requests(
            &format!(
                "SELECT {} FROM adoption_requests WHERE shelter_id = $1{} ORDER BY created_at DESC",
                REQUEST_COLUMNS, filter
            ),
            shelter_id.as_uuid(),
            status.map(|s| s.as_str()),
        )
        .await
    }

    async fn donated_published_pets(&self, user_id: &UserId) -> Result<Vec<Pet>, DomainError> {
        let rows: Vec<PetRow> = sqlx::query_as(&format!(
            "SELECT {} FROM pets p WHERE p.status = 'published' AND EXISTS ( \
                 SELECT 1 FROM donations d \
                 WHERE d.pet_id = p.id AND d.user_id = $1 AND d.status = $2) \
             ORDER BY p.name",
            PET_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(DONATION_COMPLETED)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to load donated pets", e))?;

        rows.into_iter().map(Pet::try_from).collect()
    }
}
