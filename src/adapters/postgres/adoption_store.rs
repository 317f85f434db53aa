//! PostgreSQL implementation of AdoptionStore.
//!
//! Each unit of work is one database transaction. Rows read through it are
//! locked with `FOR UPDATE` so two requests that touch the same user or pet
//! serialize on the row lock. The partial unique index on pending requests
//! backs the one-pending-per-pet rule when two transactions race on
//! different rows.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::rows::{
    write_error, PetRow, RequestRow, ShelterRow, UserRow, DONATION_COMPLETED, PET_COLUMNS,
    REQUEST_COLUMNS, SHELTER_COLUMNS, USER_COLUMNS,
};
use crate::domain::adoption::{AdoptionRequest, Pet, PetStatus, Shelter};
use crate::domain::foundation::{
    AdoptionRequestId, DomainError, ErrorCode, PetId, ShelterId, UserId,
};
use crate::domain::ledger::PawPointTransaction;
use crate::domain::success_story::SuccessStory;
use crate::ports::{AdoptionStore, AdoptionUnitOfWork, UserRecord};

/// PostgreSQL implementation of the AdoptionStore port.
pub struct PostgresAdoptionStore {
    pool: PgPool,
}

impl PostgresAdoptionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdoptionStore for PostgresAdoptionStore {
    async fn begin(&self) -> Result<Box<dyn AdoptionUnitOfWork>, DomainError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to start transaction", e))?;
        Ok(Box::new(PostgresUnitOfWork { tx }))
    }
}

struct PostgresUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl AdoptionUnitOfWork for PostgresUnitOfWork {
    async fn find_user(&mut self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {} FROM users WHERE id = $1 FOR UPDATE",
            USER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to load user", e))?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_pet(&mut self, id: &PetId) -> Result<Option<Pet>, DomainError> {
        let row: Option<PetRow> = sqlx::query_as(&format!(
            "SELECT {} FROM pets WHERE id = $1 FOR UPDATE",
            PET_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to load pet", e))?;

        row.map(Pet::try_from).transpose()
    }

    async fn find_shelter(&mut self, id: &ShelterId) -> Result<Option<Shelter>, DomainError> {
        let row: Option<ShelterRow> = sqlx::query_as(&format!(
            "SELECT {} FROM shelters WHERE id = $1 FOR UPDATE",
            SHELTER_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to load shelter", e))?;

        Ok(row.map(Shelter::from))
    }

    async fn find_request(
        &mut self,
        id: &AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        let row: Option<RequestRow> = sqlx::query_as(&format!(
            "SELECT {} FROM adoption_requests WHERE id = $1 FOR UPDATE",
            REQUEST_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to load adoption request", e))?;

        row.map(AdoptionRequest::try_from).transpose()
    }

    async fn has_pending_request_for_pet(&mut self, pet_id: &PetId) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM adoption_requests WHERE pet_id = $1 AND status = 'pending')",
        )
        .bind(pet_id.as_uuid())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to check pending requests", e))?;

        Ok(exists)
    }

    async fn has_pending_request_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM adoption_requests WHERE user_id = $1 AND status = 'pending')",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to check pending requests", e))?;

        Ok(exists)
    }

    async fn completed_donor_ids(&mut self, pet_id: &PetId) -> Result<Vec<UserId>, DomainError> {
        let ids: Vec<uuid::Uuid> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT user_id FROM donations
            WHERE pet_id = $1 AND status = $2
            ORDER BY user_id
            "#,
        )
        .bind(pet_id.as_uuid())
        .bind(DONATION_COMPLETED)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to load donors", e))?;

        Ok(ids.into_iter().map(UserId::from_uuid).collect())
    }

    async fn insert_request(&mut self, request: &AdoptionRequest) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO adoption_requests (
                id, user_id, pet_id, shelter_id, status, paw_points_used_for_reduction,
                fee_reduction, message, status_reason, adoption_proof_image,
                created_at, updated_at, expires_at, approved_at, denied_at, cancelled_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.user_id.as_uuid())
        .bind(request.pet_id.as_uuid())
        .bind(request.shelter_id.as_uuid())
        .bind(request.status.as_str())
        .bind(request.paw_points_used_for_reduction)
        .bind(request.fee_reduction)
        .bind(&request.message)
        .bind(&request.status_reason)
        .bind(&request.adoption_proof_image)
        .bind(request.created_at.as_datetime())
        .bind(request.updated_at.as_datetime())
        .bind(request.expires_at.as_datetime())
        .bind(request.approved_at.map(|t| *t.as_datetime()))
        .bind(request.denied_at.map(|t| *t.as_datetime()))
        .bind(request.cancelled_at.map(|t| *t.as_datetime()))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| write_error("Failed to insert adoption request", request, e))?;

        Ok(())
    }

    async fn update_request(&mut self, request: &AdoptionRequest) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE adoption_requests SET
                status = $2,
                status_reason = $3,
                adoption_proof_image = $4,
                updated_at = $5,
                approved_at = $6,
                denied_at = $7,
                cancelled_at = $8
            WHERE id = $1
            "#,
        )
        .bind(request.id.as_uuid())
        .bind(request.status.as_str())
        .bind(&request.status_reason)
        .bind(&request.adoption_proof_image)
        .bind(request.updated_at.as_datetime())
        .bind(request.approved_at.map(|t| *t.as_datetime()))
        .bind(request.denied_at.map(|t| *t.as_datetime()))
        .bind(request.cancelled_at.map(|t| *t.as_datetime()))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| write_error("Failed to update adoption request", request, e))?;

        if result.rows_affected() == 0 {
            return Err(
                DomainError::new(ErrorCode::RequestNotFound, "Adoption request not found")
                    .with_detail("id", request.id.to_string()),
            );
        }
        Ok(())
    }

    async fn append_ledger_entry(
        &mut self,
        entry: &PawPointTransaction,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET paw_points = $3, updated_at = NOW()
            WHERE id = $1 AND paw_points = $2
            "#,
        )
        .bind(entry.user_id().as_uuid())
        .bind(entry.balance_before())
        .bind(entry.balance_after())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to update balance", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "Ledger entry does not follow the stored balance",
            )
            .with_detail("user_id", entry.user_id().to_string()));
        }

        sqlx::query(
            r#"
            INSERT INTO paw_point_transactions (
                id, user_id, points, transaction_type, related_donation_id,
                related_pet_id, description, balance_after, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.id().as_uuid())
        .bind(entry.user_id().as_uuid())
        .bind(entry.points())
        .bind(entry.transaction_type().as_str())
        .bind(entry.related_donation_id().map(|id| *id.as_uuid()))
        .bind(entry.related_pet_id().map(|id| *id.as_uuid()))
        .bind(entry.description())
        .bind(entry.balance_after())
        .bind(entry.created_at().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to append ledger entry", e))?;

        Ok(())
    }

    async fn update_pet_status(
        &mut self,
        pet_id: &PetId,
        status: PetStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE pets SET status = $2 WHERE id = $1")
            .bind(pet_id.as_uuid())
            .bind(status.as_str())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::database("Failed to update pet status", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PetNotFound, "Pet not found")
                .with_detail("id", pet_id.to_string()));
        }
        Ok(())
    }

    async fn update_shelter_counters(&mut self, shelter: &Shelter) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE shelters SET adoptions_completed = $2, current_published_pets = $3
            WHERE id = $1
            "#,
        )
        .bind(shelter.id.as_uuid())
        .bind(shelter.adoptions_completed)
        .bind(shelter.current_published_pets)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to update shelter counters", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ShelterNotFound, "Shelter not found")
                .with_detail("id", shelter.id.to_string()));
        }
        Ok(())
    }

    async fn insert_story(&mut self, story: &SuccessStory) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO success_stories (
                id, pet_id, story_type, adopter_id, adoption_request_id, error_reason, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(story.id.as_uuid())
        .bind(story.pet_id.as_uuid())
        .bind(story.story_type.as_str())
        .bind(story.adopter_id.map(|id| *id.as_uuid()))
        .bind(story.adoption_request_id.map(|id| *id.as_uuid()))
        .bind(&story.error_reason)
        .bind(story.created_at.as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert success story", e))?;

        for user_id in story.affected_user_ids() {
            sqlx::query(
                r#"
                INSERT INTO success_story_notifications (story_id, user_id, delivered)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(story.id.as_uuid())
            .bind(user_id.as_uuid())
            .bind(story.is_delivered(user_id))
            .execute(&mut *self.tx)
            .await
            .map_err(|e| DomainError::database("Failed to insert story notification", e))?;
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DomainError::database("Failed to roll back transaction", e))
    }
}
