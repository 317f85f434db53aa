//! Adoption reader port (read side).
//!
//! Queries used by eligibility checks and caller-facing reads. Reads never
//! run inside a unit of work; anything a write depends on is re-read through
//! the unit of work.

use async_trait::async_trait;

use super::UserRecord;
use crate::domain::adoption::{AdoptionRequest, AdoptionRequestStatus, Pet, Shelter};
use crate::domain::foundation::{AdoptionRequestId, DomainError, PetId, ShelterId, UserId};

#[async_trait]
pub trait AdoptionReader: Send + Sync {
    async fn find_user(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError>;

    async fn find_pet(&self, id: &PetId) -> Result<Option<Pet>, DomainError>;

    async fn find_shelter(&self, id: &ShelterId) -> Result<Option<Shelter>, DomainError>;

    async fn find_request(
        &self,
        id: &AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, DomainError>;

    async fn has_pending_request_for_user(&self, user_id: &UserId) -> Result<bool, DomainError>;

    async fn has_pending_request_for_pet(&self, pet_id: &PetId) -> Result<bool, DomainError>;

    async fn has_completed_donation(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<bool, DomainError>;

    /// The user's cancelled request with the latest `cancelled_at`.
    async fn most_recent_cancelled(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AdoptionRequest>, DomainError>;

    /// The user's request with the latest `updated_at`, whatever its status.
    async fn most_recent_updated(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AdoptionRequest>, DomainError>;

    /// All requests by the user, newest first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AdoptionRequest>, DomainError>;

    /// Requests for the shelter's pets, newest first, optionally by status.
    async fn list_by_shelter(
        &self,
        shelter_id: &ShelterId,
        status: Option<AdoptionRequestStatus>,
    ) -> Result<Vec<AdoptionRequest>, DomainError>;

    /// Published pets the user has a completed donation to.
    async fn donated_published_pets(&self, user_id: &UserId) -> Result<Vec<Pet>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adoption_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn AdoptionReader) {}
    }
}
