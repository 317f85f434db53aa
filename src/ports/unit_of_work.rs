//! Unit of work port - atomic adoption mutations.
//!
//! Every write operation of the adoption core opens one unit of work, does all
//! of its reads and writes through it, and then commits. Dropping or rolling
//! back a unit of work discards everything it wrote.
//!
//! # Storage guarantees
//!
//! - At most one pending request per pet. `insert_request` and
//!   `update_request` fail with `PendingRequestExists` otherwise.
//! - `append_ledger_entry` is the only way to change a user's cached balance.
//!   It sets the balance to the entry's `balance_after` and fails with
//!   `ConcurrentModification` if the entry does not follow from the stored
//!   balance.
//! - Rows read through a unit of work are protected against concurrent
//!   writers until it finishes.
//!
//! # Example
//!
//! ```ignore
//! let mut uow = store.begin().await?;
//! let user = uow.find_user(&user_id).await?.ok_or(...)?;
//! uow.append_ledger_entry(&entry).await?;
//! uow.insert_request(&request).await?;
//! uow.commit().await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::adoption::{AdoptionRequest, Pet, PetStatus, Shelter};
use crate::domain::eligibility::AdopterProfile;
use crate::domain::foundation::{AdoptionRequestId, DomainError, PetId, ShelterId, UserId};
use crate::domain::ledger::PawPointTransaction;
use crate::domain::success_story::SuccessStory;

/// The slice of a user account the adoption core works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    /// Cached balance; only ledger appends change it.
    pub paw_points: i64,
    pub profile: AdopterProfile,
}

/// Opens units of work.
#[async_trait]
pub trait AdoptionStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn AdoptionUnitOfWork>, DomainError>;
}

/// One atomic scope of adoption reads and writes.
#[async_trait]
pub trait AdoptionUnitOfWork: Send {
    /// Loads a user and protects its balance until the unit of work ends.
    async fn find_user(&mut self, id: &UserId) -> Result<Option<UserRecord>, DomainError>;

    async fn find_pet(&mut self, id: &PetId) -> Result<Option<Pet>, DomainError>;

    async fn find_shelter(&mut self, id: &ShelterId) -> Result<Option<Shelter>, DomainError>;

    async fn find_request(
        &mut self,
        id: &AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, DomainError>;

    async fn has_pending_request_for_pet(&mut self, pet_id: &PetId) -> Result<bool, DomainError>;

    async fn has_pending_request_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<bool, DomainError>;

    /// Distinct users with a completed donation to the pet.
    async fn completed_donor_ids(&mut self, pet_id: &PetId) -> Result<Vec<UserId>, DomainError>;

    async fn insert_request(&mut self, request: &AdoptionRequest) -> Result<(), DomainError>;

    async fn update_request(&mut self, request: &AdoptionRequest) -> Result<(), DomainError>;

    /// Appends a ledger row and moves the owner's cached balance with it.
    async fn append_ledger_entry(&mut self, entry: &PawPointTransaction)
        -> Result<(), DomainError>;

    async fn update_pet_status(
        &mut self,
        pet_id: &PetId,
        status: PetStatus,
    ) -> Result<(), DomainError>;

    /// Persists a shelter's adoption counters.
    async fn update_shelter_counters(&mut self, shelter: &Shelter) -> Result<(), DomainError>;

    async fn insert_story(&mut self, story: &SuccessStory) -> Result<(), DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;

    async fn rollback(self: Box<Self>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_unit_of_work_are_object_safe() {
        fn _accepts_store(_store: &dyn AdoptionStore) {}
        fn _accepts_uow(_uow: Box<dyn AdoptionUnitOfWork>) {}
    }
}
