//! In-memory adoption store.
//!
//! Implements every storage port over a single shared state. A unit of work
//! holds the state's async mutex for its whole lifetime and works on a copy;
//! commit swaps the copy in, rollback or drop throws it away. Units of work
//! are therefore fully serialized.
//!
//! Reader methods take the same mutex briefly. Calling a reader method while
//! the same task holds a unit of work waits forever.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::adoption::{
    AdoptionRequest, AdoptionRequestStatus, Pet, PetStatus, Shelter,
};
use crate::domain::eligibility::AdopterProfile;
use crate::domain::foundation::{
    AdoptionRequestId, DomainError, ErrorCode, PetId, ShelterId, SuccessStoryId, Timestamp,
    UserId,
};
use crate::domain::ledger::{PawPointTransaction, PointsAccount, TransactionType};
use crate::domain::success_story::SuccessStory;
use crate::ports::{
    AdoptionReader, AdoptionStore, AdoptionUnitOfWork, CachedBalance, LedgerReader,
    StoryRepository, UserRecord,
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct DonationRecord {
    user_id: UserId,
    pet_id: PetId,
    completed: bool,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    users: HashMap<UserId, UserRecord>,
    pets: HashMap<PetId, Pet>,
    shelters: HashMap<ShelterId, Shelter>,
    donations: Vec<DonationRecord>,
    requests: HashMap<AdoptionRequestId, AdoptionRequest>,
    ledger: Vec<PawPointTransaction>,
    stories: Vec<SuccessStory>,
}

impl StoreState {
    fn pending_for_pet(&self, pet_id: &PetId) -> Option<&AdoptionRequest> {
        self.requests
            .values()
            .find(|r| r.pet_id == *pet_id && r.status == AdoptionRequestStatus::Pending)
    }

    fn has_pending_for_user(&self, user_id: &UserId) -> bool {
        self.requests
            .values()
            .any(|r| r.user_id == *user_id && r.status == AdoptionRequestStatus::Pending)
    }

    fn completed_donors(&self, pet_id: &PetId) -> Vec<UserId> {
        let mut donors: Vec<UserId> = self
            .donations
            .iter()
            .filter(|d| d.pet_id == *pet_id && d.completed)
            .map(|d| d.user_id)
            .collect();
        donors.sort();
        donors.dedup();
        donors
    }

    fn ensure_single_pending(&self, request: &AdoptionRequest) -> Result<(), DomainError> {
        if request.status != AdoptionRequestStatus::Pending {
            return Ok(());
        }
        match self.pending_for_pet(&request.pet_id) {
            Some(existing) if existing.id != request.id => Err(DomainError::new(
                ErrorCode::PendingRequestExists,
                "Pet already has a pending adoption request",
            )
            .with_detail("pet_id", request.pet_id.to_string())),
            _ if self.requests.values().any(|r| {
                r.id != request.id
                    && r.user_id == request.user_id
                    && r.status == AdoptionRequestStatus::Pending
            }) =>
            {
                Err(DomainError::new(
                    ErrorCode::NotEligible,
                    "You already have a pending adoption request",
                ))
            }
            _ => Ok(()),
        }
    }

    fn append_entry(&mut self, entry: &PawPointTransaction) -> Result<(), DomainError> {
        let user = self.users.get_mut(&entry.user_id()).ok_or_else(|| {
            DomainError::new(ErrorCode::UserNotFound, "User not found")
                .with_detail("id", entry.user_id().to_string())
        })?;
        if entry.balance_before() != user.paw_points {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "Ledger entry does not follow the stored balance",
            )
            .with_detail("stored_balance", user.paw_points.to_string())
            .with_detail("entry_balance_before", entry.balance_before().to_string()));
        }
        if entry.balance_after() < 0 {
            return Err(DomainError::validation(
                "paw_points",
                "Balance cannot become negative",
            ));
        }
        user.paw_points = entry.balance_after();
        self.ledger.push(entry.clone());
        Ok(())
    }
}

/// Shared in-memory storage for all adoption ports.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAdoptionStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryAdoptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding (catalog and accounts are owned by other subsystems) ===

    /// Adds a user with a zero balance.
    pub async fn add_user(&self, id: UserId, profile: AdopterProfile) {
        self.state.lock().await.users.insert(
            id,
            UserRecord {
                id,
                paw_points: 0,
                profile,
            },
        );
    }

    pub async fn add_shelter(&self, shelter: Shelter) {
        self.state.lock().await.shelters.insert(shelter.id, shelter);
    }

    pub async fn add_pet(&self, pet: Pet) {
        self.state.lock().await.pets.insert(pet.id, pet);
    }

    /// Records a donation by `user_id` to `pet_id`.
    pub async fn add_donation(&self, user_id: UserId, pet_id: PetId, completed: bool) {
        self.state.lock().await.donations.push(DonationRecord {
            user_id,
            pet_id,
            completed,
        });
    }

    /// Credits PawPoints earned outside the adoption core through the ledger.
    ///
    /// `granted_at` must not precede rows already on the user's ledger.
    pub async fn grant_points(
        &self,
        user_id: UserId,
        points: i64,
        transaction_type: TransactionType,
        related_pet_id: Option<PetId>,
        granted_at: Timestamp,
    ) -> Result<PawPointTransaction, DomainError> {
        let mut state = self.state.lock().await;
        let balance = state
            .users
            .get(&user_id)
            .map(|u| u.paw_points)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::UserNotFound, "User not found")
                    .with_detail("id", user_id.to_string())
            })?;
        let entry = PointsAccount::open(user_id, balance).award(
            points,
            transaction_type,
            related_pet_id,
            granted_at,
        )?;
        state.append_entry(&entry)?;
        Ok(entry)
    }
}

#[async_trait]
impl AdoptionStore for InMemoryAdoptionStore {
    async fn begin(&self) -> Result<Box<dyn AdoptionUnitOfWork>, DomainError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryUnitOfWork { guard, working }))
    }
}

struct InMemoryUnitOfWork {
    guard: OwnedMutexGuard<StoreState>,
    working: StoreState,
}

#[async_trait]
impl AdoptionUnitOfWork for InMemoryUnitOfWork {
    async fn find_user(&mut self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.working.users.get(id).cloned())
    }

    async fn find_pet(&mut self, id: &PetId) -> Result<Option<Pet>, DomainError> {
        Ok(self.working.pets.get(id).cloned())
    }

    async fn find_shelter(&mut self, id: &ShelterId) -> Result<Option<Shelter>, DomainError> {
        Ok(self.working.shelters.get(id).cloned())
    }

    async fn find_request(
        &mut self,
        id: &AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        Ok(self.working.requests.get(id).cloned())
    }

    async fn has_pending_request_for_pet(&mut self, pet_id: &PetId) -> Result<bool, DomainError> {
        Ok(self.working.pending_for_pet(pet_id).is_some())
    }

    async fn has_pending_request_for_user(
        &mut self,
        user_id: &UserId,
    ) -> Result<bool, DomainError> {
        Ok(self.working.has_pending_for_user(user_id))
    }

    async fn completed_donor_ids(&mut self, pet_id: &PetId) -> Result<Vec<UserId>, DomainError> {
        Ok(self.working.completed_donors(pet_id))
    }

    async fn insert_request(&mut self, request: &AdoptionRequest) -> Result<(), DomainError> {
        self.working.ensure_single_pending(request)?;
        self.working.requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn update_request(&mut self, request: &AdoptionRequest) -> Result<(), DomainError> {
        if !self.working.requests.contains_key(&request.id) {
            return Err(DomainError::new(ErrorCode::RequestNotFound, "Adoption request not found")
                .with_detail("id", request.id.to_string()));
        }
        self.working.ensure_single_pending(request)?;
        self.working.requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn append_ledger_entry(
        &mut self,
        entry: &PawPointTransaction,
    ) -> Result<(), DomainError> {
        self.working.append_entry(entry)
    }

    async fn update_pet_status(
        &mut self,
        pet_id: &PetId,
        status: PetStatus,
    ) -> Result<(), DomainError> {
        let pet = self.working.pets.get_mut(pet_id).ok_or_else(|| {
            DomainError::new(ErrorCode::PetNotFound, "Pet not found")
                .with_detail("id", pet_id.to_string())
        })?;
        pet.status = status;
        Ok(())
    }

    async fn update_shelter_counters(&mut self, shelter: &Shelter) -> Result<(), DomainError> {
        let stored = self.working.shelters.get_mut(&shelter.id).ok_or_else(|| {
            DomainError::new(ErrorCode::ShelterNotFound, "Shelter not found")
                .with_detail("id", shelter.id.to_string())
        })?;
        stored.adoptions_completed = shelter.adoptions_completed;
        stored.current_published_pets = shelter.current_published_pets;
        Ok(())
    }

    async fn insert_story(&mut self, story: &SuccessStory) -> Result<(), DomainError> {
        self.working.stories.push(story.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let InMemoryUnitOfWork { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl AdoptionReader for InMemoryAdoptionStore {
    async fn find_user(&self, id: &UserId) -> Result<Option<UserRecord>, DomainError> {
        Ok(self.state.lock().await.users.get(id).cloned())
    }

    async fn find_pet(&self, id: &PetId) -> Result<Option<Pet>, DomainError> {
        Ok(self.state.lock().await.pets.get(id).cloned())
    }

    async fn find_shelter(&self, id: &ShelterId) -> Result<Option<Shelter>, DomainError> {
        Ok(self.state.lock().await.shelters.get(id).cloned())
    }

    async fn find_request(
        &self,
        id: &AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        Ok(self.state.lock().await.requests.get(id).cloned())
    }

    async fn has_pending_request_for_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.state.lock().await.has_pending_for_user(user_id))
    }

    async fn has_pending_request_for_pet(&self, pet_id: &PetId) -> Result<bool, DomainError> {
        Ok(self.state.lock().await.pending_for_pet(pet_id).is_some())
    }

    async fn has_completed_donation(
        &self,
        user_id: &UserId,
        pet_id: &PetId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .state
            .lock()
            .await
            .donations
            .iter()
            .any(|d| d.user_id == *user_id && d.pet_id == *pet_id && d.completed))
    }

    async fn most_recent_cancelled(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .requests
            .values()
            .filter(|r| r.user_id == *user_id && r.status == AdoptionRequestStatus::Cancelled)
            .max_by_key(|r| r.cancelled_at.unwrap_or(r.updated_at))
            .cloned())
    }

    async fn most_recent_updated(
        &self,
        user_id: &UserId,
    ) -> Result<Option<AdoptionRequest>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .requests
            .values()
            .filter(|r| r.user_id == *user_id)
            .max_by_key(|r| r.updated_at)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<AdoptionRequest>, DomainError> {
        let state = self.state.lock().await;
        let mut requests: Vec<AdoptionRequest> = state
            .requests
            .values()
            .filter(|r| r.user_id == *user_id)
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    async fn list_by_shelter(
        &self,
        shelter_id: &ShelterId,
        status: Option<AdoptionRequestStatus>,
    ) -> Result<Vec<AdoptionRequest>, DomainError> {
        let state = self.state.lock().await;
        let mut requests: Vec<AdoptionRequest> = state
            .requests
            .values()
            .filter(|r| r.shelter_id == *shelter_id)
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }

    async fn donated_published_pets(&self, user_id: &UserId) -> Result<Vec<Pet>, DomainError> {
        let state = self.state.lock().await;
        let mut pets: Vec<Pet> = state
            .pets
            .values()
            .filter(|p| p.is_published())
            .filter(|p| {
                state
                    .donations
                    .iter()
                    .any(|d| d.user_id == *user_id && d.pet_id == p.id && d.completed)
            })
            .cloned()
            .collect();
        pets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pets)
    }
}

#[async_trait]
impl StoryRepository for InMemoryAdoptionStore {
    async fn find_by_id(&self, id: &SuccessStoryId) -> Result<Option<SuccessStory>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.stories.iter().find(|s| s.id == *id).cloned())
    }

    async fn find_by_pet(&self, pet_id: &PetId) -> Result<Vec<SuccessStory>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .stories
            .iter()
            .filter(|s| s.pet_id == *pet_id)
            .cloned()
            .collect())
    }

    async fn record_delivery(
        &self,
        story_id: &SuccessStoryId,
        user_id: &UserId,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let story = state
            .stories
            .iter_mut()
            .find(|s| s.id == *story_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::StoryNotFound, "Success story not found")
                    .with_detail("id", story_id.to_string())
            })?;
        story.mark_notification_sent(*user_id)?;
        Ok(())
    }
}

#[async_trait]
impl LedgerReader for InMemoryAdoptionStore {
    async fn entries_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PawPointTransaction>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .ledger
            .iter()
            .filter(|e| e.user_id() == *user_id)
            .cloned()
            .collect())
    }

    async fn cached_balances(&self) -> Result<Vec<CachedBalance>, DomainError> {
        let state = self.state.lock().await;
        let mut balances: Vec<CachedBalance> = state
            .users
            .values()
            .map(|u| CachedBalance {
                user_id: u.id,
                paw_points: u.paw_points,
            })
            .collect();
        balances.sort_by_key(|b| b.user_id);
        Ok(balances)
    }
}
