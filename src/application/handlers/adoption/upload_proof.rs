//! UploadAdoptionProofHandler - attaches the adoption proof image.

use std::sync::Arc;

use tracing::info;

use super::access::load_for_shelter_owner;
use crate::application::unit_of_work::finish;
use crate::domain::adoption::{AdoptionError, AdoptionRequest};
use crate::domain::foundation::{AdoptionRequestId, Timestamp, UserId};
use crate::ports::{AdoptionStore, AdoptionUnitOfWork, Clock};

#[derive(Debug, Clone)]
pub struct UploadAdoptionProofCommand {
    pub actor_id: UserId,
    pub request_id: AdoptionRequestId,
    /// Location of the already-uploaded image.
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct UploadAdoptionProofResult {
    pub request: AdoptionRequest,
}

/// Handler for proof uploads on approved requests.
pub struct UploadAdoptionProofHandler {
    store: Arc<dyn AdoptionStore>,
    clock: Arc<dyn Clock>,
}

impl UploadAdoptionProofHandler {
    pub fn new(store: Arc<dyn AdoptionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: UploadAdoptionProofCommand,
    ) -> Result<UploadAdoptionProofResult, AdoptionError> {
        let now = self.clock.now();

        let mut uow = self.store.begin().await?;
        let outcome = Self::apply(&mut *uow, &cmd, now).await;
        let request = finish(uow, outcome, "upload_adoption_proof").await?;

        info!(request_id = %request.id, "Adoption proof attached");
        Ok(UploadAdoptionProofResult { request })
    }

    async fn apply(
        uow: &mut dyn AdoptionUnitOfWork,
        cmd: &UploadAdoptionProofCommand,
        now: Timestamp,
    ) -> Result<AdoptionRequest, AdoptionError> {
        let mut request = load_for_shelter_owner(uow, &cmd.request_id, &cmd.actor_id)
            .await?
            .request;
        request.upload_proof(cmd.image_url.clone(), now)?;
        uow.update_request(&request).await?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryAdoptionStore};
    use crate::domain::adoption::{AdoptionPolicy, AdoptionRequestStatus, Pet, PetStatus, Shelter};
    use crate::domain::foundation::{PetId, ShelterId};
    use crate::ports::AdoptionReader;

    async fn setup(
        status: AdoptionRequestStatus,
    ) -> (
        UploadAdoptionProofHandler,
        Arc<InMemoryAdoptionStore>,
        UserId,
        AdoptionRequest,
    ) {
        let store = Arc::new(InMemoryAdoptionStore::new());
        let now = Timestamp::from_unix_secs(1_700_000_000);
        let owner = UserId::new();
        let shelter = Shelter {
            id: ShelterId::new(),
            owner_id: owner,
            name: "Northside".to_string(),
            adoptions_completed: 0,
            current_published_pets: 0,
        };
        let pet = Pet {
            id: PetId::new(),
            shelter_id: shelter.id,
            name: "Rye".to_string(),
            status: PetStatus::Adopted,
            adoption_fee: 0,
        };
        store.add_shelter(shelter).await;
        store.add_pet(pet.clone()).await;

        let mut request =
            AdoptionRequest::create(UserId::new(), &pet, 5, None, &AdoptionPolicy::default(), now)
                .unwrap();
        if status == AdoptionRequestStatus::Approved {
            request.approve(None, None, now).unwrap();
        }
        let mut uow = store.begin().await.unwrap();
        uow.insert_request(&request).await.unwrap();
        uow.commit().await.unwrap();

        let clock = Arc::new(FixedClock::new(now.plus_hours(1)));
        let handler = UploadAdoptionProofHandler::new(store.clone(), clock);
        (handler, store, owner, request)
    }

    #[tokio::test]
    async fn attaches_image_to_approved_request() {
        let (handler, store, owner, request) = setup(AdoptionRequestStatus::Approved).await;

        handler
            .handle(UploadAdoptionProofCommand {
                actor_id: owner,
                request_id: request.id,
                image_url: "https://img.example/rye.jpg".to_string(),
            })
            .await
            .unwrap();

        let stored = store.find_request(&request.id).await.unwrap().unwrap();
        assert_eq!(
            stored.adoption_proof_image.as_deref(),
            Some("https://img.example/rye.jpg")
        );
    }

    #[tokio::test]
    async fn pending_request_rejects_proof() {
        let (handler, store, owner, request) = setup(AdoptionRequestStatus::Pending).await;

        let err = handler
            .handle(UploadAdoptionProofCommand {
                actor_id: owner,
                request_id: request.id,
                image_url: "https://img.example/rye.jpg".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            AdoptionError::invalid_state(AdoptionRequestStatus::Pending, "upload proof for")
        );
        let stored = store.find_request(&request.id).await.unwrap().unwrap();
        assert!(stored.adoption_proof_image.is_none());
    }
}
