//! ApproveAdoptionRequestHandler - Command handler for shelter approvals.

use std::sync::Arc;

use tracing::info;

use super::access::load_for_shelter_owner;
use crate::application::notify::publish_event;
use crate::application::points_ledger::PointsLedger;
use crate::application::unit_of_work::finish;
use crate::domain::adoption::{
    AdoptionError, AdoptionRequest, AdoptionRequestApproved, PetStatus,
};
use crate::domain::foundation::{AdoptionRequestId, EventId, Timestamp, UserId};
use crate::domain::ledger::PawPointTransaction;
use crate::domain::success_story::{
    StoryOutcome, SuccessStory, SuccessStoryCreated, SuccessStoryEngine,
};
use crate::ports::{AdoptionStore, AdoptionUnitOfWork, Clock, EventPublisher};

/// Command to approve a pending request.
#[derive(Debug, Clone)]
pub struct ApproveAdoptionRequestCommand {
    /// The shelter operator approving.
    pub actor_id: UserId,
    pub request_id: AdoptionRequestId,
    pub adoption_proof_image: Option<String>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApproveAdoptionRequestResult {
    pub request: AdoptionRequest,
    pub story: SuccessStory,
    /// One +1 entry per completed donor other than the adopter.
    pub bonuses: Vec<PawPointTransaction>,
    pub event: AdoptionRequestApproved,
}

/// Handler for approvals.
///
/// In one unit of work: the request becomes approved, the pet adopted, the
/// shelter counters move, an internal-adoption story is written and every
/// other completed donor of the pet receives the adoption bonus.
pub struct ApproveAdoptionRequestHandler {
    store: Arc<dyn AdoptionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl ApproveAdoptionRequestHandler {
    pub fn new(
        store: Arc<dyn AdoptionStore>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            event_publisher,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: ApproveAdoptionRequestCommand,
    ) -> Result<ApproveAdoptionRequestResult, AdoptionError> {
        let now = self.clock.now();

        let mut uow = self.store.begin().await?;
        let outcome = Self::apply(&mut *uow, &cmd, now).await;
        let (request, story, bonuses) = finish(uow, outcome, "approve_adoption_request").await?;

        info!(
            request_id = %request.id,
            pet_id = %request.pet_id,
            adopter_id = %request.user_id,
            story_id = %story.id,
            bonuses = bonuses.len(),
            "Adoption request approved"
        );

        let event = AdoptionRequestApproved {
            event_id: EventId::new(),
            request_id: request.id,
            user_id: request.user_id,
            pet_id: request.pet_id,
            shelter_id: request.shelter_id,
            occurred_at: now,
        };
        let correlation_id = request.id.to_string();
        publish_event(&*self.event_publisher, &event, &cmd.actor_id, &correlation_id).await;
        publish_event(
            &*self.event_publisher,
            &SuccessStoryCreated::from_story(&story),
            &cmd.actor_id,
            &correlation_id,
        )
        .await;

        Ok(ApproveAdoptionRequestResult {
            request,
            story,
            bonuses,
            event,
        })
    }

    async fn apply(
        uow: &mut dyn AdoptionUnitOfWork,
        cmd: &ApproveAdoptionRequestCommand,
        now: Timestamp,
    ) -> Result<(AdoptionRequest, SuccessStory, Vec<PawPointTransaction>), AdoptionError> {
        let scope = load_for_shelter_owner(uow, &cmd.request_id, &cmd.actor_id).await?;
        let mut request = scope.request;
        let mut shelter = scope.shelter;

        request.approve(cmd.adoption_proof_image.clone(), cmd.reason.clone(), now)?;
        uow.update_request(&request).await?;

        uow.update_pet_status(&scope.pet.id, PetStatus::Adopted).await?;
        shelter.record_adoption();
        uow.update_shelter_counters(&shelter).await?;

        let donors = uow.completed_donor_ids(&scope.pet.id).await?;
        let plan = SuccessStoryEngine::plan(
            scope.pet.id,
            StoryOutcome::AdoptedInternal {
                adopter_id: request.user_id,
                adoption_request_id: request.id,
            },
            donors,
            now,
        );
        uow.insert_story(&plan.story).await?;
        let bonuses = PointsLedger::pay_awards(uow, &plan.awards, now).await?;

        Ok((request, plan.story, bonuses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryAdoptionStore, InMemoryEventBus};
    use crate::domain::adoption::{
        AdoptionPolicy, AdoptionRequestStatus, ErrorKind, Pet, Shelter,
    };
    use crate::domain::eligibility::AdopterProfile;
    use crate::domain::foundation::{PetId, ShelterId};
    use crate::domain::ledger::TransactionType;
    use crate::domain::success_story::StoryType;
    use crate::ports::{AdoptionReader, StoryRepository};

    struct Fixture {
        store: Arc<InMemoryAdoptionStore>,
        bus: Arc<InMemoryEventBus>,
        handler: ApproveAdoptionRequestHandler,
        owner: UserId,
        adopter: UserId,
        donors: Vec<UserId>,
        pet: Pet,
        shelter: Shelter,
        request: AdoptionRequest,
    }

    /// Pet with three completed donors; the first one has a pending request.
    async fn fixture() -> Fixture {
        let store = Arc::new(InMemoryAdoptionStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(FixedClock::new(Timestamp::from_unix_secs(1_700_000_000)));

        let owner = UserId::new();
        let shelter = Shelter {
            id: ShelterId::new(),
            owner_id: owner,
            name: "Harbor Rescue".to_string(),
            adoptions_completed: 2,
            current_published_pets: 1,
        };
        let pet = Pet {
            id: PetId::new(),
            shelter_id: shelter.id,
            name: "Maple".to_string(),
            status: PetStatus::Published,
            adoption_fee: 10_000,
        };
        store.add_shelter(shelter.clone()).await;
        store.add_pet(pet.clone()).await;

        let donors: Vec<UserId> = (0..3).map(|_| UserId::new()).collect();
        for donor in &donors {
            store.add_user(*donor, AdopterProfile::default()).await;
            store.add_donation(*donor, pet.id, true).await;
        }
        let adopter = donors[0];
        store
            .grant_points(
                adopter,
                10,
                TransactionType::Donation,
                Some(pet.id),
                Timestamp::from_unix_secs(1_700_000_000),
            )
            .await
            .unwrap();

        let request = AdoptionRequest::create(
            adopter,
            &pet,
            6,
            None,
            &AdoptionPolicy::default(),
            clock.now(),
        )
        .unwrap();
        let mut uow = store.begin().await.unwrap();
        PointsLedger::spend(&mut *uow, adopter, 6, "Adoption request", Some(pet.id), clock.now())
            .await
            .unwrap();
        uow.insert_request(&request).await.unwrap();
        uow.commit().await.unwrap();

        let handler = ApproveAdoptionRequestHandler::new(store.clone(), bus.clone(), clock);
        Fixture {
            store,
            bus,
            handler,
            owner,
            adopter,
            donors,
            pet,
            shelter,
            request,
        }
    }

    fn command(f: &Fixture) -> ApproveAdoptionRequestCommand {
        ApproveAdoptionRequestCommand {
            actor_id: f.owner,
            request_id: f.request.id,
            adoption_proof_image: Some("https://img.example/maple.jpg".to_string()),
            reason: None,
        }
    }

    #[tokio::test]
    async fn approval_adopts_pet_and_pays_other_donors() {
        let f = fixture().await;

        let result = f.handler.handle(command(&f)).await.unwrap();

        assert_eq!(result.request.status, AdoptionRequestStatus::Approved);
        assert_eq!(
            result.request.adoption_proof_image.as_deref(),
            Some("https://img.example/maple.jpg")
        );
        assert_eq!(result.story.story_type, StoryType::AdoptedInternal);
        assert_eq!(result.story.adopter_id, Some(f.adopter));
        assert!(!result.story.is_affected(&f.adopter));
        assert_eq!(result.bonuses.len(), 2);
        assert!(result
            .bonuses
            .iter()
            .all(|b| b.points() == 1 && b.transaction_type() == TransactionType::AdoptionBonus));

        for donor in &f.donors[1..] {
            let user = AdoptionReader::find_user(&*f.store, donor).await.unwrap().unwrap();
            assert_eq!(user.paw_points, 1);
        }
        let adopter = AdoptionReader::find_user(&*f.store, &f.adopter).await.unwrap().unwrap();
        assert_eq!(adopter.paw_points, 4);

        let pet = f.store.find_pet(&f.pet.id).await.unwrap().unwrap();
        assert_eq!(pet.status, PetStatus::Adopted);
        let shelter = f.store.find_shelter(&f.shelter.id).await.unwrap().unwrap();
        assert_eq!(shelter.adoptions_completed, 3);
        assert_eq!(shelter.current_published_pets, 0);

        assert_eq!(f.store.find_by_pet(&f.pet.id).await.unwrap().len(), 1);
        assert!(f.bus.has_event("adoption_request.approved.v1"));
        assert!(f.bus.has_event("success_story.created.v1"));
    }

    #[tokio::test]
    async fn non_owner_cannot_approve() {
        let f = fixture().await;
        let mut cmd = command(&f);
        cmd.actor_id = f.adopter;

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Forbidden);
        let stored = f.store.find_request(&f.request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AdoptionRequestStatus::Pending);
    }

    #[tokio::test]
    async fn second_approval_fails_without_paying_again() {
        let f = fixture().await;
        f.handler.handle(command(&f)).await.unwrap();

        let err = f.handler.handle(command(&f)).await.unwrap_err();

        assert_eq!(
            err,
            AdoptionError::invalid_state(AdoptionRequestStatus::Approved, "approve")
        );
        let donor = AdoptionReader::find_user(&*f.store, &f.donors[1]).await.unwrap().unwrap();
        assert_eq!(donor.paw_points, 1);
        assert_eq!(f.store.find_by_pet(&f.pet.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let f = fixture().await;
        let mut cmd = command(&f);
        cmd.request_id = AdoptionRequestId::new();

        let err = f.handler.handle(cmd).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
