//! RecordPetOutcomeHandler - resolutions that bypass an internal request.
//!
//! A shelter records that a published pet was adopted elsewhere, died, or was
//! listed in error. Each outcome writes a success story and pays the pet's
//! completed donors the matching bonus.

use std::sync::Arc;

use tracing::info;

use super::access::load_pet_and_shelter;
use crate::application::notify::publish_event;
use crate::application::points_ledger::PointsLedger;
use crate::application::unit_of_work::finish;
use crate::domain::adoption::{AdoptionError, PetStatus};
use crate::domain::foundation::{OwnedByUser, PetId, Timestamp, UserId};
use crate::domain::ledger::PawPointTransaction;
use crate::domain::success_story::{
    StoryOutcome, SuccessStory, SuccessStoryCreated, SuccessStoryEngine,
};
use crate::ports::{AdoptionStore, AdoptionUnitOfWork, Clock, EventPublisher};

/// What happened to the pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetOutcome {
    AdoptedExternal,
    Deceased,
    /// The listing was a mistake.
    Error { reason: String },
}

impl PetOutcome {
    fn pet_status(&self) -> PetStatus {
        match self {
            PetOutcome::AdoptedExternal => PetStatus::Adopted,
            PetOutcome::Deceased => PetStatus::Deceased,
            PetOutcome::Error { .. } => PetStatus::Removed,
        }
    }
}

impl From<PetOutcome> for StoryOutcome {
    fn from(outcome: PetOutcome) -> Self {
        match outcome {
            PetOutcome::AdoptedExternal => StoryOutcome::AdoptedExternal,
            PetOutcome::Deceased => StoryOutcome::Deceased,
            PetOutcome::Error { reason } => StoryOutcome::Error { reason },
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordPetOutcomeCommand {
    pub actor_id: UserId,
    pub pet_id: PetId,
    pub outcome: PetOutcome,
}

#[derive(Debug, Clone)]
pub struct RecordPetOutcomeResult {
    pub story: SuccessStory,
    pub bonuses: Vec<PawPointTransaction>,
}

pub struct RecordPetOutcomeHandler {
    store: Arc<dyn AdoptionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl RecordPetOutcomeHandler {
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
        cmd: RecordPetOutcomeCommand,
    ) -> Result<RecordPetOutcomeResult, AdoptionError> {
        let now = self.clock.now();

        let mut uow = self.store.begin().await?;
        let outcome = Self::apply(&mut *uow, &cmd, now).await;
        let (story, bonuses) = finish(uow, outcome, "record_pet_outcome").await?;

        info!(
            pet_id = %story.pet_id,
            story_id = %story.id,
            story_type = %story.story_type,
            bonuses = bonuses.len(),
            "Pet outcome recorded"
        );
        publish_event(
            &*self.event_publisher,
            &SuccessStoryCreated::from_story(&story),
            &cmd.actor_id,
            &story.pet_id.to_string(),
        )
        .await;

        Ok(RecordPetOutcomeResult { story, bonuses })
    }

    async fn apply(
        uow: &mut dyn AdoptionUnitOfWork,
        cmd: &RecordPetOutcomeCommand,
        now: Timestamp,
    ) -> Result<(SuccessStory, Vec<PawPointTransaction>), AdoptionError> {
        let (pet, mut shelter) = load_pet_and_shelter(uow, &cmd.pet_id).await?;
        shelter.check_ownership(&cmd.actor_id)?;

        if !pet.is_published() {
            return Err(AdoptionError::PetUnavailable {
                pet_id: pet.id,
                status: pet.status,
            });
        }
        if uow.has_pending_request_for_pet(&pet.id).await? {
            return Err(AdoptionError::PendingRequestExists { pet_id: pet.id });
        }

        uow.update_pet_status(&pet.id, cmd.outcome.pet_status()).await?;
        match cmd.outcome {
            PetOutcome::AdoptedExternal => shelter.record_adoption(),
            _ => shelter.unpublish_one(),
        }
        uow.update_shelter_counters(&shelter).await?;

        let donors = uow.completed_donor_ids(&pet.id).await?;
        let plan = SuccessStoryEngine::plan(pet.id, cmd.outcome.clone().into(), donors, now);
        uow.insert_story(&plan.story).await?;
        let bonuses = PointsLedger::pay_awards(uow, &plan.awards, now).await?;

        Ok((plan.story, bonuses))
    }
}
