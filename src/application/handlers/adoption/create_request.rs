//! CreateAdoptionRequestHandler - Command handler for filing adoption requests.

use std::sync::Arc;

use tracing::{debug, info};

use super::check_eligibility::assess;
use crate::application::notify::publish_event;
use crate::application::points_ledger::PointsLedger;
use crate::application::unit_of_work::finish;
use crate::domain::adoption::{
    AdoptionError, AdoptionPolicy, AdoptionRequest, AdoptionRequestCreated,
};
use crate::domain::foundation::{EventId, PetId, Timestamp, UserId};
use crate::domain::ledger::{LedgerError, PawPointTransaction};
use crate::ports::{AdoptionReader, AdoptionStore, AdoptionUnitOfWork, Clock, EventPublisher};

/// Command to file an adoption request.
#[derive(Debug, Clone)]
pub struct CreateAdoptionRequestCommand {
    pub user_id: UserId,
    pub pet_id: PetId,
    /// PawPoints to spend; at least the policy minimum.
    pub paw_points_to_use: i64,
    pub message: Option<String>,
}

/// Result of a successfully filed request.
#[derive(Debug, Clone)]
pub struct CreateAdoptionRequestResult {
    pub request: AdoptionRequest,
    pub transaction: PawPointTransaction,
    pub event: AdoptionRequestCreated,
}

/// Handler for filing adoption requests.
///
/// Checks run in a fixed order and the first failure wins:
/// eligibility, pet exists, completed donation, pet published, no pending
/// request on the pet, points within balance. The unit of work then locks the
/// user, re-checks both pending conditions, spends the points and inserts the
/// request.
pub struct CreateAdoptionRequestHandler {
    store: Arc<dyn AdoptionStore>,
    reader: Arc<dyn AdoptionReader>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    policy: AdoptionPolicy,
}

impl CreateAdoptionRequestHandler {
    pub fn new(
        store: Arc<dyn AdoptionStore>,
        reader: Arc<dyn AdoptionReader>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        policy: AdoptionPolicy,
    ) -> Self {
        Self {
            store,
            reader,
            event_publisher,
            clock,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAdoptionRequestCommand,
    ) -> Result<CreateAdoptionRequestResult, AdoptionError> {
        let now = self.clock.now();

        // 1. Pre-checks against committed state
        self.validate(&cmd, now).await?;

        // 2. Spend and insert atomically
        let mut uow = self.store.begin().await?;
        let outcome = self.apply(&mut *uow, &cmd, now).await;
        let (request, transaction) = finish(uow, outcome, "create_adoption_request").await?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            pet_id = %request.pet_id,
            paw_points = request.paw_points_used_for_reduction,
            "Adoption request created"
        );

        // 3. Notify
        let event = AdoptionRequestCreated {
            event_id: EventId::new(),
            request_id: request.id,
            user_id: request.user_id,
            pet_id: request.pet_id,
            shelter_id: request.shelter_id,
            paw_points_used: request.paw_points_used_for_reduction,
            fee_reduction: request.fee_reduction,
            occurred_at: now,
        };
        publish_event(
            &*self.event_publisher,
            &event,
            &cmd.user_id,
            &request.id.to_string(),
        )
        .await;

        Ok(CreateAdoptionRequestResult {
            request,
            transaction,
            event,
        })
    }

    async fn validate(
        &self,
        cmd: &CreateAdoptionRequestCommand,
        now: Timestamp,
    ) -> Result<(), AdoptionError> {
        let assessment = assess(&*self.reader, &self.policy, &cmd.user_id, now).await?;
        if !assessment.eligibility.is_eligible {
            debug!(
                user_id = %cmd.user_id,
                reasons = ?assessment.eligibility.reasons,
                "Adoption request rejected: not eligible"
            );
            return Err(AdoptionError::Ineligible {
                reasons: assessment.eligibility.reasons,
            });
        }

        let pet = self
            .reader
            .find_pet(&cmd.pet_id)
            .await?
            .ok_or_else(|| AdoptionError::pet_not_found(cmd.pet_id))?;

        if !self
            .reader
            .has_completed_donation(&cmd.user_id, &cmd.pet_id)
            .await?
        {
            return Err(AdoptionError::NoCompletedDonation { pet_id: cmd.pet_id });
        }

        if !pet.is_published() {
            return Err(AdoptionError::PetUnavailable {
                pet_id: pet.id,
                status: pet.status,
            });
        }

        if self.reader.has_pending_request_for_pet(&cmd.pet_id).await? {
            return Err(AdoptionError::PendingRequestExists { pet_id: cmd.pet_id });
        }

        ensure_points(&self.policy, cmd.paw_points_to_use, assessment.eligibility.paw_points)
    }

    async fn apply(
        &self,
        uow: &mut dyn AdoptionUnitOfWork,
        cmd: &CreateAdoptionRequestCommand,
        now: Timestamp,
    ) -> Result<(AdoptionRequest, PawPointTransaction), AdoptionError> {
        // Locks the user row, so the per-user pending check below cannot race
        // another request by the same user.
        uow.find_user(&cmd.user_id)
            .await?
            .ok_or_else(|| AdoptionError::user_not_found(cmd.user_id))?;

        let pet = uow
            .find_pet(&cmd.pet_id)
            .await?
            .ok_or_else(|| AdoptionError::pet_not_found(cmd.pet_id))?;
        if !pet.is_published() {
            return Err(AdoptionError::PetUnavailable {
                pet_id: pet.id,
                status: pet.status,
            });
        }
        if uow.has_pending_request_for_pet(&cmd.pet_id).await? {
            return Err(AdoptionError::PendingRequestExists { pet_id: cmd.pet_id });
        }
        if uow.has_pending_request_for_user(&cmd.user_id).await? {
            return Err(AdoptionError::Ineligible {
                reasons: vec!["You already have a pending adoption request".to_string()],
            });
        }

        let request = AdoptionRequest::create(
            cmd.user_id,
            &pet,
            cmd.paw_points_to_use,
            cmd.message.clone(),
            &self.policy,
            now,
        )?;

        let transaction = PointsLedger::spend(
            uow,
            cmd.user_id,
            request.paw_points_used_for_reduction,
            &format!("Adoption request for {}", pet.name),
            Some(pet.id),
            now,
        )
        .await?;
        uow.insert_request(&request).await?;

        Ok((request, transaction))
    }
}

fn ensure_points(policy: &AdoptionPolicy, requested: i64, balance: i64) -> Result<(), AdoptionError> {
    if requested < policy.min_points {
        return Err(AdoptionError::InvalidPoints(format!(
            "at least {} PawPoints are required, got {}",
            policy.min_points, requested
        )));
    }
    if requested > balance {
        return Err(LedgerError::InsufficientBalance {
            requested,
            available: balance,
        }
        .into());
    }
    Ok(())
}
