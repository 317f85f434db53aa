//! CancelAdoptionRequestHandler - Command handler for requester cancellations.

use std::sync::Arc;

use tracing::info;

use crate::application::notify::publish_event;
use crate::application::points_ledger::PointsLedger;
use crate::application::unit_of_work::finish;
use crate::domain::adoption::{
    AdoptionError, AdoptionPolicy, AdoptionRequest, AdoptionRequestCancelled,
};
use crate::domain::foundation::{AdoptionRequestId, EventId, OwnedByUser, Timestamp, UserId};
use crate::domain::ledger::PawPointTransaction;
use crate::ports::{AdoptionStore, AdoptionUnitOfWork, Clock, EventPublisher};

/// Command to cancel one's own pending request.
#[derive(Debug, Clone)]
pub struct CancelAdoptionRequestCommand {
    pub user_id: UserId,
    pub request_id: AdoptionRequestId,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CancelAdoptionRequestResult {
    pub request: AdoptionRequest,
    /// Refund of the points spent at creation, when any were spent.
    pub refund: Option<PawPointTransaction>,
    pub event: AdoptionRequestCancelled,
}

/// Handler for cancellations.
///
/// Only the requester may cancel, only while pending, and only inside the
/// cancellation window.
pub struct CancelAdoptionRequestHandler {
    store: Arc<dyn AdoptionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
    policy: AdoptionPolicy,
}

impl CancelAdoptionRequestHandler {
    pub fn new(
        store: Arc<dyn AdoptionStore>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        policy: AdoptionPolicy,
    ) -> Self {
        Self {
            store,
            event_publisher,
            clock,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelAdoptionRequestCommand,
    ) -> Result<CancelAdoptionRequestResult, AdoptionError> {
        let now = self.clock.now();

        let mut uow = self.store.begin().await?;
        let outcome = self.apply(&mut *uow, &cmd, now).await;
        let (request, refund) = finish(uow, outcome, "cancel_adoption_request").await?;

        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            refunded = refund.as_ref().map_or(0, |r| r.points()),
            "Adoption request cancelled"
        );

        let event = AdoptionRequestCancelled {
            event_id: EventId::new(),
            request_id: request.id,
            user_id: request.user_id,
            pet_id: request.pet_id,
            points_refunded: refund.as_ref().map_or(0, |r| r.points()),
            occurred_at: now,
        };
        publish_event(
            &*self.event_publisher,
            &event,
            &cmd.user_id,
            &request.id.to_string(),
        )
        .await;

        Ok(CancelAdoptionRequestResult {
            request,
            refund,
            event,
        })
    }

    async fn apply(
        &self,
        uow: &mut dyn AdoptionUnitOfWork,
        cmd: &CancelAdoptionRequestCommand,
        now: Timestamp,
    ) -> Result<(AdoptionRequest, Option<PawPointTransaction>), AdoptionError> {
        let mut request = uow
            .find_request(&cmd.request_id)
            .await?
            .ok_or_else(|| AdoptionError::request_not_found(cmd.request_id))?;
        request.check_ownership(&cmd.user_id)?;

        request.cancel(cmd.reason.clone(), &self.policy, now)?;
        uow.update_request(&request).await?;

        let refund = match request.refundable_points() {
            Some(points) => Some(
                PointsLedger::refund(
                    uow,
                    request.user_id,
                    points,
                    "Refund for cancelled adoption request",
                    Some(request.pet_id),
                    now,
                )
                .await?,
            ),
            None => None,
        };

        Ok((request, refund))
    }
}
