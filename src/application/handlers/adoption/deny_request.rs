//! DenyAdoptionRequestHandler - Command handler for shelter denials.

use std::sync::Arc;

use tracing::info;

use super::access::load_for_shelter_owner;
use crate::application::notify::publish_event;
use crate::application::points_ledger::PointsLedger;
use crate::application::unit_of_work::finish;
use crate::domain::adoption::{AdoptionError, AdoptionRequest, AdoptionRequestDenied};
use crate::domain::foundation::{AdoptionRequestId, EventId, Timestamp, UserId};
use crate::domain::ledger::PawPointTransaction;
use crate::ports::{AdoptionStore, AdoptionUnitOfWork, Clock, EventPublisher};

#[derive(Debug, Clone)]
pub struct DenyAdoptionRequestCommand {
    pub actor_id: UserId,
    pub request_id: AdoptionRequestId,
    pub reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DenyAdoptionRequestResult {
    pub request: AdoptionRequest,
    pub refund: Option<PawPointTransaction>,
    pub event: AdoptionRequestDenied,
}

/// Handler for denials. The requester gets back every point spent.
pub struct DenyAdoptionRequestHandler {
    store: Arc<dyn AdoptionStore>,
    event_publisher: Arc<dyn EventPublisher>,
    clock: Arc<dyn Clock>,
}

impl DenyAdoptionRequestHandler {
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
        cmd: DenyAdoptionRequestCommand,
    ) -> Result<DenyAdoptionRequestResult, AdoptionError> {
        let now = self.clock.now();

        let mut uow = self.store.begin().await?;
        let outcome = Self::apply(&mut *uow, &cmd, now).await;
        let (request, refund) = finish(uow, outcome, "deny_adoption_request").await?;

        let points_refunded = refund.as_ref().map_or(0, |r| r.points());
        info!(
            request_id = %request.id,
            user_id = %request.user_id,
            refunded = points_refunded,
            "Adoption request denied"
        );

        let event = AdoptionRequestDenied {
            event_id: EventId::new(),
            request_id: request.id,
            user_id: request.user_id,
            pet_id: request.pet_id,
            reason: request.status_reason.clone(),
            points_refunded,
            occurred_at: now,
        };
        publish_event(
            &*self.event_publisher,
            &event,
            &cmd.actor_id,
            &request.id.to_string(),
        )
        .await;

        Ok(DenyAdoptionRequestResult {
            request,
            refund,
            event,
        })
    }

    async fn apply(
        uow: &mut dyn AdoptionUnitOfWork,
        cmd: &DenyAdoptionRequestCommand,
        now: Timestamp,
    ) -> Result<(AdoptionRequest, Option<PawPointTransaction>), AdoptionError> {
        let mut request = load_for_shelter_owner(uow, &cmd.request_id, &cmd.actor_id)
            .await?
            .request;

        request.deny(cmd.reason.clone(), now)?;
        uow.update_request(&request).await?;

        let refund = match request.refundable_points() {
            Some(points) => Some(
                PointsLedger::refund(
                    uow,
                    request.user_id,
                    points,
                    "Refund for denied adoption request",
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
