//! AdoptionWorkflow - every adoption operation behind one type.
//!
//! Wires the handlers to a shared set of ports so callers only hold one
//! value. Each method delegates to exactly one handler.

use std::sync::Arc;

use super::handlers::{
    AdoptionStats, ApproveAdoptionRequestCommand, ApproveAdoptionRequestHandler,
    ApproveAdoptionRequestResult, AuditLedgerHandler, CancelAdoptionRequestCommand,
    CancelAdoptionRequestHandler, CancelAdoptionRequestResult, CheckEligibilityHandler,
    CheckEligibilityQuery, CheckEligibilityResult, CreateAdoptionRequestCommand,
    CreateAdoptionRequestHandler, CreateAdoptionRequestResult, DenyAdoptionRequestCommand,
    DenyAdoptionRequestHandler, DenyAdoptionRequestResult, EligiblePet,
    GetAdoptionRequestHandler, GetAdoptionRequestQuery, GetAdoptionStatsHandler,
    GetAdoptionStatsQuery, GetEligiblePetsHandler, GetEligiblePetsQuery,
    GetNotificationStatusHandler, GetNotificationStatusQuery, GetPendingNotificationsHandler,
    GetPendingNotificationsQuery, GetPetStoriesHandler, GetPetStoriesQuery,
    GetPointsHistoryHandler, GetPointsHistoryQuery, GetPointsHistoryResult, LedgerAuditReport,
    ListShelterRequestsHandler, ListShelterRequestsQuery, ListUserRequestsHandler,
    ListUserRequestsQuery, MarkNotificationSentCommand, MarkNotificationSentHandler,
    MarkNotificationSentResult, RecordPetOutcomeCommand, RecordPetOutcomeHandler,
    RecordPetOutcomeResult, UploadAdoptionProofCommand, UploadAdoptionProofHandler,
    UploadAdoptionProofResult,
};
use crate::domain::adoption::{AdoptionError, AdoptionPolicy, AdoptionRequest};
use crate::domain::foundation::UserId;
use crate::domain::success_story::{NotificationStatus, SuccessStory};
use crate::ports::{
    AdoptionReader, AdoptionStore, Clock, EventPublisher, LedgerReader, StoryRepository,
};

/// Caller-facing adoption core.
pub struct AdoptionWorkflow {
    create: CreateAdoptionRequestHandler,
    cancel: CancelAdoptionRequestHandler,
    approve: ApproveAdoptionRequestHandler,
    deny: DenyAdoptionRequestHandler,
    upload_proof: UploadAdoptionProofHandler,
    record_outcome: RecordPetOutcomeHandler,
    get_request: GetAdoptionRequestHandler,
    user_requests: ListUserRequestsHandler,
    shelter_requests: ListShelterRequestsHandler,
    eligibility: CheckEligibilityHandler,
    eligible_pets: GetEligiblePetsHandler,
    stats: GetAdoptionStatsHandler,
    mark_sent: MarkNotificationSentHandler,
    notification_status: GetNotificationStatusHandler,
    pending_notifications: GetPendingNotificationsHandler,
    pet_stories: GetPetStoriesHandler,
    points_history: GetPointsHistoryHandler,
    audit: AuditLedgerHandler,
}

impl AdoptionWorkflow {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn AdoptionStore>,
        reader: Arc<dyn AdoptionReader>,
        stories: Arc<dyn StoryRepository>,
        ledger: Arc<dyn LedgerReader>,
        event_publisher: Arc<dyn EventPublisher>,
        clock: Arc<dyn Clock>,
        policy: AdoptionPolicy,
    ) -> Self {
        Self {
            create: CreateAdoptionRequestHandler::new(
                store.clone(),
                reader.clone(),
                event_publisher.clone(),
                clock.clone(),
                policy.clone(),
            ),
            cancel: CancelAdoptionRequestHandler::new(
                store.clone(),
                event_publisher.clone(),
                clock.clone(),
                policy.clone(),
            ),
            approve: ApproveAdoptionRequestHandler::new(
                store.clone(),
                event_publisher.clone(),
                clock.clone(),
            ),
            deny: DenyAdoptionRequestHandler::new(
                store.clone(),
                event_publisher.clone(),
                clock.clone(),
            ),
            upload_proof: UploadAdoptionProofHandler::new(store.clone(), clock.clone()),
            record_outcome: RecordPetOutcomeHandler::new(store, event_publisher, clock.clone()),
            get_request: GetAdoptionRequestHandler::new(reader.clone()),
            user_requests: ListUserRequestsHandler::new(reader.clone()),
            shelter_requests: ListShelterRequestsHandler::new(reader.clone()),
            eligibility: CheckEligibilityHandler::new(reader.clone(), clock, policy.clone()),
            eligible_pets: GetEligiblePetsHandler::new(reader.clone(), policy),
            stats: GetAdoptionStatsHandler::new(reader.clone()),
            mark_sent: MarkNotificationSentHandler::new(stories.clone()),
            notification_status: GetNotificationStatusHandler::new(stories.clone()),
            pending_notifications: GetPendingNotificationsHandler::new(stories.clone()),
            pet_stories: GetPetStoriesHandler::new(stories),
            points_history: GetPointsHistoryHandler::new(reader, ledger.clone()),
            audit: AuditLedgerHandler::new(ledger),
        }
    }

    // === Commands ===

    pub async fn create_request(
        &self,
        cmd: CreateAdoptionRequestCommand,
    ) -> Result<CreateAdoptionRequestResult, AdoptionError> {
        self.create.handle(cmd).await
    }

    pub async fn cancel_request(
        &self,
        cmd: CancelAdoptionRequestCommand,
    ) -> Result<CancelAdoptionRequestResult, AdoptionError> {
        self.cancel.handle(cmd).await
    }

    pub async fn approve_request(
        &self,
        cmd: ApproveAdoptionRequestCommand,
    ) -> Result<ApproveAdoptionRequestResult, AdoptionError> {
        self.approve.handle(cmd).await
    }

    pub async fn deny_request(
        &self,
        cmd: DenyAdoptionRequestCommand,
    ) -> Result<DenyAdoptionRequestResult, AdoptionError> {
        self.deny.handle(cmd).await
    }

    pub async fn upload_proof(
        &self,
        cmd: UploadAdoptionProofCommand,
    ) -> Result<UploadAdoptionProofResult, AdoptionError> {
        self.upload_proof.handle(cmd).await
    }

    pub async fn record_pet_outcome(
        &self,
        cmd: RecordPetOutcomeCommand,
    ) -> Result<RecordPetOutcomeResult, AdoptionError> {
        self.record_outcome.handle(cmd).await
    }

    pub async fn mark_notification_sent(
        &self,
        cmd: MarkNotificationSentCommand,
    ) -> Result<MarkNotificationSentResult, AdoptionError> {
        self.mark_sent.handle(cmd).await
    }

    // === Queries ===

    pub async fn get_request_by_id(
        &self,
        query: GetAdoptionRequestQuery,
    ) -> Result<AdoptionRequest, AdoptionError> {
        self.get_request.handle(query).await
    }

    pub async fn get_user_requests(
        &self,
        query: ListUserRequestsQuery,
    ) -> Result<Vec<AdoptionRequest>, AdoptionError> {
        self.user_requests.handle(query).await
    }

    pub async fn get_shelter_requests(
        &self,
        query: ListShelterRequestsQuery,
    ) -> Result<Vec<AdoptionRequest>, AdoptionError> {
        self.shelter_requests.handle(query).await
    }

    pub async fn check_eligibility(
        &self,
        user_id: UserId,
    ) -> Result<CheckEligibilityResult, AdoptionError> {
        self.eligibility
            .handle(CheckEligibilityQuery { user_id })
            .await
    }

    pub async fn get_eligible_pets(
        &self,
        user_id: UserId,
    ) -> Result<Vec<EligiblePet>, AdoptionError> {
        self.eligible_pets
            .handle(GetEligiblePetsQuery { user_id })
            .await
    }

    pub async fn get_adoption_stats(
        &self,
        query: GetAdoptionStatsQuery,
    ) -> Result<AdoptionStats, AdoptionError> {
        self.stats.handle(query).await
    }

    pub async fn get_notification_status(
        &self,
        query: GetNotificationStatusQuery,
    ) -> Result<NotificationStatus, AdoptionError> {
        self.notification_status.handle(query).await
    }

    pub async fn get_pending_notifications(
        &self,
        query: GetPendingNotificationsQuery,
    ) -> Result<Vec<UserId>, AdoptionError> {
        self.pending_notifications.handle(query).await
    }

    pub async fn get_pet_stories(
        &self,
        query: GetPetStoriesQuery,
    ) -> Result<Vec<SuccessStory>, AdoptionError> {
        self.pet_stories.handle(query).await
    }

    pub async fn get_points_history(
        &self,
        query: GetPointsHistoryQuery,
    ) -> Result<GetPointsHistoryResult, AdoptionError> {
        self.points_history.handle(query).await
    }

    pub async fn audit_ledger(&self) -> Result<LedgerAuditReport, AdoptionError> {
        self.audit.handle().await
    }
}
