//! Adoption request events.
//!
//! Published after the unit of work commits, for the notification
//! collaborator. Past tense: the transition has already happened.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    domain_event, AdoptionRequestId, EventId, PetId, ShelterId, Timestamp, UserId,
};

/// A donor filed a new adoption request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRequestCreated {
    pub event_id: EventId,
    pub request_id: AdoptionRequestId,
    pub user_id: UserId,
    pub pet_id: PetId,
    pub shelter_id: ShelterId,
    pub paw_points_used: i64,
    pub fee_reduction: i64,
    pub occurred_at: Timestamp,
}

domain_event!(
    AdoptionRequestCreated,
    event_type = "adoption_request.created.v1",
    aggregate_id = request_id,
    aggregate_type = "AdoptionRequest",
    occurred_at = occurred_at,
    event_id = event_id
);

/// The shelter approved a request; the pet is adopted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRequestApproved {
    pub event_id: EventId,
    pub request_id: AdoptionRequestId,
    pub user_id: UserId,
    pub pet_id: PetId,
    pub shelter_id: ShelterId,
    pub occurred_at: Timestamp,
}

domain_event!(
    AdoptionRequestApproved,
    event_type = "adoption_request.approved.v1",
    aggregate_id = request_id,
    aggregate_type = "AdoptionRequest",
    occurred_at = occurred_at,
    event_id = event_id
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRequestDenied {
    pub event_id: EventId,
    pub request_id: AdoptionRequestId,
    pub user_id: UserId,
    pub pet_id: PetId,
    pub reason: Option<String>,
    pub points_refunded: i64,
    pub occurred_at: Timestamp,
}

domain_event!(
    AdoptionRequestDenied,
    event_type = "adoption_request.denied.v1",
    aggregate_id = request_id,
    aggregate_type = "AdoptionRequest",
    occurred_at = occurred_at,
    event_id = event_id
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRequestCancelled {
    pub event_id: EventId,
    pub request_id: AdoptionRequestId,
    pub user_id: UserId,
    pub pet_id: PetId,
    pub points_refunded: i64,
    pub occurred_at: Timestamp,
}

domain_event!(
    AdoptionRequestCancelled,
    event_type = "adoption_request.cancelled.v1",
    aggregate_id = request_id,
    aggregate_type = "AdoptionRequest",
    occurred_at = occurred_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, EventEnvelope};

    #[test]
    fn created_event_envelope_routes_by_request() {
        let event = AdoptionRequestCreated {
            event_id: EventId::new(),
            request_id: AdoptionRequestId::new(),
            user_id: UserId::new(),
            pet_id: PetId::new(),
            shelter_id: ShelterId::new(),
            paw_points_used: 6,
            fee_reduction: 100,
            occurred_at: Timestamp::from_unix_secs(1_000),
        };

        let envelope = EventEnvelope::from_event(&event).unwrap();

        assert_eq!(envelope.event_type, "adoption_request.created.v1");
        assert_eq!(envelope.aggregate_type, "AdoptionRequest");
        assert_eq!(envelope.aggregate_id, event.request_id.to_string());
        assert_eq!(envelope.payload["paw_points_used"], 6);
    }

    #[test]
    fn denied_event_reports_refund() {
        let event = AdoptionRequestDenied {
            event_id: EventId::new(),
            request_id: AdoptionRequestId::new(),
            user_id: UserId::new(),
            pet_id: PetId::new(),
            reason: Some("Landlord declined".to_string()),
            points_refunded: 6,
            occurred_at: Timestamp::from_unix_secs(2_000),
        };

        assert_eq!(event.event_type(), "adoption_request.denied.v1");
        let decoded: AdoptionRequestDenied = EventEnvelope::from_event(&event)
            .unwrap()
            .payload_as()
            .unwrap();
        assert_eq!(decoded, event);
    }
}
