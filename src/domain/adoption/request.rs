//! AdoptionRequest aggregate.
//!
//! # Invariants
//!
//! - A request starts `Pending`; approved, denied and cancelled are terminal
//! - `paw_points_used_for_reduction` is at least the policy minimum at creation
//! - `fee_reduction` never exceeds the pet's adoption fee
//! - `adoption_proof_image` can only be set while `Approved`
//! - A failed transition leaves every field untouched

use serde::{Deserialize, Serialize};

use super::{AdoptionError, AdoptionPolicy, AdoptionRequestStatus, Pet};
use crate::domain::foundation::{
    AdoptionRequestId, OwnedByUser, PetId, ShelterId, StateMachine, Timestamp, UserId,
};

/// A donor's claim to adopt a pet they have donated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionRequest {
    pub id: AdoptionRequestId,

    /// The requesting donor.
    pub user_id: UserId,

    pub pet_id: PetId,

    /// Shelter that lists the pet at request time.
    pub shelter_id: ShelterId,

    pub status: AdoptionRequestStatus,

    /// PawPoints spent when the request was created.
    pub paw_points_used_for_reduction: i64,

    /// Adoption fee reduction in cents.
    pub fee_reduction: i64,

    pub message: Option<String>,

    /// Free-text reason given with the last transition.
    pub status_reason: Option<String>,

    pub adoption_proof_image: Option<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Advisory only; nothing transitions a request when it passes.
    pub expires_at: Timestamp,

    pub approved_at: Option<Timestamp>,
    pub denied_at: Option<Timestamp>,
    pub cancelled_at: Option<Timestamp>,
}

impl AdoptionRequest {
    /// Creates a pending request for `pet`.
    ///
    /// # Errors
    ///
    /// - `InvalidPoints` if fewer than the policy minimum are offered
    /// - `MessageTooLong` if the message exceeds the policy limit
    pub fn create(
        user_id: UserId,
        pet: &Pet,
        paw_points: i64,
        message: Option<String>,
        policy: &AdoptionPolicy,
        now: Timestamp,
    ) -> Result<Self, AdoptionError> {
        if paw_points < policy.min_points {
            return Err(AdoptionError::InvalidPoints(format!(
                "at least {} PawPoints are required, got {}",
                policy.min_points, paw_points
            )));
        }
        if let Some(text) = &message {
            let actual = text.chars().count();
            if actual > policy.max_message_length {
                return Err(AdoptionError::MessageTooLong {
                    max: policy.max_message_length,
                    actual,
                });
            }
        }

        Ok(Self {
            id: AdoptionRequestId::new(),
            user_id,
            pet_id: pet.id,
            shelter_id: pet.shelter_id,
            status: AdoptionRequestStatus::Pending,
            paw_points_used_for_reduction: paw_points,
            fee_reduction: policy.fee_reduction(paw_points, pet.adoption_fee),
            message,
            status_reason: None,
            adoption_proof_image: None,
            created_at: now,
            updated_at: now,
            expires_at: policy.expires_at(now),
            approved_at: None,
            denied_at: None,
            cancelled_at: None,
        })
    }

    /// Withdraws the request. Only allowed inside the cancellation window.
    pub fn cancel(
        &mut self,
        reason: Option<String>,
        policy: &AdoptionPolicy,
        now: Timestamp,
    ) -> Result<(), AdoptionError> {
        self.ensure_can_transition(AdoptionRequestStatus::Cancelled, "cancel")?;
        if !policy.within_cancellation_window(self.created_at, now) {
            return Err(AdoptionError::CancellationWindowClosed {
                hours: policy.cancellation_window_hours,
            });
        }

        self.status = AdoptionRequestStatus::Cancelled;
        self.cancelled_at = Some(now);
        self.status_reason = reason;
        self.updated_at = now;
        Ok(())
    }

    /// Accepts the requester as adopter.
    pub fn approve(
        &mut self,
        proof_image: Option<String>,
        reason: Option<String>,
        now: Timestamp,
    ) -> Result<(), AdoptionError> {
        self.ensure_can_transition(AdoptionRequestStatus::Approved, "approve")?;

        self.status = AdoptionRequestStatus::Approved;
        self.approved_at = Some(now);
        self.status_reason = reason;
        if proof_image.is_some() {
            self.adoption_proof_image = proof_image;
        }
        self.updated_at = now;
        Ok(())
    }

    pub fn deny(&mut self, reason: Option<String>, now: Timestamp) -> Result<(), AdoptionError> {
        self.ensure_can_transition(AdoptionRequestStatus::Denied, "deny")?;

        self.status = AdoptionRequestStatus::Denied;
        self.denied_at = Some(now);
        self.status_reason = reason;
        self.updated_at = now;
        Ok(())
    }

    /// Attaches the proof-of-adoption image to an approved request.
    pub fn upload_proof(
        &mut self,
        image_url: impl Into<String>,
        now: Timestamp,
    ) -> Result<(), AdoptionError> {
        if self.status != AdoptionRequestStatus::Approved {
            return Err(AdoptionError::invalid_state(self.status, "upload proof for"));
        }
        self.adoption_proof_image = Some(image_url.into());
        self.updated_at = now;
        Ok(())
    }

    /// Points to give back when the request ends without an adoption.
    pub fn refundable_points(&self) -> Option<i64> {
        (self.paw_points_used_for_reduction > 0).then_some(self.paw_points_used_for_reduction)
    }

    /// True when a pending request has outlived `expires_at`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.status == AdoptionRequestStatus::Pending && now.is_after(&self.expires_at)
    }

    /// When the shelter approved or denied the request.
    pub fn resolved_at(&self) -> Option<Timestamp> {
        match self.status {
            AdoptionRequestStatus::Approved => self.approved_at,
            AdoptionRequestStatus::Denied => self.denied_at,
            _ => None,
        }
    }

    fn ensure_can_transition(
        &self,
        target: AdoptionRequestStatus,
        attempted: &'static str,
    ) -> Result<(), AdoptionError> {
        if self.status.can_transition_to(&target) {
            Ok(())
        } else {
            Err(AdoptionError::invalid_state(self.status, attempted))
        }
    }
}

impl OwnedByUser for AdoptionRequest {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adoption::PetStatus;

    fn created_at() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn pet(fee: i64) -> Pet {
        Pet {
            id: PetId::new(),
            shelter_id: ShelterId::new(),
            name: "Biscuit".to_string(),
            status: PetStatus::Published,
            adoption_fee: fee,
        }
    }

    fn pending(points: i64) -> AdoptionRequest {
        AdoptionRequest::create(
            UserId::new(),
            &pet(15_000),
            points,
            Some("We have a big garden".to_string()),
            &AdoptionPolicy::default(),
            created_at(),
        )
        .unwrap()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Creation
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn create_produces_pending_request_with_derived_fields() {
        let p = pet(15_000);
        let request = AdoptionRequest::create(
            UserId::new(),
            &p,
            8,
            None,
            &AdoptionPolicy::default(),
            created_at(),
        )
        .unwrap();

        assert_eq!(request.status, AdoptionRequestStatus::Pending);
        assert_eq!(request.pet_id, p.id);
        assert_eq!(request.shelter_id, p.shelter_id);
        assert_eq!(request.paw_points_used_for_reduction, 8);
        assert_eq!(request.fee_reduction, 300);
        assert_eq!(request.expires_at, created_at().plus_days(7));
        assert_eq!(request.updated_at, created_at());
    }

    #[test]
    fn create_below_minimum_points_fails() {
        let result = AdoptionRequest::create(
            UserId::new(),
            &pet(15_000),
            4,
            None,
            &AdoptionPolicy::default(),
            created_at(),
        );
        assert!(matches!(result, Err(AdoptionError::InvalidPoints(_))));
    }

    #[test]
    fn create_with_zero_points_fails() {
        let result = AdoptionRequest::create(
            UserId::new(),
            &pet(15_000),
            0,
            None,
            &AdoptionPolicy::default(),
            created_at(),
        );
        assert!(matches!(result, Err(AdoptionError::InvalidPoints(_))));
    }

    #[test]
    fn create_with_long_message_fails() {
        let result = AdoptionRequest::create(
            UserId::new(),
            &pet(15_000),
            5,
            Some("x".repeat(1001)),
            &AdoptionPolicy::default(),
            created_at(),
        );
        assert_eq!(
            result.unwrap_err(),
            AdoptionError::MessageTooLong {
                max: 1000,
                actual: 1001
            }
        );
    }

    #[test]
    fn fee_reduction_is_capped_by_pet_fee() {
        let request = AdoptionRequest::create(
            UserId::new(),
            &pet(250),
            50,
            None,
            &AdoptionPolicy::default(),
            created_at(),
        )
        .unwrap();
        assert_eq!(request.fee_reduction, 250);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Cancellation
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn cancel_within_window_succeeds() {
        let mut request = pending(6);
        let now = created_at().plus_hours(24);

        request
            .cancel(Some("Changed plans".to_string()), &AdoptionPolicy::default(), now)
            .unwrap();

        assert_eq!(request.status, AdoptionRequestStatus::Cancelled);
        assert_eq!(request.cancelled_at, Some(now));
        assert_eq!(request.status_reason.as_deref(), Some("Changed plans"));
        assert_eq!(request.refundable_points(), Some(6));
    }

    #[test]
    fn cancel_after_window_fails_without_mutation() {
        let mut request = pending(6);
        let before = request.clone();
        let now = created_at().plus_hours(25);

        let err = request
            .cancel(None, &AdoptionPolicy::default(), now)
            .unwrap_err();

        assert_eq!(err, AdoptionError::CancellationWindowClosed { hours: 24 });
        assert_eq!(request, before);
    }

    #[test]
    fn cancel_resolved_request_fails() {
        let mut request = pending(6);
        request.deny(None, created_at().plus_hours(1)).unwrap();
        let before = request.clone();

        let err = request
            .cancel(None, &AdoptionPolicy::default(), created_at().plus_hours(2))
            .unwrap_err();

        assert!(matches!(err, AdoptionError::InvalidState { .. }));
        assert_eq!(request, before);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Resolution
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn approve_sets_timestamp_and_optional_proof() {
        let mut request = pending(5);
        let now = created_at().plus_hours(30);

        request
            .approve(Some("https://img/proof.jpg".to_string()), None, now)
            .unwrap();

        assert_eq!(request.status, AdoptionRequestStatus::Approved);
        assert_eq!(request.approved_at, Some(now));
        assert_eq!(request.resolved_at(), Some(now));
        assert_eq!(
            request.adoption_proof_image.as_deref(),
            Some("https://img/proof.jpg")
        );
    }

    #[test]
    fn second_approval_fails() {
        let mut request = pending(5);
        request.approve(None, None, created_at().plus_hours(1)).unwrap();
        let before = request.clone();

        let err = request
            .approve(None, None, created_at().plus_hours(2))
            .unwrap_err();

        assert_eq!(
            err,
            AdoptionError::invalid_state(AdoptionRequestStatus::Approved, "approve")
        );
        assert_eq!(request, before);
    }

    #[test]
    fn deny_after_cancel_fails() {
        let mut request = pending(5);
        request
            .cancel(None, &AdoptionPolicy::default(), created_at().plus_hours(1))
            .unwrap();

        assert!(request.deny(None, created_at().plus_hours(2)).is_err());
        assert_eq!(request.denied_at, None);
    }

    #[test]
    fn deny_sets_denied_at() {
        let mut request = pending(6);
        let now = created_at().plus_hours(3);

        request.deny(Some("Not a fit".to_string()), now).unwrap();

        assert_eq!(request.status, AdoptionRequestStatus::Denied);
        assert_eq!(request.denied_at, Some(now));
        assert_eq!(request.resolved_at(), Some(now));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Proof upload and expiry
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn upload_proof_requires_approval() {
        let mut request = pending(5);

        let err = request
            .upload_proof("https://img/1.jpg", created_at())
            .unwrap_err();
        assert!(matches!(err, AdoptionError::InvalidState { .. }));
        assert_eq!(request.adoption_proof_image, None);

        request.approve(None, None, created_at().plus_hours(1)).unwrap();
        request
            .upload_proof("https://img/1.jpg", created_at().plus_hours(2))
            .unwrap();
        assert_eq!(request.adoption_proof_image.as_deref(), Some("https://img/1.jpg"));
    }

    #[test]
    fn expiry_is_read_only() {
        let request = pending(5);

        assert!(!request.is_expired(created_at().plus_days(7)));
        assert!(request.is_expired(created_at().plus_days(8)));
        assert_eq!(request.status, AdoptionRequestStatus::Pending);
    }

    #[test]
    fn request_is_owned_by_requester() {
        let request = pending(5);
        assert!(request.check_ownership(&request.user_id.clone()).is_ok());
        assert!(request.check_ownership(&UserId::new()).is_err());
    }
}
