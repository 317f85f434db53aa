//! Adoption-specific error types.
//!
//! # Kind Mapping
//!
//! | Error | Kind |
//! |-------|------|
//! | NotFound | NotFound |
//! | Forbidden | Forbidden |
//! | Ineligible, InvalidPoints, InvalidState, CancellationWindowClosed | BadRequest |
//! | PetUnavailable, NoCompletedDonation, MessageTooLong, NotAffected | BadRequest |
//! | Ledger | BadRequest |
//! | PendingRequestExists, Conflict | Conflict |
//! | Infrastructure | Internal |

use thiserror::Error;

use super::{AdoptionRequestStatus, PetStatus};
use crate::domain::foundation::{DomainError, ErrorCode, PetId, SuccessStoryId, UserId};
use crate::domain::ledger::LedgerError;

/// Caller-facing classification of an adoption error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    BadRequest,
    Conflict,
    Internal,
}

/// Errors returned by adoption workflow operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdoptionError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Forbidden(String),

    #[error("Not eligible to request an adoption: {}", .reasons.join("; "))]
    Ineligible { reasons: Vec<String> },

    #[error("Invalid PawPoints amount: {0}")]
    InvalidPoints(String),

    #[error("Cannot {attempted} a request that is {current}")]
    InvalidState {
        current: AdoptionRequestStatus,
        attempted: &'static str,
    },

    #[error("Requests can only be cancelled within {hours} hours of creation")]
    CancellationWindowClosed { hours: i64 },

    #[error("Pet {pet_id} is not available for adoption (status: {status})")]
    PetUnavailable { pet_id: PetId, status: PetStatus },

    #[error("You can only request to adopt a pet you have donated to")]
    NoCompletedDonation { pet_id: PetId },

    #[error("Message is {actual} characters, maximum is {max}")]
    MessageTooLong { max: usize, actual: usize },

    #[error("User {user_id} is not among the affected users of story {story_id}")]
    NotAffected {
        story_id: SuccessStoryId,
        user_id: UserId,
    },

    #[error("Pet {pet_id} already has a pending adoption request")]
    PendingRequestExists { pet_id: PetId },

    #[error("Conflicting update: {0}")]
    Conflict(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl AdoptionError {
    pub fn user_not_found(id: UserId) -> Self {
        AdoptionError::NotFound {
            entity: "User",
            id: id.to_string(),
        }
    }

    pub fn pet_not_found(id: PetId) -> Self {
        AdoptionError::NotFound {
            entity: "Pet",
            id: id.to_string(),
        }
    }

    pub fn shelter_not_found(id: impl ToString) -> Self {
        AdoptionError::NotFound {
            entity: "Shelter",
            id: id.to_string(),
        }
    }

    pub fn request_not_found(id: impl ToString) -> Self {
        AdoptionError::NotFound {
            entity: "Adoption request",
            id: id.to_string(),
        }
    }

    pub fn story_not_found(id: SuccessStoryId) -> Self {
        AdoptionError::NotFound {
            entity: "Success story",
            id: id.to_string(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AdoptionError::Forbidden(message.into())
    }

    pub fn invalid_state(current: AdoptionRequestStatus, attempted: &'static str) -> Self {
        AdoptionError::InvalidState { current, attempted }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AdoptionError::Infrastructure(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AdoptionError::NotFound { .. } => ErrorKind::NotFound,
            AdoptionError::Forbidden(_) => ErrorKind::Forbidden,
            AdoptionError::PendingRequestExists { .. } | AdoptionError::Conflict(_) => {
                ErrorKind::Conflict
            }
            AdoptionError::Infrastructure(_) => ErrorKind::Internal,
            AdoptionError::Ineligible { .. }
            | AdoptionError::InvalidPoints(_)
            | AdoptionError::InvalidState { .. }
            | AdoptionError::CancellationWindowClosed { .. }
            | AdoptionError::PetUnavailable { .. }
            | AdoptionError::NoCompletedDonation { .. }
            | AdoptionError::MessageTooLong { .. }
            | AdoptionError::NotAffected { .. }
            | AdoptionError::Ledger(_) => ErrorKind::BadRequest,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AdoptionError::NotFound { entity, .. } => match *entity {
                "User" => ErrorCode::UserNotFound,
                "Pet" => ErrorCode::PetNotFound,
                "Shelter" => ErrorCode::ShelterNotFound,
                "Success story" => ErrorCode::StoryNotFound,
                _ => ErrorCode::RequestNotFound,
            },
            AdoptionError::Forbidden(_) => ErrorCode::Forbidden,
            AdoptionError::Ineligible { .. } => ErrorCode::NotEligible,
            AdoptionError::InvalidPoints(_) => ErrorCode::InvalidPointAmount,
            AdoptionError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            AdoptionError::CancellationWindowClosed { .. } => ErrorCode::CancellationWindowClosed,
            AdoptionError::PetUnavailable { .. } => ErrorCode::PetUnavailable,
            AdoptionError::NoCompletedDonation { .. } => ErrorCode::NotEligible,
            AdoptionError::MessageTooLong { .. } | AdoptionError::NotAffected { .. } => {
                ErrorCode::ValidationFailed
            }
            AdoptionError::PendingRequestExists { .. } => ErrorCode::PendingRequestExists,
            AdoptionError::Conflict(_) => ErrorCode::ConcurrentModification,
            AdoptionError::Ledger(err) => err.code(),
            AdoptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for AdoptionError {
    fn from(err: DomainError) -> Self {
        let id = || err.details.get("id").cloned().unwrap_or_default();
        match err.code {
            ErrorCode::UserNotFound => AdoptionError::NotFound { entity: "User", id: id() },
            ErrorCode::PetNotFound => AdoptionError::NotFound { entity: "Pet", id: id() },
            ErrorCode::ShelterNotFound => AdoptionError::NotFound { entity: "Shelter", id: id() },
            ErrorCode::RequestNotFound => AdoptionError::NotFound {
                entity: "Adoption request",
                id: id(),
            },
            ErrorCode::StoryNotFound => AdoptionError::NotFound {
                entity: "Success story",
                id: id(),
            },
            ErrorCode::Forbidden => AdoptionError::Forbidden(err.message),
            ErrorCode::NotEligible => AdoptionError::Ineligible {
                reasons: vec![err.message],
            },
            ErrorCode::PendingRequestExists => match err
                .details
                .get("pet_id")
                .and_then(|raw| raw.parse::<PetId>().ok())
            {
                Some(pet_id) => AdoptionError::PendingRequestExists { pet_id },
                None => AdoptionError::Conflict(err.message),
            },
            ErrorCode::ConcurrentModification => AdoptionError::Conflict(err.message),
            _ => AdoptionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AdoptionError> for DomainError {
    fn from(err: AdoptionError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ineligible_message_lists_every_reason() {
        let err = AdoptionError::Ineligible {
            reasons: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Not eligible to request an adoption: first; second"
        );
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn pending_request_is_a_conflict() {
        let err = AdoptionError::PendingRequestExists { pet_id: PetId::new() };
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.code(), ErrorCode::PendingRequestExists);
    }

    #[test]
    fn invalid_state_is_bad_request() {
        let err = AdoptionError::invalid_state(AdoptionRequestStatus::Approved, "approve");
        assert_eq!(err.to_string(), "Cannot approve a request that is approved");
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn ledger_errors_are_bad_requests() {
        let err: AdoptionError = LedgerError::InsufficientBalance {
            requested: 6,
            available: 3,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.code(), ErrorCode::InsufficientPawPoints);
    }

    #[test]
    fn not_found_codes_follow_entity() {
        assert_eq!(
            AdoptionError::pet_not_found(PetId::new()).code(),
            ErrorCode::PetNotFound
        );
        assert_eq!(
            AdoptionError::user_not_found(UserId::new()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn storage_conflicts_convert_to_conflict_kind() {
        let err: AdoptionError =
            DomainError::new(ErrorCode::PendingRequestExists, "duplicate pending").into();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(matches!(err, AdoptionError::Conflict(_)));
    }

    #[test]
    fn storage_pending_collision_keeps_the_pet() {
        let pet_id = PetId::new();
        let err: AdoptionError = DomainError::new(ErrorCode::PendingRequestExists, "duplicate pending")
            .with_detail("pet_id", pet_id.to_string())
            .into();

        assert_eq!(err, AdoptionError::PendingRequestExists { pet_id });
        assert_eq!(err.code(), ErrorCode::PendingRequestExists);
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn storage_not_eligible_is_bad_request() {
        let err: AdoptionError =
            DomainError::new(ErrorCode::NotEligible, "already pending").into();
        assert_eq!(
            err,
            AdoptionError::Ineligible {
                reasons: vec!["already pending".to_string()]
            }
        );
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn database_errors_convert_to_internal_kind() {
        let err: AdoptionError = DomainError::database("insert request", "connection reset").into();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn domain_not_found_keeps_id_detail() {
        let err: AdoptionError = DomainError::new(ErrorCode::PetNotFound, "missing")
            .with_detail("id", "pet-1")
            .into();
        assert_eq!(
            err,
            AdoptionError::NotFound {
                entity: "Pet",
                id: "pet-1".to_string()
            }
        );
    }
}
