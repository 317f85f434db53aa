//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types and the event envelope
//! that form the vocabulary of the adoption core.

mod errors;
mod events;
mod ids;
mod ownership;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use crate::domain_event;
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{
    AdoptionRequestId, DonationId, PawPointTransactionId, PetId, ShelterId, SuccessStoryId, UserId,
};
pub use ownership::OwnedByUser;
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
