//! Adoption request lifecycle.
//!
//! - `AdoptionRequest` - the request aggregate and its transitions
//! - `AdoptionRequestStatus` - pending → approved / denied / cancelled
//! - `AdoptionPolicy` - thresholds, windows and fee reduction
//! - `Pet`, `Shelter` - catalog snapshots touched by approvals and outcomes
//! - `AdoptionError` - errors with caller-facing `ErrorKind`

mod catalog;
mod errors;
mod events;
mod policy;
mod request;
mod status;

pub use catalog::{Pet, PetStatus, Shelter};
pub use errors::{AdoptionError, ErrorKind};
pub use events::{
    AdoptionRequestApproved, AdoptionRequestCancelled, AdoptionRequestCreated,
    AdoptionRequestDenied,
};
pub use policy::AdoptionPolicy;
pub use request::AdoptionRequest;
pub use status::AdoptionRequestStatus;
