//! Adoption request handlers.
//!
//! ## Commands
//! - Creating, cancelling, approving and denying requests
//! - Attaching adoption proof
//! - Recording outcomes for pets resolved outside a request
//!
//! ## Queries
//! - Single request, per-user and per-shelter listings
//! - Eligibility and eligible pets
//! - Shelter statistics

mod access;
mod approve_request;
mod cancel_request;
mod check_eligibility;
mod create_request;
mod deny_request;
mod get_adoption_stats;
mod get_eligible_pets;
mod get_request;
mod list_requests;
mod record_pet_outcome;
mod upload_proof;

// Commands
pub use approve_request::{
    ApproveAdoptionRequestCommand, ApproveAdoptionRequestHandler, ApproveAdoptionRequestResult,
};
pub use cancel_request::{
    CancelAdoptionRequestCommand, CancelAdoptionRequestHandler, CancelAdoptionRequestResult,
};
pub use create_request::{
    CreateAdoptionRequestCommand, CreateAdoptionRequestHandler, CreateAdoptionRequestResult,
};
pub use deny_request::{
    DenyAdoptionRequestCommand, DenyAdoptionRequestHandler, DenyAdoptionRequestResult,
};
pub use record_pet_outcome::{
    PetOutcome, RecordPetOutcomeCommand, RecordPetOutcomeHandler, RecordPetOutcomeResult,
};
pub use upload_proof::{
    UploadAdoptionProofCommand, UploadAdoptionProofHandler, UploadAdoptionProofResult,
};

// Queries
pub use check_eligibility::{CheckEligibilityHandler, CheckEligibilityQuery, CheckEligibilityResult};
pub use get_adoption_stats::{AdoptionStats, GetAdoptionStatsHandler, GetAdoptionStatsQuery};
pub use get_eligible_pets::{EligiblePet, GetEligiblePetsHandler, GetEligiblePetsQuery};
pub use get_request::{GetAdoptionRequestHandler, GetAdoptionRequestQuery};
pub use list_requests::{
    ListShelterRequestsHandler, ListShelterRequestsQuery, ListUserRequestsHandler,
    ListUserRequestsQuery,
};
