//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `ledger` - PawPoints ledger entries, accounts and audit
//! - `eligibility` - Profile completeness, point sufficiency and cooldowns
//! - `adoption` - Adoption request lifecycle and catalog snapshots
//! - `success_story` - Stories and donor bonuses for resolved pets

pub mod adoption;
pub mod eligibility;
pub mod foundation;
pub mod ledger;
pub mod success_story;
