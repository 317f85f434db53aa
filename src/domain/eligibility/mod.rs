//! Adoption eligibility: profile completeness, point sufficiency and cooldowns.

mod cooldown;
mod evaluator;
mod profile;

pub use cooldown::{CooldownPolicy, CooldownResult};
pub use evaluator::{EligibilityEvaluator, EligibilityResult};
pub use profile::{AdopterProfile, REQUIRED_FIELD_COUNT};

#[cfg(test)]
pub(crate) use profile::complete_profile;
