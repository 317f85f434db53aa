//! Adoption eligibility.

use serde::Serialize;

use super::{AdopterProfile, CooldownResult};
use crate::domain::adoption::AdoptionPolicy;
use crate::domain::foundation::Percentage;

/// Eligibility verdict with every failing reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityResult {
    pub is_eligible: bool,
    pub reasons: Vec<String>,
    pub profile_completeness: Percentage,
    pub paw_points: i64,
}

/// Checks the four eligibility conditions without short-circuiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityEvaluator {
    min_points: i64,
}

impl EligibilityEvaluator {
    pub fn new(min_points: i64) -> Self {
        Self { min_points }
    }

    pub fn from_policy(policy: &AdoptionPolicy) -> Self {
        Self::new(policy.min_points)
    }

    pub fn evaluate(
        &self,
        profile: &AdopterProfile,
        paw_points: i64,
        pending_request_exists: bool,
        cooldown: &CooldownResult,
    ) -> EligibilityResult {
        let completeness = profile.completeness();
        let mut reasons = Vec::new();

        if !completeness.is_complete() {
            reasons.push(format!(
                "Your profile must be 100% complete (currently {})",
                completeness
            ));
        }
        if paw_points < self.min_points {
            reasons.push(format!(
                "You need at least {} PawPoints (you have {})",
                self.min_points, paw_points
            ));
        }
        if pending_request_exists {
            reasons.push("You already have a pending adoption request".to_string());
        }
        if !cooldown.can_request {
            reasons.push(
                cooldown
                    .reason
                    .clone()
                    .unwrap_or_else(|| "You are in a cooldown period".to_string()),
            );
        }

        EligibilityResult {
            is_eligible: reasons.is_empty(),
            reasons,
            profile_completeness: completeness,
            paw_points,
        }
    }
}

impl Default for EligibilityEvaluator {
    fn default() -> Self {
        Self::from_policy(&AdoptionPolicy::default())
    }
}
