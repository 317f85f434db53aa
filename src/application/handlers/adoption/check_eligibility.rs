//! CheckEligibilityHandler - Query handler for a user's adoption eligibility.

use std::sync::Arc;

use crate::domain::adoption::{AdoptionError, AdoptionPolicy};
use crate::domain::eligibility::{
    CooldownPolicy, CooldownResult, EligibilityEvaluator, EligibilityResult,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{AdoptionReader, Clock};

/// Query to check whether a user may file an adoption request.
#[derive(Debug, Clone)]
pub struct CheckEligibilityQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckEligibilityResult {
    pub eligibility: EligibilityResult,
    pub cooldown: CooldownResult,
}

/// Handler for eligibility checks.
pub struct CheckEligibilityHandler {
    reader: Arc<dyn AdoptionReader>,
    clock: Arc<dyn Clock>,
    policy: AdoptionPolicy,
}

impl CheckEligibilityHandler {
    pub fn new(
        reader: Arc<dyn AdoptionReader>,
        clock: Arc<dyn Clock>,
        policy: AdoptionPolicy,
    ) -> Self {
        Self {
            reader,
            clock,
            policy,
        }
    }

    pub async fn handle(
        &self,
        query: CheckEligibilityQuery,
    ) -> Result<CheckEligibilityResult, AdoptionError> {
        assess(&*self.reader, &self.policy, &query.user_id, self.clock.now()).await
    }
}

/// Evaluates every eligibility condition for `user_id` at `now`.
pub(crate) async fn assess(
    reader: &dyn AdoptionReader,
    policy: &AdoptionPolicy,
    user_id: &UserId,
    now: Timestamp,
) -> Result<CheckEligibilityResult, AdoptionError> {
    let user = reader
        .find_user(user_id)
        .await?
        .ok_or_else(|| AdoptionError::user_not_found(*user_id))?;
    let pending = reader.has_pending_request_for_user(user_id).await?;
    let cancelled = reader.most_recent_cancelled(user_id).await?;
    let updated = reader.most_recent_updated(user_id).await?;

    let cooldown =
        CooldownPolicy::from_policy(policy).evaluate(cancelled.as_ref(), updated.as_ref(), now);
    let eligibility = EligibilityEvaluator::from_policy(policy).evaluate(
        &user.profile,
        user.paw_points,
        pending,
        &cooldown,
    );

    Ok(CheckEligibilityResult {
        eligibility,
        cooldown,
    })
}
