//! Affected-donor computation for new success stories.

use std::collections::BTreeSet;

use super::{StoryOutcome, SuccessStory};
use crate::domain::foundation::{PetId, Timestamp, UserId};
use crate::domain::ledger::{TransactionType, BONUS_POINTS};

/// One bonus payout owed to an affected donor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BonusAward {
    pub user_id: UserId,
    pub points: i64,
    pub transaction_type: TransactionType,
    pub related_pet_id: PetId,
}

/// A story ready to persist and the awards that go with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryPlan {
    pub story: SuccessStory,
    pub awards: Vec<BonusAward>,
}

pub struct SuccessStoryEngine;

impl SuccessStoryEngine {
    /// Builds the story for `pet_id` from the pet's completed donors.
    ///
    /// Donors are deduplicated. For an internal adoption the adopter is left
    /// out of the affected set and receives no award.
    pub fn plan(
        pet_id: PetId,
        outcome: StoryOutcome,
        completed_donors: impl IntoIterator<Item = UserId>,
        now: Timestamp,
    ) -> StoryPlan {
        let adopter = match &outcome {
            StoryOutcome::AdoptedInternal { adopter_id, .. } => Some(*adopter_id),
            _ => None,
        };
        let affected: BTreeSet<UserId> = completed_donors
            .into_iter()
            .filter(|donor| Some(*donor) != adopter)
            .collect();

        let transaction_type = outcome.story_type().bonus_type();
        let awards = affected
            .iter()
            .map(|user_id| BonusAward {
                user_id: *user_id,
                points: BONUS_POINTS,
                transaction_type,
                related_pet_id: pet_id,
            })
            .collect();

        StoryPlan {
            story: SuccessStory::new(pet_id, outcome, affected, now),
            awards,
        }
    }
}
