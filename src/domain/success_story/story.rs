//! SuccessStory aggregate.
//!
//! A story is written once when a pet's fate resolves. Its affected-user set
//! is fixed at creation; afterwards only `notifications_sent` changes, and
//! only through delivery acknowledgements.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::domain::adoption::AdoptionError;
use crate::domain::foundation::{AdoptionRequestId, PetId, SuccessStoryId, Timestamp, UserId};
use crate::domain::ledger::TransactionType;

/// How a pet's fate was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryType {
    /// Adopted through an approved adoption request.
    AdoptedInternal,
    /// Adopted outside the platform.
    AdoptedExternal,
    Deceased,
    /// Listing withdrawn because it was created in error.
    Error,
}

impl StoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryType::AdoptedInternal => "adopted_internal",
            StoryType::AdoptedExternal => "adopted_external",
            StoryType::Deceased => "deceased",
            StoryType::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "adopted_internal" => Some(StoryType::AdoptedInternal),
            "adopted_external" => Some(StoryType::AdoptedExternal),
            "deceased" => Some(StoryType::Deceased),
            "error" => Some(StoryType::Error),
            _ => None,
        }
    }

    /// Ledger type used for the donor bonus.
    pub fn bonus_type(&self) -> TransactionType {
        match self {
            StoryType::AdoptedInternal | StoryType::AdoptedExternal => {
                TransactionType::AdoptionBonus
            }
            StoryType::Deceased => TransactionType::CompassionBonus,
            StoryType::Error => TransactionType::ErrorBonus,
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolution a story records, with the data each kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryOutcome {
    AdoptedInternal {
        adopter_id: UserId,
        adoption_request_id: AdoptionRequestId,
    },
    AdoptedExternal,
    Deceased,
    Error {
        reason: String,
    },
}

impl StoryOutcome {
    pub fn story_type(&self) -> StoryType {
        match self {
            StoryOutcome::AdoptedInternal { .. } => StoryType::AdoptedInternal,
            StoryOutcome::AdoptedExternal => StoryType::AdoptedExternal,
            StoryOutcome::Deceased => StoryType::Deceased,
            StoryOutcome::Error { .. } => StoryType::Error,
        }
    }
}

/// Delivery counts for a story's notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationStatus {
    pub sent: usize,
    pub pending: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessStory {
    pub id: SuccessStoryId,
    pub pet_id: PetId,
    pub story_type: StoryType,
    pub adopter_id: Option<UserId>,
    pub adoption_request_id: Option<AdoptionRequestId>,
    pub error_reason: Option<String>,
    pub created_at: Timestamp,
    affected_user_ids: BTreeSet<UserId>,
    notifications_sent: BTreeMap<UserId, bool>,
}

impl SuccessStory {
    /// Writes a new story for `pet_id` with a fixed set of affected users.
    pub fn new(
        pet_id: PetId,
        outcome: StoryOutcome,
        affected_user_ids: BTreeSet<UserId>,
        now: Timestamp,
    ) -> Self {
        let story_type = outcome.story_type();
        let (adopter_id, adoption_request_id, error_reason) = match outcome {
            StoryOutcome::AdoptedInternal {
                adopter_id,
                adoption_request_id,
            } => (Some(adopter_id), Some(adoption_request_id), None),
            StoryOutcome::Error { reason } => (None, None, Some(reason)),
            StoryOutcome::AdoptedExternal | StoryOutcome::Deceased => (None, None, None),
        };

        Self {
            id: SuccessStoryId::new(),
            pet_id,
            story_type,
            adopter_id,
            adoption_request_id,
            error_reason,
            created_at: now,
            affected_user_ids,
            notifications_sent: BTreeMap::new(),
        }
    }

    /// Reconstitutes a story loaded from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: SuccessStoryId,
        pet_id: PetId,
        story_type: StoryType,
        adopter_id: Option<UserId>,
        adoption_request_id: Option<AdoptionRequestId>,
        error_reason: Option<String>,
        created_at: Timestamp,
        affected_user_ids: BTreeSet<UserId>,
        notifications_sent: BTreeMap<UserId, bool>,
    ) -> Self {
        Self {
            id,
            pet_id,
            story_type,
            adopter_id,
            adoption_request_id,
            error_reason,
            created_at,
            affected_user_ids,
            notifications_sent,
        }
    }

    pub fn affected_user_ids(&self) -> &BTreeSet<UserId> {
        &self.affected_user_ids
    }

    pub fn notifications_sent(&self) -> &BTreeMap<UserId, bool> {
        &self.notifications_sent
    }

    pub fn is_affected(&self, user_id: &UserId) -> bool {
        self.affected_user_ids.contains(user_id)
    }

    pub fn is_delivered(&self, user_id: &UserId) -> bool {
        self.notifications_sent.get(user_id).copied().unwrap_or(false)
    }

    /// Records delivery to `user_id`.
    ///
    /// Returns `Ok(true)` when newly recorded and `Ok(false)` when it was
    /// already delivered.
    pub fn mark_notification_sent(&mut self, user_id: UserId) -> Result<bool, AdoptionError> {
        if !self.is_affected(&user_id) {
            return Err(AdoptionError::NotAffected {
                story_id: self.id,
                user_id,
            });
        }
        if self.is_delivered(&user_id) {
            return Ok(false);
        }
        self.notifications_sent.insert(user_id, true);
        Ok(true)
    }

    pub fn notification_status(&self) -> NotificationStatus {
        let total = self.affected_user_ids.len();
        let sent = self
            .affected_user_ids
            .iter()
            .filter(|id| self.is_delivered(id))
            .count();
        NotificationStatus {
            sent,
            pending: total - sent,
            total,
        }
    }

    /// Affected users still waiting for delivery, in id order.
    pub fn pending_users(&self) -> Vec<UserId> {
        self.affected_user_ids
            .iter()
            .filter(|id| !self.is_delivered(id))
            .copied()
            .collect()
    }
}
