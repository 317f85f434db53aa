//! Adoption request status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an adoption request.
///
/// Every request starts `Pending`; the three resolutions are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdoptionRequestStatus {
    /// Awaiting a decision by the shelter.
    Pending,

    /// The shelter accepted the requester as adopter.
    Approved,

    /// The shelter turned the request down.
    Denied,

    /// The requester withdrew the request.
    Cancelled,
}

impl AdoptionRequestStatus {
    pub const ALL: [AdoptionRequestStatus; 4] = [
        AdoptionRequestStatus::Pending,
        AdoptionRequestStatus::Approved,
        AdoptionRequestStatus::Denied,
        AdoptionRequestStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionRequestStatus::Pending => "pending",
            AdoptionRequestStatus::Approved => "approved",
            AdoptionRequestStatus::Denied => "denied",
            AdoptionRequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(AdoptionRequestStatus::Pending),
            "approved" => Some(AdoptionRequestStatus::Approved),
            "denied" => Some(AdoptionRequestStatus::Denied),
            "cancelled" => Some(AdoptionRequestStatus::Cancelled),
            _ => None,
        }
    }

    /// Approved or denied by the shelter.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            AdoptionRequestStatus::Approved | AdoptionRequestStatus::Denied
        )
    }
}

impl fmt::Display for AdoptionRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for AdoptionRequestStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AdoptionRequestStatus::*;
        matches!(
            (self, target),
            (Pending, Approved) | (Pending, Denied) | (Pending, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AdoptionRequestStatus::*;
        match self {
            Pending => vec![Approved, Denied, Cancelled],
            Approved | Denied | Cancelled => vec![],
        }
    }
}
