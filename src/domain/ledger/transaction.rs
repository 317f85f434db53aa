//! PawPoints ledger entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DonationId, PawPointTransactionId, PetId, Timestamp, UserId};

/// Why a PawPoints movement happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Points earned by donating to a pet.
    Donation,
    /// Donor bonus when a pet they supported is adopted.
    AdoptionBonus,
    /// Donor bonus when a pet they supported passes away.
    CompassionBonus,
    /// Donor bonus when a listing is withdrawn because of an error.
    ErrorBonus,
    /// Points spent on an adoption request.
    Spent,
    /// Spent points returned after a cancelled or denied request.
    Refund,
    /// Any other promotional bonus.
    Bonus,
    Other,
}

impl TransactionType {
    /// Storage representation, lowercase snake case.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Donation => "donation",
            TransactionType::AdoptionBonus => "adoption_bonus",
            TransactionType::CompassionBonus => "compassion_bonus",
            TransactionType::ErrorBonus => "error_bonus",
            TransactionType::Spent => "spent",
            TransactionType::Refund => "refund",
            TransactionType::Bonus => "bonus",
            TransactionType::Other => "other",
        }
    }

    /// Parses the storage representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "donation" => Some(TransactionType::Donation),
            "adoption_bonus" => Some(TransactionType::AdoptionBonus),
            "compassion_bonus" => Some(TransactionType::CompassionBonus),
            "error_bonus" => Some(TransactionType::ErrorBonus),
            "spent" => Some(TransactionType::Spent),
            "refund" => Some(TransactionType::Refund),
            "bonus" => Some(TransactionType::Bonus),
            "other" => Some(TransactionType::Other),
            _ => None,
        }
    }

    /// Returns true for types that may be used with `PointsAccount::award`.
    pub fn is_award(&self) -> bool {
        !matches!(self, TransactionType::Spent | TransactionType::Refund)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable row of the PawPoints ledger.
///
/// Entries are only produced by `PointsAccount` operations (or restored from
/// storage). `balance_after` is the owner's balance immediately after this
/// entry was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PawPointTransaction {
    id: PawPointTransactionId,
    user_id: UserId,
    points: i64,
    transaction_type: TransactionType,
    related_donation_id: Option<DonationId>,
    related_pet_id: Option<PetId>,
    description: String,
    balance_after: i64,
    created_at: Timestamp,
}

impl PawPointTransaction {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn record(
        user_id: UserId,
        points: i64,
        transaction_type: TransactionType,
        related_pet_id: Option<PetId>,
        description: String,
        balance_after: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: PawPointTransactionId::new(),
            user_id,
            points,
            transaction_type,
            related_donation_id: None,
            related_pet_id,
            description,
            balance_after,
            created_at,
        }
    }

    /// Reconstitutes an entry loaded from storage.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: PawPointTransactionId,
        user_id: UserId,
        points: i64,
        transaction_type: TransactionType,
        related_donation_id: Option<DonationId>,
        related_pet_id: Option<PetId>,
        description: String,
        balance_after: i64,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            points,
            transaction_type,
            related_donation_id,
            related_pet_id,
            description,
            balance_after,
            created_at,
        }
    }

    pub fn id(&self) -> PawPointTransactionId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Signed amount; negative for spends.
    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn related_donation_id(&self) -> Option<DonationId> {
        self.related_donation_id
    }

    pub fn related_pet_id(&self) -> Option<PetId> {
        self.related_pet_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn balance_after(&self) -> i64 {
        self.balance_after
    }

    /// Balance the owner had before this entry was applied.
    pub fn balance_before(&self) -> i64 {
        self.balance_after - self.points
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
