//! PointsAccount - the only producer of ledger entries.
//!
//! An account wraps a user's cached balance. Every operation validates the
//! amount, moves the balance and returns the single `PawPointTransaction`
//! describing the movement. Storage persists the entry and the new balance
//! together; nothing else writes the balance.

use super::{LedgerError, PawPointTransaction, TransactionType};
use crate::domain::foundation::{PetId, Timestamp, UserId};

/// Flat bonus paid to each affected donor when a pet's fate resolves.
pub const BONUS_POINTS: i64 = 1;

/// A user's PawPoints balance, positioned for the next ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointsAccount {
    user_id: UserId,
    balance: i64,
}

impl PointsAccount {
    /// Opens an account at the user's current cached balance.
    pub fn open(user_id: UserId, balance: i64) -> Self {
        Self { user_id, balance }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Debits `points`. Fails when the balance cannot cover it.
    pub fn spend(
        &mut self,
        points: i64,
        reason: impl Into<String>,
        related_pet_id: Option<PetId>,
        now: Timestamp,
    ) -> Result<PawPointTransaction, LedgerError> {
        ensure_positive(points)?;
        if points > self.balance {
            return Err(LedgerError::InsufficientBalance {
                requested: points,
                available: self.balance,
            });
        }
        Ok(self.post(-points, TransactionType::Spent, reason.into(), related_pet_id, now))
    }

    /// Credits back points that were previously spent.
    pub fn refund(
        &mut self,
        points: i64,
        reason: impl Into<String>,
        related_pet_id: Option<PetId>,
        now: Timestamp,
    ) -> Result<PawPointTransaction, LedgerError> {
        ensure_positive(points)?;
        Ok(self.post(points, TransactionType::Refund, reason.into(), related_pet_id, now))
    }

    /// Credits a bonus or earning of the given type.
    pub fn award(
        &mut self,
        points: i64,
        transaction_type: TransactionType,
        related_pet_id: Option<PetId>,
        now: Timestamp,
    ) -> Result<PawPointTransaction, LedgerError> {
        ensure_positive(points)?;
        if !transaction_type.is_award() {
            return Err(LedgerError::InvalidAwardType(transaction_type));
        }
        let description = award_description(transaction_type).to_string();
        Ok(self.post(points, transaction_type, description, related_pet_id, now))
    }

    fn post(
        &mut self,
        delta: i64,
        transaction_type: TransactionType,
        description: String,
        related_pet_id: Option<PetId>,
        now: Timestamp,
    ) -> PawPointTransaction {
        self.balance += delta;
        PawPointTransaction::record(
            self.user_id,
            delta,
            transaction_type,
            related_pet_id,
            description,
            self.balance,
            now,
        )
    }
}

fn ensure_positive(points: i64) -> Result<(), LedgerError> {
    if points <= 0 {
        return Err(LedgerError::NonPositiveAmount { points });
    }
    Ok(())
}

fn award_description(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::AdoptionBonus => "A pet you supported found a home",
        TransactionType::CompassionBonus => "Thank you for supporting a pet that passed away",
        TransactionType::ErrorBonus => "A pet you supported was withdrawn from the catalog",
        TransactionType::Donation => "Points earned from a donation",
        _ => "Bonus PawPoints",
    }
}
