//! PointsLedger - the PawPoints write path inside a unit of work.
//!
//! Every balance change goes through here: the user's balance is re-read
//! from the unit of work, the account produces one ledger entry, and the
//! entry is appended (which also moves the cached balance).

use crate::domain::adoption::AdoptionError;
use crate::domain::foundation::{PetId, Timestamp, UserId};
use crate::domain::ledger::{PawPointTransaction, PointsAccount, TransactionType};
use crate::domain::success_story::BonusAward;
use crate::ports::AdoptionUnitOfWork;

pub struct PointsLedger;

impl PointsLedger {
    /// Debits `points` from the user.
    pub async fn spend(
        uow: &mut dyn AdoptionUnitOfWork,
        user_id: UserId,
        points: i64,
        reason: &str,
        related_pet_id: Option<PetId>,
        now: Timestamp,
    ) -> Result<PawPointTransaction, AdoptionError> {
        let mut account = Self::open(uow, user_id).await?;
        let entry = account.spend(points, reason, related_pet_id, now)?;
        uow.append_ledger_entry(&entry).await?;
        Ok(entry)
    }

    /// Returns previously spent points to the user.
    pub async fn refund(
        uow: &mut dyn AdoptionUnitOfWork,
        user_id: UserId,
        points: i64,
        reason: &str,
        related_pet_id: Option<PetId>,
        now: Timestamp,
    ) -> Result<PawPointTransaction, AdoptionError> {
        let mut account = Self::open(uow, user_id).await?;
        let entry = account.refund(points, reason, related_pet_id, now)?;
        uow.append_ledger_entry(&entry).await?;
        Ok(entry)
    }

    pub async fn award(
        uow: &mut dyn AdoptionUnitOfWork,
        user_id: UserId,
        points: i64,
        transaction_type: TransactionType,
        related_pet_id: Option<PetId>,
        now: Timestamp,
    ) -> Result<PawPointTransaction, AdoptionError> {
        let mut account = Self::open(uow, user_id).await?;
        let entry = account.award(points, transaction_type, related_pet_id, now)?;
        uow.append_ledger_entry(&entry).await?;
        Ok(entry)
    }

    /// Pays every award of a story plan, in order.
    pub async fn pay_awards(
        uow: &mut dyn AdoptionUnitOfWork,
        awards: &[BonusAward],
        now: Timestamp,
    ) -> Result<Vec<PawPointTransaction>, AdoptionError> {
        let mut entries = Vec::with_capacity(awards.len());
        for award in awards {
            entries.push(
                Self::award(
                    uow,
                    award.user_id,
                    award.points,
                    award.transaction_type,
                    Some(award.related_pet_id),
                    now,
                )
                .await?,
            );
        }
        Ok(entries)
    }

    async fn open(
        uow: &mut dyn AdoptionUnitOfWork,
        user_id: UserId,
    ) -> Result<PointsAccount, AdoptionError> {
        let user = uow
            .find_user(&user_id)
            .await?
            .ok_or_else(|| AdoptionError::user_not_found(user_id))?;
        Ok(PointsAccount::open(user_id, user.paw_points))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAdoptionStore;
    use crate::domain::eligibility::AdopterProfile;
    use crate::domain::ledger::{LedgerAudit, LedgerError};
    use crate::ports::{AdoptionReader, AdoptionStore, LedgerReader};

    async fn store_with(points: i64) -> (InMemoryAdoptionStore, UserId) {
        let store = InMemoryAdoptionStore::new();
        let user = UserId::new();
        store.add_user(user, AdopterProfile::default()).await;
        store
            .grant_points(
                user,
                points,
                TransactionType::Donation,
                None,
                Timestamp::from_unix_secs(0),
            )
            .await
            .unwrap();
        (store, user)
    }

    #[tokio::test]
    async fn spend_then_refund_restores_balance() {
        let (store, user) = store_with(10).await;
        let now = Timestamp::from_unix_secs(100);

        let mut uow = store.begin().await.unwrap();
        let spent = PointsLedger::spend(&mut *uow, user, 6, "Adoption request", None, now)
            .await
            .unwrap();
        let refunded = PointsLedger::refund(&mut *uow, user, 6, "Refund", None, now)
            .await
            .unwrap();
        uow.commit().await.unwrap();

        assert_eq!(spent.balance_after(), 4);
        assert_eq!(refunded.balance_after(), 10);

        let entries = store.entries_for_user(&user).await.unwrap();
        assert!(LedgerAudit::verify(&entries, 10).is_empty());
    }

    #[tokio::test]
    async fn overspend_fails_without_writing() {
        let (store, user) = store_with(3).await;

        let mut uow = store.begin().await.unwrap();
        let err = PointsLedger::spend(&mut *uow, user, 5, "Adoption request", None, Timestamp::now())
            .await
            .unwrap_err();
        uow.rollback().await.unwrap();

        assert_eq!(
            err,
            AdoptionError::Ledger(LedgerError::InsufficientBalance {
                requested: 5,
                available: 3
            })
        );
        let stored = AdoptionReader::find_user(&store, &user).await.unwrap().unwrap();
        assert_eq!(stored.paw_points, 3);
    }

    #[tokio::test]
    async fn pay_awards_credits_each_award() {
        let (store, a) = store_with(1).await;
        let b = UserId::new();
        store.add_user(b, AdopterProfile::default()).await;
        let pet = PetId::new();
        let awards = [a, b].map(|user_id| BonusAward {
            user_id,
            points: 1,
            transaction_type: TransactionType::ErrorBonus,
            related_pet_id: pet,
        });

        let mut uow = store.begin().await.unwrap();
        let entries = PointsLedger::pay_awards(&mut *uow, &awards, Timestamp::now())
            .await
            .unwrap();
        uow.commit().await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].balance_after(), 2);
        assert_eq!(entries[1].balance_after(), 1);
        assert!(entries.iter().all(|e| e.related_pet_id() == Some(pet)));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = InMemoryAdoptionStore::new();
        let stranger = UserId::new();

        let mut uow = store.begin().await.unwrap();
        let err = PointsLedger::award(
            &mut *uow,
            stranger,
            1,
            TransactionType::Bonus,
            None,
            Timestamp::now(),
        )
        .await
        .unwrap_err();

        assert_eq!(err, AdoptionError::user_not_found(stranger));
    }
}
