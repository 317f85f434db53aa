//! GetPointsHistoryHandler - a user's PawPoints balance and ledger.

use std::sync::Arc;

use crate::domain::adoption::AdoptionError;
use crate::domain::foundation::UserId;
use crate::domain::ledger::PawPointTransaction;
use crate::ports::{AdoptionReader, LedgerReader};

#[derive(Debug, Clone)]
pub struct GetPointsHistoryQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPointsHistoryResult {
    pub balance: i64,
    /// Oldest first.
    pub entries: Vec<PawPointTransaction>,
}

pub struct GetPointsHistoryHandler {
    reader: Arc<dyn AdoptionReader>,
    ledger: Arc<dyn LedgerReader>,
}

impl GetPointsHistoryHandler {
    pub fn new(reader: Arc<dyn AdoptionReader>, ledger: Arc<dyn LedgerReader>) -> Self {
        Self { reader, ledger }
    }

    pub async fn handle(
        &self,
        query: GetPointsHistoryQuery,
    ) -> Result<GetPointsHistoryResult, AdoptionError> {
        let user = self
            .reader
            .find_user(&query.user_id)
            .await?
            .ok_or_else(|| AdoptionError::user_not_found(query.user_id))?;
        let entries = self.ledger.entries_for_user(&query.user_id).await?;

        Ok(GetPointsHistoryResult {
            balance: user.paw_points,
            entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAdoptionStore;
    use crate::domain::adoption::ErrorKind;
    use crate::domain::eligibility::AdopterProfile;
    use crate::domain::foundation::Timestamp;
    use crate::domain::ledger::TransactionType;

    #[tokio::test]
    async fn history_is_in_append_order() {
        let store = Arc::new(InMemoryAdoptionStore::new());
        let user = UserId::new();
        store.add_user(user, AdopterProfile::default()).await;
        store
            .grant_points(user, 4, TransactionType::Donation, None, Timestamp::from_unix_secs(0))
            .await
            .unwrap();
        store
            .grant_points(
                user,
                1,
                TransactionType::AdoptionBonus,
                None,
                Timestamp::from_unix_secs(0),
            )
            .await
            .unwrap();

        let result = GetPointsHistoryHandler::new(store.clone(), store)
            .handle(GetPointsHistoryQuery { user_id: user })
            .await
            .unwrap();

        assert_eq!(result.balance, 5);
        let running: Vec<i64> = result.entries.iter().map(|e| e.balance_after()).collect();
        assert_eq!(running, vec![4, 5]);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = Arc::new(InMemoryAdoptionStore::new());

        let err = GetPointsHistoryHandler::new(store.clone(), store)
            .handle(GetPointsHistoryQuery {
                user_id: UserId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
