//! Ledger reader port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::ledger::PawPointTransaction;

/// A user's cached PawPoints balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedBalance {
    pub user_id: UserId,
    pub paw_points: i64,
}

#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// The user's ledger entries in the order they were appended.
    async fn entries_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<PawPointTransaction>, DomainError>;

    /// Cached balances of every user.
    async fn cached_balances(&self) -> Result<Vec<CachedBalance>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn LedgerReader) {}
    }
}
