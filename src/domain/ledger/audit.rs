//! Ledger replay and consistency checks.

use serde::Serialize;

use super::PawPointTransaction;
use crate::domain::foundation::{PawPointTransactionId, Timestamp};

/// A single inconsistency found while replaying a user's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerDiscrepancy {
    /// The recorded `balance_after` does not follow from the running sum.
    RunningBalanceMismatch {
        entry_id: PawPointTransactionId,
        expected: i64,
        recorded: i64,
    },
    /// The running sum went below zero at this entry.
    NegativeBalance {
        entry_id: PawPointTransactionId,
        balance: i64,
    },
    /// The entry was created before the one appended ahead of it.
    OutOfOrder {
        entry_id: PawPointTransactionId,
        created_at: Timestamp,
        previous: Timestamp,
    },
    /// The cached balance differs from the ledger's final balance.
    CachedBalanceMismatch { ledger: i64, cached: i64 },
}

/// Replays ledger entries against the cached balance.
pub struct LedgerAudit;

impl LedgerAudit {
    /// Sum of all entry amounts, starting from zero.
    pub fn replay(entries: &[PawPointTransaction]) -> i64 {
        entries.iter().map(PawPointTransaction::points).sum()
    }

    /// Returns every discrepancy between the entries (in ledger order) and
    /// the cached balance. An empty result means the ledger is consistent.
    ///
    /// Append order must also be `created_at` order, so a consistent ledger
    /// replays the same way sorted by time.
    pub fn verify(entries: &[PawPointTransaction], cached_balance: i64) -> Vec<LedgerDiscrepancy> {
        let mut discrepancies = Vec::new();
        let mut running = 0i64;
        let mut previous: Option<Timestamp> = None;

        for entry in entries {
            if let Some(previous) = previous.filter(|p| entry.created_at() < *p) {
                discrepancies.push(LedgerDiscrepancy::OutOfOrder {
                    entry_id: entry.id(),
                    created_at: entry.created_at(),
                    previous,
                });
            }
            previous = Some(entry.created_at());

            running += entry.points();
            if entry.balance_after() != running {
                discrepancies.push(LedgerDiscrepancy::RunningBalanceMismatch {
                    entry_id: entry.id(),
                    expected: running,
                    recorded: entry.balance_after(),
                });
            }
            if running < 0 {
                discrepancies.push(LedgerDiscrepancy::NegativeBalance {
                    entry_id: entry.id(),
                    balance: running,
                });
            }
        }

        if running != cached_balance {
            discrepancies.push(LedgerDiscrepancy::CachedBalanceMismatch {
                ledger: running,
                cached: cached_balance,
            });
        }

        discrepancies
    }
}
