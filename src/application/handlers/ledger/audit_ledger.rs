//! AuditLedgerHandler - replays every user's ledger against the cache.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::adoption::AdoptionError;
use crate::domain::foundation::UserId;
use crate::domain::ledger::{LedgerAudit, LedgerDiscrepancy};
use crate::ports::LedgerReader;

/// Discrepancies found for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserLedgerFindings {
    pub user_id: UserId,
    pub discrepancies: Vec<LedgerDiscrepancy>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LedgerAuditReport {
    pub users_checked: usize,
    /// Only users with at least one discrepancy.
    pub findings: Vec<UserLedgerFindings>,
}

impl LedgerAuditReport {
    pub fn is_consistent(&self) -> bool {
        self.findings.is_empty()
    }
}

pub struct AuditLedgerHandler {
    ledger: Arc<dyn LedgerReader>,
}

impl AuditLedgerHandler {
    pub fn new(ledger: Arc<dyn LedgerReader>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self) -> Result<LedgerAuditReport, AdoptionError> {
        let balances = self.ledger.cached_balances().await?;
        let mut report = LedgerAuditReport {
            users_checked: balances.len(),
            findings: Vec::new(),
        };

        for balance in balances {
            let entries = self.ledger.entries_for_user(&balance.user_id).await?;
            let discrepancies = LedgerAudit::verify(&entries, balance.paw_points);
            if !discrepancies.is_empty() {
                warn!(
                    user_id = %balance.user_id,
                    count = discrepancies.len(),
                    "Ledger does not match cached balance"
                );
                report.findings.push(UserLedgerFindings {
                    user_id: balance.user_id,
                    discrepancies,
                });
            }
        }

        info!(
            users_checked = report.users_checked,
            inconsistent = report.findings.len(),
            "Ledger audit finished"
        );
        Ok(report)
    }
}
