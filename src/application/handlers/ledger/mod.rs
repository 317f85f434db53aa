//! PawPoints ledger handlers.

mod audit_ledger;
mod get_points_history;

pub use audit_ledger::{AuditLedgerHandler, LedgerAuditReport, UserLedgerFindings};
pub use get_points_history::{
    GetPointsHistoryHandler, GetPointsHistoryQuery, GetPointsHistoryResult,
};
