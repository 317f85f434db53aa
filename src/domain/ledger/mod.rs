//! PawPoints ledger.
//!
//! The ledger is the append-only history of PawPoints movements and the
//! source of truth for each user's balance. `PointsAccount` is the only type
//! that produces new entries; `LedgerAudit` verifies that the cached balance
//! still equals the replayed history.

mod account;
mod audit;
mod errors;
mod transaction;

pub use account::{PointsAccount, BONUS_POINTS};
pub use audit::{LedgerAudit, LedgerDiscrepancy};
pub use errors::LedgerError;
pub use transaction::{PawPointTransaction, TransactionType};
