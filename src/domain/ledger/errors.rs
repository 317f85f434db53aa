//! Ledger error types.

use thiserror::Error;

use super::TransactionType;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised when a PawPoints movement is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("PawPoints amount must be positive, got {points}")]
    NonPositiveAmount { points: i64 },

    #[error("Insufficient PawPoints: requested {requested}, available {available}")]
    InsufficientBalance { requested: i64, available: i64 },

    #[error("{0} cannot be used as an award")]
    InvalidAwardType(TransactionType),
}

impl LedgerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::NonPositiveAmount { .. } | LedgerError::InvalidAwardType(_) => {
                ErrorCode::InvalidPointAmount
            }
            LedgerError::InsufficientBalance { .. } => ErrorCode::InsufficientPawPoints,
        }
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
