//! Commit-or-rollback for handler units of work.

use tracing::warn;

use crate::domain::adoption::AdoptionError;
use crate::ports::AdoptionUnitOfWork;

/// Commits `uow` when `outcome` is Ok and rolls it back otherwise.
///
/// A failed rollback is logged; the original error is returned either way.
pub(crate) async fn finish<T: Send>(
    uow: Box<dyn AdoptionUnitOfWork>,
    outcome: Result<T, AdoptionError>,
    operation: &'static str,
) -> Result<T, AdoptionError> {
    match outcome {
        Ok(value) => {
            uow.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = uow.rollback().await {
                warn!(operation, error = %rollback_err, "Rollback failed");
            }
            Err(err)
        }
    }
}
