//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).
//! `AdoptionWorkflow` bundles every handler behind one caller-facing type.

pub mod handlers;
pub(crate) mod notify;
pub mod points_ledger;
pub(crate) mod unit_of_work;
pub mod workflow;

pub use handlers::*;
pub use points_ledger::PointsLedger;
pub use workflow::AdoptionWorkflow;
