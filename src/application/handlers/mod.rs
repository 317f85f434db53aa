//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod adoption;
pub mod ledger;
pub mod success_story;

pub use adoption::*;
pub use ledger::*;
pub use success_story::*;
