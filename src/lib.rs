//! PawPoints adoption core.
//!
//! Donors earn PawPoints by donating to shelter pets and spend them on
//! adoption requests. This crate owns the request lifecycle, the PawPoints
//! ledger and the success stories written when a pet's journey ends.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
