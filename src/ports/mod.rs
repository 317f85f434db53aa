//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Write Side
//!
//! - `AdoptionStore` / `AdoptionUnitOfWork` - Atomic adoption mutations
//! - `StoryRepository` - Story lookups and delivery acknowledgements
//!
//! ## Read Side
//!
//! - `AdoptionReader` - Requests, catalog snapshots and eligibility inputs
//! - `LedgerReader` - Ledger history and cached balances
//!
//! ## Infrastructure
//!
//! - `Clock` - Current time
//! - `EventPublisher` - Notification handoff after commit

mod adoption_reader;
mod clock;
mod event_publisher;
mod ledger_reader;
mod story_repository;
mod unit_of_work;

pub use adoption_reader::AdoptionReader;
pub use clock::Clock;
pub use event_publisher::EventPublisher;
pub use ledger_reader::{CachedBalance, LedgerReader};
pub use story_repository::StoryRepository;
pub use unit_of_work::{AdoptionStore, AdoptionUnitOfWork, UserRecord};
