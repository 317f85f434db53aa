//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `clock` - System and fixed clocks
//! - `events` - Event bus implementations
//! - `memory` - In-memory storage for tests and local runs
//! - `postgres` - PostgreSQL storage

pub mod clock;
pub mod events;
pub mod memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
pub use events::{InMemoryEventBus, TracingEventPublisher};
pub use memory::InMemoryAdoptionStore;
pub use postgres::{
    PostgresAdoptionReader, PostgresAdoptionStore, PostgresLedgerReader, PostgresStoryRepository,
};
