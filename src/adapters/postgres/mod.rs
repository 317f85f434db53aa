//! PostgreSQL adapters - Database implementations for the storage ports.
//!
//! - `PostgresAdoptionStore` - Transactional unit of work
//! - `PostgresAdoptionReader` - Request, catalog and donation queries
//! - `PostgresStoryRepository` - Success stories and delivery tracking
//! - `PostgresLedgerReader` - Ledger history and cached balances

mod adoption_reader;
mod adoption_store;
mod ledger_reader;
mod rows;
mod story_repository;

pub use adoption_reader::PostgresAdoptionReader;
pub use adoption_store::PostgresAdoptionStore;
pub use ledger_reader::PostgresLedgerReader;
pub use story_repository::PostgresStoryRepository;
