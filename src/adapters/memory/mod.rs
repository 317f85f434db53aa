//! In-memory storage adapters.

mod store;

pub use store::InMemoryAdoptionStore;
