//! Event bus adapters.
//!
//! - `InMemoryEventBus` - In-process capture of published envelopes
//! - `TracingEventPublisher` - Writes envelopes to the structured log

mod in_memory;
mod tracing_publisher;

pub use in_memory::InMemoryEventBus;
pub use tracing_publisher::TracingEventPublisher;
