//! In-memory event bus.
//!
//! Captures published envelopes so tests (and local runs without a
//! notification service) can inspect what the workflow handed off.
//!
//! # Panics
//!
//! Accessors panic if the internal lock is poisoned. This adapter is not
//! meant for production delivery.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// Event publisher that records every envelope in memory.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// let workflow = AdoptionWorkflow::new(store, reader, stories, ledger, bus.clone(), clock, policy);
///
/// workflow.create_request(cmd).await?;
/// assert!(bus.has_event("adoption_request.created.v1"));
/// ```
#[derive(Default)]
pub struct InMemoryEventBus {
    published: Mutex<Vec<EventEnvelope>>,
    failure: Mutex<Option<String>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following publish fail with `message` until cleared.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self
            .failure
            .lock()
            .expect("InMemoryEventBus: failure lock poisoned") = Some(message.into());
    }

    /// Restores successful delivery.
    pub fn recover(&self) {
        *self
            .failure
            .lock()
            .expect("InMemoryEventBus: failure lock poisoned") = None;
    }

    /// All envelopes published so far, in order.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .lock()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.published
            .lock()
            .expect("InMemoryEventBus: published lock poisoned")
            .len()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .lock()
            .expect("InMemoryEventBus: published lock poisoned")
            .iter()
            .any(|e| e.event_type == event_type)
    }

    pub fn clear(&self) {
        self.published
            .lock()
            .expect("InMemoryEventBus: published lock poisoned")
            .clear();
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let failure = self
            .failure
            .lock()
            .expect("InMemoryEventBus: failure lock poisoned")
            .clone();
        if let Some(message) = failure {
            return Err(DomainError::new(ErrorCode::InternalError, message)
                .with_detail("event_type", event.event_type));
        }

        self.published
            .lock()
            .expect("InMemoryEventBus: published lock poisoned")
            .push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
