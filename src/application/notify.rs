//! Post-commit handoff of domain events to the notification collaborator.

use serde::Serialize;
use tracing::warn;

use crate::domain::foundation::{DomainEvent, EventEnvelope, UserId};
use crate::ports::EventPublisher;

/// Publishes `event` tagged with the acting user and the id shared by every
/// event of one operation.
///
/// Failures are logged and swallowed; the change that produced the event has
/// already been committed.
pub(crate) async fn publish_event<E>(
    publisher: &dyn EventPublisher,
    event: &E,
    actor: &UserId,
    correlation_id: &str,
) where
    E: DomainEvent + Serialize,
{
    let envelope = match EventEnvelope::from_event(event) {
        Ok(envelope) => envelope
            .with_user_id(actor.to_string())
            .with_correlation_id(correlation_id),
        Err(err) => {
            warn!(
                event_type = event.event_type(),
                aggregate_id = %event.aggregate_id(),
                error = %err,
                "Failed to serialize event"
            );
            return;
        }
    };

    if let Err(err) = publisher.publish(envelope).await {
        warn!(
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            error = %err,
            "Notification handoff failed"
        );
    }
}
