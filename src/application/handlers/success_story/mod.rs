//! Success story handlers.
//!
//! Stories are created by the adoption handlers. These handlers serve the
//! notification collaborator: delivery acknowledgements and progress reads.

mod get_notifications;
mod get_pet_stories;
mod mark_notification_sent;

pub use get_notifications::{
    GetNotificationStatusHandler, GetNotificationStatusQuery, GetPendingNotificationsHandler,
    GetPendingNotificationsQuery,
};
pub use get_pet_stories::{GetPetStoriesHandler, GetPetStoriesQuery};
pub use mark_notification_sent::{
    MarkNotificationSentCommand, MarkNotificationSentHandler, MarkNotificationSentResult,
};
