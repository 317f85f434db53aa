//! MarkNotificationSentHandler - delivery acknowledgement from the notifier.

use std::sync::Arc;

use tracing::info;

use crate::domain::adoption::AdoptionError;
use crate::domain::foundation::{SuccessStoryId, UserId};
use crate::domain::success_story::NotificationStatus;
use crate::ports::StoryRepository;

#[derive(Debug, Clone)]
pub struct MarkNotificationSentCommand {
    pub story_id: SuccessStoryId,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkNotificationSentResult {
    /// False when the delivery had already been recorded.
    pub newly_recorded: bool,
    pub status: NotificationStatus,
}

/// Records that a story's notification reached one affected user.
///
/// Repeating the acknowledgement is a no-op.
pub struct MarkNotificationSentHandler {
    stories: Arc<dyn StoryRepository>,
}

impl MarkNotificationSentHandler {
    pub fn new(stories: Arc<dyn StoryRepository>) -> Self {
        Self { stories }
    }

    pub async fn handle(
        &self,
        cmd: MarkNotificationSentCommand,
    ) -> Result<MarkNotificationSentResult, AdoptionError> {
        let mut story = self
            .stories
            .find_by_id(&cmd.story_id)
            .await?
            .ok_or_else(|| AdoptionError::story_not_found(cmd.story_id))?;

        let newly_recorded = story.mark_notification_sent(cmd.user_id)?;
        if newly_recorded {
            self.stories
                .record_delivery(&cmd.story_id, &cmd.user_id)
                .await?;
            info!(story_id = %cmd.story_id, user_id = %cmd.user_id, "Story notification delivered");
        }

        Ok(MarkNotificationSentResult {
            newly_recorded,
            status: story.notification_status(),
        })
    }
}
