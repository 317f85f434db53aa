//! Query handlers for story notification progress.

use std::sync::Arc;

use crate::domain::adoption::AdoptionError;
use crate::domain::foundation::{SuccessStoryId, UserId};
use crate::domain::success_story::{NotificationStatus, SuccessStory};
use crate::ports::StoryRepository;

#[derive(Debug, Clone)]
pub struct GetNotificationStatusQuery {
    pub story_id: SuccessStoryId,
}

/// Sent, pending and total delivery counts for one story.
pub struct GetNotificationStatusHandler {
    stories: Arc<dyn StoryRepository>,
}

impl GetNotificationStatusHandler {
    pub fn new(stories: Arc<dyn StoryRepository>) -> Self {
        Self { stories }
    }

    pub async fn handle(
        &self,
        query: GetNotificationStatusQuery,
    ) -> Result<NotificationStatus, AdoptionError> {
        Ok(load(&*self.stories, &query.story_id)
            .await?
            .notification_status())
    }
}

#[derive(Debug, Clone)]
pub struct GetPendingNotificationsQuery {
    pub story_id: SuccessStoryId,
}

/// Affected users the notifier has not reached yet.
pub struct GetPendingNotificationsHandler {
    stories: Arc<dyn StoryRepository>,
}

impl GetPendingNotificationsHandler {
    pub fn new(stories: Arc<dyn StoryRepository>) -> Self {
        Self { stories }
    }

    pub async fn handle(
        &self,
        query: GetPendingNotificationsQuery,
    ) -> Result<Vec<UserId>, AdoptionError> {
        Ok(load(&*self.stories, &query.story_id).await?.pending_users())
    }
}

async fn load(
    stories: &dyn StoryRepository,
    story_id: &SuccessStoryId,
) -> Result<SuccessStory, AdoptionError> {
    stories
        .find_by_id(story_id)
        .await?
        .ok_or_else(|| AdoptionError::story_not_found(*story_id))
}
