//! Success story repository port.
//!
//! Stories are inserted through the adoption unit of work. This port covers
//! what happens afterwards: loading stories and recording delivery
//! acknowledgements from the notification collaborator.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PetId, SuccessStoryId, UserId};
use crate::domain::success_story::SuccessStory;

#[async_trait]
pub trait StoryRepository: Send + Sync {
    async fn find_by_id(&self, id: &SuccessStoryId) -> Result<Option<SuccessStory>, DomainError>;

    /// Stories for a pet, oldest first.
    async fn find_by_pet(&self, pet_id: &PetId) -> Result<Vec<SuccessStory>, DomainError>;

    /// Records that the story's notification reached `user_id`.
    ///
    /// Idempotent. Callers must check the user is affected first.
    async fn record_delivery(
        &self,
        story_id: &SuccessStoryId,
        user_id: &UserId,
    ) -> Result<(), DomainError>;
}
