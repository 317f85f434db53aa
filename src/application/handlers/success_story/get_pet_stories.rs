//! GetPetStoriesHandler - stories written for a pet.

use std::sync::Arc;

use crate::domain::adoption::AdoptionError;
use crate::domain::foundation::PetId;
use crate::domain::success_story::SuccessStory;
use crate::ports::StoryRepository;

#[derive(Debug, Clone)]
pub struct GetPetStoriesQuery {
    pub pet_id: PetId,
}

pub struct GetPetStoriesHandler {
    stories: Arc<dyn StoryRepository>,
}

impl GetPetStoriesHandler {
    pub fn new(stories: Arc<dyn StoryRepository>) -> Self {
        Self { stories }
    }

    /// Oldest first. Empty when the pet has never been resolved.
    pub async fn handle(
        &self,
        query: GetPetStoriesQuery,
    ) -> Result<Vec<SuccessStory>, AdoptionError> {
        Ok(self.stories.find_by_pet(&query.pet_id).await?)
    }
}
