use serde::{Deserialize, Serialize};

use super::{StoryType, SuccessStory};
use crate::domain::foundation::{domain_event, EventId, PetId, SuccessStoryId, Timestamp, UserId};

/// A success story was written; the affected users should be notified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessStoryCreated {
    pub event_id: EventId,
    pub story_id: SuccessStoryId,
    pub pet_id: PetId,
    pub story_type: StoryType,
    pub affected_user_ids: Vec<UserId>,
    pub adopter_id: Option<UserId>,
    pub occurred_at: Timestamp,
}

domain_event!(
    SuccessStoryCreated,
    event_type = "success_story.created.v1",
    aggregate_id = story_id,
    aggregate_type = "SuccessStory",
    occurred_at = occurred_at,
    event_id = event_id
);

impl SuccessStoryCreated {
    /// Announces a freshly written story.
    pub fn from_story(story: &SuccessStory) -> Self {
        Self {
            event_id: EventId::new(),
            story_id: story.id,
            pet_id: story.pet_id,
            story_type: story.story_type,
            affected_user_ids: story.affected_user_ids().iter().copied().collect(),
            adopter_id: story.adopter_id,
            occurred_at: story.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EventEnvelope;

    #[test]
    fn envelope_carries_affected_users() {
        let user = UserId::new();
        let event = SuccessStoryCreated {
            event_id: EventId::new(),
            story_id: SuccessStoryId::new(),
            pet_id: PetId::new(),
            story_type: StoryType::Deceased,
            affected_user_ids: vec![user],
            adopter_id: None,
            occurred_at: Timestamp::from_unix_secs(0),
        };

        let envelope = EventEnvelope::from_event(&event).unwrap();

        assert_eq!(envelope.event_type, "success_story.created.v1");
        assert_eq!(envelope.schema_version, 1);
        assert_eq!(envelope.payload["story_type"], "DECEASED");
        assert_eq!(envelope.payload["affected_user_ids"][0], user.to_string());
    }

    #[test]
    fn from_story_copies_affected_set() {
        let (a, b) = (UserId::new(), UserId::new());
        let story = SuccessStory::new(
            PetId::new(),
            crate::domain::success_story::StoryOutcome::AdoptedExternal,
            [a, b].into_iter().collect(),
            Timestamp::from_unix_secs(50),
        );

        let event = SuccessStoryCreated::from_story(&story);

        assert_eq!(event.story_id, story.id);
        assert_eq!(event.story_type, StoryType::AdoptedExternal);
        assert_eq!(event.affected_user_ids.len(), 2);
        assert_eq!(event.occurred_at, story.created_at);
    }
}
