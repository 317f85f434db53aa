//! Success stories and donor bonuses for resolved pets.

mod engine;
mod events;
mod story;

pub use engine::{BonusAward, StoryPlan, SuccessStoryEngine};
pub use events::SuccessStoryCreated;
pub use story::{NotificationStatus, StoryOutcome, StoryType, SuccessStory};
