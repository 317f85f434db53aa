//! Query handlers for request listings.

use std::sync::Arc;

use super::access::owned_shelter;
use crate::domain::adoption::{AdoptionError, AdoptionRequest, AdoptionRequestStatus};
use crate::domain::foundation::{ShelterId, UserId};
use crate::ports::AdoptionReader;

#[derive(Debug, Clone)]
pub struct ListUserRequestsQuery {
    pub user_id: UserId,
}

/// Lists a user's own requests, newest first.
pub struct ListUserRequestsHandler {
    reader: Arc<dyn AdoptionReader>,
}

impl ListUserRequestsHandler {
    pub fn new(reader: Arc<dyn AdoptionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListUserRequestsQuery,
    ) -> Result<Vec<AdoptionRequest>, AdoptionError> {
        Ok(self.reader.list_by_user(&query.user_id).await?)
    }
}

#[derive(Debug, Clone)]
pub struct ListShelterRequestsQuery {
    pub actor_id: UserId,
    pub shelter_id: ShelterId,
    pub status: Option<AdoptionRequestStatus>,
}

/// Lists requests for a shelter's pets. Shelter owner only.
pub struct ListShelterRequestsHandler {
    reader: Arc<dyn AdoptionReader>,
}

impl ListShelterRequestsHandler {
    pub fn new(reader: Arc<dyn AdoptionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: ListShelterRequestsQuery,
    ) -> Result<Vec<AdoptionRequest>, AdoptionError> {
        owned_shelter(&*self.reader, &query.shelter_id, &query.actor_id).await?;
        Ok(self
            .reader
            .list_by_shelter(&query.shelter_id, query.status)
            .await?)
    }
}
