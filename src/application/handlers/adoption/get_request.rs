//! GetAdoptionRequestHandler - Query handler for a single request.

use std::sync::Arc;

use crate::domain::adoption::{AdoptionError, AdoptionRequest};
use crate::domain::foundation::{AdoptionRequestId, OwnedByUser, UserId};
use crate::ports::AdoptionReader;

#[derive(Debug, Clone)]
pub struct GetAdoptionRequestQuery {
    pub actor_id: UserId,
    pub request_id: AdoptionRequestId,
}

/// Returns a request to its requester or to the operator of its shelter.
pub struct GetAdoptionRequestHandler {
    reader: Arc<dyn AdoptionReader>,
}

impl GetAdoptionRequestHandler {
    pub fn new(reader: Arc<dyn AdoptionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetAdoptionRequestQuery,
    ) -> Result<AdoptionRequest, AdoptionError> {
        let request = self
            .reader
            .find_request(&query.request_id)
            .await?
            .ok_or_else(|| AdoptionError::request_not_found(query.request_id))?;

        if request.is_owner(&query.actor_id) {
            return Ok(request);
        }

        let shelter = self.reader.find_shelter(&request.shelter_id).await?;
        match shelter {
            Some(shelter) if shelter.is_owner(&query.actor_id) => Ok(request),
            _ => Err(AdoptionError::forbidden(
                "Only the requester or the shelter may view this request",
            )),
        }
    }
}
