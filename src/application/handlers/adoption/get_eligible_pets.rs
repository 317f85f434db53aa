//! GetEligiblePetsHandler - pets a donor could request to adopt.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::adoption::{AdoptionError, AdoptionPolicy, Pet};
use crate::domain::foundation::UserId;
use crate::ports::AdoptionReader;

#[derive(Debug, Clone)]
pub struct GetEligiblePetsQuery {
    pub user_id: UserId,
}

/// A published pet the user donated to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligiblePet {
    pub pet: Pet,
    /// Someone already has a pending request on this pet.
    pub has_pending_request: bool,
    /// Reduction in cents the user's whole balance would buy.
    pub max_fee_reduction: i64,
}

pub struct GetEligiblePetsHandler {
    reader: Arc<dyn AdoptionReader>,
    policy: AdoptionPolicy,
}

impl GetEligiblePetsHandler {
    pub fn new(reader: Arc<dyn AdoptionReader>, policy: AdoptionPolicy) -> Self {
        Self { reader, policy }
    }

    pub async fn handle(
        &self,
        query: GetEligiblePetsQuery,
    ) -> Result<Vec<EligiblePet>, AdoptionError> {
        let user = self
            .reader
            .find_user(&query.user_id)
            .await?
            .ok_or_else(|| AdoptionError::user_not_found(query.user_id))?;

        let pets = self.reader.donated_published_pets(&query.user_id).await?;
        let mut eligible = Vec::with_capacity(pets.len());
        for pet in pets {
            let has_pending_request = self.reader.has_pending_request_for_pet(&pet.id).await?;
            let max_fee_reduction = self
                .policy
                .max_fee_reduction(user.paw_points, pet.adoption_fee);
            eligible.push(EligiblePet {
                pet,
                has_pending_request,
                max_fee_reduction,
            });
        }
        Ok(eligible)
    }
}
