//! Loading and authorizing the rows a shelter-side transition touches.

use crate::domain::adoption::{AdoptionError, AdoptionRequest, Pet, Shelter};
use crate::domain::foundation::{AdoptionRequestId, OwnedByUser, PetId, ShelterId, UserId};
use crate::ports::{AdoptionReader, AdoptionUnitOfWork};

/// A request together with its pet and the pet's shelter.
pub(crate) struct ShelterScope {
    pub request: AdoptionRequest,
    pub pet: Pet,
    pub shelter: Shelter,
}

/// Loads a request and checks that `actor_id` operates the pet's shelter.
pub(crate) async fn load_for_shelter_owner(
    uow: &mut dyn AdoptionUnitOfWork,
    request_id: &AdoptionRequestId,
    actor_id: &UserId,
) -> Result<ShelterScope, AdoptionError> {
    let request = uow
        .find_request(request_id)
        .await?
        .ok_or_else(|| AdoptionError::request_not_found(request_id))?;
    let (pet, shelter) = load_pet_and_shelter(uow, &request.pet_id).await?;
    shelter.check_ownership(actor_id)?;

    Ok(ShelterScope {
        request,
        pet,
        shelter,
    })
}

/// Loads a pet and the shelter listing it.
pub(crate) async fn load_pet_and_shelter(
    uow: &mut dyn AdoptionUnitOfWork,
    pet_id: &PetId,
) -> Result<(Pet, Shelter), AdoptionError> {
    let pet = uow
        .find_pet(pet_id)
        .await?
        .ok_or_else(|| AdoptionError::pet_not_found(*pet_id))?;
    let shelter = uow
        .find_shelter(&pet.shelter_id)
        .await?
        .ok_or_else(|| AdoptionError::shelter_not_found(pet.shelter_id))?;
    Ok((pet, shelter))
}

/// Read-side check that `actor_id` operates `shelter_id`.
pub(crate) async fn owned_shelter(
    reader: &dyn AdoptionReader,
    shelter_id: &ShelterId,
    actor_id: &UserId,
) -> Result<Shelter, AdoptionError> {
    let shelter = reader
        .find_shelter(shelter_id)
        .await?
        .ok_or_else(|| AdoptionError::shelter_not_found(*shelter_id))?;
    shelter.check_ownership(actor_id)?;
    Ok(shelter)
}
