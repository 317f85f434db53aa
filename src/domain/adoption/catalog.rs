//! Catalog snapshots the adoption core reads and narrowly mutates.
//!
//! Pets and shelters are owned by the catalog subsystem. Inside an adoption
//! unit of work the core only changes a pet's status and a shelter's two
//! counters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{OwnedByUser, PetId, ShelterId, UserId};

/// Listing status of a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStatus {
    Draft,
    Published,
    Adopted,
    Deceased,
    Removed,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Draft => "draft",
            PetStatus::Published => "published",
            PetStatus::Adopted => "adopted",
            PetStatus::Deceased => "deceased",
            PetStatus::Removed => "removed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(PetStatus::Draft),
            "published" => Some(PetStatus::Published),
            "adopted" => Some(PetStatus::Adopted),
            "deceased" => Some(PetStatus::Deceased),
            "removed" => Some(PetStatus::Removed),
            _ => None,
        }
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pet listed by a shelter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub shelter_id: ShelterId,
    pub name: String,
    pub status: PetStatus,
    /// Adoption fee in cents.
    pub adoption_fee: i64,
}

impl Pet {
    pub fn is_published(&self) -> bool {
        self.status == PetStatus::Published
    }
}

/// A shelter and its adoption counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shelter {
    pub id: ShelterId,
    /// The user account that operates the shelter.
    pub owner_id: UserId,
    pub name: String,
    pub adoptions_completed: i64,
    pub current_published_pets: i64,
}

impl Shelter {
    /// Counts a completed adoption and removes the pet from the published count.
    pub fn record_adoption(&mut self) {
        self.adoptions_completed += 1;
        self.unpublish_one();
    }

    /// Removes one pet from the published count, never going below zero.
    pub fn unpublish_one(&mut self) {
        self.current_published_pets = (self.current_published_pets - 1).max(0);
    }
}

impl OwnedByUser for Shelter {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shelter(published: i64) -> Shelter {
        Shelter {
            id: ShelterId::new(),
            owner_id: UserId::new(),
            name: "Happy Tails".to_string(),
            adoptions_completed: 3,
            current_published_pets: published,
        }
    }

    #[test]
    fn record_adoption_updates_both_counters() {
        let mut s = shelter(4);
        s.record_adoption();
        assert_eq!(s.adoptions_completed, 4);
        assert_eq!(s.current_published_pets, 3);
    }

    #[test]
    fn published_count_never_goes_negative() {
        let mut s = shelter(0);
        s.record_adoption();
        assert_eq!(s.current_published_pets, 0);
        s.unpublish_one();
        assert_eq!(s.current_published_pets, 0);
    }

    #[test]
    fn shelter_owner_passes_ownership_check() {
        let s = shelter(1);
        assert!(s.check_ownership(&s.owner_id.clone()).is_ok());
        assert!(s.check_ownership(&UserId::new()).is_err());
    }

    #[test]
    fn pet_status_string_conversion_is_consistent() {
        for status in [
            PetStatus::Draft,
            PetStatus::Published,
            PetStatus::Adopted,
            PetStatus::Deceased,
            PetStatus::Removed,
        ] {
            assert_eq!(PetStatus::parse(status.as_str()), Some(status));
        }
    }
}
