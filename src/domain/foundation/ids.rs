//! Strongly-typed identifier value objects.
//!
//! Every entity the adoption core touches is keyed by a UUID. Each key gets
//! its own newtype so a `PetId` can never be passed where a `UserId` is
//! expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Identifier of a platform user (donor, adopter or shelter operator).
    UserId
);

uuid_id!(
    /// Identifier of a pet listed by a shelter.
    PetId
);

uuid_id!(
    /// Identifier of a shelter.
    ShelterId
);

uuid_id!(
    /// Identifier of a donation made by a user to a pet.
    DonationId
);

uuid_id!(
    /// Identifier of an adoption request.
    AdoptionRequestId
);

uuid_id!(
    /// Identifier of a single PawPoints ledger entry.
    PawPointTransactionId
);

uuid_id!(
    /// Identifier of a success story.
    SuccessStoryId
);
