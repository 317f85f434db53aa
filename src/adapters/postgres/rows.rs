//! Row types and column mapping shared by the PostgreSQL adapters.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

use crate::domain::adoption::{AdoptionRequest, AdoptionRequestStatus, Pet, PetStatus, Shelter};
use crate::domain::eligibility::AdopterProfile;
use crate::domain::foundation::{
    AdoptionRequestId, DomainError, DonationId, ErrorCode, PawPointTransactionId, PetId,
    ShelterId, SuccessStoryId, Timestamp, UserId,
};
use crate::domain::ledger::{PawPointTransaction, TransactionType};
use crate::domain::success_story::{StoryType, SuccessStory};
use crate::ports::UserRecord;

/// Unique index guarding the one-pending-request-per-pet rule.
pub(super) const ONE_PENDING_PER_PET: &str = "adoption_requests_one_pending_per_pet";

/// Unique index guarding the one-pending-request-per-user rule.
pub(super) const ONE_PENDING_PER_USER: &str = "adoption_requests_one_pending_per_user";

/// Donation status that makes the donor eligible and bonus-worthy.
pub(super) const DONATION_COMPLETED: &str = "completed";

pub(super) const USER_COLUMNS: &str = "id, paw_points, first_name, last_name, phone, address, \
     city, state, zip_code, date_of_birth, housing_type, own_or_rent, household_size, \
     has_children, has_other_pets, has_yard, has_fence";

pub(super) const PET_COLUMNS: &str = "id, shelter_id, name, status, adoption_fee";

pub(super) const SHELTER_COLUMNS: &str =
    "id, owner_id, name, adoptions_completed, current_published_pets";

pub(super) const REQUEST_COLUMNS: &str = "id, user_id, pet_id, shelter_id, status, \
     paw_points_used_for_reduction, fee_reduction, message, status_reason, \
     adoption_proof_image, created_at, updated_at, expires_at, approved_at, denied_at, \
     cancelled_at";

pub(super) const LEDGER_COLUMNS: &str = "id, user_id, points, transaction_type, \
     related_donation_id, related_pet_id, description, balance_after, created_at";

pub(super) const STORY_COLUMNS: &str =
    "id, pet_id, story_type, adopter_id, adoption_request_id, error_reason, created_at";

// === Users ===

#[derive(Debug, sqlx::FromRow)]
pub(super) struct UserRow {
    id: Uuid,
    paw_points: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip_code: Option<String>,
    date_of_birth: Option<NaiveDate>,
    housing_type: Option<String>,
    own_or_rent: Option<String>,
    household_size: Option<i32>,
    has_children: Option<bool>,
    has_other_pets: Option<bool>,
    has_yard: Option<bool>,
    has_fence: Option<bool>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            id: UserId::from_uuid(row.id),
            paw_points: row.paw_points,
            profile: AdopterProfile {
                first_name: row.first_name,
                last_name: row.last_name,
                phone: row.phone,
                address: row.address,
                city: row.city,
                state: row.state,
                zip_code: row.zip_code,
                date_of_birth: row.date_of_birth,
                housing_type: row.housing_type,
                own_or_rent: row.own_or_rent,
                household_size: row.household_size,
                has_children: row.has_children,
                has_other_pets: row.has_other_pets,
                has_yard: row.has_yard,
                has_fence: row.has_fence,
            },
        }
    }
}

// === Catalog ===

#[derive(Debug, sqlx::FromRow)]
pub(super) struct PetRow {
    id: Uuid,
    shelter_id: Uuid,
    name: String,
    status: String,
    adoption_fee: i64,
}

impl TryFrom<PetRow> for Pet {
    type Error = DomainError;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        Ok(Pet {
            id: PetId::from_uuid(row.id),
            shelter_id: ShelterId::from_uuid(row.shelter_id),
            name: row.name,
            status: parse_pet_status(&row.status)?,
            adoption_fee: row.adoption_fee,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ShelterRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    adoptions_completed: i64,
    current_published_pets: i64,
}

impl From<ShelterRow> for Shelter {
    fn from(row: ShelterRow) -> Self {
        Shelter {
            id: ShelterId::from_uuid(row.id),
            owner_id: UserId::from_uuid(row.owner_id),
            name: row.name,
            adoptions_completed: row.adoptions_completed,
            current_published_pets: row.current_published_pets,
        }
    }
}

// === Adoption requests ===

#[derive(Debug, sqlx::FromRow)]
pub(super) struct RequestRow {
    id: Uuid,
    user_id: Uuid,
    pet_id: Uuid,
    shelter_id: Uuid,
    status: String,
    paw_points_used_for_reduction: i64,
    fee_reduction: i64,
    message: Option<String>,
    status_reason: Option<String>,
    adoption_proof_image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    denied_at: Option<DateTime<Utc>>,
    cancelled_at: Option<DateTime<Utc>>,
}

impl TryFrom<RequestRow> for AdoptionRequest {
    type Error = DomainError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        Ok(AdoptionRequest {
            id: AdoptionRequestId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            pet_id: PetId::from_uuid(row.pet_id),
            shelter_id: ShelterId::from_uuid(row.shelter_id),
            status: parse_request_status(&row.status)?,
            paw_points_used_for_reduction: row.paw_points_used_for_reduction,
            fee_reduction: row.fee_reduction,
            message: row.message,
            status_reason: row.status_reason,
            adoption_proof_image: row.adoption_proof_image,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            expires_at: Timestamp::from_datetime(row.expires_at),
            approved_at: row.approved_at.map(Timestamp::from_datetime),
            denied_at: row.denied_at.map(Timestamp::from_datetime),
            cancelled_at: row.cancelled_at.map(Timestamp::from_datetime),
        })
    }
}

// === Ledger ===

#[derive(Debug, sqlx::FromRow)]
pub(super) struct LedgerRow {
    id: Uuid,
    user_id: Uuid,
    points: i64,
    transaction_type: String,
    related_donation_id: Option<Uuid>,
    related_pet_id: Option<Uuid>,
    description: String,
    balance_after: i64,
    created_at: DateTime<Utc>,
}

impl TryFrom<LedgerRow> for PawPointTransaction {
    type Error = DomainError;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        Ok(PawPointTransaction::restore(
            PawPointTransactionId::from_uuid(row.id),
            UserId::from_uuid(row.user_id),
            row.points,
            parse_transaction_type(&row.transaction_type)?,
            row.related_donation_id.map(DonationId::from_uuid),
            row.related_pet_id.map(PetId::from_uuid),
            row.description,
            row.balance_after,
            Timestamp::from_datetime(row.created_at),
        ))
    }
}

// === Success stories ===

#[derive(Debug, sqlx::FromRow)]
pub(super) struct StoryRow {
    pub(super) id: Uuid,
    pet_id: Uuid,
    story_type: String,
    adopter_id: Option<Uuid>,
    adoption_request_id: Option<Uuid>,
    error_reason: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub(super) struct NotificationRow {
    pub(super) user_id: Uuid,
    pub(super) delivered: bool,
}

/// Builds a story from its row and its notification rows.
pub(super) fn story_from_rows(
    row: StoryRow,
    notifications: Vec<NotificationRow>,
) -> Result<SuccessStory, DomainError> {
    let mut affected = BTreeSet::new();
    let mut sent = BTreeMap::new();
    for n in notifications {
        let user_id = UserId::from_uuid(n.user_id);
        affected.insert(user_id);
        if n.delivered {
            sent.insert(user_id, true);
        }
    }

    Ok(SuccessStory::restore(
        SuccessStoryId::from_uuid(row.id),
        PetId::from_uuid(row.pet_id),
        parse_story_type(&row.story_type)?,
        row.adopter_id.map(UserId::from_uuid),
        row.adoption_request_id.map(AdoptionRequestId::from_uuid),
        row.error_reason,
        Timestamp::from_datetime(row.created_at),
        affected,
        sent,
    ))
}

// === Parsing ===

fn invalid_column(column: &str, value: &str) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value: {}", column, value),
    )
}

pub(super) fn parse_pet_status(s: &str) -> Result<PetStatus, DomainError> {
    PetStatus::parse(s).ok_or_else(|| invalid_column("pet status", s))
}

pub(super) fn parse_request_status(s: &str) -> Result<AdoptionRequestStatus, DomainError> {
    AdoptionRequestStatus::parse(s).ok_or_else(|| invalid_column("request status", s))
}

pub(super) fn parse_transaction_type(s: &str) -> Result<TransactionType, DomainError> {
    TransactionType::parse(s).ok_or_else(|| invalid_column("transaction type", s))
}

pub(super) fn parse_story_type(s: &str) -> Result<StoryType, DomainError> {
    StoryType::parse(s).ok_or_else(|| invalid_column("story type", s))
}

/// Maps a request write failure, recognising the pending-request unique indexes.
pub(super) fn write_error(context: &str, request: &AdoptionRequest, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(mapped) = pending_violation(db_err.constraint(), request) {
            return mapped;
        }
    }
    DomainError::database(context, err)
}

fn pending_violation(constraint: Option<&str>, request: &AdoptionRequest) -> Option<DomainError> {
    match constraint? {
        ONE_PENDING_PER_PET => Some(
            DomainError::new(
                ErrorCode::PendingRequestExists,
                "Pet already has a pending adoption request",
            )
            .with_detail("pet_id", request.pet_id.to_string()),
        ),
        ONE_PENDING_PER_USER => Some(DomainError::new(
            ErrorCode::NotEligible,
            "You already have a pending adoption request",
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adoption::{AdoptionError, AdoptionPolicy};

    fn pending_request() -> AdoptionRequest {
        let pet = Pet {
            id: PetId::new(),
            shelter_id: ShelterId::new(),
            name: "Mochi".to_string(),
            status: PetStatus::Published,
            adoption_fee: 10_000,
        };
        AdoptionRequest::create(
            UserId::new(),
            &pet,
            6,
            None,
            &AdoptionPolicy::default(),
            Timestamp::from_unix_secs(1_700_000_000),
        )
        .unwrap()
    }

    #[test]
    fn pending_per_pet_violation_names_the_pet() {
        let request = pending_request();

        let mapped = pending_violation(Some(ONE_PENDING_PER_PET), &request).unwrap();

        assert_eq!(mapped.code, ErrorCode::PendingRequestExists);
        assert_eq!(
            AdoptionError::from(mapped),
            AdoptionError::PendingRequestExists { pet_id: request.pet_id }
        );
    }

    #[test]
    fn pending_per_user_violation_is_ineligibility() {
        let mapped = pending_violation(Some(ONE_PENDING_PER_USER), &pending_request()).unwrap();

        assert_eq!(mapped.code, ErrorCode::NotEligible);
        assert!(matches!(
            AdoptionError::from(mapped),
            AdoptionError::Ineligible { reasons } if reasons.len() == 1
        ));
    }

    #[test]
    fn other_constraints_are_not_pending_violations() {
        let request = pending_request();
        assert!(pending_violation(Some("adoption_requests_pkey"), &request).is_none());
        assert!(pending_violation(None, &request).is_none());
    }

    #[test]
    fn parse_pet_status_accepts_stored_values() {
        assert_eq!(parse_pet_status("published").unwrap(), PetStatus::Published);
        assert_eq!(parse_pet_status("ADOPTED").unwrap(), PetStatus::Adopted);
        assert!(parse_pet_status("sold").is_err());
    }

    #[test]
    fn parse_request_status_round_trips_storage_names() {
        for status in AdoptionRequestStatus::ALL {
            assert_eq!(parse_request_status(status.as_str()).unwrap(), status);
        }
        assert!(parse_request_status("expired").is_err());
    }

    #[test]
    fn parse_transaction_type_rejects_unknown() {
        assert_eq!(
            parse_transaction_type("compassion_bonus").unwrap(),
            TransactionType::CompassionBonus
        );
        let err = parse_transaction_type("gift").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn story_rows_restore_delivery_state() {
        let delivered = Uuid::new_v4();
        let waiting = Uuid::new_v4();
        let row = StoryRow {
            id: Uuid::new_v4(),
            pet_id: Uuid::new_v4(),
            story_type: "deceased".to_string(),
            adopter_id: None,
            adoption_request_id: None,
            error_reason: None,
            created_at: Utc::now(),
        };

        let story = story_from_rows(
            row,
            vec![
                NotificationRow { user_id: delivered, delivered: true },
                NotificationRow { user_id: waiting, delivered: false },
            ],
        )
        .unwrap();

        assert_eq!(story.story_type, StoryType::Deceased);
        assert_eq!(story.affected_user_ids().len(), 2);
        assert!(story.is_delivered(&UserId::from_uuid(delivered)));
        assert_eq!(story.pending_users(), vec![UserId::from_uuid(waiting)]);
    }

    #[test]
    fn user_row_maps_profile_columns() {
        let id = Uuid::new_v4();
        let row = UserRow {
            id,
            paw_points: 7,
            first_name: Some("Ada".to_string()),
            last_name: None,
            phone: None,
            address: None,
            city: None,
            state: None,
            zip_code: None,
            date_of_birth: None,
            housing_type: None,
            own_or_rent: None,
            household_size: Some(2),
            has_children: Some(false),
            has_other_pets: None,
            has_yard: None,
            has_fence: None,
        };

        let user = UserRecord::from(row);

        assert_eq!(user.id, UserId::from_uuid(id));
        assert_eq!(user.paw_points, 7);
        assert_eq!(user.profile.household_size, Some(2));
        assert_eq!(user.profile.has_children, Some(false));
    }
}
