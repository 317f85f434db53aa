//! Shared harness for workflow integration tests.
//!
//! Wires `AdoptionWorkflow` to the in-memory store, event bus and a fixed
//! clock so every test controls time and inspects committed state.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use paw_adoption::adapters::{FixedClock, InMemoryAdoptionStore, InMemoryEventBus};
use paw_adoption::application::{AdoptionWorkflow, CreateAdoptionRequestCommand};
use paw_adoption::domain::adoption::{AdoptionPolicy, AdoptionRequest, Pet, PetStatus, Shelter};
use paw_adoption::domain::eligibility::AdopterProfile;
use paw_adoption::domain::foundation::{PetId, ShelterId, Timestamp, UserId};
use paw_adoption::domain::ledger::{PawPointTransaction, TransactionType};
use paw_adoption::ports::{AdoptionReader, Clock, LedgerReader};

pub const START: i64 = 1_767_225_600;
pub const PUBLISHED_AT_START: i64 = 10;

pub struct Harness {
    pub store: Arc<InMemoryAdoptionStore>,
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<FixedClock>,
    pub workflow: AdoptionWorkflow,
    pub shelter_owner: UserId,
    pub shelter_id: ShelterId,
}

impl Harness {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryAdoptionStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let clock = Arc::new(FixedClock::new(Timestamp::from_unix_secs(START)));
        let workflow = AdoptionWorkflow::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            bus.clone(),
            clock.clone(),
            AdoptionPolicy::default(),
        );

        let shelter_owner = UserId::new();
        let shelter_id = ShelterId::new();
        store
            .add_shelter(Shelter {
                id: shelter_id,
                owner_id: shelter_owner,
                name: "Cedar Hollow Rescue".to_string(),
                adoptions_completed: 0,
                current_published_pets: PUBLISHED_AT_START,
            })
            .await;

        Self {
            store,
            bus,
            clock,
            workflow,
            shelter_owner,
            shelter_id,
        }
    }

    /// A donor with a complete profile and `points` earned from donations.
    pub async fn donor(&self, points: i64) -> UserId {
        let id = UserId::new();
        self.store.add_user(id, complete_profile()).await;
        if points > 0 {
            self.store
                .grant_points(id, points, TransactionType::Donation, None, self.clock.now())
                .await
                .expect("grant points");
        }
        id
    }

    pub async fn published_pet(&self, name: &str, adoption_fee: i64) -> Pet {
        let pet = Pet {
            id: PetId::new(),
            shelter_id: self.shelter_id,
            name: name.to_string(),
            status: PetStatus::Published,
            adoption_fee,
        };
        self.store.add_pet(pet.clone()).await;
        pet
    }

    pub async fn donate(&self, user_id: UserId, pet: &Pet) {
        self.store.add_donation(user_id, pet.id, true).await;
    }

    pub async fn request(
        &self,
        user_id: UserId,
        pet: &Pet,
        points: i64,
    ) -> Result<AdoptionRequest, paw_adoption::domain::adoption::AdoptionError> {
        self.workflow
            .create_request(CreateAdoptionRequestCommand {
                user_id,
                pet_id: pet.id,
                paw_points_to_use: points,
                message: Some(format!("I would love to adopt {}", pet.name)),
            })
            .await
            .map(|result| result.request)
    }

    pub async fn balance(&self, user_id: UserId) -> i64 {
        AdoptionReader::find_user(&*self.store, &user_id)
            .await
            .expect("read user")
            .expect("user exists")
            .paw_points
    }

    pub async fn ledger(&self, user_id: UserId) -> Vec<PawPointTransaction> {
        self.store
            .entries_for_user(&user_id)
            .await
            .expect("read ledger")
    }

    pub async fn assert_ledger_consistent(&self) {
        let report = self.workflow.audit_ledger().await.expect("audit");
        assert!(report.is_consistent(), "ledger drifted: {report:?}");
    }
}

pub fn complete_profile() -> AdopterProfile {
    AdopterProfile {
        first_name: Some("Rosa".to_string()),
        last_name: Some("Okafor".to_string()),
        phone: Some("555-0142".to_string()),
        address: Some("88 Larch Lane".to_string()),
        city: Some("Duluth".to_string()),
        state: Some("MN".to_string()),
        zip_code: Some("55802".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1987, 3, 9),
        housing_type: Some("apartment".to_string()),
        own_or_rent: Some("rent".to_string()),
        household_size: Some(1),
        has_children: Some(false),
        has_other_pets: Some(false),
        has_yard: None,
        has_fence: None,
    }
}
