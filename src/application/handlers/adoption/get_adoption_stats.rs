//! GetAdoptionStatsHandler - per-shelter request statistics.

use std::sync::Arc;

use serde::Serialize;

use super::access::owned_shelter;
use crate::domain::adoption::{AdoptionError, AdoptionRequest, AdoptionRequestStatus};
use crate::domain::foundation::{ShelterId, UserId};
use crate::ports::AdoptionReader;

#[derive(Debug, Clone)]
pub struct GetAdoptionStatsQuery {
    pub actor_id: UserId,
    pub shelter_id: ShelterId,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AdoptionStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub denied: usize,
    pub cancelled: usize,
    /// PawPoints spent across every request, refunded or not.
    pub points_spent: i64,
    /// PawPoints returned on denied and cancelled requests.
    pub points_refunded: i64,
    /// Fee reduction in cents on approved requests.
    pub fee_reduction_granted: i64,
}

impl AdoptionStats {
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a AdoptionRequest>) -> Self {
        requests.into_iter().fold(Self::default(), |mut stats, r| {
            stats.total += 1;
            stats.points_spent += r.paw_points_used_for_reduction;
            match r.status {
                AdoptionRequestStatus::Pending => stats.pending += 1,
                AdoptionRequestStatus::Approved => {
                    stats.approved += 1;
                    stats.fee_reduction_granted += r.fee_reduction;
                }
                AdoptionRequestStatus::Denied => {
                    stats.denied += 1;
                    stats.points_refunded += r.paw_points_used_for_reduction;
                }
                AdoptionRequestStatus::Cancelled => {
                    stats.cancelled += 1;
                    stats.points_refunded += r.paw_points_used_for_reduction;
                }
            }
            stats
        })
    }
}

/// Shelter owner only.
pub struct GetAdoptionStatsHandler {
    reader: Arc<dyn AdoptionReader>,
}

impl GetAdoptionStatsHandler {
    pub fn new(reader: Arc<dyn AdoptionReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetAdoptionStatsQuery,
    ) -> Result<AdoptionStats, AdoptionError> {
        owned_shelter(&*self.reader, &query.shelter_id, &query.actor_id).await?;
        let requests = self.reader.list_by_shelter(&query.shelter_id, None).await?;
        Ok(AdoptionStats::from_requests(&requests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAdoptionStore;
    use crate::domain::adoption::{AdoptionPolicy, ErrorKind, Pet, PetStatus, Shelter};
    use crate::domain::foundation::{PetId, Timestamp};
    use crate::ports::AdoptionStore;

    fn request(points: i64, fee: i64) -> AdoptionRequest {
        let pet = Pet {
            id: PetId::new(),
            shelter_id: ShelterId::new(),
            name: "Tansy".to_string(),
            status: PetStatus::Published,
            adoption_fee: fee,
        };
        AdoptionRequest::create(
            UserId::new(),
            &pet,
            points,
            None,
            &AdoptionPolicy::default(),
            Timestamp::from_unix_secs(1_700_000_000),
        )
        .unwrap()
    }

    #[test]
    fn stats_split_points_by_outcome() {
        let now = Timestamp::from_unix_secs(1_700_000_100);
        let pending = request(5, 0);
        let mut approved = request(10, 10_000);
        approved.approve(None, None, now).unwrap();
        let mut denied = request(7, 10_000);
        denied.deny(None, now).unwrap();
        let mut cancelled = request(6, 10_000);
        cancelled
            .cancel(None, &AdoptionPolicy::default(), now)
            .unwrap();

        let stats = AdoptionStats::from_requests(&[pending, approved, denied, cancelled]);

        assert_eq!(
            stats,
            AdoptionStats {
                total: 4,
                pending: 1,
                approved: 1,
                denied: 1,
                cancelled: 1,
                points_spent: 28,
                points_refunded: 13,
                fee_reduction_granted: 500,
            }
        );
    }

    #[test]
    fn no_requests_yields_zeroes() {
        let none: Vec<AdoptionRequest> = Vec::new();
        assert_eq!(AdoptionStats::from_requests(&none), AdoptionStats::default());
    }

    #[tokio::test]
    async fn only_shelter_owner_sees_stats() {
        let store = Arc::new(InMemoryAdoptionStore::new());
        let owner = UserId::new();
        let shelter = Shelter {
            id: ShelterId::new(),
            owner_id: owner,
            name: "Eastgate".to_string(),
            adoptions_completed: 0,
            current_published_pets: 1,
        };
        let mut r = request(5, 0);
        r.shelter_id = shelter.id;
        let shelter_id = shelter.id;
        store.add_shelter(shelter).await;
        let mut uow = store.begin().await.unwrap();
        uow.insert_request(&r).await.unwrap();
        uow.commit().await.unwrap();

        let handler = GetAdoptionStatsHandler::new(store);
        let stats = handler
            .handle(GetAdoptionStatsQuery {
                actor_id: owner,
                shelter_id,
            })
            .await
            .unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.pending, 1);

        let err = handler
            .handle(GetAdoptionStatsQuery {
                actor_id: UserId::new(),
                shelter_id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
