//! Tunable adoption rules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Thresholds and windows that govern adoption requests.
///
/// Defaults match production behaviour; `config::PolicyConfig` overrides them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionPolicy {
    /// Points every request must spend.
    pub min_points: i64,

    /// Fee reduction bought by each point above `min_points`, in cents.
    pub point_value_cents: i64,

    /// How long after creation the requester may still cancel.
    pub cancellation_window_hours: i64,

    /// Advisory lifetime of a pending request.
    pub request_expiry_days: i64,

    /// Block after the requester cancels a request.
    pub cancellation_cooldown_hours: i64,

    /// Block after the shelter approves or denies a request.
    pub resolution_cooldown_days: i64,

    /// Maximum message length in characters.
    pub max_message_length: usize,
}

impl Default for AdoptionPolicy {
    fn default() -> Self {
        Self {
            min_points: 5,
            point_value_cents: 100,
            cancellation_window_hours: 24,
            request_expiry_days: 7,
            cancellation_cooldown_hours: 72,
            resolution_cooldown_days: 7,
            max_message_length: 1000,
        }
    }
}

impl AdoptionPolicy {
    /// Fee reduction in cents for spending `points` on a pet with the given fee.
    ///
    /// Only points above the mandatory minimum count. The result is capped at
    /// the fee and never negative.
    pub fn fee_reduction(&self, points: i64, adoption_fee_cents: i64) -> i64 {
        let bonus_points = (points - self.min_points).max(0);
        bonus_points
            .saturating_mul(self.point_value_cents)
            .min(adoption_fee_cents)
            .max(0)
    }

    /// Largest reduction a balance could buy, or 0 when it cannot fund a request.
    pub fn max_fee_reduction(&self, balance: i64, adoption_fee_cents: i64) -> i64 {
        if balance < self.min_points {
            return 0;
        }
        self.fee_reduction(balance, adoption_fee_cents)
    }

    /// When a request created at `created_at` stops being current.
    pub fn expires_at(&self, created_at: Timestamp) -> Timestamp {
        created_at.plus_days(self.request_expiry_days)
    }

    /// True while a request created at `created_at` may still be cancelled.
    pub fn within_cancellation_window(&self, created_at: Timestamp, now: Timestamp) -> bool {
        now.duration_since(&created_at) <= chrono::Duration::hours(self.cancellation_window_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_reduction_counts_points_above_minimum() {
        let policy = AdoptionPolicy::default();
        assert_eq!(policy.fee_reduction(5, 15_000), 0);
        assert_eq!(policy.fee_reduction(6, 15_000), 100);
        assert_eq!(policy.fee_reduction(25, 15_000), 2_000);
    }

    #[test]
    fn fee_reduction_is_capped_at_fee() {
        let policy = AdoptionPolicy::default();
        assert_eq!(policy.fee_reduction(500, 2_500), 2_500);
    }

    #[test]
    fn fee_reduction_is_never_negative() {
        let policy = AdoptionPolicy::default();
        assert_eq!(policy.fee_reduction(2, 2_500), 0);
        assert_eq!(policy.fee_reduction(10, 0), 0);
        assert_eq!(policy.fee_reduction(10, -50), 0);
    }

    #[test]
    fn max_fee_reduction_requires_minimum_balance() {
        let policy = AdoptionPolicy::default();
        assert_eq!(policy.max_fee_reduction(4, 10_000), 0);
        assert_eq!(policy.max_fee_reduction(12, 10_000), 700);
    }

    #[test]
    fn expires_seven_days_after_creation() {
        let policy = AdoptionPolicy::default();
        let created = Timestamp::from_unix_secs(1_000_000);
        assert_eq!(policy.expires_at(created), created.plus_days(7));
    }

    #[test]
    fn cancellation_window_is_inclusive_at_24_hours() {
        let policy = AdoptionPolicy::default();
        let created = Timestamp::from_unix_secs(1_000_000);
        assert!(policy.within_cancellation_window(created, created.plus_hours(24)));
        assert!(!policy.within_cancellation_window(
            created,
            created.plus_hours(24).plus(chrono::Duration::seconds(1))
        ));
    }
}
