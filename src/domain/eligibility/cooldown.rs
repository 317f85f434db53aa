//! Request cooldowns after cancellations and resolutions.

use chrono::Duration;
use serde::Serialize;

use crate::domain::adoption::{AdoptionPolicy, AdoptionRequest};
use crate::domain::foundation::Timestamp;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Outcome of a cooldown check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CooldownResult {
    pub can_request: bool,
    pub reason: Option<String>,
    /// Whole hours left, rounded up. `None` when not blocked.
    pub remaining_hours: Option<i64>,
}

impl CooldownResult {
    pub fn clear() -> Self {
        Self {
            can_request: true,
            reason: None,
            remaining_hours: None,
        }
    }

    fn blocked(reason: String, remaining_hours: i64) -> Self {
        Self {
            can_request: false,
            reason: Some(reason),
            remaining_hours: Some(remaining_hours),
        }
    }
}

/// Decides whether a user must wait before filing another request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    after_cancellation: Duration,
    after_resolution: Duration,
}

impl CooldownPolicy {
    pub fn new(after_cancellation: Duration, after_resolution: Duration) -> Self {
        Self {
            after_cancellation,
            after_resolution,
        }
    }

    pub fn from_policy(policy: &AdoptionPolicy) -> Self {
        Self::new(
            Duration::hours(policy.cancellation_cooldown_hours),
            Duration::days(policy.resolution_cooldown_days),
        )
    }

    /// Evaluates the user's most recent cancelled request, then the single
    /// most recently updated request.
    ///
    /// Only that one most recently updated request is checked for a recent
    /// approval or denial; older resolutions inside the window are ignored.
    pub fn evaluate(
        &self,
        most_recent_cancelled: Option<&AdoptionRequest>,
        most_recent_updated: Option<&AdoptionRequest>,
        now: Timestamp,
    ) -> CooldownResult {
        if let Some(cancelled) = most_recent_cancelled {
            let cancelled_at = cancelled.cancelled_at.unwrap_or(cancelled.updated_at);
            if let Some(hours) = remaining_hours(cancelled_at, self.after_cancellation, now) {
                return CooldownResult::blocked(
                    format!(
                        "You recently cancelled an adoption request. Please wait {} more hour(s) before submitting a new one",
                        hours
                    ),
                    hours,
                );
            }
        }

        if let Some(latest) = most_recent_updated {
            if let Some(resolved_at) = latest.resolved_at() {
                if let Some(hours) = remaining_hours(resolved_at, self.after_resolution, now) {
                    return CooldownResult::blocked(
                        format!(
                            "Your last adoption request was {} recently. Please wait {} more hour(s) before submitting a new one",
                            latest.status, hours
                        ),
                        hours,
                    );
                }
            }
        }

        CooldownResult::clear()
    }
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self::from_policy(&AdoptionPolicy::default())
    }
}

/// Hours left until `since + window`, rounded up, or `None` once it has passed.
fn remaining_hours(since: Timestamp, window: Duration, now: Timestamp) -> Option<i64> {
    let remaining_ms = since.plus(window).duration_since(&now).num_milliseconds();
    if remaining_ms <= 0 {
        return None;
    }
    Some((remaining_ms + MILLIS_PER_HOUR - 1) / MILLIS_PER_HOUR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::adoption::{Pet, PetStatus};
    use crate::domain::foundation::{PetId, ShelterId, UserId};

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn request_at(created: Timestamp) -> AdoptionRequest {
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
            5,
            None,
            &AdoptionPolicy::default(),
            created,
        )
        .unwrap()
    }

    fn cancelled_at(at: Timestamp) -> AdoptionRequest {
        let mut request = request_at(at.minus_hours(1));
        request.cancel(None, &AdoptionPolicy::default(), at).unwrap();
        request
    }

    fn denied_at(at: Timestamp) -> AdoptionRequest {
        let mut request = request_at(at.minus_hours(1));
        request.deny(None, at).unwrap();
        request
    }

    #[test]
    fn no_history_is_clear() {
        let result = CooldownPolicy::default().evaluate(None, None, t0());
        assert_eq!(result, CooldownResult::clear());
    }

    #[test]
    fn cancellation_71h59m_ago_still_blocks() {
        let cancelled = cancelled_at(t0());
        let now = t0().plus_hours(71).plus(Duration::minutes(59));

        let result = CooldownPolicy::default().evaluate(Some(&cancelled), Some(&cancelled), now);

        assert!(!result.can_request);
        assert_eq!(result.remaining_hours, Some(1));
        assert!(result.reason.unwrap().contains("1 more hour"));
    }

    #[test]
    fn cancellation_exactly_72h_ago_is_clear() {
        let cancelled = cancelled_at(t0());
        let now = t0().plus_hours(72);

        let result = CooldownPolicy::default().evaluate(Some(&cancelled), Some(&cancelled), now);

        assert!(result.can_request);
    }

    #[test]
    fn remaining_hours_round_up() {
        let cancelled = cancelled_at(t0());
        let now = t0().plus_hours(10).plus(Duration::minutes(30));

        let result = CooldownPolicy::default().evaluate(Some(&cancelled), None, now);

        assert_eq!(result.remaining_hours, Some(62));
    }

    #[test]
    fn recent_denial_blocks_for_seven_days() {
        let denied = denied_at(t0());

        let inside = CooldownPolicy::default().evaluate(None, Some(&denied), t0().plus_days(6));
        let outside = CooldownPolicy::default().evaluate(None, Some(&denied), t0().plus_days(7));

        assert!(!inside.can_request);
        assert_eq!(inside.remaining_hours, Some(24));
        assert!(outside.can_request);
    }

    #[test]
    fn recent_approval_blocks() {
        let mut approved = request_at(t0().minus_hours(2));
        approved.approve(None, None, t0()).unwrap();

        let result = CooldownPolicy::default().evaluate(None, Some(&approved), t0().plus_hours(1));

        assert!(!result.can_request);
        assert_eq!(result.remaining_hours, Some(167));
    }

    #[test]
    fn pending_latest_request_hides_older_resolution() {
        // An older denial is still inside the window, but the most recently
        // updated request is pending, so only it is examined.
        let pending = request_at(t0().plus_hours(2));

        let result = CooldownPolicy::default().evaluate(None, Some(&pending), t0().plus_hours(3));

        assert!(result.can_request);
    }

    #[test]
    fn cancellation_check_runs_before_resolution_check() {
        let cancelled = cancelled_at(t0());
        let denied = denied_at(t0());

        let result =
            CooldownPolicy::default().evaluate(Some(&cancelled), Some(&denied), t0().plus_hours(1));

        assert_eq!(result.remaining_hours, Some(71));
        assert!(result.reason.unwrap().contains("cancelled"));
    }
}
