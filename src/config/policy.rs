//! Adoption policy configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::adoption::AdoptionPolicy;

/// Overrides for the adoption rules. Every field falls back to the
/// production default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub min_points: i64,
    pub point_value_cents: i64,
    pub cancellation_window_hours: i64,
    pub request_expiry_days: i64,
    pub cancellation_cooldown_hours: i64,
    pub resolution_cooldown_days: i64,
    pub max_message_length: usize,
}

impl PolicyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_points < 1 {
            return Err(ValidationError::MinPointsTooLow);
        }
        if self.point_value_cents < 0 {
            return Err(ValidationError::NegativePointValue);
        }
        let windows = [
            ("cancellation_window_hours", self.cancellation_window_hours),
            ("request_expiry_days", self.request_expiry_days),
            ("cancellation_cooldown_hours", self.cancellation_cooldown_hours),
            ("resolution_cooldown_days", self.resolution_cooldown_days),
        ];
        for (name, value) in windows {
            if value <= 0 {
                return Err(ValidationError::ZeroWindow(name));
            }
        }
        if self.max_message_length == 0 {
            return Err(ValidationError::ZeroWindow("max_message_length"));
        }
        Ok(())
    }

    pub fn to_policy(&self) -> AdoptionPolicy {
        AdoptionPolicy {
            min_points: self.min_points,
            point_value_cents: self.point_value_cents,
            cancellation_window_hours: self.cancellation_window_hours,
            request_expiry_days: self.request_expiry_days,
            cancellation_cooldown_hours: self.cancellation_cooldown_hours,
            resolution_cooldown_days: self.resolution_cooldown_days,
            max_message_length: self.max_message_length,
        }
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        let policy = AdoptionPolicy::default();
        Self {
            min_points: policy.min_points,
            point_value_cents: policy.point_value_cents,
            cancellation_window_hours: policy.cancellation_window_hours,
            request_expiry_days: policy.request_expiry_days,
            cancellation_cooldown_hours: policy.cancellation_cooldown_hours,
            resolution_cooldown_days: policy.resolution_cooldown_days,
            max_message_length: policy.max_message_length,
        }
    }
}
