//! Adopter profile snapshot and completeness.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Percentage;

/// Number of profile fields that count towards completeness.
pub const REQUIRED_FIELD_COUNT: usize = 13;

/// The profile fields the adoption core reads from a user.
///
/// Text fields count as filled when they hold non-whitespace text. Answers
/// such as `has_children = false` count as filled. `has_yard` and
/// `has_fence` are optional and never counted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdopterProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub housing_type: Option<String>,
    pub own_or_rent: Option<String>,
    pub household_size: Option<i32>,
    pub has_children: Option<bool>,
    pub has_other_pets: Option<bool>,
    pub has_yard: Option<bool>,
    pub has_fence: Option<bool>,
}

impl AdopterProfile {
    /// Names of required fields that are still missing, in display order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.required_fields()
            .into_iter()
            .filter_map(|(name, filled)| (!filled).then_some(name))
            .collect()
    }

    /// Share of required fields that are filled, rounded to the nearest percent.
    pub fn completeness(&self) -> Percentage {
        let filled = self
            .required_fields()
            .iter()
            .filter(|(_, filled)| *filled)
            .count();
        Percentage::of(filled, REQUIRED_FIELD_COUNT)
    }

    fn required_fields(&self) -> [(&'static str, bool); REQUIRED_FIELD_COUNT] {
        [
            ("first_name", has_text(&self.first_name)),
            ("last_name", has_text(&self.last_name)),
            ("phone", has_text(&self.phone)),
            ("address", has_text(&self.address)),
            ("city", has_text(&self.city)),
            ("state", has_text(&self.state)),
            ("zip_code", has_text(&self.zip_code)),
            ("date_of_birth", self.date_of_birth.is_some()),
            ("housing_type", has_text(&self.housing_type)),
            ("own_or_rent", has_text(&self.own_or_rent)),
            ("household_size", self.household_size.is_some()),
            ("has_children", self.has_children.is_some()),
            ("has_other_pets", self.has_other_pets.is_some()),
        ]
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().map_or(false, |s| !s.trim().is_empty())
}

#[cfg(test)]
pub(crate) fn complete_profile() -> AdopterProfile {
    AdopterProfile {
        first_name: Some("Ada".to_string()),
        last_name: Some("Lovelace".to_string()),
        phone: Some("555-0100".to_string()),
        address: Some("12 Elm Street".to_string()),
        city: Some("Portland".to_string()),
        state: Some("OR".to_string()),
        zip_code: Some("97201".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 5, 17),
        housing_type: Some("house".to_string()),
        own_or_rent: Some("own".to_string()),
        household_size: Some(2),
        has_children: Some(false),
        has_other_pets: Some(true),
        has_yard: None,
        has_fence: None,
    }
}
