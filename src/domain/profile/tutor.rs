//! Tutor profile and weekly availability.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::{Preferences, Role, RoleProfile};

/// Slot label for a day the tutor is not teaching.
pub const NOT_AVAILABLE: &str = "Not Available";

/// One weekday entry of the availability grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub enabled: bool,
    pub slot: String,
}

impl DayAvailability {
    pub fn new(enabled: bool, slot: impl Into<String>) -> Self {
        Self {
            enabled,
            slot: slot.into(),
        }
    }
}

impl Default for DayAvailability {
    fn default() -> Self {
        Self::new(false, NOT_AVAILABLE)
    }
}

/// Seven fixed positions, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability([DayAvailability; 7]);

impl WeeklyAvailability {
    pub fn new(days: [DayAvailability; 7]) -> Self {
        Self(days)
    }

    pub fn day(&self, weekday: Weekday) -> &DayAvailability {
        &self.0[weekday.num_days_from_monday() as usize]
    }

    pub fn day_mut(&mut self, weekday: Weekday) -> &mut DayAvailability {
        &mut self.0[weekday.num_days_from_monday() as usize]
    }

    /// Days in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayAvailability)> {
        let mut day = Weekday::Mon;
        self.0.iter().map(move |entry| {
            let current = day;
            day = day.succ();
            (current, entry)
        })
    }

    pub fn enabled_days(&self) -> Vec<Weekday> {
        self.iter()
            .filter(|(_, entry)| entry.enabled)
            .map(|(day, _)| day)
            .collect()
    }
}

/// Profile document stored in `tutorProfiles/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfile {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,

    /// Order is the order the tutor added them in.
    pub skills: Vec<String>,

    /// Ringgit per hour, digits only.
    pub hourly_rate: String,
    pub negotiable: bool,
    pub availability: WeeklyAvailability,

    #[serde(flatten)]
    pub preferences: Preferences,
}

impl TutorProfile {
    /// Appends a skill. Blank input is ignored, surrounding whitespace trimmed.
    ///
    /// Returns whether the list changed.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Removes the first occurrence of a skill.
    pub fn remove_skill(&mut self, skill: &str) -> bool {
        match self.skills.iter().position(|s| s == skill) {
            Some(index) => {
                self.skills.remove(index);
                true
            }
            None => false,
        }
    }

    /// Stores the rate keeping only ASCII digits, like the rate field does.
    pub fn set_hourly_rate(&mut self, input: &str) {
        self.hourly_rate = input.chars().filter(|c| c.is_ascii_digit()).collect();
    }

    pub fn toggle_day(&mut self, weekday: Weekday) {
        let day = self.availability.day_mut(weekday);
        day.enabled = !day.enabled;
    }

    pub fn set_slot(&mut self, weekday: Weekday, slot: impl Into<String>) {
        self.availability.day_mut(weekday).slot = slot.into();
    }
}

impl RoleProfile for TutorProfile {
    const ROLE: Role = Role::Tutor;

    fn empty(user_id: &UserId) -> Self {
        Self {
            user_id: user_id.as_str().to_string(),
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            skills: Vec::new(),
            hourly_rate: String::new(),
            negotiable: false,
            availability: WeeklyAvailability::default(),
            preferences: Preferences::default(),
        }
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn set_user_id(&mut self, user_id: &UserId) {
        self.user_id = user_id.as_str().to_string();
    }
}
