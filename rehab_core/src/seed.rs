//! Initial schedule data loaded at process start.
//!
//! The built-in seed mirrors the dashboard's starting state. A config file can
//! replace any part of it through the `[seed]` section.

use crate::types::*;
use chrono::{NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Largest opening balance, in either direction, a seed may carry
pub const MAX_OPENING_POINTS: i64 = 1_000_000_000;

/// Cached built-in seed
static DEFAULT_SEED: Lazy<Seed> = Lazy::new(build_default_seed);

/// Get a reference to the cached built-in seed
pub fn default_seed() -> &'static Seed {
    &DEFAULT_SEED
}

/// Starting state for a tracker
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    #[serde(default = "default_opening_points")]
    pub opening_points: i64,

    #[serde(default = "default_pain_level")]
    pub pain_level: i64,

    /// First period; today when unset
    #[serde(default)]
    pub start_date: Option<NaiveDate>,

    #[serde(default = "default_medications")]
    pub medications: Vec<Medication>,

    #[serde(default = "default_exercises")]
    pub exercises: Vec<Exercise>,
}

impl Default for Seed {
    fn default() -> Self {
        build_default_seed()
    }
}

fn default_opening_points() -> i64 {
    1250
}

fn default_pain_level() -> i64 {
    3
}

fn default_medications() -> Vec<Medication> {
    vec![
        Medication {
            id: "lisinopril".into(),
            name: "Lisinopril".into(),
            dosage: "10mg".into(),
            frequency: "Daily at 8:00 AM".into(),
            icon: Some("💊".into()),
            next_dose: Utc.with_ymd_and_hms(2025, 9, 22, 8, 0, 0).single(),
            completed: false,
            streak: 15,
        },
        Medication {
            id: "metformin".into(),
            name: "Metformin".into(),
            dosage: "500mg".into(),
            frequency: "Twice daily".into(),
            icon: Some("🔵".into()),
            next_dose: Utc.with_ymd_and_hms(2025, 9, 22, 12, 0, 0).single(),
            completed: false,
            streak: 12,
        },
    ]
}

fn default_exercises() -> Vec<Exercise> {
    vec![
        Exercise {
            id: "shoulder_rotations".into(),
            name: "Shoulder Rotations".into(),
            duration: "10 minutes".into(),
            description: "Gentle circular motions to improve shoulder mobility".into(),
            video_url: None,
            completed: false,
        },
        Exercise {
            id: "leg_raises".into(),
            name: "Leg Raises".into(),
            duration: "5 minutes".into(),
            description: "Strengthen quadriceps and improve leg function".into(),
            video_url: None,
            completed: true,
        },
    ]
}

/// Build the built-in seed
///
/// Prefer `default_seed()` when a shared reference is enough.
pub fn build_default_seed() -> Seed {
    Seed {
        opening_points: default_opening_points(),
        pain_level: default_pain_level(),
        start_date: None,
        medications: default_medications(),
        exercises: default_exercises(),
    }
}

impl Seed {
    /// Schedule items in display order: medications, then exercises
    pub fn items(&self) -> Vec<ScheduleItem> {
        self.medications
            .iter()
            .cloned()
            .map(ScheduleItem::from)
            .chain(self.exercises.iter().cloned().map(ScheduleItem::from))
            .collect()
    }

    /// Validate the seed, returning a list of problems (empty if valid)
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        if !(-MAX_OPENING_POINTS..=MAX_OPENING_POINTS).contains(&self.opening_points) {
            errors.push(format!(
                "opening_points must be within ±{}, got {}",
                MAX_OPENING_POINTS, self.opening_points
            ));
        }

        for item in self.items() {
            let id = item.id();

            if id.trim().is_empty() {
                errors.push(format!("{} '{}' has an empty id", item.kind(), item.name()));
                continue;
            }

            if id.chars().any(char::is_whitespace) {
                errors.push(format!("Item id '{}' contains whitespace", id));
            }

            if item.name().trim().is_empty() {
                errors.push(format!("Item '{}' has an empty name", id));
            }

            if !seen.insert(id.to_string()) {
                errors.push(format!("Duplicate item id '{}'", id));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_validates() {
        let errors = default_seed().validate();
        assert!(errors.is_empty(), "Seed validation errors: {:?}", errors);
    }

    #[test]
    fn test_default_seed_matches_dashboard() {
        let seed = default_seed();
        assert_eq!(seed.opening_points, 1250);
        assert_eq!(seed.pain_level, 3);
        assert_eq!(seed.medications[0].streak, 15);
        assert_eq!(seed.medications[1].streak, 12);
        assert!(seed.medications.iter().all(|m| !m.completed));
        assert!(!seed.exercises[0].completed);
        assert!(seed.exercises[1].completed);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut seed = build_default_seed();
        seed.exercises[0].id = "lisinopril".into();

        let errors = seed.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Duplicate item id 'lisinopril'"));
    }

    #[test]
    fn test_empty_id_and_name_rejected() {
        let mut seed = build_default_seed();
        seed.medications[0].id = "  ".into();
        seed.exercises[1].name = String::new();

        let errors = seed.validate();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_opening_points_out_of_range_rejected() {
        let mut seed = build_default_seed();
        seed.opening_points = i64::MAX;
        assert!(seed.validate()[0].contains("opening_points"));

        seed.opening_points = i64::MIN;
        assert_eq!(seed.validate().len(), 1);

        seed.opening_points = -MAX_OPENING_POINTS;
        assert!(seed.validate().is_empty());
    }

    #[test]
    fn test_whitespace_in_id_rejected() {
        let mut seed = build_default_seed();
        seed.medications[1].id = "met formin".into();
        assert!(seed.validate()[0].contains("whitespace"));
    }
}
