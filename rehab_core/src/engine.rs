//! Adherence engine: completion transitions for schedule items.
//!
//! Medications and exercises follow different state machines:
//! - Medication: one-way "taken". Repeats are no-ops. Each take extends the streak.
//! - Exercise: reversible checkbox. Only the transition to done earns points,
//!   unless `deduct_on_exercise_undo` is set.
//!
//! The functions here mutate a single item and report the point delta. They
//! never touch the ledger themselves.

use crate::config::PointsConfig;
use crate::{DeltaReason, Exercise, Medication, PointDelta};

/// Mark a medication dose as taken for the current period
///
/// Returns `None` if the dose was already taken; streak and points are left
/// alone in that case.
pub fn record_medication_taken(
    medication: &mut Medication,
    rules: &PointsConfig,
) -> Option<PointDelta> {
    if medication.completed {
        tracing::debug!(
            "Medication {} already taken this period, ignoring",
            medication.id
        );
        return None;
    }

    medication.completed = true;
    medication.streak = medication.streak.saturating_add(1);

    tracing::info!(
        "Medication {} taken: streak now {}",
        medication.id,
        medication.streak
    );

    Some(PointDelta::new(
        rules.medication_taken,
        DeltaReason::MedicationTaken {
            item_id: medication.id.clone(),
        },
    ))
}

/// Flip an exercise between done and not done
///
/// Completing awards `exercise_completed` points. Un-completing awards nothing
/// unless deductions are enabled, in which case the same amount is taken back.
pub fn toggle_exercise_completed(
    exercise: &mut Exercise,
    rules: &PointsConfig,
) -> Option<PointDelta> {
    exercise.completed = !exercise.completed;

    tracing::info!(
        "Exercise {} marked {}",
        exercise.id,
        if exercise.completed { "done" } else { "not done" }
    );

    if exercise.completed {
        Some(PointDelta::new(
            rules.exercise_completed,
            DeltaReason::ExerciseCompleted {
                item_id: exercise.id.clone(),
            },
        ))
    } else if rules.deduct_on_exercise_undo {
        Some(PointDelta::new(
            -rules.exercise_completed,
            DeltaReason::ExerciseUndone {
                item_id: exercise.id.clone(),
            },
        ))
    } else {
        None
    }
}

/// Close the period for a medication
///
/// A dose missed in the closing period breaks the streak.
pub fn roll_over_medication(medication: &mut Medication) {
    if !medication.completed && medication.streak > 0 {
        tracing::info!(
            "Medication {} missed, streak of {} reset",
            medication.id,
            medication.streak
        );
        medication.streak = 0;
    }
    medication.completed = false;
}

/// Close the period for an exercise
pub fn roll_over_exercise(exercise: &mut Exercise) {
    exercise.completed = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn medication(streak: u32, completed: bool) -> Medication {
        Medication {
            id: "lisinopril".into(),
            name: "Lisinopril".into(),
            dosage: "10mg".into(),
            frequency: "Daily at 8:00 AM".into(),
            icon: None,
            next_dose: None,
            completed,
            streak,
        }
    }

    fn exercise(completed: bool) -> Exercise {
        Exercise {
            id: "shoulder_rotations".into(),
            name: "Shoulder Rotations".into(),
            duration: "10 minutes".into(),
            description: String::new(),
            video_url: None,
            completed,
        }
    }

    #[test]
    fn test_take_medication_extends_streak() {
        let rules = PointsConfig::default();
        let mut med = medication(15, false);

        let delta = record_medication_taken(&mut med, &rules).unwrap();

        assert!(med.completed);
        assert_eq!(med.streak, 16);
        assert_eq!(delta.points, 10);
        assert_eq!(
            delta.reason,
            DeltaReason::MedicationTaken {
                item_id: "lisinopril".into()
            }
        );
    }

    #[test]
    fn test_take_medication_twice_is_noop() {
        let rules = PointsConfig::default();
        let mut med = medication(3, false);

        assert!(record_medication_taken(&mut med, &rules).is_some());
        assert!(record_medication_taken(&mut med, &rules).is_none());

        assert!(med.completed);
        assert_eq!(med.streak, 4);
    }

    #[test]
    fn test_streak_saturates_at_max() {
        let rules = PointsConfig::default();
        let mut med = medication(u32::MAX, false);

        let delta = record_medication_taken(&mut med, &rules);

        assert!(med.completed);
        assert_eq!(med.streak, u32::MAX);
        assert_eq!(delta.map(|d| d.points), Some(10));
    }

    #[test]
    fn test_toggle_exercise_is_own_inverse() {
        let rules = PointsConfig::default();
        let mut ex = exercise(false);

        let first = toggle_exercise_completed(&mut ex, &rules);
        assert!(ex.completed);
        assert_eq!(first.map(|d| d.points), Some(15));

        let second = toggle_exercise_completed(&mut ex, &rules);
        assert!(!ex.completed);
        assert!(second.is_none());
    }

    #[test]
    fn test_toggle_off_first_awards_on_second_call() {
        let rules = PointsConfig::default();
        let mut ex = exercise(true);

        assert!(toggle_exercise_completed(&mut ex, &rules).is_none());
        assert_eq!(
            toggle_exercise_completed(&mut ex, &rules).map(|d| d.points),
            Some(15)
        );
        assert!(ex.completed);
    }

    #[test]
    fn test_toggle_off_deducts_when_enabled() {
        let rules = PointsConfig {
            deduct_on_exercise_undo: true,
            ..PointsConfig::default()
        };
        let mut ex = exercise(true);

        let delta = toggle_exercise_completed(&mut ex, &rules).unwrap();
        assert_eq!(delta.points, -15);
        assert!(matches!(delta.reason, DeltaReason::ExerciseUndone { .. }));
    }

    #[test]
    fn test_custom_point_values() {
        let rules = PointsConfig {
            medication_taken: 25,
            exercise_completed: 40,
            deduct_on_exercise_undo: false,
        };

        let mut med = medication(0, false);
        let mut ex = exercise(false);

        assert_eq!(record_medication_taken(&mut med, &rules).unwrap().points, 25);
        assert_eq!(toggle_exercise_completed(&mut ex, &rules).unwrap().points, 40);
    }

    #[test]
    fn test_roll_over_keeps_streak_when_taken() {
        let mut med = medication(7, true);
        roll_over_medication(&mut med);
        assert!(!med.completed);
        assert_eq!(med.streak, 7);
    }

    #[test]
    fn test_roll_over_resets_streak_on_miss() {
        let mut med = medication(7, false);
        roll_over_medication(&mut med);
        assert!(!med.completed);
        assert_eq!(med.streak, 0);
    }

    #[test]
    fn test_roll_over_clears_exercise() {
        let mut ex = exercise(true);
        roll_over_exercise(&mut ex);
        assert!(!ex.completed);
    }
}
