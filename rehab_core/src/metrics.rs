//! Read-only dashboard figures derived from tracker state.

use crate::store::ScheduleStore;
use crate::PainBand;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Snapshot of everything the dashboard counts
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub period: NaiveDate,
    pub medications_taken: usize,
    pub medications_total: usize,
    /// `None` when no medications are scheduled
    pub adherence_rate: Option<f64>,
    pub exercises_completed: usize,
    pub exercises_total: usize,
    pub exercise_completion_rate: Option<f64>,
    pub longest_streak: u32,
    pub total_points: i64,
    /// Points earned over the last seven days, opening balance excluded
    pub points_this_week: i64,
    pub pain_level: u8,
    pub pain_band: PainBand,
}

/// `done / total`, or `None` for an empty schedule
pub fn completion_rate(done: usize, total: usize) -> Option<f64> {
    if total == 0 {
        None
    } else {
        Some(done as f64 / total as f64)
    }
}

/// Fraction of medications taken this period
pub fn adherence_rate(store: &ScheduleStore) -> Option<f64> {
    let (taken, total) = medication_counts(store);
    completion_rate(taken, total)
}

/// (taken, total) for medications
pub fn medication_counts(store: &ScheduleStore) -> (usize, usize) {
    store
        .medications()
        .fold((0, 0), |(done, total), m| (done + usize::from(m.completed), total + 1))
}

/// (completed, total) for exercises
pub fn exercise_counts(store: &ScheduleStore) -> (usize, usize) {
    store
        .exercises()
        .fold((0, 0), |(done, total), e| (done + usize::from(e.completed), total + 1))
}

/// Highest streak across all medications, 0 if none
pub fn longest_streak(store: &ScheduleStore) -> u32 {
    store.medications().map(|m| m.streak).max().unwrap_or(0)
}
