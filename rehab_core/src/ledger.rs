//! Engagement ledger: running points total with an in-memory entry log.
//!
//! The total always equals the sum of every entry's points, including the
//! opening balance. Nothing here is persisted.

use crate::{DeltaReason, Error, PointDelta, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One applied point delta
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub points: i64,
    pub reason: DeltaReason,
}

/// Accumulator of gamification points
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EngagementLedger {
    total_points: i64,
    entries: Vec<LedgerEntry>,
}

impl EngagementLedger {
    /// Create an empty ledger at zero points
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger whose first entry carries in `points`
    pub fn with_opening_balance(points: i64) -> Self {
        Self {
            total_points: points,
            entries: vec![LedgerEntry {
                id: Uuid::new_v4(),
                recorded_at: Utc::now(),
                points,
                reason: DeltaReason::OpeningBalance,
            }],
        }
    }

    /// Add a delta to the total, stamped with the current time
    ///
    /// Any sign is accepted and no lower bound is enforced. A delta that would
    /// overflow the total is rejected and nothing is recorded.
    pub fn apply_delta(&mut self, delta: PointDelta) -> Result<LedgerEntry> {
        self.apply_delta_at(delta, Utc::now())
    }

    /// Add a delta recorded at a specific time
    pub fn apply_delta_at(&mut self, delta: PointDelta, at: DateTime<Utc>) -> Result<LedgerEntry> {
        let total = self
            .total_points
            .checked_add(delta.points)
            .ok_or(Error::PointsOverflow {
                total: self.total_points,
                delta: delta.points,
            })?;

        let entry = LedgerEntry {
            id: Uuid::new_v4(),
            recorded_at: at,
            points: delta.points,
            reason: delta.reason,
        };

        tracing::debug!(
            "Ledger {:+} points ({:?}), total {}",
            entry.points,
            entry.reason,
            total
        );

        self.total_points = total;
        self.entries.push(entry.clone());
        Ok(entry)
    }

    pub fn total_points(&self) -> i64 {
        self.total_points
    }

    /// Entries in the order they were applied
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Points earned at or after `cutoff`, excluding the opening balance
    pub fn points_since(&self, cutoff: DateTime<Utc>) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.recorded_at >= cutoff && e.reason != DeltaReason::OpeningBalance)
            .map(|e| e.points)
            .sum()
    }

    /// Points earned in the last `days` days
    pub fn points_in_last_days(&self, days: i64) -> i64 {
        self.points_since(Utc::now() - Duration::days(days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(id: &str) -> PointDelta {
        PointDelta::new(
            10,
            DeltaReason::MedicationTaken {
                item_id: id.into(),
            },
        )
    }

    #[test]
    fn test_opening_balance_is_first_entry() {
        let ledger = EngagementLedger::with_opening_balance(1250);

        assert_eq!(ledger.total_points(), 1250);
        assert_eq!(ledger.entries().len(), 1);
        assert_eq!(ledger.entries()[0].reason, DeltaReason::OpeningBalance);
    }

    #[test]
    fn test_total_equals_sum_of_entries() {
        let mut ledger = EngagementLedger::with_opening_balance(1250);
        ledger.apply_delta(taken("lisinopril")).unwrap();
        ledger.apply_delta(PointDelta::new(
            15,
            DeltaReason::ExerciseCompleted {
                item_id: "leg_raises".into(),
            },
        ))
        .unwrap();
        ledger.apply_delta(PointDelta::new(
            -15,
            DeltaReason::ExerciseUndone {
                item_id: "leg_raises".into(),
            },
        ))
        .unwrap();

        let sum: i64 = ledger.entries().iter().map(|e| e.points).sum();
        assert_eq!(ledger.total_points(), sum);
        assert_eq!(ledger.total_points(), 1260);
    }

    #[test]
    fn test_negative_total_allowed() {
        let mut ledger = EngagementLedger::new();
        ledger.apply_delta(PointDelta::new(
            -15,
            DeltaReason::ExerciseUndone {
                item_id: "leg_raises".into(),
            },
        ))
        .unwrap();
        assert_eq!(ledger.total_points(), -15);
    }

    #[test]
    fn test_points_since_window() {
        let now = Utc::now();
        let mut ledger = EngagementLedger::new();
        ledger
            .apply_delta_at(
                PointDelta::new(1250, DeltaReason::OpeningBalance),
                now - Duration::days(30),
            )
            .unwrap();
        ledger
            .apply_delta_at(taken("old"), now - Duration::days(10))
            .unwrap();
        ledger
            .apply_delta_at(taken("recent"), now - Duration::days(2))
            .unwrap();
        ledger.apply_delta_at(taken("today"), now).unwrap();

        assert_eq!(ledger.points_since(now - Duration::days(7)), 20);
        assert_eq!(ledger.points_in_last_days(7), 20);
        assert_eq!(ledger.points_since(now - Duration::days(60)), 30);
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let mut ledger = EngagementLedger::new();
        let first = ledger.apply_delta(taken("a")).unwrap().id;
        let second = ledger.apply_delta(taken("b")).unwrap().id;
        assert_ne!(first, second);
    }

    #[test]
    fn test_returned_entry_matches_last_recorded() {
        let mut ledger = EngagementLedger::with_opening_balance(5);
        let entry = ledger.apply_delta(taken("lisinopril")).unwrap();

        assert_eq!(entry.points, 10);
        assert_eq!(ledger.entries().last(), Some(&entry));
        assert_eq!(ledger.total_points(), 15);
    }

    #[test]
    fn test_overflowing_delta_rejected() {
        let mut ledger = EngagementLedger::with_opening_balance(i64::MAX);

        let err = ledger.apply_delta(taken("lisinopril")).unwrap_err();

        assert!(matches!(
            err,
            Error::PointsOverflow {
                total: i64::MAX,
                delta: 10
            }
        ));
        assert_eq!(ledger.total_points(), i64::MAX);
        assert_eq!(ledger.entries().len(), 1);
    }

    #[test]
    fn test_underflowing_delta_rejected() {
        let mut ledger = EngagementLedger::with_opening_balance(i64::MIN);
        let undo = PointDelta::new(
            -15,
            DeltaReason::ExerciseUndone {
                item_id: "leg_raises".into(),
            },
        );

        assert!(ledger.apply_delta(undo).is_err());
        assert_eq!(ledger.total_points(), i64::MIN);
    }
}
