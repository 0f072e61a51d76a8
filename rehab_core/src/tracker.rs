//! Tracker: the single owned state container behind the dashboard.
//!
//! All mutation goes through `&mut Tracker`, so there is exactly one mutator
//! at a time. Each operation runs the adherence engine on one item and
//! forwards any point delta to the ledger.

use crate::config::{Config, PointsConfig};
use crate::engine;
use crate::ledger::EngagementLedger;
use crate::metrics::{self, Summary};
use crate::pain::PainReport;
use crate::seed::Seed;
use crate::store::ScheduleStore;
use crate::{Error, PointDelta, Result, ScheduleItem};
use chrono::{Local, NaiveDate};

/// Result of toggling an exercise
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Completion state after the toggle
    pub completed: bool,
    pub delta: Option<PointDelta>,
}

/// In-memory adherence and engagement state
#[derive(Clone, Debug)]
pub struct Tracker {
    store: ScheduleStore,
    ledger: EngagementLedger,
    pain: PainReport,
    rules: PointsConfig,
    period: NaiveDate,
}

impl Tracker {
    /// Build a tracker from validated seed data and point rules
    pub fn new(seed: &Seed, rules: PointsConfig) -> Result<Self> {
        let errors = seed.validate();
        if !errors.is_empty() {
            return Err(Error::SeedValidation(errors.join("; ")));
        }
        rules.validate()?;

        let period = seed
            .start_date
            .unwrap_or_else(|| Local::now().date_naive());

        let store = ScheduleStore::new(seed.items());
        if store.is_empty() {
            tracing::warn!("Tracker seeded with no items");
        }
        tracing::info!(
            "Tracker seeded with {} items, {} points, period {}",
            store.len(),
            seed.opening_points,
            period
        );

        Ok(Self {
            store,
            ledger: EngagementLedger::with_opening_balance(seed.opening_points),
            pain: PainReport::new(seed.pain_level),
            rules,
            period,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.seed, config.points.clone())
    }

    /// Mark a medication dose taken
    ///
    /// Returns the delta applied, or `None` if the dose was already taken.
    pub fn record_medication_taken(&mut self, id: &str) -> Result<Option<PointDelta>> {
        let medication = match self.store.medication_mut(id) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("Rejected take for '{}': {}", id, e);
                return Err(e);
            }
        };

        let before = medication.clone();
        let delta = engine::record_medication_taken(medication, &self.rules);
        if let Some(ref delta) = delta {
            if let Err(e) = self.ledger.apply_delta(delta.clone()) {
                *medication = before;
                return Err(e);
            }
        }
        Ok(delta)
    }

    /// Flip an exercise's completion state
    pub fn toggle_exercise_completed(&mut self, id: &str) -> Result<ToggleOutcome> {
        let exercise = match self.store.exercise_mut(id) {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("Rejected toggle for '{}': {}", id, e);
                return Err(e);
            }
        };

        let before = exercise.clone();
        let delta = engine::toggle_exercise_completed(exercise, &self.rules);
        let completed = exercise.completed;
        if let Some(ref delta) = delta {
            if let Err(e) = self.ledger.apply_delta(delta.clone()) {
                *exercise = before;
                return Err(e);
            }
        }
        Ok(ToggleOutcome { completed, delta })
    }

    /// Record a pain reading, clamped to 0-10
    pub fn set_pain_level(&mut self, value: i64) -> u8 {
        self.pain.set_pain_level(value)
    }

    /// Close the current period and open the one for `date`
    ///
    /// Medications missed in the closing period lose their streak; every
    /// completion flag is cleared. Points and pain are left alone.
    pub fn begin_period(&mut self, date: NaiveDate) -> Result<()> {
        if date <= self.period {
            return Err(Error::Period(format!(
                "New period {} must be after current period {}",
                date, self.period
            )));
        }

        for item in self.store.iter_mut() {
            match item {
                ScheduleItem::Medication(m) => engine::roll_over_medication(m),
                ScheduleItem::Exercise(e) => engine::roll_over_exercise(e),
            }
        }

        tracing::info!("Period advanced from {} to {}", self.period, date);
        self.period = date;
        Ok(())
    }

    pub fn items(&self) -> &[ScheduleItem] {
        self.store.items()
    }

    pub fn item(&self, id: &str) -> Result<&ScheduleItem> {
        self.store
            .get(id)
            .ok_or_else(|| Error::NotFound { id: id.to_string() })
    }

    pub fn total_points(&self) -> i64 {
        self.ledger.total_points()
    }

    pub fn ledger(&self) -> &EngagementLedger {
        &self.ledger
    }

    pub fn pain(&self) -> &PainReport {
        &self.pain
    }

    pub fn pain_level(&self) -> u8 {
        self.pain.level()
    }

    pub fn current_period(&self) -> NaiveDate {
        self.period
    }

    /// Medications taken / medications scheduled, `None` if none are scheduled
    pub fn adherence_rate(&self) -> Option<f64> {
        metrics::adherence_rate(&self.store)
    }

    pub fn summary(&self) -> Summary {
        let (medications_taken, medications_total) = metrics::medication_counts(&self.store);
        let (exercises_completed, exercises_total) = metrics::exercise_counts(&self.store);

        Summary {
            period: self.period,
            medications_taken,
            medications_total,
            adherence_rate: metrics::completion_rate(medications_taken, medications_total),
            exercises_completed,
            exercises_total,
            exercise_completion_rate: metrics::completion_rate(
                exercises_completed,
                exercises_total,
            ),
            longest_streak: metrics::longest_streak(&self.store),
            total_points: self.ledger.total_points(),
            points_this_week: self.ledger.points_in_last_days(7),
            pain_level: self.pain.level(),
            pain_band: self.pain.band(),
        }
    }
}
