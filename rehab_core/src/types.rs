//! Core domain types for the rehab tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Schedule items (medications and exercises)
//! - Point deltas and the reasons they were awarded
//! - Pain bands

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a schedule item, unique across both item kinds.
pub type ItemId = String;

// ============================================================================
// Schedule Items
// ============================================================================

/// Which completion rules apply to an item
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Medication,
    Exercise,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Medication => f.write_str("medication"),
            ItemKind::Exercise => f.write_str("exercise"),
        }
    }
}

/// A scheduled medication dose
///
/// `completed` only moves false → true inside a period. The display fields
/// are carried for the presentation layer and never read by the engine.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub id: ItemId,
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub next_dose: Option<DateTime<Utc>>,
    #[serde(default, alias = "taken")]
    pub completed: bool,
    #[serde(default)]
    pub streak: u32,
}

/// A rehabilitation exercise, self-reported as done
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: ItemId,
    pub name: String,
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Anything the patient can check off during a period
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleItem {
    Medication(Medication),
    Exercise(Exercise),
}

impl ScheduleItem {
    pub fn id(&self) -> &str {
        match self {
            ScheduleItem::Medication(m) => &m.id,
            ScheduleItem::Exercise(e) => &e.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ScheduleItem::Medication(m) => &m.name,
            ScheduleItem::Exercise(e) => &e.name,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ScheduleItem::Medication(_) => ItemKind::Medication,
            ScheduleItem::Exercise(_) => ItemKind::Exercise,
        }
    }

    pub fn is_completed(&self) -> bool {
        match self {
            ScheduleItem::Medication(m) => m.completed,
            ScheduleItem::Exercise(e) => e.completed,
        }
    }

    /// Streak for medications, `None` for exercises
    pub fn streak(&self) -> Option<u32> {
        match self {
            ScheduleItem::Medication(m) => Some(m.streak),
            ScheduleItem::Exercise(_) => None,
        }
    }

    pub fn as_medication(&self) -> Option<&Medication> {
        match self {
            ScheduleItem::Medication(m) => Some(m),
            ScheduleItem::Exercise(_) => None,
        }
    }

    pub fn as_exercise(&self) -> Option<&Exercise> {
        match self {
            ScheduleItem::Exercise(e) => Some(e),
            ScheduleItem::Medication(_) => None,
        }
    }
}

impl From<Medication> for ScheduleItem {
    fn from(medication: Medication) -> Self {
        ScheduleItem::Medication(medication)
    }
}

impl From<Exercise> for ScheduleItem {
    fn from(exercise: Exercise) -> Self {
        ScheduleItem::Exercise(exercise)
    }
}

// ============================================================================
// Points
// ============================================================================

/// Why a ledger entry was recorded
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeltaReason {
    /// Balance carried in when the ledger was opened
    OpeningBalance,
    MedicationTaken { item_id: ItemId },
    ExerciseCompleted { item_id: ItemId },
    /// Exercise toggled back off with deductions enabled
    ExerciseUndone { item_id: ItemId },
}

/// A signed change to the points total, produced by a transition
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PointDelta {
    pub points: i64,
    pub reason: DeltaReason,
}

impl PointDelta {
    pub fn new(points: i64, reason: DeltaReason) -> Self {
        Self { points, reason }
    }
}

// ============================================================================
// Pain
// ============================================================================

/// Coarse severity of a pain reading
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PainBand {
    /// 0-3
    Mild,
    /// 4-6
    Moderate,
    /// 7-10
    Severe,
}

impl PainBand {
    pub fn for_level(level: u8) -> Self {
        match level {
            0..=3 => PainBand::Mild,
            4..=6 => PainBand::Moderate,
            _ => PainBand::Severe,
        }
    }
}

impl fmt::Display for PainBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PainBand::Mild => f.write_str("mild"),
            PainBand::Moderate => f.write_str("moderate"),
            PainBand::Severe => f.write_str("severe"),
        }
    }
}
