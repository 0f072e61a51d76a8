//! Pain self-report: the latest reading on a 0-10 scale.

use crate::PainBand;
use serde::{Deserialize, Serialize};

pub const MIN_PAIN_LEVEL: u8 = 0;
pub const MAX_PAIN_LEVEL: u8 = 10;

/// Coerce any input into the 0-10 scale
pub fn clamp_pain_level(value: i64) -> u8 {
    value.clamp(i64::from(MIN_PAIN_LEVEL), i64::from(MAX_PAIN_LEVEL)) as u8
}

/// Most recent pain reading; no history is kept
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PainReport {
    level: u8,
}

impl PainReport {
    pub fn new(level: i64) -> Self {
        Self {
            level: clamp_pain_level(level),
        }
    }

    /// Store a new reading, clamped to 0-10, and return the stored value
    pub fn set_pain_level(&mut self, value: i64) -> u8 {
        let level = clamp_pain_level(value);
        if i64::from(level) != value {
            tracing::debug!("Pain level {} clamped to {}", value, level);
        }
        self.level = level;
        level
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn band(&self) -> PainBand {
        PainBand::for_level(self.level)
    }
}
