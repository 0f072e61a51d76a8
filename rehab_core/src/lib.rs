#![forbid(unsafe_code)]

//! Core adherence and engagement tracking for the rehab dashboard.
//!
//! This crate provides:
//! - Domain types (medications, exercises, point deltas)
//! - Seed data and validation
//! - Adherence engine (completion transitions)
//! - Engagement ledger and derived metrics
//! - The `Tracker` state container the presentation layer drives
//!
//! All tracker state lives in memory for the life of the process.

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod seed;
pub mod store;
pub mod engine;
pub mod ledger;
pub mod pain;
pub mod metrics;
pub mod tracker;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, PointsConfig};
pub use seed::{default_seed, Seed};
pub use store::ScheduleStore;
pub use ledger::{EngagementLedger, LedgerEntry};
pub use pain::PainReport;
pub use metrics::Summary;
pub use tracker::{ToggleOutcome, Tracker};
