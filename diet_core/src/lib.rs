#![forbid(unsafe_code)]

//! Core domain model and business logic for the dietlog tracker.
//!
//! This crate provides:
//! - Domain types (profile, macros, log entries, history records)
//! - Health metric formulas (BMR, TDEE, goal target, BMI)
//! - Food reference catalog loaded from CSV
//! - The in-memory daily food log
//! - Append-only CSV day history

pub mod types;
pub mod error;
pub mod metrics;
pub mod catalog;
pub mod daily_log;
pub mod history;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::FoodCatalog;
pub use config::{Config, ProfileConfig};
pub use daily_log::{DailyLog, LogState};
pub use history::HistoryStore;
pub use metrics::{
    adjust_calories_for_goal, bmi_category, bmi_report, calculate_bmi, calculate_bmr,
    calculate_tdee, calorie_target, round2, BmiCategory, BmiReport, CalorieTarget,
};
