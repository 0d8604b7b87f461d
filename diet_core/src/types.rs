//! Core domain types for the diet tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - User profile and its closed enumerations (gender, activity, goal)
//! - Macro nutrient values and daily totals
//! - Catalog and log entries
//! - Persisted history records

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

// ============================================================================
// Profile Enumerations
// ============================================================================

/// Lowercases and drops separators so "Weight Loss", "weight-loss" and
/// "weight_loss" all compare equal.
fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Gender used by the BMR formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_key(s).as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(Error::InvalidGender(s.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
}

impl ActivityLevel {
    /// Multiplier applied to BMR
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_key(s).as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            _ => Err(Error::InvalidActivityLevel(s.to_string())),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::Light => "Light",
            ActivityLevel::Moderate => "Moderate",
            ActivityLevel::Active => "Active",
        };
        f.write_str(name)
    }
}

/// Dietary goal used to adjust TDEE into a daily target
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    #[default]
    Maintenance,
    MuscleGain,
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_key(s).as_str() {
            "weightloss" | "loss" => Ok(Goal::WeightLoss),
            "maintenance" | "maintain" => Ok(Goal::Maintenance),
            "musclegain" | "gain" => Ok(Goal::MuscleGain),
            _ => Err(Error::InvalidGoal(s.to_string())),
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::Maintenance => "Maintenance",
            Goal::MuscleGain => "Muscle Gain",
        };
        f.write_str(name)
    }
}

// ============================================================================
// User Profile
// ============================================================================

pub const AGE_RANGE: (u32, u32) = (10, 100);
pub const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 200.0);
pub const HEIGHT_RANGE_CM: (f64, f64) = (120.0, 250.0);

/// Attributes needed to compute a calorie target, held for one session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub age: u32,
    pub gender: Gender,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub activity: ActivityLevel,
    pub goal: Goal,
}

impl UserProfile {
    /// Range-check every numeric field (bounds are inclusive)
    pub fn validate(&self) -> Result<()> {
        let (min_age, max_age) = AGE_RANGE;
        if self.age < min_age || self.age > max_age {
            return Err(Error::InvalidInput(format!(
                "age must be between {} and {}, got {}",
                min_age, max_age, self.age
            )));
        }
        check_range("weight_kg", self.weight_kg, WEIGHT_RANGE_KG)?;
        check_range("height_cm", self.height_cm, HEIGHT_RANGE_CM)?;
        Ok(())
    }
}

fn check_range(field: &str, value: f64, (min, max): (f64, f64)) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            field, min, max, value
        )));
    }
    Ok(())
}

// ============================================================================
// Nutrition Values
// ============================================================================

/// Calories (kcal) and macro nutrients (grams)
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Macros {
    pub fn new(calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fats,
        }
    }

    /// Multiply every component by a serving count
    pub fn scale(&self, quantity: u32) -> Self {
        let q = f64::from(quantity);
        Self {
            calories: self.calories * q,
            protein: self.protein * q,
            carbs: self.carbs * q,
            fats: self.fats * q,
        }
    }

    /// Each component rounded to 2 decimals
    pub fn rounded(&self) -> Self {
        Self {
            calories: crate::metrics::round2(self.calories),
            protein: crate::metrics::round2(self.protein),
            carbs: crate::metrics::round2(self.carbs),
            fats: crate::metrics::round2(self.fats),
        }
    }

    /// True if every component is finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fats]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Calories left before reaching `target` (negative once exceeded)
    pub fn remaining(&self, target: f64) -> f64 {
        target - self.calories
    }
}

impl Add for Macros {
    type Output = Macros;

    fn add(self, rhs: Macros) -> Macros {
        Macros {
            calories: self.calories + rhs.calories,
            protein: self.protein + rhs.protein,
            carbs: self.carbs + rhs.carbs,
            fats: self.fats + rhs.fats,
        }
    }
}

impl AddAssign for Macros {
    fn add_assign(&mut self, rhs: Macros) {
        *self = *self + rhs;
    }
}

/// Aggregate of all entries in the daily log, recomputed on demand
pub type DailyTotals = Macros;

// ============================================================================
// Catalog and Log Entries
// ============================================================================

/// One row of the food reference dataset (values per serving)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub dish_name: String,
    pub per_serving: Macros,
}

/// Where a log entry's nutrition values came from
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Catalog,
    Custom,
}

/// One food-add action in the daily log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub dish_name: String,
    pub quantity: u32,
    /// Per-serving values multiplied by `quantity`
    pub macros: Macros,
    pub source: EntrySource,
}

// ============================================================================
// History Types
// ============================================================================

/// Whether a day's intake stayed at or below the target
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DayStatus {
    #[serde(rename = "Within Calories")]
    WithinCalories,
    #[serde(rename = "Exceeded Calories")]
    ExceededCalories,
}

impl DayStatus {
    /// Equal values count as within
    pub fn classify(calories: f64, target: f64) -> Self {
        if calories <= target {
            DayStatus::WithinCalories
        } else {
            DayStatus::ExceededCalories
        }
    }
}

impl fmt::Display for DayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayStatus::WithinCalories => f.write_str("Within Calories"),
            DayStatus::ExceededCalories => f.write_str("Exceeded Calories"),
        }
    }
}

/// One persisted day summary
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub date: NaiveDate,
    pub name: String,
    /// Rounded to 2 decimals
    pub totals: Macros,
    pub status: DayStatus,
}
