//! Health metric formulas: BMR, TDEE, goal adjustment and BMI.
//!
//! Everything here is pure arithmetic. Inputs are expected to come from a
//! validated [`UserProfile`]; the only runtime failure is a non-positive
//! height in [`calculate_bmi`].

use crate::{ActivityLevel, Error, Gender, Goal, Result, UserProfile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Daily deficit applied for weight loss (kcal)
pub const WEIGHT_LOSS_DEFICIT: f64 = 500.0;

/// Daily surplus applied for muscle gain (kcal)
pub const MUSCLE_GAIN_SURPLUS: f64 = 300.0;

/// Basal metabolic rate in kcal/day (Mifflin-St Jeor)
///
/// `weight` in kg, `height` in cm, `age` in years.
pub fn calculate_bmr(weight: f64, height: f64, age: u32, gender: Gender) -> f64 {
    let base = 10.0 * weight + 6.25 * height - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Total daily energy expenditure in kcal/day
pub fn calculate_tdee(bmr: f64, activity: ActivityLevel) -> f64 {
    bmr * activity.multiplier()
}

/// Daily calorie target for the given goal
pub fn adjust_calories_for_goal(tdee: f64, goal: Goal) -> f64 {
    match goal {
        Goal::WeightLoss => tdee - WEIGHT_LOSS_DEFICIT,
        Goal::MuscleGain => tdee + MUSCLE_GAIN_SURPLUS,
        Goal::Maintenance => tdee,
    }
}

/// Body mass index from weight (kg) and height (cm)
pub fn calculate_bmi(weight: f64, height: f64) -> Result<f64> {
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "height must be positive, got {}",
            height
        )));
    }
    let height_m = height / 100.0;
    Ok(weight / (height_m * height_m))
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn advice(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "You may benefit from healthy weight gain.",
            BmiCategory::Normal => "You seem fit. Maintenance is a good option.",
            BmiCategory::Overweight => "Weight loss could be beneficial.",
            BmiCategory::Obese => "Consulting a professional is recommended.",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        };
        f.write_str(name)
    }
}

/// Classify a BMI value and pair it with its advisory message
///
/// Boundaries belong to the upper category: 18.5 is Normal, 25 is
/// Overweight, 30 is Obese.
pub fn bmi_category(bmi: f64) -> (BmiCategory, &'static str) {
    let category = if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };
    (category, category.advice())
}

/// BMI value with its category and advice
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BmiReport {
    pub bmi: f64,
    pub category: BmiCategory,
    pub advice: String,
}

pub fn bmi_report(weight: f64, height: f64) -> Result<BmiReport> {
    let bmi = calculate_bmi(weight, height)?;
    let (category, advice) = bmi_category(bmi);
    Ok(BmiReport {
        bmi,
        category,
        advice: advice.to_string(),
    })
}

/// Intermediate and final values of the calorie target computation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalorieTarget {
    pub bmr: f64,
    pub tdee: f64,
    pub target: f64,
}

/// Validate the profile, then run BMR → TDEE → goal adjustment
pub fn calorie_target(profile: &UserProfile) -> Result<CalorieTarget> {
    profile.validate()?;

    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age,
        profile.gender,
    );
    let tdee = calculate_tdee(bmr, profile.activity);
    let target = adjust_calories_for_goal(tdee, profile.goal);

    tracing::debug!(bmr, tdee, target, "Computed calorie target");

    Ok(CalorieTarget { bmr, tdee, target })
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
