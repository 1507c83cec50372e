//! Closed-form health formulas.
//!
//! Every function here is pure and expects inputs that already passed
//! `CalculatorInput::validate`.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{ActivityLevel, Gender};

/// Mifflin-St Jeor constant offsets.
mod mifflin_st_jeor {
    pub const MALE_OFFSET: f64 = 5.0;
    pub const FEMALE_OFFSET: f64 = -161.0;
}

/// BMI-based body fat approximation constants.
mod body_fat {
    pub const BMI_FACTOR: f64 = 1.2;
    pub const AGE_FACTOR: f64 = 0.23;
    pub const MALE_OFFSET: f64 = -16.2;
    pub const FEMALE_OFFSET: f64 = -5.4;
}

/// Calculates Body Mass Index.
///
/// Formula:
/// ```text
/// BMI = weight_kg / (height_cm / 100)²
/// ```
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Calculates Basal Metabolic Rate in kcal/day using Mifflin-St Jeor.
///
/// Formula (W in kg, H in cm, A in years):
/// ```text
/// male:   10·W + 6.25·H − 5·A + 5
/// female: 10·W + 6.25·H − 5·A − 161
/// ```
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: f64, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => mifflin_st_jeor::MALE_OFFSET,
        Gender::Female => mifflin_st_jeor::FEMALE_OFFSET,
    };

    10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years + offset
}

/// Estimates body fat percentage from BMI and age.
///
/// Formula:
/// ```text
/// male:   1.2·BMI + 0.23·A − 16.2
/// female: 1.2·BMI + 0.23·A − 5.4
/// ```
///
/// Very lean, young inputs drive the raw value below zero; the result is
/// clamped to 0.
pub fn calculate_body_fat_pct(bmi: f64, age_years: f64, gender: Gender) -> f64 {
    let offset = match gender {
        Gender::Male => body_fat::MALE_OFFSET,
        Gender::Female => body_fat::FEMALE_OFFSET,
    };

    let raw = body_fat::BMI_FACTOR * bmi + body_fat::AGE_FACTOR * age_years + offset;
    raw.max(0.0)
}

/// Waist circumference divided by hip circumference (same unit).
pub fn calculate_waist_hip_ratio(waist_cm: f64, hip_cm: f64) -> f64 {
    waist_cm / hip_cm
}

pub fn age_risk_points(age_years: f64) -> u8 {
    if age_years >= 45.0 {
        2
    } else if age_years >= 35.0 {
        1
    } else {
        0
    }
}

pub fn bmi_risk_points(bmi: f64) -> u8 {
    if bmi >= 30.0 {
        3
    } else if bmi >= 25.0 {
        2
    } else if bmi >= 23.0 {
        1
    } else {
        0
    }
}

pub fn family_history_risk_points(family_history: bool) -> u8 {
    if family_history { 2 } else { 0 }
}

pub fn activity_risk_points(activity_level: ActivityLevel) -> u8 {
    match activity_level {
        ActivityLevel::Sedentary => 2,
        ActivityLevel::Active => 1,
        ActivityLevel::VeryActive => 0,
    }
}

/// Diabetes risk rubric: the sum of four independent factor scores.
///
/// The maximum attainable score is 9.
pub fn calculate_diabetes_risk_score(
    age_years: f64,
    bmi: f64,
    family_history: bool,
    activity_level: ActivityLevel,
) -> u8 {
    age_risk_points(age_years)
        + bmi_risk_points(bmi)
        + family_history_risk_points(family_history)
        + activity_risk_points(activity_level)
}

/// Rounds a metric for display, half away from zero, padding the scale so
/// 0.8 at two places renders as "0.80".
///
/// Non-finite values cannot reach this point after validation; they map to
/// zero rather than panicking.
pub fn round_metric(value: f64, decimal_places: u32) -> Decimal {
    let mut rounded = Decimal::from_f64_retain(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    if rounded.scale() < decimal_places {
        rounded.rescale(decimal_places);
    }
    rounded
}
