use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{ActivityLevel, CalculatorKind, Category, Gender};
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BmiInput {
    #[validate(range(
        exclusive_min = 0.0,
        max = 650.0,
        message = "Weight must be greater than 0 and at most 650 kg"
    ))]
    pub weight_kg: f64,

    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "Height must be greater than 0 and at most 300 cm"
    ))]
    pub height_cm: f64,
}

/// Inputs shared by the BMR and body fat calculators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BodyMetricsInput {
    #[validate(range(
        exclusive_min = 0.0,
        max = 120.0,
        message = "Age must be greater than 0 and at most 120 years"
    ))]
    pub age_years: f64,

    pub gender: Gender,

    #[validate(range(
        exclusive_min = 0.0,
        max = 650.0,
        message = "Weight must be greater than 0 and at most 650 kg"
    ))]
    pub weight_kg: f64,

    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "Height must be greater than 0 and at most 300 cm"
    ))]
    pub height_cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BodyShapeInput {
    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "Waist must be greater than 0 and at most 300 cm"
    ))]
    pub waist_cm: f64,

    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "Hip must be greater than 0 and at most 300 cm"
    ))]
    pub hip_cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct DiabetesRiskInput {
    #[validate(range(
        exclusive_min = 0.0,
        max = 120.0,
        message = "Age must be greater than 0 and at most 120 years"
    ))]
    pub age_years: f64,

    #[validate(range(
        exclusive_min = 0.0,
        max = 650.0,
        message = "Weight must be greater than 0 and at most 650 kg"
    ))]
    pub weight_kg: f64,

    #[validate(range(
        exclusive_min = 0.0,
        max = 300.0,
        message = "Height must be greater than 0 and at most 300 cm"
    ))]
    pub height_cm: f64,

    pub family_history: bool,

    pub activity_level: ActivityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct GlucoseInput {
    #[validate(range(
        exclusive_min = 0.0,
        max = 1000.0,
        message = "Glucose must be greater than 0 and at most 1000 mg/dL"
    ))]
    pub glucose_mg_dl: f64,
}

/// Validated input of one calculation, tagged with its calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculatorInput {
    Bmi(BmiInput),
    Bmr(BodyMetricsInput),
    BodyFat(BodyMetricsInput),
    BodyShape(BodyShapeInput),
    DiabetesRisk(DiabetesRiskInput),
    GlucoseScreen(GlucoseInput),
}

impl CalculatorInput {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            Self::Bmi(_) => CalculatorKind::Bmi,
            Self::Bmr(_) => CalculatorKind::Bmr,
            Self::BodyFat(_) => CalculatorKind::BodyFat,
            Self::BodyShape(_) => CalculatorKind::BodyShape,
            Self::DiabetesRisk(_) => CalculatorKind::DiabetesRisk,
            Self::GlucoseScreen(_) => CalculatorKind::GlucoseScreen,
        }
    }

    /// Range-checks every numeric field. NaN and infinities are rejected
    /// here as well since they compare false against the bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let (result, values): (_, Vec<(&str, f64)>) = match self {
            Self::Bmi(i) => (
                i.validate(),
                vec![("weight_kg", i.weight_kg), ("height_cm", i.height_cm)],
            ),
            Self::Bmr(i) | Self::BodyFat(i) => (
                i.validate(),
                vec![
                    ("age_years", i.age_years),
                    ("weight_kg", i.weight_kg),
                    ("height_cm", i.height_cm),
                ],
            ),
            Self::BodyShape(i) => (
                i.validate(),
                vec![("waist_cm", i.waist_cm), ("hip_cm", i.hip_cm)],
            ),
            Self::DiabetesRisk(i) => (
                i.validate(),
                vec![
                    ("age_years", i.age_years),
                    ("weight_kg", i.weight_kg),
                    ("height_cm", i.height_cm),
                ],
            ),
            Self::GlucoseScreen(i) => (i.validate(), vec![("glucose_mg_dl", i.glucose_mg_dl)]),
        };

        if let Some((field, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ValidationError::NotANumber {
                field: field.to_string(),
                value: value.to_string(),
            });
        }

        result.map_err(ValidationError::from)
    }
}

/// Derived values of a calculation, rounded for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MetricResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmr: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waist_hip_ratio: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glucose_mg_dl: Option<Decimal>,
}

/// Everything one calculation produced. Handed by value to the store.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CalculationRecord {
    pub kind: CalculatorKind,
    pub input: CalculatorInput,
    pub metrics: MetricResult,
    #[schema(value_type = String, example = "Normal")]
    pub category: Category,
    pub computed_at: NaiveDateTime,
}

/// A record as read back from a store.
///
/// The category stays a label here: stored rows outlive the enum they were
/// written with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StoredCalculation {
    pub calculation_id: Uuid,
    pub user_id: String,
    pub kind: CalculatorKind,
    pub input: CalculatorInput,
    pub metrics: MetricResult,
    pub category: String,
    pub computed_at: NaiveDateTime,
}

impl StoredCalculation {
    pub fn from_record(calculation_id: Uuid, user_id: &str, record: &CalculationRecord) -> Self {
        Self {
            calculation_id,
            user_id: user_id.to_string(),
            kind: record.kind,
            input: record.input,
            metrics: record.metrics.clone(),
            category: record.category.label().to_string(),
            computed_at: record.computed_at,
        }
    }
}
