use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ValidationError;
use crate::models::{
    ActivityLevel, BmiInput, BodyMetricsInput, BodyShapeInput, CalculatorInput, CalculatorKind,
    DiabetesRiskInput, Gender, GlucoseInput, MetricResult,
};
use crate::services::advice::AdviceSet;
use crate::services::calculation::Calculation;

use super::common::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, PaginationParams};

/// A numeric form field, sent either as a JSON number or as text.
///
/// Any other JSON value is kept so parsing can reject it against the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl NumericField {
    /// Parses the field explicitly. Blank text counts as missing.
    pub fn parse(field: &str, value: Option<&NumericField>) -> Result<f64, ValidationError> {
        match value {
            None => Err(ValidationError::missing(field)),
            Some(NumericField::Number(n)) => Ok(*n),
            Some(NumericField::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::missing(field));
                }
                trimmed
                    .parse::<f64>()
                    .map_err(|_| ValidationError::NotANumber {
                        field: field.to_string(),
                        value: text.clone(),
                    })
            }
            Some(NumericField::Other(value)) => Err(ValidationError::NotANumber {
                field: field.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// A yes/no form field, sent as a boolean or as "yes"/"no" text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FlagField {
    Bool(bool),
    Text(String),
    Other(serde_json::Value),
}

impl FlagField {
    pub fn parse(field: &str, value: Option<&FlagField>) -> Result<bool, ValidationError> {
        match value {
            None => Ok(false),
            Some(FlagField::Bool(b)) => Ok(*b),
            Some(FlagField::Text(text)) => match text.trim().to_lowercase().as_str() {
                "yes" | "true" | "y" => Ok(true),
                "no" | "false" | "n" | "" => Ok(false),
                _ => Err(ValidationError::UnknownOption {
                    field: field.to_string(),
                    value: text.clone(),
                    expected: "yes, no",
                }),
            },
            Some(FlagField::Other(value)) => Err(ValidationError::UnknownOption {
                field: field.to_string(),
                value: value.to_string(),
                expected: "yes, no",
            }),
        }
    }
}

fn parse_gender(value: Option<&str>) -> Result<Gender, ValidationError> {
    match value {
        None => Ok(Gender::Male),
        Some(v) => Gender::parse_field("gender", v),
    }
}

fn parse_activity_level(value: Option<&str>) -> Result<ActivityLevel, ValidationError> {
    match value {
        None => Ok(ActivityLevel::Sedentary),
        Some(v) => ActivityLevel::parse_field("activity_level", v),
    }
}

/// Request payload for the BMI calculator
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BmiRequest {
    #[serde(alias = "weight")]
    pub weight_kg: Option<NumericField>,
    #[serde(alias = "height")]
    pub height_cm: Option<NumericField>,
}

impl TryFrom<&BmiRequest> for CalculatorInput {
    type Error = ValidationError;

    fn try_from(request: &BmiRequest) -> Result<Self, Self::Error> {
        Ok(Self::Bmi(BmiInput {
            weight_kg: NumericField::parse("weight_kg", request.weight_kg.as_ref())?,
            height_cm: NumericField::parse("height_cm", request.height_cm.as_ref())?,
        }))
    }
}

/// Request payload for the BMR and body fat calculators
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BodyMetricsRequest {
    #[serde(alias = "age")]
    pub age_years: Option<NumericField>,
    /// Defaults to male when omitted
    pub gender: Option<String>,
    #[serde(alias = "weight")]
    pub weight_kg: Option<NumericField>,
    #[serde(alias = "height")]
    pub height_cm: Option<NumericField>,
}

impl BodyMetricsRequest {
    pub fn to_input(&self) -> Result<BodyMetricsInput, ValidationError> {
        Ok(BodyMetricsInput {
            age_years: NumericField::parse("age_years", self.age_years.as_ref())?,
            gender: parse_gender(self.gender.as_deref())?,
            weight_kg: NumericField::parse("weight_kg", self.weight_kg.as_ref())?,
            height_cm: NumericField::parse("height_cm", self.height_cm.as_ref())?,
        })
    }
}

/// Request payload for the body shape calculator
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct BodyShapeRequest {
    #[serde(alias = "waist")]
    pub waist_cm: Option<NumericField>,
    #[serde(alias = "hip")]
    pub hip_cm: Option<NumericField>,
}

impl TryFrom<&BodyShapeRequest> for CalculatorInput {
    type Error = ValidationError;

    fn try_from(request: &BodyShapeRequest) -> Result<Self, Self::Error> {
        Ok(Self::BodyShape(BodyShapeInput {
            waist_cm: NumericField::parse("waist_cm", request.waist_cm.as_ref())?,
            hip_cm: NumericField::parse("hip_cm", request.hip_cm.as_ref())?,
        }))
    }
}

/// Request payload for the diabetes risk rubric
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct DiabetesRiskRequest {
    #[serde(alias = "age")]
    pub age_years: Option<NumericField>,
    #[serde(alias = "weight")]
    pub weight_kg: Option<NumericField>,
    #[serde(alias = "height")]
    pub height_cm: Option<NumericField>,
    /// Defaults to "no" when omitted
    #[serde(alias = "familyHistory")]
    pub family_history: Option<FlagField>,
    /// Defaults to sedentary when omitted
    #[serde(alias = "activityLevel")]
    pub activity_level: Option<String>,
}

impl TryFrom<&DiabetesRiskRequest> for CalculatorInput {
    type Error = ValidationError;

    fn try_from(request: &DiabetesRiskRequest) -> Result<Self, Self::Error> {
        Ok(Self::DiabetesRisk(DiabetesRiskInput {
            age_years: NumericField::parse("age_years", request.age_years.as_ref())?,
            weight_kg: NumericField::parse("weight_kg", request.weight_kg.as_ref())?,
            height_cm: NumericField::parse("height_cm", request.height_cm.as_ref())?,
            family_history: FlagField::parse("family_history", request.family_history.as_ref())?,
            activity_level: parse_activity_level(request.activity_level.as_deref())?,
        }))
    }
}

/// Request payload for the glucose screen
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GlucoseRequest {
    #[serde(alias = "glucose")]
    pub glucose_mg_dl: Option<NumericField>,
}

impl TryFrom<&GlucoseRequest> for CalculatorInput {
    type Error = ValidationError;

    fn try_from(request: &GlucoseRequest) -> Result<Self, Self::Error> {
        Ok(Self::GlucoseScreen(GlucoseInput {
            glucose_mg_dl: NumericField::parse("glucose_mg_dl", request.glucose_mg_dl.as_ref())?,
        }))
    }
}

/// Result of one calculation as shown to the caller
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CalculationResponse {
    pub kind: CalculatorKind,
    pub label: String,
    pub input: CalculatorInput,
    pub metrics: MetricResult,
    pub category: String,
    pub advice: AdviceSet,
    pub computed_at: NaiveDateTime,
}

impl From<Calculation> for CalculationResponse {
    fn from(calculation: Calculation) -> Self {
        let record = calculation.record;
        Self {
            kind: record.kind,
            label: record.kind.label().to_string(),
            input: record.input,
            metrics: record.metrics,
            category: record.category.label().to_string(),
            advice: calculation.advice,
            computed_at: record.computed_at,
        }
    }
}

/// Query parameters for the calculation history.
///
/// Fields are listed directly rather than flattening `PaginationParams`:
/// query strings only carry text, and flattened numbers do not parse.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CalculationFilter {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Only return calculations of this kind
    pub kind: Option<String>,
}

impl CalculationFilter {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page.unwrap_or(DEFAULT_PAGE),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    pub fn kind(&self) -> Result<Option<CalculatorKind>, String> {
        match self.kind.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse::<CalculatorKind>()
                .map(Some)
                .map_err(|_| format!("unknown calculator kind '{raw}'")),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;
        self.kind().map(|_| ())
    }
}
