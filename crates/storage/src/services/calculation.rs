//! Runs one calculation end to end: validate, compute, classify, advise,
//! assemble the record.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tokio::task::JoinHandle;

use crate::error::ValidationError;
use crate::models::{
    BmiInput, BodyMetricsInput, BodyShapeInput, CalculationRecord, CalculatorInput,
    CalculatorKind, Category, DiabetesRiskInput, GlucoseInput, MetricResult,
};
use crate::store::CalculationStore;

use super::advice::{AdviceSet, advice_for};
use super::{classification, formulas};

const BMI_DECIMALS: u32 = 2;
const BMR_DECIMALS: u32 = 0;
const BODY_FAT_DECIMALS: u32 = 1;
const RATIO_DECIMALS: u32 = 2;
const GLUCOSE_FALLBACK_DECIMALS: u32 = 4;

/// A finished calculation: the record to persist and the advice to show.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub record: CalculationRecord,
    pub advice: AdviceSet,
}

/// Validates the input and runs the matching calculator.
///
/// Fails before computing anything if any field is out of range.
pub fn calculate(input: CalculatorInput) -> Result<Calculation, ValidationError> {
    input.validate()?;

    let kind = input.kind();
    let (metrics, category) = evaluate(&input);
    let advice = advice_for(kind, category, metrics.bmr);

    tracing::debug!(%kind, category = category.label(), "Calculation classified");

    Ok(Calculation {
        record: assemble_record(kind, input, metrics, category),
        advice,
    })
}

/// Computes metrics and category for an input that already passed validation.
pub fn evaluate(input: &CalculatorInput) -> (MetricResult, Category) {
    match input {
        CalculatorInput::Bmi(i) => evaluate_bmi(i),
        CalculatorInput::Bmr(i) => evaluate_bmr(i),
        CalculatorInput::BodyFat(i) => evaluate_body_fat(i),
        CalculatorInput::BodyShape(i) => evaluate_body_shape(i),
        CalculatorInput::DiabetesRisk(i) => evaluate_diabetes_risk(i),
        CalculatorInput::GlucoseScreen(i) => evaluate_glucose(i),
    }
}

fn evaluate_bmi(input: &BmiInput) -> (MetricResult, Category) {
    let bmi = formulas::round_metric(
        formulas::calculate_bmi(input.weight_kg, input.height_cm),
        BMI_DECIMALS,
    );

    let metrics = MetricResult {
        bmi: Some(bmi),
        ..MetricResult::default()
    };
    (metrics, Category::Bmi(classification::classify_bmi(bmi)))
}

/// BMR results also carry the BMI, whose category keys the advice.
fn evaluate_bmr(input: &BodyMetricsInput) -> (MetricResult, Category) {
    let bmr = formulas::calculate_bmr(
        input.weight_kg,
        input.height_cm,
        input.age_years,
        input.gender,
    );
    let bmi = formulas::round_metric(
        formulas::calculate_bmi(input.weight_kg, input.height_cm),
        BMI_DECIMALS,
    );

    let metrics = MetricResult {
        bmi: Some(bmi),
        bmr: Some(formulas::round_metric(bmr, BMR_DECIMALS)),
        ..MetricResult::default()
    };
    (metrics, Category::Bmi(classification::classify_bmi(bmi)))
}

fn evaluate_body_fat(input: &BodyMetricsInput) -> (MetricResult, Category) {
    let raw_bmi = formulas::calculate_bmi(input.weight_kg, input.height_cm);
    let body_fat = formulas::round_metric(
        formulas::calculate_body_fat_pct(raw_bmi, input.age_years, input.gender),
        BODY_FAT_DECIMALS,
    );

    let metrics = MetricResult {
        bmi: Some(formulas::round_metric(raw_bmi, BMI_DECIMALS)),
        body_fat_percent: Some(body_fat),
        ..MetricResult::default()
    };
    let category = classification::classify_body_fat(body_fat, input.gender);
    (metrics, Category::BodyFat(category))
}

fn evaluate_body_shape(input: &BodyShapeInput) -> (MetricResult, Category) {
    let ratio = formulas::round_metric(
        formulas::calculate_waist_hip_ratio(input.waist_cm, input.hip_cm),
        RATIO_DECIMALS,
    );

    let metrics = MetricResult {
        waist_hip_ratio: Some(ratio),
        ..MetricResult::default()
    };
    (
        metrics,
        Category::BodyShape(classification::classify_waist_hip_ratio(ratio)),
    )
}

/// The rubric scores the unrounded BMI; only the reported BMI is rounded.
fn evaluate_diabetes_risk(input: &DiabetesRiskInput) -> (MetricResult, Category) {
    let bmi = formulas::calculate_bmi(input.weight_kg, input.height_cm);
    let score = formulas::calculate_diabetes_risk_score(
        input.age_years,
        bmi,
        input.family_history,
        input.activity_level,
    );

    let metrics = MetricResult {
        bmi: Some(formulas::round_metric(bmi, BMI_DECIMALS)),
        risk_score: Some(score),
        ..MetricResult::default()
    };
    (
        metrics,
        Category::DiabetesRisk(classification::classify_risk_score(score)),
    )
}

/// The reading is echoed as entered and classified unrounded.
fn evaluate_glucose(input: &GlucoseInput) -> (MetricResult, Category) {
    let glucose = input
        .glucose_mg_dl
        .to_string()
        .parse::<Decimal>()
        .unwrap_or_else(|_| {
            formulas::round_metric(input.glucose_mg_dl, GLUCOSE_FALLBACK_DECIMALS)
        });

    let metrics = MetricResult {
        glucose_mg_dl: Some(glucose),
        ..MetricResult::default()
    };
    (metrics, Category::Glucose(classification::classify_glucose(glucose)))
}

/// Bundles a classified calculation into the record handed to persistence.
pub fn assemble_record(
    kind: CalculatorKind,
    input: CalculatorInput,
    metrics: MetricResult,
    category: Category,
) -> CalculationRecord {
    CalculationRecord {
        kind,
        input,
        metrics,
        category,
        computed_at: Utc::now().naive_utc(),
    }
}

/// Saves the record on a detached task.
///
/// A failed save is logged and dropped: it never affects the result the
/// caller already has, and it is not retried.
pub fn persist_in_background(
    store: Arc<dyn CalculationStore>,
    user_id: String,
    record: CalculationRecord,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match store.save(&user_id, &record).await {
            Ok(calculation_id) => {
                tracing::debug!(%calculation_id, kind = %record.kind, "Calculation saved");
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    kind = %record.kind,
                    user_id = %user_id,
                    "Failed to save calculation"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ActivityLevel, BmiCategory, BodyFatCategory, BodyShape, Gender, GlucoseRisk, RiskLevel,
    };
    use crate::services::advice::bmi_advice;
    use crate::store::InMemoryCalculationStore;

    fn bmi_input(weight_kg: f64, height_cm: f64) -> CalculatorInput {
        CalculatorInput::Bmi(BmiInput {
            weight_kg,
            height_cm,
        })
    }

    #[test]
    fn test_bmi_end_to_end() {
        let calculation = calculate(bmi_input(70.0, 175.0)).unwrap();

        assert_eq!(calculation.record.kind, CalculatorKind::Bmi);
        assert_eq!(calculation.record.metrics.bmi.unwrap().to_string(), "22.86");
        assert_eq!(calculation.record.category, Category::Bmi(BmiCategory::Normal));
        assert_eq!(calculation.advice, bmi_advice(BmiCategory::Normal));
        assert_eq!(calculation.advice.tips.len(), 4);
    }

    #[test]
    fn test_bmi_end_to_end_is_repeatable() {
        let first = calculate(bmi_input(70.0, 175.0)).unwrap();
        let second = calculate(bmi_input(70.0, 175.0)).unwrap();

        assert_eq!(first.record.metrics, second.record.metrics);
        assert_eq!(first.record.category, second.record.category);
        assert_eq!(first.advice, second.advice);
    }

    #[test]
    fn test_bmr_end_to_end() {
        let input = CalculatorInput::Bmr(BodyMetricsInput {
            age_years: 30.0,
            gender: Gender::Male,
            weight_kg: 80.0,
            height_cm: 180.0,
        });
        let calculation = calculate(input).unwrap();

        assert_eq!(calculation.record.metrics.bmr.unwrap().to_string(), "1780");
        assert_eq!(calculation.record.metrics.bmi.unwrap().to_string(), "24.69");
        assert_eq!(calculation.record.category, Category::Bmi(BmiCategory::Normal));
        assert_eq!(
            calculation.advice.tips[0],
            "Maintain your current intake around 1780 calories/day"
        );
    }

    #[test]
    fn test_body_fat_category_is_recorded() {
        // BMI 24.69: 1.2·24.69 + 0.23·30 − 16.2 = 20.33 → Average
        let input = CalculatorInput::BodyFat(BodyMetricsInput {
            age_years: 30.0,
            gender: Gender::Male,
            weight_kg: 80.0,
            height_cm: 180.0,
        });
        let calculation = calculate(input).unwrap();

        assert_eq!(
            calculation.record.metrics.body_fat_percent.unwrap().to_string(),
            "20.3"
        );
        assert_eq!(
            calculation.record.category,
            Category::BodyFat(BodyFatCategory::Average)
        );
    }

    #[test]
    fn test_body_fat_clamp_reaches_record() {
        let input = CalculatorInput::BodyFat(BodyMetricsInput {
            age_years: 18.0,
            gender: Gender::Female,
            weight_kg: 2.0,
            height_cm: 200.0,
        });
        let calculation = calculate(input).unwrap();

        assert_eq!(
            calculation.record.metrics.body_fat_percent.unwrap().to_string(),
            "0.0"
        );
        assert_eq!(
            calculation.record.category,
            Category::BodyFat(BodyFatCategory::EssentialFat)
        );
    }

    #[test]
    fn test_body_shape_end_to_end() {
        let hourglass = calculate(CalculatorInput::BodyShape(BodyShapeInput {
            waist_cm: 80.0,
            hip_cm: 100.0,
        }))
        .unwrap();
        assert_eq!(
            hourglass.record.metrics.waist_hip_ratio.unwrap().to_string(),
            "0.80"
        );
        assert_eq!(
            hourglass.record.category,
            Category::BodyShape(BodyShape::Hourglass)
        );

        let apple = calculate(CalculatorInput::BodyShape(BodyShapeInput {
            waist_cm: 90.0,
            hip_cm: 100.0,
        }))
        .unwrap();
        assert_eq!(apple.record.category, Category::BodyShape(BodyShape::Apple));
        assert!(apple.advice.note.is_some());
    }

    #[test]
    fn test_diabetes_risk_high() {
        // 175 cm, 98 kg → BMI 32.0
        let input = CalculatorInput::DiabetesRisk(DiabetesRiskInput {
            age_years: 50.0,
            weight_kg: 98.0,
            height_cm: 175.0,
            family_history: true,
            activity_level: ActivityLevel::Sedentary,
        });
        let calculation = calculate(input).unwrap();

        assert_eq!(calculation.record.metrics.risk_score, Some(9));
        assert_eq!(
            calculation.record.category,
            Category::DiabetesRisk(RiskLevel::High)
        );
        assert_eq!(calculation.advice.tips.len(), 6);
    }

    #[test]
    fn test_glucose_screen() {
        let calculation = calculate(CalculatorInput::GlucoseScreen(GlucoseInput {
            glucose_mg_dl: 152.0,
        }))
        .unwrap();
        assert_eq!(
            calculation.record.category,
            Category::Glucose(GlucoseRisk::HighRisk)
        );
        assert_eq!(
            calculation.record.metrics.glucose_mg_dl.unwrap().to_string(),
            "152"
        );
    }

    #[test]
    fn test_glucose_just_above_threshold_is_high_risk() {
        let calculation = calculate(CalculatorInput::GlucoseScreen(GlucoseInput {
            glucose_mg_dl: 140.04,
        }))
        .unwrap();
        assert_eq!(
            calculation.record.metrics.glucose_mg_dl.unwrap().to_string(),
            "140.04"
        );
        assert_eq!(
            calculation.record.category,
            Category::Glucose(GlucoseRisk::HighRisk)
        );

        let at_threshold = calculate(CalculatorInput::GlucoseScreen(GlucoseInput {
            glucose_mg_dl: 140.0,
        }))
        .unwrap();
        assert_eq!(
            at_threshold.record.category,
            Category::Glucose(GlucoseRisk::Normal)
        );
    }

    #[test]
    fn test_invalid_input_produces_no_record() {
        let err = calculate(bmi_input(70.0, 0.0)).unwrap_err();
        assert_eq!(err.field(), "height_cm");

        let err = calculate(bmi_input(-5.0, 170.0)).unwrap_err();
        assert_eq!(err.field(), "weight_kg");
    }

    #[tokio::test]
    async fn test_background_save_reaches_store() {
        let store = Arc::new(InMemoryCalculationStore::default());
        let calculation = calculate(bmi_input(70.0, 175.0)).unwrap();

        persist_in_background(store.clone(), "alice".to_string(), calculation.record)
            .await
            .unwrap();

        let latest = store.latest_per_kind("alice").await.unwrap();
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].category, "Normal");
    }

    #[tokio::test]
    async fn test_failed_save_is_swallowed() {
        let store = Arc::new(InMemoryCalculationStore::failing());
        let calculation = calculate(bmi_input(70.0, 175.0)).unwrap();

        let handle = persist_in_background(store.clone(), "alice".to_string(), calculation.record);
        assert!(handle.await.is_ok());
        assert!(store.latest_per_kind("alice").await.unwrap().is_empty());
    }
}
