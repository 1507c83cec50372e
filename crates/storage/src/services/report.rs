//! Builds the profile report from the latest record of each calculator.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::dto::report::{ProfileReport, ReportEntry};
use crate::error::Result;
use crate::models::{CalculatorKind, MetricResult, StoredCalculation};
use crate::store::CalculationStore;

use super::advice::advice_for_label;

pub async fn profile_report(store: &dyn CalculationStore, user_id: &str) -> Result<ProfileReport> {
    let latest = store.latest_per_kind(user_id).await?;
    tracing::debug!(user_id, kinds = latest.len(), "Building profile report");
    Ok(build_report(user_id, latest))
}

/// Orders entries by `CalculatorKind::REPORT_ORDER` and keeps one per kind.
///
/// If a store hands back several records of the same kind, the one with
/// the latest `computed_at` wins.
pub fn build_report(user_id: &str, calculations: Vec<StoredCalculation>) -> ProfileReport {
    let mut latest: HashMap<CalculatorKind, StoredCalculation> = HashMap::new();
    for calculation in calculations {
        match latest.get(&calculation.kind) {
            Some(current) if current.computed_at > calculation.computed_at => {}
            _ => {
                latest.insert(calculation.kind, calculation);
            }
        }
    }

    let entries: Vec<ReportEntry> = CalculatorKind::REPORT_ORDER
        .iter()
        .filter_map(|kind| latest.remove(kind))
        .map(report_entry)
        .collect();

    ProfileReport {
        user_id: user_id.to_string(),
        generated_at: Utc::now().naive_utc(),
        is_empty: entries.is_empty(),
        entries,
    }
}

fn report_entry(calculation: StoredCalculation) -> ReportEntry {
    let advice = advice_for_label(
        calculation.kind,
        &calculation.category,
        calculation.metrics.bmr,
    );

    ReportEntry {
        kind: calculation.kind,
        label: calculation.kind.label().to_string(),
        summary: summarize(calculation.kind, &calculation.metrics, &calculation.category),
        category: calculation.category,
        metrics: calculation.metrics,
        advice,
        computed_at: calculation.computed_at,
    }
}

/// One-line description of a stored result, e.g. "BMI 22.86 (Normal)".
pub fn summarize(kind: CalculatorKind, metrics: &MetricResult, category: &str) -> String {
    let value = |v: Option<Decimal>| {
        v.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
    };

    match kind {
        CalculatorKind::Bmi => format!("BMI {} ({category})", value(metrics.bmi)),
        CalculatorKind::Bmr => format!("BMR {} calories/day", value(metrics.bmr)),
        CalculatorKind::BodyFat => {
            format!("Body fat {}% ({category})", value(metrics.body_fat_percent))
        }
        CalculatorKind::BodyShape => format!(
            "{category} shape, waist-to-hip ratio {}",
            value(metrics.waist_hip_ratio)
        ),
        CalculatorKind::DiabetesRisk => format!(
            "{category} risk, score {}",
            metrics
                .risk_score
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string())
        ),
        CalculatorKind::GlucoseScreen => {
            format!("Glucose {} mg/dL ({category})", value(metrics.glucose_mg_dl))
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use uuid::Uuid;

    use super::*;
    use crate::models::{BmiInput, BodyShape, BodyShapeInput, CalculatorInput};
    use crate::services::advice::body_shape_advice;

    fn at(minute: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            + Duration::minutes(minute)
    }

    fn stored_bmi(bmi: Decimal, category: &str, minute: i64) -> StoredCalculation {
        StoredCalculation {
            calculation_id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            kind: CalculatorKind::Bmi,
            input: CalculatorInput::Bmi(BmiInput {
                weight_kg: 70.0,
                height_cm: 175.0,
            }),
            metrics: MetricResult {
                bmi: Some(bmi),
                ..MetricResult::default()
            },
            category: category.to_string(),
            computed_at: at(minute),
        }
    }

    fn stored_shape(category: &str, minute: i64) -> StoredCalculation {
        StoredCalculation {
            calculation_id: Uuid::new_v4(),
            user_id: "alice".to_string(),
            kind: CalculatorKind::BodyShape,
            input: CalculatorInput::BodyShape(BodyShapeInput {
                waist_cm: 70.0,
                hip_cm: 100.0,
            }),
            metrics: MetricResult {
                waist_hip_ratio: Some(Decimal::new(70, 2)),
                ..MetricResult::default()
            },
            category: category.to_string(),
            computed_at: at(minute),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = build_report("alice", Vec::new());
        assert!(report.is_empty);
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_entries_follow_report_order() {
        let report = build_report(
            "alice",
            vec![stored_shape("Pear", 0), stored_bmi(Decimal::new(2286, 2), "Normal", 1)],
        );

        let kinds: Vec<_> = report.entries.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![CalculatorKind::Bmi, CalculatorKind::BodyShape]);
        assert_eq!(report.entries[0].summary, "BMI 22.86 (Normal)");
        assert_eq!(report.entries[1].advice, body_shape_advice(BodyShape::Pear));
        assert!(!report.is_empty);
    }

    #[test]
    fn test_latest_record_wins() {
        let report = build_report(
            "alice",
            vec![
                stored_bmi(Decimal::new(2700, 2), "Overweight", 10),
                stored_bmi(Decimal::new(2286, 2), "Normal", 0),
            ],
        );

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].category, "Overweight");
    }

    #[test]
    fn test_unknown_label_has_no_advice() {
        let report = build_report("alice", vec![stored_shape("Triangle", 0)]);
        assert!(report.entries[0].advice.is_empty());
        assert_eq!(
            report.entries[0].summary,
            "Triangle shape, waist-to-hip ratio 0.70"
        );
    }
}
