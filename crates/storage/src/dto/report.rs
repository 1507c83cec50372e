use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CalculatorKind, MetricResult};
use crate::services::advice::AdviceSet;

/// Latest result of one calculator in a profile report
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReportEntry {
    pub kind: CalculatorKind,
    pub label: String,
    pub summary: String,
    pub category: String,
    pub metrics: MetricResult,
    pub advice: AdviceSet,
    pub computed_at: NaiveDateTime,
}

/// Consolidated view over a user's latest calculations
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfileReport {
    pub user_id: String,
    pub generated_at: NaiveDateTime,
    pub is_empty: bool,
    pub entries: Vec<ReportEntry>,
}
