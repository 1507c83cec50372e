pub mod activity_level;
pub mod calculation;
pub mod calculator_kind;
pub mod category;
pub mod gender;

pub use activity_level::ActivityLevel;
pub use calculation::{
    BmiInput, BodyMetricsInput, BodyShapeInput, CalculationRecord, CalculatorInput,
    DiabetesRiskInput, GlucoseInput, MetricResult, StoredCalculation,
};
pub use calculator_kind::CalculatorKind;
pub use category::{BmiCategory, BodyFatCategory, BodyShape, Category, GlucoseRisk, RiskLevel};
pub use gender::Gender;
