use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The calculators offered by the service.
///
/// The slug is what gets stored in the `calculator_kind` column and used in
/// URLs, the label is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Bmi,
    Bmr,
    BodyFat,
    BodyShape,
    DiabetesRisk,
    GlucoseScreen,
}

impl CalculatorKind {
    /// Order used when a report lists one entry per calculator.
    pub const REPORT_ORDER: [CalculatorKind; 6] = [
        Self::Bmi,
        Self::BodyFat,
        Self::Bmr,
        Self::BodyShape,
        Self::DiabetesRisk,
        Self::GlucoseScreen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bmi => "bmi",
            Self::Bmr => "bmr",
            Self::BodyFat => "body_fat",
            Self::BodyShape => "body_shape",
            Self::DiabetesRisk => "diabetes_risk",
            Self::GlucoseScreen => "glucose_screen",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Bmi => "BMI",
            Self::Bmr => "BMR",
            Self::BodyFat => "Body Fat",
            Self::BodyShape => "Body Shape",
            Self::DiabetesRisk => "Diabetes Risk",
            Self::GlucoseScreen => "Diabetes",
        }
    }
}

impl FromStr for CalculatorKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "bmi" => Ok(Self::Bmi),
            "bmr" => Ok(Self::Bmr),
            "body_fat" => Ok(Self::BodyFat),
            "body_shape" => Ok(Self::BodyShape),
            "diabetes_risk" => Ok(Self::DiabetesRisk),
            "glucose_screen" | "glucose" => Ok(Self::GlucoseScreen),
            _ => Err(()),
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trips_for_every_kind() {
        for kind in CalculatorKind::REPORT_ORDER {
            assert_eq!(kind.as_str().parse::<CalculatorKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_url_style_slugs_are_accepted() {
        assert_eq!("body-fat".parse::<CalculatorKind>(), Ok(CalculatorKind::BodyFat));
        assert_eq!("glucose".parse::<CalculatorKind>(), Ok(CalculatorKind::GlucoseScreen));
        assert!("calorie".parse::<CalculatorKind>().is_err());
    }
}
