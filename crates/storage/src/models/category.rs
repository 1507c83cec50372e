use std::fmt;

use serde::{Serialize, Serializer};

use super::CalculatorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        Self::Underweight,
        Self::Normal,
        Self::Overweight,
        Self::Obese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyFatCategory {
    EssentialFat,
    Athletic,
    Fitness,
    Average,
    Obese,
}

impl BodyFatCategory {
    pub const ALL: [BodyFatCategory; 5] = [
        Self::EssentialFat,
        Self::Athletic,
        Self::Fitness,
        Self::Average,
        Self::Obese,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::EssentialFat => "Essential fat",
            Self::Athletic => "Athletic",
            Self::Fitness => "Fitness",
            Self::Average => "Average",
            Self::Obese => "Obese",
        }
    }
}

/// Fat distribution pattern derived from the waist-hip ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyShape {
    Pear,
    Hourglass,
    Apple,
}

impl BodyShape {
    pub const ALL: [BodyShape; 3] = [Self::Pear, Self::Hourglass, Self::Apple];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Pear => "Pear",
            Self::Hourglass => "Hourglass",
            Self::Apple => "Apple",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [Self::Low, Self::Moderate, Self::High];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlucoseRisk {
    Normal,
    HighRisk,
}

impl GlucoseRisk {
    pub const ALL: [GlucoseRisk; 2] = [Self::Normal, Self::HighRisk];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::HighRisk => "High Risk",
        }
    }
}

/// Classification outcome of a calculation.
///
/// Serialized as its display label. Parsing a stored label needs the
/// calculator kind because labels such as "Normal" and "Obese" are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Bmi(BmiCategory),
    BodyFat(BodyFatCategory),
    BodyShape(BodyShape),
    DiabetesRisk(RiskLevel),
    Glucose(GlucoseRisk),
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bmi(c) => c.label(),
            Self::BodyFat(c) => c.label(),
            Self::BodyShape(c) => c.label(),
            Self::DiabetesRisk(c) => c.label(),
            Self::Glucose(c) => c.label(),
        }
    }

    /// Resolves a persisted label for the given calculator.
    ///
    /// BMR results are classified with the BMI table.
    pub fn from_label(kind: CalculatorKind, label: &str) -> Option<Self> {
        match kind {
            CalculatorKind::Bmi | CalculatorKind::Bmr => BmiCategory::ALL
                .into_iter()
                .find(|c| c.label().eq_ignore_ascii_case(label))
                .map(Self::Bmi),
            CalculatorKind::BodyFat => BodyFatCategory::ALL
                .into_iter()
                .find(|c| c.label().eq_ignore_ascii_case(label))
                .map(Self::BodyFat),
            CalculatorKind::BodyShape => BodyShape::ALL
                .into_iter()
                .find(|c| c.label().eq_ignore_ascii_case(label))
                .map(Self::BodyShape),
            CalculatorKind::DiabetesRisk => RiskLevel::ALL
                .into_iter()
                .find(|c| c.label().eq_ignore_ascii_case(label))
                .map(Self::DiabetesRisk),
            CalculatorKind::GlucoseScreen => GlucoseRisk::ALL
                .into_iter()
                .find(|c| c.label().eq_ignore_ascii_case(label))
                .map(Self::Glucose),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_labels_resolve_per_kind() {
        assert_eq!(
            Category::from_label(CalculatorKind::Bmi, "Obese"),
            Some(Category::Bmi(BmiCategory::Obese))
        );
        assert_eq!(
            Category::from_label(CalculatorKind::BodyFat, "Obese"),
            Some(Category::BodyFat(BodyFatCategory::Obese))
        );
        assert_eq!(
            Category::from_label(CalculatorKind::Bmr, "normal"),
            Some(Category::Bmi(BmiCategory::Normal))
        );
    }

    #[test]
    fn test_unknown_label_is_none() {
        assert_eq!(Category::from_label(CalculatorKind::BodyShape, "Banana"), None);
        assert_eq!(Category::from_label(CalculatorKind::DiabetesRisk, ""), None);
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&Category::BodyFat(BodyFatCategory::EssentialFat)).unwrap();
        assert_eq!(json, "\"Essential fat\"");
    }
}
