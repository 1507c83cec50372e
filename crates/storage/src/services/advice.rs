//! Static recommendations per category.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    BmiCategory, BodyFatCategory, BodyShape, CalculatorKind, Category, GlucoseRisk, RiskLevel,
};

/// Advice shown next to a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdviceSet {
    pub tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warning_signs: Vec<String>,
}

impl AdviceSet {
    fn from_tips(tips: &[&str]) -> Self {
        Self {
            tips: tips.iter().map(|t| t.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty() && self.note.is_none() && self.warning_signs.is_empty()
    }
}

const DIABETES_WARNING_SIGNS: [&str; 6] = [
    "Frequent urination",
    "Increased thirst",
    "Unexplained weight loss",
    "Fatigue and irritability",
    "Blurred vision",
    "Slow-healing sores",
];

const DIABETES_RISK_NOTE: &str =
    "This assessment estimates risk only. Consult a healthcare professional for accurate diagnosis.";

const DIABETES_PREVENTION_TIPS: [&str; 4] = [
    "Maintain a healthy weight (BMI between 18.5-24.9)",
    "Exercise for at least 30 minutes daily",
    "Eat a balanced diet rich in whole grains and fiber",
    "Limit processed foods and sugary drinks",
];

/// Resolves the advice for a fresh classification.
///
/// `bmr` is only read for BMR results, whose tips quote a calorie target.
pub fn advice_for(kind: CalculatorKind, category: Category, bmr: Option<Decimal>) -> AdviceSet {
    match (kind, category, bmr) {
        (CalculatorKind::Bmr, Category::Bmi(c), Some(bmr)) => bmr_advice(c, bmr),
        (_, Category::Bmi(c), _) => bmi_advice(c),
        (_, Category::BodyFat(c), _) => body_fat_advice(c),
        (_, Category::BodyShape(c), _) => body_shape_advice(c),
        (_, Category::DiabetesRisk(c), _) => diabetes_risk_advice(c),
        (_, Category::Glucose(c), _) => glucose_advice(c),
    }
}

/// Resolves advice for a stored `(kind, label)` pair.
///
/// A label that no longer parses yields an empty set instead of an error.
pub fn advice_for_label(kind: CalculatorKind, label: &str, bmr: Option<Decimal>) -> AdviceSet {
    match Category::from_label(kind, label) {
        Some(category) => advice_for(kind, category, bmr),
        None => {
            tracing::debug!(%kind, label, "No advice for unrecognized category");
            AdviceSet::default()
        }
    }
}

pub fn bmi_advice(category: BmiCategory) -> AdviceSet {
    AdviceSet::from_tips(match category {
        BmiCategory::Underweight => &[
            "Increase calorie intake with nutrient-dense foods like nuts, avocados, and whole grains",
            "Incorporate strength training to build muscle mass",
            "Eat smaller, more frequent meals throughout the day",
            "Consult a nutritionist for personalized dietary advice",
        ],
        BmiCategory::Normal => &[
            "Maintain your current healthy habits with balanced nutrition",
            "Continue regular physical activity (150+ minutes of moderate exercise weekly)",
            "Monitor your weight monthly to maintain your healthy range",
            "Focus on stress management and quality sleep",
        ],
        BmiCategory::Overweight => &[
            "Gradually increase physical activity (start with 30 mins walking daily)",
            "Reduce processed foods and sugary drinks",
            "Incorporate more vegetables and lean proteins into meals",
            "Practice mindful eating and portion control",
        ],
        BmiCategory::Obese => &[
            "Consult with a healthcare provider for a personalized weight management plan",
            "Start with low-impact exercises like swimming or cycling",
            "Keep a food diary to track eating habits",
            "Set realistic short-term goals (5-10% weight loss)",
        ],
    })
}

/// BMR tips are keyed by the BMI category and quote a share of the BMR.
pub fn bmr_advice(category: BmiCategory, bmr: Decimal) -> AdviceSet {
    let share = |percent: i64| {
        (bmr * Decimal::new(percent, 2))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    };

    let tips = match category {
        BmiCategory::Underweight => vec![
            format!(
                "Increase calorie intake by {} calories/day for healthy weight gain",
                share(20)
            ),
            "Focus on nutrient-dense foods like nuts, avocados, and whole grains".to_string(),
            "Combine strength training with adequate protein intake".to_string(),
            "Consult a nutritionist for personalized dietary advice".to_string(),
        ],
        BmiCategory::Normal => vec![
            format!("Maintain your current intake around {} calories/day", share(100)),
            "Balance macronutrients (40% carbs, 30% protein, 30% fats)".to_string(),
            "Include both cardio and strength training in your routine".to_string(),
            "Monitor your weight weekly to maintain your healthy range".to_string(),
        ],
        BmiCategory::Overweight => vec![
            format!(
                "Reduce intake by {} calories/day for gradual weight loss",
                share(15)
            ),
            "Prioritize lean proteins and fiber-rich foods".to_string(),
            "Aim for 150+ minutes of moderate exercise weekly".to_string(),
            "Practice mindful eating and track your meals".to_string(),
        ],
        BmiCategory::Obese => vec![
            format!(
                "Consult a doctor about a {} calorie/day reduction plan",
                share(25)
            ),
            "Start with low-impact exercises like swimming or cycling".to_string(),
            "Focus on sustainable lifestyle changes, not quick fixes".to_string(),
            "Consider working with a dietitian for meal planning".to_string(),
        ],
    };

    AdviceSet {
        tips,
        ..AdviceSet::default()
    }
}

pub fn body_fat_advice(category: BodyFatCategory) -> AdviceSet {
    AdviceSet::from_tips(match category {
        BodyFatCategory::EssentialFat => &[
            "Consult a healthcare provider - your body fat may be too low",
            "Increase healthy fats (avocados, nuts, olive oil)",
            "Focus on strength training to build muscle mass",
            "Monitor your health markers regularly",
        ],
        BodyFatCategory::Athletic => &[
            "Maintain your current fitness routine",
            "Ensure adequate protein intake (1.6-2.2g per kg of body weight)",
            "Include recovery days in your workout schedule",
            "Monitor body composition monthly",
        ],
        BodyFatCategory::Fitness => &[
            "Combine cardio and strength training 3-5 times weekly",
            "Reduce processed foods and added sugars",
            "Aim for 7-9 hours of quality sleep nightly",
            "Consider body recomposition (lose fat while gaining muscle)",
        ],
        BodyFatCategory::Average => &[
            "Start with 150 minutes of moderate exercise weekly",
            "Reduce calorie intake by 200-300 calories for fat loss",
            "Increase vegetable intake to 5+ servings daily",
            "Limit alcohol and sugary beverages",
        ],
        BodyFatCategory::Obese => &[
            "Consult a doctor before starting any exercise program",
            "Begin with low-impact activities (walking, swimming)",
            "Focus on sustainable dietary changes, not extreme diets",
            "Set small, achievable goals (5% body weight loss first)",
        ],
    })
}

pub fn body_shape_advice(shape: BodyShape) -> AdviceSet {
    let note = match shape {
        BodyShape::Apple => {
            "Apple shapes may have higher visceral fat risk - focus on core exercises and cardio"
        }
        BodyShape::Pear => {
            "Pear shapes store fat in lower body - combine strength training with fat-burning cardio"
        }
        BodyShape::Hourglass => {
            "Hourglass shapes should maintain balanced workouts to preserve proportions"
        }
    };

    let tips = AdviceSet::from_tips(match shape {
        BodyShape::Apple => &[
            "Focus on core exercises to reduce abdominal fat (try planks and Russian twists)",
            "Limit processed carbs and sugars to combat visceral fat",
            "Include 150+ minutes of cardio weekly (brisk walking, swimming)",
            "Monitor waist circumference monthly for health tracking",
        ],
        BodyShape::Pear => &[
            "Combine strength training (squats, lunges) with cardio for balanced results",
            "Increase protein intake to support lower body muscle development",
            "Try resistance band workouts to tone hips and thighs",
            "Focus on overall fat loss rather than spot reduction",
        ],
        BodyShape::Hourglass => &[
            "Maintain balanced workouts (equal focus on upper/lower body)",
            "Try Pilates or barre to enhance natural proportions",
            "Monitor weight changes as they affect proportions evenly",
            "Focus on maintaining healthy waist-to-hip ratio",
        ],
    });

    AdviceSet {
        note: Some(note.to_string()),
        ..tips
    }
}

pub fn diabetes_risk_advice(level: RiskLevel) -> AdviceSet {
    let mut tips: Vec<String> = DIABETES_PREVENTION_TIPS.iter().map(|t| t.to_string()).collect();

    let extra: &[&str] = match level {
        RiskLevel::Low => &[],
        RiskLevel::Moderate => &[
            "Get annual blood sugar checks",
            "Reduce stress through meditation or yoga",
        ],
        RiskLevel::High => &[
            "Consult a doctor for regular monitoring",
            "Consider meeting with a dietitian",
        ],
    };
    tips.extend(extra.iter().map(|t| t.to_string()));

    AdviceSet {
        tips,
        note: Some(DIABETES_RISK_NOTE.to_string()),
        warning_signs: DIABETES_WARNING_SIGNS.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn glucose_advice(risk: GlucoseRisk) -> AdviceSet {
    match risk {
        GlucoseRisk::Normal => AdviceSet::from_tips(&DIABETES_PREVENTION_TIPS),
        GlucoseRisk::HighRisk => AdviceSet {
            note: Some(
                "A glucose level above 140 mg/dL warrants a follow-up test with a doctor"
                    .to_string(),
            ),
            warning_signs: DIABETES_WARNING_SIGNS.iter().map(|s| s.to_string()).collect(),
            ..AdviceSet::from_tips(&[
                "Consult a doctor for regular monitoring",
                "Consider meeting with a dietitian",
                "Limit processed foods and sugary drinks",
            ])
        },
    }
}
