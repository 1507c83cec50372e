//! Threshold tables mapping a rounded metric to its category.
//!
//! Each table is ordered and first-match-wins, so every value lands in
//! exactly one bucket.

use rust_decimal::Decimal;

use crate::models::{BmiCategory, BodyFatCategory, BodyShape, Gender, GlucoseRisk, RiskLevel};

/// Upper bounds of the BMI buckets. A value between 24.9 and 25 (or 29.9
/// and 30) stays in the lower bucket.
const BMI_UNDERWEIGHT_BELOW: Decimal = Decimal::from_parts(185, 0, 0, false, 1);
const BMI_NORMAL_BELOW: Decimal = Decimal::from_parts(25, 0, 0, false, 0);
const BMI_OVERWEIGHT_BELOW: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

const WHR_PEAR_BELOW: Decimal = Decimal::from_parts(75, 0, 0, false, 2);
const WHR_HOURGLASS_UP_TO: Decimal = Decimal::from_parts(85, 0, 0, false, 2);

const GLUCOSE_HIGH_RISK_ABOVE: Decimal = Decimal::from_parts(140, 0, 0, false, 0);

/// Body fat limits for one gender: essential fat below the first value,
/// then athletic, fitness and average up to and including the rest.
struct BodyFatLimits {
    essential_below: i64,
    athletic_up_to: i64,
    fitness_up_to: i64,
    average_up_to: i64,
}

const MALE_BODY_FAT: BodyFatLimits = BodyFatLimits {
    essential_below: 6,
    athletic_up_to: 13,
    fitness_up_to: 17,
    average_up_to: 24,
};

const FEMALE_BODY_FAT: BodyFatLimits = BodyFatLimits {
    essential_below: 14,
    athletic_up_to: 20,
    fitness_up_to: 24,
    average_up_to: 31,
};

pub fn classify_bmi(bmi: Decimal) -> BmiCategory {
    if bmi < BMI_UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < BMI_NORMAL_BELOW {
        BmiCategory::Normal
    } else if bmi < BMI_OVERWEIGHT_BELOW {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

pub fn classify_body_fat(body_fat_percent: Decimal, gender: Gender) -> BodyFatCategory {
    let limits = match gender {
        Gender::Male => &MALE_BODY_FAT,
        Gender::Female => &FEMALE_BODY_FAT,
    };

    if body_fat_percent < Decimal::from(limits.essential_below) {
        BodyFatCategory::EssentialFat
    } else if body_fat_percent <= Decimal::from(limits.athletic_up_to) {
        BodyFatCategory::Athletic
    } else if body_fat_percent <= Decimal::from(limits.fitness_up_to) {
        BodyFatCategory::Fitness
    } else if body_fat_percent <= Decimal::from(limits.average_up_to) {
        BodyFatCategory::Average
    } else {
        BodyFatCategory::Obese
    }
}

pub fn classify_waist_hip_ratio(ratio: Decimal) -> BodyShape {
    if ratio < WHR_PEAR_BELOW {
        BodyShape::Pear
    } else if ratio <= WHR_HOURGLASS_UP_TO {
        BodyShape::Hourglass
    } else {
        BodyShape::Apple
    }
}

pub fn classify_risk_score(score: u8) -> RiskLevel {
    if score >= 7 {
        RiskLevel::High
    } else if score >= 4 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn classify_glucose(glucose_mg_dl: Decimal) -> GlucoseRisk {
    if glucose_mg_dl > GLUCOSE_HIGH_RISK_ABOVE {
        GlucoseRisk::HighRisk
    } else {
        GlucoseRisk::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_bmi_boundaries() {
        assert_eq!(classify_bmi(dec("18.49")), BmiCategory::Underweight);
        assert_eq!(classify_bmi(dec("18.5")), BmiCategory::Normal);
        assert_eq!(classify_bmi(dec("24.9")), BmiCategory::Normal);
        assert_eq!(classify_bmi(dec("24.95")), BmiCategory::Normal);
        assert_eq!(classify_bmi(dec("25.0")), BmiCategory::Overweight);
        assert_eq!(classify_bmi(dec("29.9")), BmiCategory::Overweight);
        assert_eq!(classify_bmi(dec("30")), BmiCategory::Obese);
        assert_eq!(classify_bmi(dec("22.86")), BmiCategory::Normal);
    }

    #[test]
    fn test_body_fat_male_boundaries() {
        let g = Gender::Male;
        assert_eq!(classify_body_fat(dec("5.9"), g), BodyFatCategory::EssentialFat);
        assert_eq!(classify_body_fat(dec("6.0"), g), BodyFatCategory::Athletic);
        assert_eq!(classify_body_fat(dec("13.0"), g), BodyFatCategory::Athletic);
        assert_eq!(classify_body_fat(dec("13.1"), g), BodyFatCategory::Fitness);
        assert_eq!(classify_body_fat(dec("17.0"), g), BodyFatCategory::Fitness);
        assert_eq!(classify_body_fat(dec("24.0"), g), BodyFatCategory::Average);
        assert_eq!(classify_body_fat(dec("24.1"), g), BodyFatCategory::Obese);
        assert_eq!(classify_body_fat(dec("0.0"), g), BodyFatCategory::EssentialFat);
    }

    #[test]
    fn test_body_fat_female_boundaries() {
        let g = Gender::Female;
        assert_eq!(classify_body_fat(dec("13.9"), g), BodyFatCategory::EssentialFat);
        assert_eq!(classify_body_fat(dec("14.0"), g), BodyFatCategory::Athletic);
        assert_eq!(classify_body_fat(dec("20.0"), g), BodyFatCategory::Athletic);
        assert_eq!(classify_body_fat(dec("24.0"), g), BodyFatCategory::Fitness);
        assert_eq!(classify_body_fat(dec("31.0"), g), BodyFatCategory::Average);
        assert_eq!(classify_body_fat(dec("31.1"), g), BodyFatCategory::Obese);
    }

    #[test]
    fn test_waist_hip_ratio_boundaries() {
        assert_eq!(classify_waist_hip_ratio(dec("0.74")), BodyShape::Pear);
        assert_eq!(classify_waist_hip_ratio(dec("0.75")), BodyShape::Hourglass);
        assert_eq!(classify_waist_hip_ratio(dec("0.80")), BodyShape::Hourglass);
        assert_eq!(classify_waist_hip_ratio(dec("0.85")), BodyShape::Hourglass);
        assert_eq!(classify_waist_hip_ratio(dec("0.86")), BodyShape::Apple);
        assert_eq!(classify_waist_hip_ratio(dec("0.90")), BodyShape::Apple);
    }

    #[test]
    fn test_risk_score_levels() {
        assert_eq!(classify_risk_score(0), RiskLevel::Low);
        assert_eq!(classify_risk_score(3), RiskLevel::Low);
        assert_eq!(classify_risk_score(4), RiskLevel::Moderate);
        assert_eq!(classify_risk_score(6), RiskLevel::Moderate);
        assert_eq!(classify_risk_score(7), RiskLevel::High);
        assert_eq!(classify_risk_score(9), RiskLevel::High);
    }

    #[test]
    fn test_glucose_threshold_is_exclusive() {
        assert_eq!(classify_glucose(dec("140")), GlucoseRisk::Normal);
        assert_eq!(classify_glucose(dec("140.1")), GlucoseRisk::HighRisk);
    }

    proptest! {
        #[test]
        fn test_bmi_table_is_monotonic(a in 0u32..8000, b in 0u32..8000) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let lo = classify_bmi(Decimal::new(lo as i64, 2));
            let hi = classify_bmi(Decimal::new(hi as i64, 2));
            let rank = |c: BmiCategory| BmiCategory::ALL.iter().position(|x| *x == c);
            prop_assert!(rank(lo) <= rank(hi));
        }
    }
}
