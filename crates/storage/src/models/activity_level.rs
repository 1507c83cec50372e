use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;

/// Weekly exercise habit used by the diabetes risk rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Regular exercise 3+ times/week
    Active,
    /// Daily vigorous exercise
    VeryActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Active => "active",
            Self::VeryActive => "veryActive",
        }
    }

    pub fn parse_field(field: &str, value: &str) -> Result<Self, ValidationError> {
        value.parse().map_err(|_| ValidationError::UnknownOption {
            field: field.to_string(),
            value: value.to_string(),
            expected: "sedentary, active, veryActive",
        })
    }
}

impl FromStr for ActivityLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-', ' '], "").as_str() {
            "sedentary" => Ok(Self::Sedentary),
            "active" => Ok(Self::Active),
            "veryactive" => Ok(Self::VeryActive),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wire_names() {
        assert_eq!("sedentary".parse::<ActivityLevel>(), Ok(ActivityLevel::Sedentary));
        assert_eq!("active".parse::<ActivityLevel>(), Ok(ActivityLevel::Active));
        assert_eq!("veryActive".parse::<ActivityLevel>(), Ok(ActivityLevel::VeryActive));
        assert_eq!("very_active".parse::<ActivityLevel>(), Ok(ActivityLevel::VeryActive));
    }

    #[test]
    fn test_serde_uses_camel_case() {
        let json = serde_json::to_string(&ActivityLevel::VeryActive).unwrap();
        assert_eq!(json, "\"veryActive\"");
    }
}
