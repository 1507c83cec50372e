use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;

/// Biological sex used to pick formula constants and classification tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parses a request field, reporting `field` on failure.
    pub fn parse_field(field: &str, value: &str) -> Result<Self, ValidationError> {
        value.parse().map_err(|_| ValidationError::UnknownOption {
            field: field.to_string(),
            value: value.to_string(),
            expected: "male, female",
        })
    }
}

impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MALE" => Ok(Self::Male),
            "F" | "FEMALE" => Ok(Self::Female),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_short_and_long_forms() {
        assert_eq!("male".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!("M".parse::<Gender>(), Ok(Gender::Male));
        assert_eq!(" Female ".parse::<Gender>(), Ok(Gender::Female));
        assert_eq!("f".parse::<Gender>(), Ok(Gender::Female));
    }

    #[test]
    fn test_parse_field_rejects_unknown() {
        let err = Gender::parse_field("gender", "other").unwrap_err();
        assert_eq!(err.field(), "gender");
    }
}
