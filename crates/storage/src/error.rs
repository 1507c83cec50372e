use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Rejected calculator input. Every variant names the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: String },

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: String, value: String },

    #[error("{field}: {message}")]
    OutOfRange { field: String, message: String },

    #[error("{field} must be one of {expected}, got {value:?}")]
    UnknownOption {
        field: String,
        value: String,
        expected: &'static str,
    },
}

impl ValidationError {
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::NotANumber { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::UnknownOption { field, .. } => field,
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::Missing {
            field: field.to_string(),
        }
    }
}

impl From<ValidationErrors> for ValidationError {
    /// Keeps the first failing field in alphabetical order so the reported
    /// field does not depend on hash map iteration.
    fn from(errors: ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        match fields.first() {
            Some((field, errs)) => Self::OutOfRange {
                field: field.to_string(),
                message: errs
                    .first()
                    .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "value is out of range".to_string()),
            },
            None => Self::OutOfRange {
                field: "input".to_string(),
                message: "invalid input".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(range(exclusive_min = 0.0, message = "height must be positive"))]
        height_cm: f64,
        #[validate(range(exclusive_min = 0.0, message = "weight must be positive"))]
        weight_kg: f64,
    }

    #[test]
    fn test_first_field_is_reported_alphabetically() {
        let errors = Sample {
            height_cm: -1.0,
            weight_kg: 0.0,
        }
        .validate()
        .unwrap_err();

        let error = ValidationError::from(errors);
        assert_eq!(error.field(), "height_cm");
        assert_eq!(error.to_string(), "height_cm: height must be positive");
    }

    #[test]
    fn test_missing_names_field() {
        let error = ValidationError::missing("hip_cm");
        assert_eq!(error.field(), "hip_cm");
        assert_eq!(error.to_string(), "hip_cm is required");
    }
}
