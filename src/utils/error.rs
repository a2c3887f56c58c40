use thiserror::Error;

#[derive(Error, Debug)]
pub enum HumanizeError {
    #[error("Invalid input '{value}': {reason}")]
    InvalidInput { value: String, reason: String },

    #[error("Invalid format specification '{spec}': {reason}")]
    InvalidFormat { spec: String, reason: String },

    #[error("Minimum unit '{unit}' not supported")]
    UnsupportedUnit { unit: String },

    #[error("Minimum unit '{unit}' is suppressed and no suitable replacement was found")]
    SuppressedMinimumUnit { unit: String },

    #[error("No translation catalog found for locale '{locale}'")]
    LocaleNotFound { locale: String },

    #[error("Catalog parsing error for '{locale}': {message}")]
    CatalogParse { locale: String, message: String },

    #[error("Validation error in field '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl HumanizeError {
    pub fn invalid_input(value: impl ToString, reason: impl Into<String>) -> Self {
        HumanizeError::InvalidInput {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HumanizeError>;
