use crate::utils::error::{HumanizeError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(HumanizeError::InvalidInput {
            value: value.to_string(),
            reason: format!("{} must be a finite number", field_name),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(HumanizeError::ValidationError {
            field: field_name.to_string(),
            reason: "Value cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_form_count(field_name: &str, forms: &[String], expected: usize) -> Result<()> {
    if forms.len() != expected {
        return Err(HumanizeError::ValidationError {
            field: field_name.to_string(),
            reason: format!(
                "Expected {} plural form(s), found {}",
                expected,
                forms.len()
            ),
        });
    }
    Ok(())
}

pub fn validate_distinct<'a>(field_name: &str, values: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(HumanizeError::ValidationError {
                field: field_name.to_string(),
                reason: format!("'{}' is used more than once", value),
            });
        }
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(HumanizeError::ValidationError {
            field: field_name.to_string(),
            reason: format!("Value {} must be between {} and {}", value, min, max),
        });
    }
    Ok(())
}
