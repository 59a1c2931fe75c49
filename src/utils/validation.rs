use crate::utils::error::{RegistryError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(value: &str, message: &str) -> Result<()> {
    if value.is_empty() {
        return Err(RegistryError::validation(message));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + Copy>(value: T, min: T, max: T, message: &str) -> Result<()> {
    if value < min || value > max {
        return Err(RegistryError::validation(message));
    }
    Ok(())
}

pub fn validate_finite_non_negative(value: f64, message: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(RegistryError::validation(message));
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(RegistryError::ConfigError {
            message: format!(
                "{} has unsupported value '{}'. Allowed values: {}",
                field_name,
                value,
                allowed.join(", ")
            ),
        });
    }
    Ok(())
}
