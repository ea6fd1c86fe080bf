//! Input validation for strict mode.
//!
//! The registry accepts anything the GraphQL type system lets through unless
//! `validation.strict` is enabled, in which case these checks run before a
//! mutation touches the store.

use crate::error::{RegistryError, Result};
use crate::model::{CarPatch, NewCar, PersonPatch};

/// Maximum allowed length for a name or make/model.
pub const MAX_NAME_LENGTH: usize = 100;

/// Oldest model year accepted.
pub const MIN_YEAR: i32 = 1886;

/// Latest model year accepted.
pub const MAX_YEAR: i32 = 2100;

fn validate_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RegistryError::Validation(format!("{} cannot be empty", field)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(RegistryError::Validation(format!(
            "{} exceeds maximum length of {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

/// Validates a person's first and last name.
pub fn validate_person(first_name: &str, last_name: &str) -> Result<()> {
    validate_text("First name", first_name)?;
    validate_text("Last name", last_name)
}

/// Validates the names a person patch actually changes.
pub fn validate_person_patch(patch: &PersonPatch) -> Result<()> {
    for (field, value) in [
        ("First name", &patch.first_name),
        ("Last name", &patch.last_name),
    ] {
        if let Some(v) = value.as_deref().filter(|s| !s.is_empty()) {
            validate_text(field, v)?;
        }
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(RegistryError::Validation(format!(
            "Year must be between {} and {}",
            MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(RegistryError::Validation(
            "Price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// Validates every field of a car being added.
pub fn validate_new_car(car: &NewCar) -> Result<()> {
    validate_year(car.year)?;
    validate_text("Make", &car.make)?;
    validate_text("Model", &car.model)?;
    validate_price(car.price)
}

/// Validates the fields a car patch actually changes.
pub fn validate_car_patch(patch: &CarPatch) -> Result<()> {
    if let Some(year) = patch.year {
        validate_year(year)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    for (field, value) in [("Make", &patch.make), ("Model", &patch.model)] {
        if let Some(v) = value.as_deref().filter(|s| !s.is_empty()) {
            validate_text(field, v)?;
        }
    }
    Ok(())
}
