//! Request field validators.
//!
//! Validators never panic on bad input. They return `Ok` with the typed value
//! or a [`ServiceError::ValidationError`] carrying the message sent back to
//! the client.

use serde_json::Value;

use crate::controllayer::helper::forbidden::ForbiddenSet;
use crate::datalayer::CRUD::types::IdSelector;
use crate::errors::errors::{ServiceError, ServiceResult};

fn invalid(message: String) -> ServiceError {
    ServiceError::ValidationError(message)
}

/// Render a raw value the way it should appear inside a message
fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn as_id(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(n) => i32::try_from(n).ok(),
            // Integral floats such as `3.0` or `1e2`
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .filter(|f| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(f))
                .map(|f| f as i32),
        },
        Value::String(s) => s.parse::<i32>().ok(),
        _ => None,
    }
}

/// Check that `value` is present, is an integer and is not forbidden.
pub fn check_number(
    value: Option<&Value>,
    label: &str,
    forbidden: Option<&ForbiddenSet>,
) -> ServiceResult<i32> {
    let value = match value {
        None | Some(Value::Null) => return Err(invalid(format!("{} is required !", label))),
        Some(value) => value,
    };

    let id = as_id(value)
        .ok_or_else(|| invalid(format!("{} {} is not a valid number !", label, describe(value))))?;

    if forbidden.is_some_and(|set| set.contains(id)) {
        return Err(invalid(format!("{} {} is forbidden !", label, id)));
    }

    Ok(id)
}

/// Apply [`check_number`] to every element, stopping at the first failure.
pub fn check_list_number(
    values: &[Value],
    label: &str,
    forbidden: Option<&ForbiddenSet>,
) -> ServiceResult<Vec<i32>> {
    if values.is_empty() {
        return Err(invalid(format!("{} list is empty !", label)));
    }

    values
        .iter()
        .map(|value| match value {
            // null inside a list is an invalid element, not a missing field
            Value::Null => Err(invalid(format!("{} null is not a valid number !", label))),
            value => check_number(Some(value), label, forbidden),
        })
        .collect()
}

/// Check that `value` is a string with at least one non-whitespace character.
pub fn check_empty(value: Option<&Value>, label: &str) -> ServiceResult<String> {
    match value {
        None | Some(Value::Null) => Err(invalid(format!("{} is empty !", label))),
        Some(Value::String(s)) if s.trim().is_empty() => {
            Err(invalid(format!("{} is empty !", label)))
        }
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(invalid(format!("{} must be a string !", label))),
    }
}

/// Resolve a delete target: a scalar id or a list of ids.
pub fn check_id_selector(
    value: Option<&Value>,
    label: &str,
    forbidden: Option<&ForbiddenSet>,
) -> ServiceResult<IdSelector> {
    match value {
        Some(Value::Array(values)) => {
            check_list_number(values, label, forbidden).map(IdSelector::Many)
        }
        value => check_number(value, label, forbidden).map(IdSelector::Single),
    }
}
