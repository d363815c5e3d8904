//! Format predicates and request validation.

use crate::error::AppError;
use crate::model::StudentInput;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static REGISTRATION_NO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^REG-\d{4}-\d{4}$").expect("registration number pattern"));

static CONTACT_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("contact number pattern"));

/// True iff `s` matches `REG-` + 4 digits + `-` + 4 digits.
pub fn is_valid_registration_no(s: &str) -> bool {
    REGISTRATION_NO.is_match(s)
}

/// True iff `s` is exactly 10 decimal digits.
pub fn is_valid_contact_number(s: &str) -> bool {
    CONTACT_NUMBER.is_match(s)
}

/// JavaScript truthiness over a JSON value. Required-field checks and
/// the update merge both gate on it, so it is part of the observable
/// contract.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a roll number supplied as a JSON number or a numeric string.
pub fn coerce_roll_no(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// A supplied-but-empty string counts as absent throughout.
pub fn non_empty(v: Option<&String>) -> Option<&String> {
    v.filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// POST: all fields required.
    Create,
    /// PUT: every field optional.
    Update,
}

/// Collect every violation in order; the caller rejects with all of
/// them at once. An empty result means the request may proceed.
///
/// Known quirk: a roll number of `0` is falsy,
/// so it fails the required check on create but silently skips the
/// positive-integer check on update. The string `"0"` is truthy and is
/// rejected as non-positive.
pub fn validate_student_data(input: &StudentInput, mode: ValidationMode) -> Vec<String> {
    let mut errors = Vec::new();

    if mode == ValidationMode::Create {
        if non_empty(input.registration_no.as_ref()).is_none() {
            errors.push("Registration number is required".to_string());
        }
        if non_empty(input.name.as_ref()).is_none() {
            errors.push("Name is required".to_string());
        }
        if non_empty(input.class_name.as_ref()).is_none() {
            errors.push("Class is required".to_string());
        }
        if !input.roll_no.as_ref().map(truthy).unwrap_or(false) {
            errors.push("Roll number is required".to_string());
        }
        if non_empty(input.contact_number.as_ref()).is_none() {
            errors.push("Contact number is required".to_string());
        }
    }

    if let Some(reg_no) = non_empty(input.registration_no.as_ref()) {
        if !is_valid_registration_no(reg_no) {
            errors.push("Invalid registration number format. Expected: REG-YYYY-XXXX".to_string());
        }
    }

    if let Some(roll) = &input.roll_no {
        if truthy(roll) {
            match coerce_roll_no(roll) {
                Some(n) if n > 0 => {}
                _ => errors.push("Roll number must be a positive integer".to_string()),
            }
        }
    }

    if let Some(contact) = non_empty(input.contact_number.as_ref()) {
        if !is_valid_contact_number(contact) {
            errors.push("Contact number must be a 10-digit number".to_string());
        }
    }

    errors
}

/// Validate a registration number arriving as a path segment.
pub fn validate_reg_no_param(reg_no: &str) -> Result<(), AppError> {
    if reg_no.is_empty() {
        return Err(AppError::Validation(vec![
            "Registration number is required".to_string(),
        ]));
    }
    if !is_valid_registration_no(reg_no) {
        return Err(AppError::Validation(vec![
            "Invalid registration number format. Expected: REG-YYYY-XXXX".to_string(),
        ]));
    }
    Ok(())
}
