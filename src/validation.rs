//! Input validation for process descriptors.
//!
//! Checks process descriptors before they enter a process set. Detects:
//! - Empty IDs
//! - Negative arrival times
//! - Non-positive burst times
//! - Duplicate IDs
//! - Schedules whose horizon (latest arrival + total burst) overflows the clock
//!
//! Single-descriptor checks stop at the first problem; whole-set checks
//! report every problem found.

use std::collections::HashSet;
use std::iter;

use thiserror::Error;

use crate::models::ProcessSpec;

/// Validation result for a whole process set.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// ID of the offending descriptor (may be empty).
    pub process_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The process ID is empty.
    EmptyId,
    /// Arrival time is below zero.
    NegativeArrival,
    /// Burst time is zero or below.
    NonPositiveBurst,
    /// Two processes share the same ID.
    DuplicateId,
    /// The schedule horizon does not fit in the clock.
    TimeOverflow,
}

impl ValidationError {
    pub(crate) fn new(
        kind: ValidationErrorKind,
        process_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            process_id: process_id.into(),
            message: message.into(),
        }
    }
}

/// Validates a single descriptor in isolation.
pub fn validate_spec(spec: &ProcessSpec) -> Result<(), ValidationError> {
    field_errors(spec).into_iter().next().map_or(Ok(()), Err)
}

/// Validates a descriptor about to join `existing`.
///
/// Field checks run before the duplicate check.
pub fn validate_new_process(
    spec: &ProcessSpec,
    existing: &[ProcessSpec],
) -> Result<(), ValidationError> {
    validate_spec(spec)?;
    if existing.iter().any(|p| p.id == spec.id) {
        return Err(duplicate(&spec.id));
    }
    if horizon(existing.iter().chain(iter::once(spec))).is_none() {
        return Err(overflow(&spec.id));
    }
    Ok(())
}

/// Validates an entire process set.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_process_set(specs: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for spec in specs {
        errors.extend(field_errors(spec));
        if !spec.id.is_empty() && !seen.insert(spec.id.as_str()) {
            errors.push(duplicate(&spec.id));
        }
    }

    if errors.is_empty() && horizon(specs).is_none() {
        let last = specs.last().map_or("", |p| p.id.as_str());
        errors.push(overflow(last));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn field_errors(spec: &ProcessSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if spec.id.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyId,
            &spec.id,
            "Process ID must not be empty",
        ));
    }
    if spec.arrival_time < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            &spec.id,
            format!(
                "Process '{}' has negative arrival time {}",
                spec.id, spec.arrival_time
            ),
        ));
    }
    if spec.burst_time <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveBurst,
            &spec.id,
            format!(
                "Process '{}' has non-positive burst time {}",
                spec.id, spec.burst_time
            ),
        ));
    }
    if spec.arrival_time.checked_add(spec.burst_time).is_none() {
        errors.push(overflow(&spec.id));
    }

    errors
}

/// Latest arrival plus total burst: an upper bound on every clock value
/// any strategy reaches. `None` when it does not fit in an `i64`.
fn horizon<'a>(specs: impl IntoIterator<Item = &'a ProcessSpec>) -> Option<i64> {
    let mut latest_arrival = 0_i64;
    let mut total_burst = 0_i64;
    for spec in specs {
        latest_arrival = latest_arrival.max(spec.arrival_time);
        total_burst = total_burst.checked_add(spec.burst_time.max(0))?;
    }
    latest_arrival.checked_add(total_burst)
}

fn overflow(id: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::TimeOverflow,
        id,
        format!("Process '{id}' pushes the schedule past the maximum representable time"),
    )
}

fn duplicate(id: &str) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::DuplicateId,
        id,
        format!("Duplicate process ID: {id}"),
    )
}
