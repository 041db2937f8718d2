use serde_json::Value;
use thiserror::Error;

use crate::schedule::{DateSpec, DayOfWeek};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScheduleValidationError {
    message: String,
}

impl ScheduleValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Checks a raw restricted-times document before it is deserialized.
///
/// Stops at the first violation. `dates` and `holidays` are optional; when
/// present they get the same interval checks as `weekly`.
pub fn validate_schedule(document: &Value) -> Result<(), ScheduleValidationError> {
    let root = document.as_object().ok_or_else(|| {
        ScheduleValidationError::new(format!(
            "restricted times must be a JSON object (got {document})"
        ))
    })?;

    let weekly = root.get("weekly").ok_or_else(|| {
        ScheduleValidationError::new("Missing 'weekly' key in restricted times.")
    })?;
    let weekly = weekly.as_array().ok_or_else(|| {
        ScheduleValidationError::new(format!(
            "Invalid value for 'weekly' in restricted times. It should be a list of rules (got {weekly})."
        ))
    })?;
    for rule in weekly {
        validate_weekly_rule(rule)?;
    }

    if let Some(dates) = root.get("dates").filter(|v| !v.is_null()) {
        let dates = dates.as_array().ok_or_else(|| {
            ScheduleValidationError::new(format!(
                "Invalid value for 'dates' in restricted times. It should be a list of rules (got {dates})."
            ))
        })?;
        for rule in dates {
            validate_dated_rule(rule)?;
        }
    }

    if let Some(holidays) = root.get("holidays").filter(|v| !v.is_null()) {
        validate_holiday_rule(holidays)?;
    }

    Ok(())
}

fn validate_weekly_rule(rule: &Value) -> Result<(), ScheduleValidationError> {
    let days = rule.get("days").and_then(Value::as_array).ok_or_else(|| {
        ScheduleValidationError::new(format!(
            "Weekly rule {rule} in restricted times needs a 'days' list."
        ))
    })?;
    if days.is_empty() {
        return Err(ScheduleValidationError::new(
            "Weekly rule in restricted times has an empty 'days' list.",
        ));
    }
    let canonical = days
        .iter()
        .all(|day| day.as_str().and_then(DayOfWeek::from_token).is_some());
    if !canonical {
        return Err(ScheduleValidationError::new(
            "Invalid day keys in restricted times. Use 'mon', 'tue', 'wed', 'thu', 'fri', 'sat', 'sun'.",
        ));
    }

    let label = Value::Array(days.clone()).to_string();
    validate_intervals(rule.get("intervals"), &label)
}

fn validate_dated_rule(rule: &Value) -> Result<(), ScheduleValidationError> {
    let date = rule.get("date").and_then(Value::as_str).ok_or_else(|| {
        ScheduleValidationError::new(format!(
            "Dated rule {rule} in restricted times needs a 'date' string."
        ))
    })?;
    date.parse::<DateSpec>().map_err(|err| {
        ScheduleValidationError::new(format!("Invalid date in restricted times: {err}."))
    })?;
    validate_intervals(rule.get("intervals"), date)
}

fn validate_holiday_rule(rule: &Value) -> Result<(), ScheduleValidationError> {
    let country = rule.get("country").and_then(Value::as_str).ok_or_else(|| {
        ScheduleValidationError::new(format!(
            "Holiday rule {rule} in restricted times needs a 'country' code."
        ))
    })?;
    if let Some(state) = rule.get("state").filter(|v| !v.is_null()) {
        if !state.is_string() {
            return Err(ScheduleValidationError::new(format!(
                "Invalid 'state' {state} for holidays in restricted times. It should be a subdivision code."
            )));
        }
    }
    match rule.get("intervals") {
        Some(intervals) => validate_intervals(Some(intervals), country),
        None => Ok(()),
    }
}

fn validate_intervals(intervals: Option<&Value>, label: &str) -> Result<(), ScheduleValidationError> {
    let intervals = intervals.and_then(Value::as_array).ok_or_else(|| {
        ScheduleValidationError::new(format!(
            "Invalid value for '{label}' in restricted times. It should be a list of intervals."
        ))
    })?;

    for interval in intervals {
        let (start, end) = match interval.as_array().map(Vec::as_slice) {
            Some([start, end]) => match (start.as_f64(), end.as_f64()) {
                (Some(start), Some(end)) => (start, end),
                _ => return Err(malformed_interval(interval, label)),
            },
            _ => return Err(malformed_interval(interval, label)),
        };
        if end <= start {
            return Err(ScheduleValidationError::new(format!(
                "Invalid interval '{interval}' for '{label}' in restricted times. The second number should be greater than the first."
            )));
        }
    }
    Ok(())
}

fn malformed_interval(interval: &Value, label: &str) -> ScheduleValidationError {
    ScheduleValidationError::new(format!(
        "Invalid interval '{interval}' for '{label}' in restricted times. It should be a pair of two numbers."
    ))
}
