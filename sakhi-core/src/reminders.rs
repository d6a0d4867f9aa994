//! Reminder classification.
//!
//! Status is derived at read time from the completion flag and the due
//! date; it is never stored. Comparison is date-only: both sides are
//! normalized to day granularity before classification so a reminder due
//! "today" cannot flip state with the server timezone.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SakhiError;

/// Display grouping for a reminder. Exactly one of these holds for any
/// (completed, due_date, today) triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Overdue,
    Upcoming,
    Completed,
}

/// Classify a reminder. A completed reminder is Completed regardless of
/// date; otherwise a due date strictly before today is Overdue and
/// anything due today or later is Upcoming.
pub fn classify(completed: bool, due_date: NaiveDate, today: NaiveDate) -> ReminderStatus {
    if completed {
        return ReminderStatus::Completed;
    }
    if due_date < today {
        ReminderStatus::Overdue
    } else {
        ReminderStatus::Upcoming
    }
}

/// Parse a `YYYY-MM-DD` date received at the API boundary. Malformed
/// input fails with `InvalidDate`, never silently defaults.
pub fn parse_date(input: &str) -> Result<NaiveDate, SakhiError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| SakhiError::InvalidDate(input.to_string()))
}
