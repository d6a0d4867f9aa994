use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reminders::{classify, ReminderStatus};

/// A vaccination/checkup reminder for one child.
///
/// Invariant: `completed_at` is set if and only if `completed` is true
/// (also enforced by a CHECK constraint in the schema). Status is always
/// derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct HealthReminder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub child_name: String,
    pub child_dob: NaiveDate,
    pub reminder_type: String,
    pub reminder_title: String,
    pub reminder_description: Option<String>,
    pub due_date: NaiveDate,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl HealthReminder {
    /// Derived display status for a given day.
    pub fn status(&self, today: NaiveDate) -> ReminderStatus {
        classify(self.completed, self.due_date, today)
    }
}
