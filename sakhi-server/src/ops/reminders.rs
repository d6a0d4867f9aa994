//! Reminder persistence and read-time grouping.

use chrono::NaiveDate;
use sakhi_core::models::HealthReminder;
use sakhi_core::reminders::ReminderStatus;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

/// Reminders grouped for display. Grouping is recomputed on every read
/// from `completed` and `due_date`; no status column exists.
#[derive(Debug, Default, Serialize)]
pub struct GroupedReminders {
    pub overdue: Vec<HealthReminder>,
    pub upcoming: Vec<HealthReminder>,
    pub completed: Vec<HealthReminder>,
}

/// Fields accepted when creating a reminder. Dates are already validated
/// at the API boundary.
#[derive(Debug)]
pub struct NewReminder {
    pub user_id: Uuid,
    pub child_name: String,
    pub child_dob: NaiveDate,
    pub reminder_type: String,
    pub reminder_title: String,
    pub reminder_description: Option<String>,
    pub due_date: NaiveDate,
}

pub async fn fetch_reminders(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<HealthReminder>, sqlx::Error> {
    sqlx::query_as::<_, HealthReminder>(
        "SELECT * FROM health_reminders WHERE user_id = $1 ORDER BY due_date ASC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub fn group_by_status(reminders: Vec<HealthReminder>, today: NaiveDate) -> GroupedReminders {
    let mut grouped = GroupedReminders::default();
    for reminder in reminders {
        match reminder.status(today) {
            ReminderStatus::Overdue => grouped.overdue.push(reminder),
            ReminderStatus::Upcoming => grouped.upcoming.push(reminder),
            ReminderStatus::Completed => grouped.completed.push(reminder),
        }
    }
    grouped
}

pub async fn insert_reminder(
    pool: &PgPool,
    new: &NewReminder,
) -> Result<HealthReminder, sqlx::Error> {
    sqlx::query_as::<_, HealthReminder>(
        "INSERT INTO health_reminders \
         (user_id, child_name, child_dob, reminder_type, reminder_title, reminder_description, due_date) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING *",
    )
    .bind(new.user_id)
    .bind(&new.child_name)
    .bind(new.child_dob)
    .bind(&new.reminder_type)
    .bind(&new.reminder_title)
    .bind(&new.reminder_description)
    .bind(new.due_date)
    .fetch_one(pool)
    .await
}

/// Mark a reminder completed, stamping `completed_at` in the same write
/// so the completed/completed_at invariant holds. Returns None when the
/// reminder does not exist or belongs to another user.
pub async fn complete_reminder(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<HealthReminder>, sqlx::Error> {
    sqlx::query_as::<_, HealthReminder>(
        "UPDATE health_reminders SET completed = TRUE, completed_at = now() \
         WHERE id = $1 AND user_id = $2 \
         RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reminder(due: NaiveDate, completed: bool) -> HealthReminder {
        HealthReminder {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            child_name: "Aarav".to_string(),
            child_dob: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            reminder_type: "vaccination".to_string(),
            reminder_title: "MMR dose 1".to_string(),
            reminder_description: None,
            due_date: due,
            completed,
            completed_at: completed.then(Utc::now),
        }
    }

    #[test]
    fn test_group_by_status_partitions_every_reminder() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let reminders = vec![
            reminder(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(), false),
            reminder(NaiveDate::from_ymd_opt(2026, 8, 4).unwrap(), false),
            reminder(NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(), false),
            reminder(NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(), true),
        ];

        let grouped = group_by_status(reminders, today);
        assert_eq!(grouped.overdue.len(), 1);
        assert_eq!(grouped.upcoming.len(), 2);
        assert_eq!(grouped.completed.len(), 1);
    }

    #[test]
    fn test_grouping_preserves_due_date_order_within_groups() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let reminders = vec![
            reminder(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap(), false),
            reminder(NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(), false),
        ];
        let grouped = group_by_status(reminders, today);
        assert!(grouped.upcoming[0].due_date < grouped.upcoming[1].due_date);
    }
}
