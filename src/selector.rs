use crate::models::{ActionKind, ActivityLog, Reminder};
use chrono::{DateTime, NaiveDate, TimeZone};

/// Result of one selection pass over a storage snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub upcoming: Vec<Reminder>,
    pub completed_today: usize,
}

/// Picks the active reminders due at or after `now`, earliest first, and
/// counts the completions logged on `now`'s calendar day.
///
/// Scheduled date/time pairs are wall-clock values, so they are compared with
/// `now` in its own timezone. Equal instants keep their input order.
pub fn select<Tz: TimeZone>(
    reminders: &[Reminder],
    logs: &[ActivityLog],
    now: &DateTime<Tz>,
) -> Selection {
    let local_now = now.naive_local();

    let mut upcoming: Vec<Reminder> = reminders
        .iter()
        .filter(|reminder| reminder.is_active && reminder.scheduled_at() >= local_now)
        .cloned()
        .collect();
    upcoming.sort_by_key(Reminder::scheduled_at);

    let completed_today = count_completed_on(logs, &now.timezone(), now.date_naive());

    Selection {
        upcoming,
        completed_today,
    }
}

/// Number of `completed` logs whose timestamp falls on `day` in `tz`.
pub fn count_completed_on<Tz: TimeZone>(logs: &[ActivityLog], tz: &Tz, day: NaiveDate) -> usize {
    logs.iter()
        .filter(|log| log.action == ActionKind::Completed)
        .filter(|log| log.timestamp.with_timezone(tz).date_naive() == day)
        .count()
}
