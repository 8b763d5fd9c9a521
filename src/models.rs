use crate::errors::AppError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

pub type ReminderId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub scheduled_date: NaiveDate,
    #[serde(with = "clock_time")]
    pub scheduled_time: NaiveTime,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Wall-clock instant the reminder is due, in the user's local calendar.
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.scheduled_date.and_time(self.scheduled_time)
    }

    pub fn reschedule(&mut self, at: NaiveDateTime) {
        self.scheduled_date = at.date();
        self.scheduled_time = at.time();
    }

    /// Pushes the reminder `minutes` past its slot, or past `now` when it is
    /// already overdue.
    pub fn snooze(&mut self, now: NaiveDateTime, minutes: i64) -> Result<(), AppError> {
        let base = self.scheduled_at().max(now);
        let at = base
            .checked_add_signed(TimeDelta::minutes(minutes))
            .ok_or_else(|| AppError::bad_request("snoozed time is out of range"))?;
        self.reschedule(at);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Created,
    Completed,
    Snoozed,
    Deleted,
}

impl ActionKind {
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Created,
        ActionKind::Completed,
        ActionKind::Snoozed,
        ActionKind::Deleted,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: u64,
    pub reminder_id: ReminderId,
    pub action: ActionKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub next_id: u64,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub activity_logs: Vec<ActivityLog>,
}

#[derive(Debug, Deserialize)]
pub struct NewReminderRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scheduled_date: String,
    pub scheduled_time: String,
}

impl NewReminderRequest {
    pub fn validate(self, id: ReminderId, created_at: DateTime<Utc>) -> Result<Reminder, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::bad_request("title must not be empty"));
        }

        let scheduled_date = NaiveDate::parse_from_str(self.scheduled_date.trim(), "%Y-%m-%d")
            .map_err(|_| AppError::bad_request("scheduled_date must be YYYY-MM-DD"))?;
        let scheduled_time = clock_time::parse(self.scheduled_time.trim())
            .ok_or_else(|| AppError::bad_request("scheduled_time must be HH:MM"))?;

        let description = self
            .description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());

        Ok(Reminder {
            id,
            title: title.to_string(),
            description,
            is_active: true,
            scheduled_date,
            scheduled_time,
            created_at,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SnoozeRequest {
    #[serde(default)]
    pub minutes: Option<i64>,
}

impl SnoozeRequest {
    pub const DEFAULT_MINUTES: i64 = 10;
    pub const MAX_MINUTES: i64 = 24 * 60;

    pub fn minutes(&self) -> Result<i64, AppError> {
        let minutes = self.minutes.unwrap_or(Self::DEFAULT_MINUTES);
        if !(1..=Self::MAX_MINUTES).contains(&minutes) {
            return Err(AppError::bad_request(format!(
                "minutes must be between 1 and {}",
                Self::MAX_MINUTES
            )));
        }
        Ok(minutes)
    }
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub date: String,
    pub completed_today: usize,
    pub upcoming_count: usize,
    pub upcoming: Vec<Reminder>,
}

#[derive(Debug, Serialize)]
pub struct DailyCompletions {
    pub date: String,
    pub completed: usize,
}

#[derive(Debug, Serialize)]
pub struct ActionCount {
    pub action: ActionKind,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: String,
    pub total_reminders: usize,
    pub active_reminders: usize,
    pub upcoming: usize,
    pub overdue: usize,
    pub completed_today: usize,
    pub completed_total: usize,
    pub last_7_days: Vec<DailyCompletions>,
    pub actions: Vec<ActionCount>,
}

/// `HH:MM` on the wire, as produced by a browser time input. Seconds are
/// accepted and kept when present.
pub mod clock_time {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .ok()
    }

    pub fn format(time: &NaiveTime) -> String {
        if time.second() == 0 {
            time.format("%H:%M").to_string()
        } else {
            time.format("%H:%M:%S").to_string()
        }
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {raw}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::TimeZone;

    fn request(title: &str, date: &str, time: &str) -> NewReminderRequest {
        NewReminderRequest {
            title: title.to_string(),
            description: Some("  ".to_string()),
            scheduled_date: date.to_string(),
            scheduled_time: time.to_string(),
        }
    }

    #[test]
    fn validate_builds_active_reminder() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let reminder = request("  Water plants ", "2024-01-02", "09:30")
            .validate(7, created_at)
            .expect("valid request");

        assert_eq!(reminder.id, 7);
        assert_eq!(reminder.title, "Water plants");
        assert_eq!(reminder.description, None);
        assert!(reminder.is_active);
        assert_eq!(
            reminder.scheduled_at(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(9, 30, 0).unwrap()
        );
    }

    #[test]
    fn validate_rejects_malformed_input() {
        let created_at = Utc::now();
        for (title, date, time) in [
            ("", "2024-01-02", "09:30"),
            ("Call", "2024-13-02", "09:30"),
            ("Call", "02/01/2024", "09:30"),
            ("Call", "2024-01-02", "25:00"),
            ("Call", "2024-01-02", "soon"),
        ] {
            let err = request(title, date, time)
                .validate(1, created_at)
                .expect_err("should be rejected");
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn stored_reminder_uses_short_time_format() {
        let json = r#"{
            "id": 3,
            "title": "Standup",
            "is_active": true,
            "scheduled_date": "2024-05-06",
            "scheduled_time": "10:15",
            "created_at": "2024-05-01T08:00:00Z"
        }"#;
        let reminder: Reminder = serde_json::from_str(json).expect("parse reminder");
        assert_eq!(reminder.scheduled_time, NaiveTime::from_hms_opt(10, 15, 0).unwrap());

        let value = serde_json::to_value(&reminder).unwrap();
        assert_eq!(value["scheduled_time"], "10:15");
        assert_eq!(value["scheduled_date"], "2024-05-06");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn unknown_action_kind_is_rejected() {
        let json = r#"{
            "id": 1,
            "reminder_id": 1,
            "action": "archived",
            "timestamp": "2024-05-01T08:00:00Z"
        }"#;
        assert!(serde_json::from_str::<ActivityLog>(json).is_err());

        let ok = json.replace("archived", "completed");
        let log: ActivityLog = serde_json::from_str(&ok).expect("parse log");
        assert_eq!(log.action, ActionKind::Completed);
    }

    #[test]
    fn snooze_minutes_default_and_bounds() {
        assert_eq!(SnoozeRequest::default().minutes().unwrap(), 10);
        assert_eq!(SnoozeRequest { minutes: Some(90) }.minutes().unwrap(), 90);
        assert!(SnoozeRequest { minutes: Some(0) }.minutes().is_err());
        assert!(SnoozeRequest { minutes: Some(24 * 60 + 1) }.minutes().is_err());
    }

    #[test]
    fn snooze_moves_from_slot_or_from_now_when_overdue() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();

        let mut later = request("Later", "2024-01-01", "23:50").validate(1, created_at).unwrap();
        later.snooze(now, 30).unwrap();
        assert_eq!(later.scheduled_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(later.scheduled_time, NaiveTime::from_hms_opt(0, 20, 0).unwrap());

        let mut overdue = request("Overdue", "2024-01-01", "08:00").validate(2, created_at).unwrap();
        overdue.snooze(now, 10).unwrap();
        assert_eq!(overdue.scheduled_at(), now + TimeDelta::minutes(10));
    }

    #[test]
    fn snooze_past_the_last_representable_date_is_rejected() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut reminder = request("Far away", "+262142-12-31", "23:55")
            .validate(1, created_at)
            .expect("chrono accepts the last representable date");
        let before = reminder.clone();

        let err = reminder
            .snooze(created_at.naive_utc(), 10)
            .expect_err("should not overflow");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(reminder, before);
    }
}
