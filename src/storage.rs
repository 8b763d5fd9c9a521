use crate::errors::AppError;
use crate::models::{ActionKind, ActivityLog, AppData, Reminder, ReminderId};
use chrono::{DateTime, Utc};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/reminders.json"))
}

pub async fn load_data(path: &Path) -> AppData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                error!("failed to parse data file: {err}");
                AppData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => AppData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            AppData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(data).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

impl AppData {
    /// Reminders with `is_active == true`, in storage order.
    pub fn active_reminders(&self) -> Vec<Reminder> {
        self.reminders
            .iter()
            .filter(|reminder| reminder.is_active)
            .cloned()
            .collect()
    }

    pub fn activity_logs(&self) -> &[ActivityLog] {
        &self.activity_logs
    }

    pub fn next_id(&mut self) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        self.next_id
    }

    pub fn insert_reminder(&mut self, reminder: Reminder) -> &Reminder {
        self.reminders.push(reminder);
        &self.reminders[self.reminders.len() - 1]
    }

    pub fn reminder_mut(&mut self, id: ReminderId) -> Result<&mut Reminder, AppError> {
        self.reminders
            .iter_mut()
            .find(|reminder| reminder.id == id)
            .ok_or_else(|| AppError::not_found(format!("reminder {id} not found")))
    }

    pub fn log_action(&mut self, reminder_id: ReminderId, action: ActionKind, timestamp: DateTime<Utc>) {
        let id = self.next_id();
        self.activity_logs.push(ActivityLog {
            id,
            reminder_id,
            action,
            timestamp,
        });
    }
}
