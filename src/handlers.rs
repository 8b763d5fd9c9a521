use crate::dashboard::build_dashboard;
use crate::errors::AppError;
use crate::models::{
    ActionKind, AppData, DashboardResponse, NewReminderRequest, OverviewResponse, Reminder,
    ReminderId, SnoozeRequest,
};
use crate::selector::select;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::{Local, Utc};
use tracing::info;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    Html(render_index(&overview(&data)))
}

pub async fn get_reminders(State(state): State<AppState>) -> Json<OverviewResponse> {
    let data = state.data.lock().await;
    Json(overview(&data))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let data = state.data.lock().await;
    Json(build_dashboard(&data))
}

pub async fn create_reminder(
    State(state): State<AppState>,
    Json(payload): Json<NewReminderRequest>,
) -> Result<(StatusCode, Json<Reminder>), AppError> {
    let reminder = apply_create(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

pub async fn create_reminder_form(
    State(state): State<AppState>,
    Form(payload): Form<NewReminderRequest>,
) -> Result<Redirect, AppError> {
    apply_create(&state, payload).await?;
    Ok(Redirect::to("/"))
}

pub async fn complete_reminder(
    State(state): State<AppState>,
    Path(id): Path<ReminderId>,
) -> Result<Json<Reminder>, AppError> {
    let reminder = apply_complete(&state, id).await?;
    Ok(Json(reminder))
}

pub async fn complete_reminder_form(
    State(state): State<AppState>,
    Path(id): Path<ReminderId>,
) -> Result<Redirect, AppError> {
    apply_complete(&state, id).await?;
    Ok(Redirect::to("/"))
}

pub async fn snooze_reminder(
    State(state): State<AppState>,
    Path(id): Path<ReminderId>,
    payload: Result<Json<SnoozeRequest>, JsonRejection>,
) -> Result<Json<Reminder>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        // No JSON body at all means "use the default delay".
        Err(JsonRejection::MissingJsonContentType(_)) => SnoozeRequest::default(),
        Err(rejection) => return Err(AppError::bad_request(rejection.body_text())),
    };
    let minutes = request.minutes()?;

    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let reminder = next.reminder_mut(id)?;
    if !reminder.is_active {
        return Err(AppError::conflict(format!("reminder {id} is not active")));
    }
    reminder.snooze(Local::now().naive_local(), minutes)?;
    let updated = reminder.clone();
    next.log_action(id, ActionKind::Snoozed, Utc::now());

    commit(&state, &mut data, next).await?;

    info!(id, minutes, "snoozed reminder");
    Ok(Json(updated))
}

pub async fn delete_reminder(
    State(state): State<AppState>,
    Path(id): Path<ReminderId>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    next.reminder_mut(id)?.is_active = false;
    next.log_action(id, ActionKind::Deleted, Utc::now());

    commit(&state, &mut data, next).await?;

    info!(id, "deleted reminder");
    Ok(StatusCode::NO_CONTENT)
}

async fn apply_create(state: &AppState, payload: NewReminderRequest) -> Result<Reminder, AppError> {
    let now = Utc::now();
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let id = next.next_id();
    let reminder = next.insert_reminder(payload.validate(id, now)?).clone();
    next.log_action(id, ActionKind::Created, now);

    commit(state, &mut data, next).await?;

    info!(id, scheduled_at = %reminder.scheduled_at(), "created reminder");
    Ok(reminder)
}

async fn apply_complete(state: &AppState, id: ReminderId) -> Result<Reminder, AppError> {
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    let updated = {
        let reminder = next.reminder_mut(id)?;
        if !reminder.is_active {
            return Err(AppError::conflict(format!("reminder {id} is already inactive")));
        }
        reminder.is_active = false;
        reminder.clone()
    };
    next.log_action(id, ActionKind::Completed, Utc::now());

    commit(state, &mut data, next).await?;

    info!(id, "completed reminder");
    Ok(updated)
}

/// Writes `next` to disk and only then makes it the live store, so a failed
/// write leaves memory matching the file.
async fn commit(state: &AppState, data: &mut AppData, next: AppData) -> Result<(), AppError> {
    persist_data(&state.data_path, &next).await?;
    *data = next;
    Ok(())
}

fn overview(data: &AppData) -> OverviewResponse {
    let now = Local::now();
    let selection = select(&data.active_reminders(), data.activity_logs(), &now);
    OverviewResponse {
        date: now.date_naive().to_string(),
        completed_today: selection.completed_today,
        upcoming_count: selection.upcoming.len(),
        upcoming: selection.upcoming,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime, TimeZone};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let mut path = std::env::temp_dir();
        path.push(format!("reminder_app_handlers_{name}_{}_{nanos}.json", std::process::id()));
        path
    }

    fn stored_reminder(id: ReminderId) -> Reminder {
        Reminder {
            id,
            title: "Pay rent".to_string(),
            description: None,
            is_active: true,
            scheduled_date: NaiveDate::from_ymd_opt(2099, 1, 1).unwrap(),
            scheduled_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn request(title: &str) -> NewReminderRequest {
        NewReminderRequest {
            title: title.to_string(),
            description: None,
            scheduled_date: "2099-01-01".to_string(),
            scheduled_time: "09:00".to_string(),
        }
    }

    #[tokio::test]
    async fn failed_write_leaves_store_untouched() {
        let mut data = AppData::default();
        let id = data.next_id();
        data.insert_reminder(stored_reminder(id));
        // A directory cannot be written as a file.
        let state = AppState::new(std::env::temp_dir(), data);

        let err = complete_reminder(State(state.clone()), Path(id))
            .await
            .expect_err("write should fail");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let err = delete_reminder(State(state.clone()), Path(id))
            .await
            .expect_err("write should fail");
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

        let data = state.data.lock().await;
        assert!(data.reminders[0].is_active);
        assert!(data.activity_logs.is_empty());
        assert_eq!(data.next_id, 1);
    }

    #[tokio::test]
    async fn rejected_create_does_not_consume_an_id() {
        let path = temp_path("create");
        let state = AppState::new(path.clone(), AppData::default());

        let err = create_reminder(State(state.clone()), Json(request("  ")))
            .await
            .expect_err("blank title");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let (status, Json(created)) = create_reminder(State(state.clone()), Json(request("Pay rent")))
            .await
            .expect("valid request");
        let _ = std::fs::remove_file(&path);

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.id, 1);
        let data = state.data.lock().await;
        assert_eq!(data.reminders, vec![created]);
        assert_eq!(data.activity_logs[0].action, ActionKind::Created);
    }
}
