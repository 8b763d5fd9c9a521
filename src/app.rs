use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/reminders", post(handlers::create_reminder_form))
        .route("/reminders/:id/complete", post(handlers::complete_reminder_form))
        .route(
            "/api/reminders",
            get(handlers::get_reminders).post(handlers::create_reminder),
        )
        .route("/api/reminders/:id", delete(handlers::delete_reminder))
        .route("/api/reminders/:id/complete", post(handlers::complete_reminder))
        .route("/api/reminders/:id/snooze", post(handlers::snooze_reminder))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
}
