use crate::models::{ActionCount, ActionKind, AppData, DailyCompletions, DashboardResponse};
use crate::selector::{count_completed_on, select};
use chrono::{DateTime, Duration, Local, TimeZone};

pub fn build_dashboard(data: &AppData) -> DashboardResponse {
    build_dashboard_at(&Local::now(), data)
}

pub fn build_dashboard_at<Tz: TimeZone>(now: &DateTime<Tz>, data: &AppData) -> DashboardResponse {
    const DAY_COUNT: i64 = 7;

    let today = now.date_naive();
    let tz = now.timezone();
    let local_now = now.naive_local();

    let active = data.active_reminders();
    let selection = select(&active, data.activity_logs(), now);
    let overdue = active
        .iter()
        .filter(|reminder| reminder.scheduled_at() < local_now)
        .count();

    let last_7_days = (0..DAY_COUNT)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DailyCompletions {
                date: date.to_string(),
                completed: count_completed_on(data.activity_logs(), &tz, date),
            }
        })
        .collect();

    let actions = ActionKind::ALL
        .into_iter()
        .map(|action| ActionCount {
            action,
            count: data
                .activity_logs()
                .iter()
                .filter(|log| log.action == action)
                .count(),
        })
        .collect::<Vec<_>>();

    let completed_total = actions
        .iter()
        .find(|entry| entry.action == ActionKind::Completed)
        .map_or(0, |entry| entry.count);

    DashboardResponse {
        date: today.to_string(),
        total_reminders: data.reminders.len(),
        active_reminders: active.len(),
        upcoming: selection.upcoming.len(),
        overdue,
        completed_today: selection.completed_today,
        completed_total,
        last_7_days,
        actions,
    }
}
