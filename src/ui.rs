use crate::models::{clock_time, OverviewResponse, Reminder};

pub fn render_index(overview: &OverviewResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &overview.date)
        .replace("{{COMPLETED}}", &overview.completed_today.to_string())
        .replace("{{UPCOMING}}", &overview.upcoming_count.to_string())
        .replace("{{CARDS}}", &render_cards(&overview.upcoming))
}

fn render_cards(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return r#"<div class="empty">
        <p class="empty-title">No upcoming reminders</p>
        <p>Use the form above to create your first reminder!</p>
      </div>"#
            .to_string();
    }

    reminders.iter().map(render_card).collect::<Vec<_>>().join("\n")
}

fn render_card(reminder: &Reminder) -> String {
    let description = reminder
        .description
        .as_deref()
        .map(|text| format!(r#"<p class="card-desc">{}</p>"#, escape_html(text)))
        .unwrap_or_default();

    format!(
        r#"<article class="card">
        <div>
          <h3>{title}</h3>
          {description}
          <p class="card-when">{date} &middot; {time}</p>
        </div>
        <div class="card-actions">
          <button class="btn-ghost" type="button" data-snooze="{id}">Snooze</button>
          <form method="post" action="/reminders/{id}/complete">
            <button class="btn-done" type="submit">Done</button>
          </form>
        </div>
      </article>"#,
        id = reminder.id,
        title = escape_html(&reminder.title),
        description = description,
        date = reminder.scheduled_date,
        time = clock_time::format(&reminder.scheduled_time),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Reminder</title>
  <style>
    :root {
      --bg: #0b0f17;
      --panel: #121826;
      --border: #1f2937;
      --ink: #f3f4f6;
      --muted: #9ca3af;
      --accent: #2563eb;
      --done: #16a34a;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: system-ui, "Segoe UI", sans-serif;
    }

    header {
      position: sticky;
      top: 0;
      background: var(--panel);
      border-bottom: 1px solid var(--border);
    }

    .wrap {
      max-width: 56rem;
      margin: 0 auto;
      padding: 16px;
    }

    h1 {
      margin: 0;
      font-size: 1.25rem;
    }

    .tabs {
      display: flex;
      gap: 4px;
      margin-top: 16px;
      padding: 4px;
      background: var(--border);
      border-radius: 10px;
    }

    .tab {
      flex: 1;
      padding: 8px 16px;
      border: none;
      border-radius: 8px;
      background: transparent;
      color: var(--muted);
      font-weight: 600;
      cursor: pointer;
    }

    .tab.active {
      background: var(--accent);
      color: white;
    }

    .panel {
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 14px;
      padding: 16px;
      margin-bottom: 16px;
    }

    .counters {
      display: flex;
      justify-content: space-between;
    }

    .label {
      margin: 0;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .value {
      margin: 4px 0 0;
      font-size: 1.6rem;
      font-weight: 700;
    }

    form.create {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 8px;
    }

    input {
      padding: 8px 10px;
      border-radius: 8px;
      border: 1px solid var(--border);
      background: var(--bg);
      color: var(--ink);
    }

    button {
      border: none;
      border-radius: 8px;
      padding: 8px 14px;
      font-weight: 600;
      cursor: pointer;
    }

    .btn-new {
      background: var(--accent);
      color: white;
    }

    .btn-done {
      background: var(--done);
      color: white;
    }

    .btn-ghost {
      background: transparent;
      color: var(--muted);
      border: 1px solid var(--border);
    }

    .card {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 12px;
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 12px;
      padding: 14px 16px;
      margin-bottom: 10px;
    }

    .card h3 {
      margin: 0;
      font-size: 1rem;
    }

    .card-desc,
    .card-when {
      margin: 4px 0 0;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .card-actions {
      display: flex;
      gap: 8px;
    }

    .card-actions form {
      margin: 0;
    }

    .empty {
      text-align: center;
      padding: 48px 0;
      color: var(--muted);
    }

    .empty-title {
      font-size: 1.1rem;
    }

    .metrics {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 12px;
    }

    .bars {
      display: flex;
      align-items: flex-end;
      gap: 8px;
      height: 140px;
    }

    .bar {
      flex: 1;
      display: flex;
      flex-direction: column;
      justify-content: flex-end;
      align-items: center;
      font-size: 0.75rem;
      color: var(--muted);
    }

    .bar-fill {
      width: 100%;
      background: var(--accent);
      border-radius: 6px 6px 0 0;
      min-height: 2px;
    }

    [hidden] {
      display: none !important;
    }
  </style>
</head>
<body>
  <header>
    <div class="wrap">
      <h1>Reminder</h1>
      <div class="tabs">
        <button class="tab active" type="button" data-tab="reminders">Reminders</button>
        <button class="tab" type="button" data-tab="dashboard">Dashboard</button>
      </div>
    </div>
  </header>

  <main class="wrap">
    <section id="reminders">
      <div class="panel counters">
        <div>
          <p class="label">Completed Today</p>
          <p class="value" id="completed">{{COMPLETED}}</p>
        </div>
        <div style="text-align: right">
          <p class="label">Upcoming</p>
          <p class="value" id="upcoming">{{UPCOMING}}</p>
        </div>
      </div>

      <form class="panel create" method="post" action="/reminders">
        <input name="title" placeholder="What should we remind you of?" required />
        <input name="description" placeholder="Notes (optional)" />
        <input name="scheduled_date" type="date" value="{{DATE}}" required />
        <input name="scheduled_time" type="time" required />
        <button class="btn-new" type="submit">New</button>
      </form>

      <div id="cards">
      {{CARDS}}
      </div>
    </section>

    <section id="dashboard" hidden>
      <div class="panel metrics">
        <div><p class="label">Active</p><p class="value" id="m-active">--</p></div>
        <div><p class="label">Upcoming</p><p class="value" id="m-upcoming">--</p></div>
        <div><p class="label">Overdue</p><p class="value" id="m-overdue">--</p></div>
        <div><p class="label">Completed today</p><p class="value" id="m-today">--</p></div>
        <div><p class="label">Completed total</p><p class="value" id="m-total">--</p></div>
      </div>
      <div class="panel">
        <p class="label">Completions, last 7 days</p>
        <div class="bars" id="bars"></div>
      </div>
    </section>
  </main>

  <script>
    const tabs = Array.from(document.querySelectorAll('.tab'));
    const sections = {
      reminders: document.getElementById('reminders'),
      dashboard: document.getElementById('dashboard')
    };

    const renderDashboard = (data) => {
      document.getElementById('m-active').textContent = data.active_reminders;
      document.getElementById('m-upcoming').textContent = data.upcoming;
      document.getElementById('m-overdue').textContent = data.overdue;
      document.getElementById('m-today').textContent = data.completed_today;
      document.getElementById('m-total').textContent = data.completed_total;

      const max = Math.max(1, ...data.last_7_days.map((day) => day.completed));
      document.getElementById('bars').innerHTML = data.last_7_days
        .map((day) => {
          const height = Math.round((day.completed / max) * 100);
          return `<div class="bar"><span>${day.completed}</span>` +
            `<div class="bar-fill" style="height: ${height}%"></div>` +
            `<span>${day.date.slice(5)}</span></div>`;
        })
        .join('');
    };

    const loadDashboard = async () => {
      const response = await fetch('/api/dashboard');
      if (response.ok) {
        renderDashboard(await response.json());
      }
    };

    tabs.forEach((tab) => {
      tab.addEventListener('click', () => {
        tabs.forEach((item) => item.classList.toggle('active', item === tab));
        Object.entries(sections).forEach(([name, section]) => {
          section.hidden = name !== tab.dataset.tab;
        });
        if (tab.dataset.tab === 'dashboard') {
          loadDashboard();
        }
      });
    });

    document.querySelectorAll('[data-snooze]').forEach((button) => {
      button.addEventListener('click', async () => {
        const response = await fetch(`/api/reminders/${button.dataset.snooze}/snooze`, {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ minutes: 10 })
        });
        if (response.ok) {
          window.location.reload();
        }
      });
    });
  </script>
</body>
</html>
"#;
