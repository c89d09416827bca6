//! Server-rendered dashboard page.

use time::format_description::well_known::Rfc3339;

use super::responses::SnapshotResponse;
use crate::sensor::ConnectivityStatus;

/// Render the dashboard for `snapshot`, reloading every `refresh_interval` seconds.
pub fn render(snapshot: &SnapshotResponse, refresh_interval: u64) -> String {
    let temperature = format_value(snapshot.temperature, "°C");
    let humidity = format_value(snapshot.humidity, "%");
    let last_update = snapshot
        .last_update
        .and_then(|at| at.format(&Rfc3339).ok())
        .unwrap_or_else(|| "never".to_string());
    let status = snapshot.connection_status;

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta http-equiv="refresh" content="{refresh_interval}">
    <title>Sensor Dashboard</title>
    <style>
        body {{ font-family: system-ui, sans-serif; background: #1a1a2e; color: #eee; padding: 2rem; }}
        .cards {{ display: flex; gap: 1rem; flex-wrap: wrap; }}
        .card {{ background: #16213e; border-radius: 8px; padding: 1.5rem; min-width: 12rem; }}
        .value {{ font-size: 2.5rem; font-weight: 600; }}
        .status {{ display: inline-block; padding: 0.25rem 0.75rem; border-radius: 999px; }}
        .status.connected {{ background: #2e7d32; }}
        .status.stale {{ background: #f9a825; color: #111; }}
        .status.offline {{ background: #c62828; }}
        footer {{ color: #888; margin-top: 2rem; }}
    </style>
</head>
<body>
    <h1>Sensor Dashboard</h1>
    <p>Status: <span class="status {status}">{label}</span></p>
    <div class="cards">
        <div class="card"><div>Temperature</div><div class="value" id="temperature">{temperature}</div></div>
        <div class="card"><div>Humidity</div><div class="value" id="humidity">{humidity}</div></div>
    </div>
    <footer>Last update: <span id="last-update">{last_update}</span> &middot; refreshes every {refresh_interval}s</footer>
</body>
</html>"#,
        label = status_label(status),
    )
}

fn format_value(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v:.1} {unit}"),
        None => "--".to_string(),
    }
}

fn status_label(status: ConnectivityStatus) -> &'static str {
    match status {
        ConnectivityStatus::Connected => "Connected",
        ConnectivityStatus::Stale => "Stale",
        ConnectivityStatus::Offline => "Offline",
    }
}
