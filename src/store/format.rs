use chrono::{DateTime, Local};
use std::time::SystemTime;

/// Play time for display: `"42s"`, `"12m"`, `"3h 5m"`.
pub fn format_play_time(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m", seconds / 60)
    } else {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    }
}

/// Last-played for display, relative to `now`: `"Never"`, `"Just now"`,
/// `"{m}m ago"`, `"{h}h ago"`, `"{d}d ago"`, then a calendar date past a week.
pub fn format_last_played(timestamp: Option<SystemTime>, now: SystemTime) -> String {
    let Some(timestamp) = timestamp else {
        return "Never".to_string();
    };

    // A timestamp ahead of the clock reads as zero elapsed.
    let seconds = now
        .duration_since(timestamp)
        .unwrap_or_default()
        .as_secs();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if seconds < 60 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else if days < 7 {
        format!("{}d ago", days)
    } else {
        DateTime::<Local>::from(timestamp)
            .format("%-m/%-d/%Y")
            .to_string()
    }
}
