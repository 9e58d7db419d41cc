//! Playback time formatting

/// Format a position in seconds as `m:ss`
///
/// Minutes are not wrapped into hours, matching the player's time readout:
/// `format_time(3725.0)` is `"62:05"`. Negative and non-finite input render
/// as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
