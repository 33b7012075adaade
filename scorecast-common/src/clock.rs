//! Display formatting for the match clock.
//!
//! The backend reports elapsed time as a float second count; everything
//! here is ephemeral string formatting for the views.

/// Formats an elapsed-seconds count as `MM:SS`, both fields zero padded.
///
/// Minutes are not capped, so an hour renders as `60:00`. Negative or
/// non-finite input clamps to `00:00` rather than panicking; a live display
/// should survive garbage from the backend.
pub fn time_string(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return String::from("00:00");
    }
    let secs = secs as u64;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The stoppage-time suffix (`+N'`), shown only when there is any.
pub fn stoppage_string(minutes: u32) -> Option<String> {
    (minutes > 0).then(|| format!("+{minutes}'"))
}

/// The full timer line: clock plus stoppage suffix when present.
pub fn timer_line(secs: f64, stoppage_minutes: u32) -> String {
    match stoppage_string(stoppage_minutes) {
        Some(suffix) => format!("{} {suffix}", time_string(secs)),
        None => time_string(secs),
    }
}
