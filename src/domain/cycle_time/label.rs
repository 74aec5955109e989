//! Human readable elapsed-time labels.

use chrono::Duration;

/// Formats an elapsed duration in whole hours.
///
/// Under an hour reads `< 1hr`, exactly one hour reads `1hr`, anything else
/// reads `Nd Hhrs` with the day part left out when it is zero. Negative
/// durations (clock skew between the board and this host) read as `< 1hr`.
pub fn humanize_elapsed(elapsed: Duration) -> String {
    let hours = elapsed.num_hours().max(0);
    humanize_hours(hours as u64)
}

/// Formats a whole number of elapsed hours.
pub fn humanize_hours(hours: u64) -> String {
    match hours {
        0 => "< 1hr".to_string(),
        1 => "1hr".to_string(),
        _ => {
            let days = hours / 24;
            let rest = hours % 24;
            if days > 0 {
                format!("{days}d {rest}hrs")
            } else {
                format!("{rest}hrs")
            }
        }
    }
}

/// Minutes in a duration, with sub-minute precision.
pub fn elapsed_minutes(elapsed: Duration) -> f64 {
    elapsed.num_milliseconds().max(0) as f64 / 60_000.0
}
