//! Progress values and `m:ss` formatting.

use std::time::Duration;

/// Format seconds as `minutes:seconds`, seconds zero-padded.
///
/// Non-finite and non-positive inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

pub fn format_duration(d: Duration) -> String {
    format_time(d.as_secs_f64())
}

/// Last-known position and duration of the active track, in seconds.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Progress {
    pub elapsed: f64,
    pub total: f64,
}

impl Progress {
    /// Played share of the track in `[0, 1]`; 0 when the duration is unknown.
    pub fn fraction(&self) -> f64 {
        if self.total.is_finite() && self.total > 0.0 && self.elapsed.is_finite() {
            (self.elapsed / self.total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// `(elapsed, total)` display labels.
    pub fn labels(&self) -> (String, String) {
        (format_time(self.elapsed), format_time(self.total))
    }
}
