use std::time::Duration;

/// Fixed delays the controller schedules against the host clock.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Timing {
    pub repeat_one_delay: Duration,
    pub progress_interval: Duration,
    /// How often to check whether a backend technology has loaded.
    pub ready_poll_interval: Duration,
    /// Upper bound on time spent in `Loading`.
    pub ready_timeout: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            repeat_one_delay: Duration::from_secs(1),
            progress_interval: Duration::from_secs(1),
            ready_poll_interval: Duration::from_millis(100),
            ready_timeout: Duration::from_secs(10),
        }
    }
}

/// Remaining time on each pending timer; `None` means not scheduled.
#[derive(Debug, Default, Clone)]
pub(super) struct Timers {
    pub repeat_reload: Option<Duration>,
    pub progress: Option<Duration>,
    pub ready_poll: Option<Duration>,
    pub ready_deadline: Option<Duration>,
}

impl Timers {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Count `slot` down by `dt`. Returns true, and unschedules it, once it
/// reaches zero.
pub(super) fn countdown(slot: &mut Option<Duration>, dt: Duration) -> bool {
    match slot {
        Some(remaining) if *remaining <= dt => {
            *slot = None;
            true
        }
        Some(remaining) => {
            *remaining -= dt;
            false
        }
        None => false,
    }
}
