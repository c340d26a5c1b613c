use std::time::Duration;

use crate::controller::{ControllerOptions, RepeatMode, Timing};

use super::schema::{RepeatModeSetting, Settings, TimingSettings};

impl From<RepeatModeSetting> for RepeatMode {
    fn from(setting: RepeatModeSetting) -> Self {
        match setting {
            RepeatModeSetting::Off => RepeatMode::Off,
            RepeatModeSetting::One => RepeatMode::One,
            RepeatModeSetting::All => RepeatMode::All,
        }
    }
}

impl From<&TimingSettings> for Timing {
    fn from(t: &TimingSettings) -> Self {
        Self {
            repeat_one_delay: Duration::from_millis(t.repeat_one_delay_ms),
            progress_interval: Duration::from_millis(t.progress_interval_ms),
            ready_poll_interval: Duration::from_millis(t.ready_poll_interval_ms),
            ready_timeout: Duration::from_millis(t.ready_timeout_ms),
        }
    }
}

impl From<&Settings> for ControllerOptions {
    fn from(s: &Settings) -> Self {
        Self {
            autoplay: s.playback.autoplay,
            shuffle: s.playback.shuffle,
            repeat: s.playback.repeat.into(),
            volume: s.playback.volume,
            volume_step: f32::from(s.controls.volume_step_percent) / 100.0,
            timing: Timing::from(&s.timing),
            ..ControllerOptions::default()
        }
    }
}
