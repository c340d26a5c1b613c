//! Controller state types.

use std::fmt;

use crate::track::BackendKind;

use super::timers::Timing;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Status {
    /// No track loaded.
    #[default]
    Idle,
    /// Waiting for the backend to report ready.
    Loading,
    Playing,
    Paused,
    /// The backend reported end of track; resolved by the repeat policy.
    Ended,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    /// Replay the current track after a short delay.
    One,
    /// Wrap from the last playlist entry to the first.
    All,
}

impl RepeatMode {
    /// `Off -> One -> All -> Off`.
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::One,
            Self::One => Self::All,
            Self::All => Self::Off,
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::One => "one",
            Self::All => "all",
        })
    }
}

/// Transient session state, readable by the host after every command.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub status: Status,
    /// Kind of the backend serving the active track.
    pub backend: Option<BackendKind>,
    pub volume: f32,
    /// Volume to restore when unmuting.
    pub muted_volume: Option<f32>,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub autoplay: bool,
    /// Last-known position and duration in seconds.
    pub position: f64,
    pub duration: f64,
    /// Whether the player UI is open.
    pub visible: bool,
    pub fullscreen: bool,
}

impl PlayerState {
    pub(crate) fn new(options: &ControllerOptions) -> Self {
        Self {
            status: Status::Idle,
            backend: None,
            volume: options.volume.clamp(0.0, 1.0),
            muted_volume: None,
            shuffle: options.shuffle,
            repeat: options.repeat,
            autoplay: options.autoplay,
            position: 0.0,
            duration: 0.0,
            visible: false,
            fullscreen: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    pub autoplay: bool,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub volume: f32,
    /// Step applied by the volume up/down shortcuts.
    pub volume_step: f32,
    /// Host element embeds mount into.
    pub container: String,
    pub timing: Timing,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            shuffle: false,
            repeat: RepeatMode::Off,
            volume: 1.0,
            volume_step: 0.1,
            container: "media-player".to_string(),
            timing: Timing::default(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}
