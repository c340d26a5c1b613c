use serde::Deserialize;

/// Top-level settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/playdeck/config.toml` or `~/.config/playdeck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `PLAYDECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub timing: TimingSettings,
    pub controls: ControlsSettings,
    pub views: ViewsSettings,
    pub library: LibrarySettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start tracks as soon as their backend is ready.
    pub autoplay: bool,
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Initial repeat mode.
    pub repeat: RepeatModeSetting,
    /// Initial volume, `0.0..=1.0`.
    pub volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            autoplay: true,
            shuffle: false,
            repeat: RepeatModeSetting::Off,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatModeSetting {
    #[serde(alias = "none", alias = "no-repeat", alias = "no_repeat")]
    Off,
    #[serde(
        alias = "repeat-one",
        alias = "repeat_one",
        alias = "track",
        alias = "loop-one"
    )]
    One,
    #[serde(
        alias = "repeat-all",
        alias = "repeat_all",
        alias = "playlist",
        alias = "loop-all"
    )]
    All,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Pause before a repeat-one track starts over (milliseconds).
    pub repeat_one_delay_ms: u64,
    /// How often the playback position is refreshed while playing.
    pub progress_interval_ms: u64,
    /// How often to check whether a backend has loaded.
    pub ready_poll_interval_ms: u64,
    /// Give up on a loading track after this long.
    pub ready_timeout_ms: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            repeat_one_delay_ms: 1000,
            progress_interval_ms: 1000,
            ready_poll_interval_ms: 100,
            ready_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change per up/down key press, in percent.
    pub volume_step_percent: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            volume_step_percent: 10,
        }
    }
}

/// Remote play-count endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewsSettings {
    pub enabled: bool,
    /// Site root, e.g. `https://music.example.org`.
    pub base_url: Option<String>,
    /// Sent as `X-CSRFToken`.
    pub csrf_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: false,
            recursive: true,
            max_depth: None,
        }
    }
}
