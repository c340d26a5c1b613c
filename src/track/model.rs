use std::fmt;

use serde::Deserialize;

/// Primary key of the content item behind a track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which playback technology renders a track.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Video,
    AudioEmbed,
    LocalAudio,
}

impl BackendKind {
    /// Short source label shown next to the track title.
    pub fn label(self) -> &'static str {
        match self {
            Self::Video => "YouTube",
            Self::AudioEmbed => "SoundCloud",
            Self::LocalAudio => "Local",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Video => "video embed",
            Self::AudioEmbed => "audio embed",
            Self::LocalAudio => "local audio",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackSource {
    /// Video id understood by the video embed service.
    VideoEmbed { video_id: String },
    /// Public page URL of a track on the audio embed service.
    AudioEmbed { url: String },
    /// Path or `file://` URL of an audio file.
    LocalAudio { url: String },
}

impl TrackSource {
    pub fn kind(&self) -> BackendKind {
        match self {
            Self::VideoEmbed { .. } => BackendKind::Video,
            Self::AudioEmbed { .. } => BackendKind::AudioEmbed,
            Self::LocalAudio { .. } => BackendKind::LocalAudio,
        }
    }

    /// The raw reference (video id or URL).
    pub fn reference(&self) -> &str {
        match self {
            Self::VideoEmbed { video_id } => video_id,
            Self::AudioEmbed { url } | Self::LocalAudio { url } => url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: Option<TrackId>,
    pub title: String,
    pub thumbnail: Option<String>,
    /// Pre-formatted duration shown in the playlist sidebar.
    pub duration_label: Option<String>,
    pub source: TrackSource,
}

impl Track {
    pub fn new(title: impl Into<String>, source: TrackSource) -> Self {
        Self {
            id: None,
            title: title.into(),
            thumbnail: None,
            duration_label: None,
            source,
        }
    }

    pub fn video(video_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(
            title,
            TrackSource::VideoEmbed {
                video_id: video_id.into(),
            },
        )
    }

    pub fn audio_embed(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(title, TrackSource::AudioEmbed { url: url.into() })
    }

    pub fn local_audio(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(title, TrackSource::LocalAudio { url: url.into() })
    }

    pub fn with_id(mut self, id: TrackId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach a thumbnail URL; blank strings are treated as absent.
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        let thumbnail = thumbnail.into();
        self.thumbnail = (!thumbnail.trim().is_empty()).then_some(thumbnail);
        self
    }

    pub fn with_duration_label(mut self, label: impl Into<String>) -> Self {
        self.duration_label = Some(label.into());
        self
    }

    pub fn kind(&self) -> BackendKind {
        self.source.kind()
    }
}
