use std::fs;
use std::path::Path;

use log::warn;
use serde::Deserialize;

use crate::error::TrackError;

use super::model::{Track, TrackId, TrackSource};

/// A content item as the hosting page describes it.
///
/// Any combination of the three backend fields may be present; conversion
/// picks video, then audio embed, then local audio.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TrackRecord {
    pub id: Option<TrackId>,
    pub title: String,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub youtube_video_id: Option<String>,
    pub soundcloud_url: Option<String>,
    pub audio_url: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<TrackRecord> for Track {
    type Error = TrackError;

    fn try_from(record: TrackRecord) -> Result<Self, Self::Error> {
        let source = if let Some(video_id) = non_blank(record.youtube_video_id) {
            TrackSource::VideoEmbed { video_id }
        } else if let Some(url) = non_blank(record.soundcloud_url) {
            TrackSource::AudioEmbed { url }
        } else if let Some(url) = non_blank(record.audio_url) {
            TrackSource::LocalAudio { url }
        } else {
            return Err(TrackError::Unplayable {
                title: record.title,
            });
        };

        Ok(Track {
            id: record.id,
            title: record.title,
            thumbnail: non_blank(record.thumbnail),
            duration_label: non_blank(record.duration),
            source,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlaylistFile {
    track: Vec<TrackRecord>,
}

/// Parse a TOML playlist made of `[[track]]` tables.
///
/// Entries without a playable source are skipped with a warning.
pub fn parse_playlist(src: &str) -> Result<Vec<Track>, TrackError> {
    let file: PlaylistFile = toml::from_str(src)?;
    let tracks = file
        .track
        .into_iter()
        .filter_map(|record| match Track::try_from(record) {
            Ok(track) => Some(track),
            Err(e) => {
                warn!("skipping playlist entry: {e}");
                None
            }
        })
        .collect();
    Ok(tracks)
}

pub fn load_playlist_file(path: &Path) -> Result<Vec<Track>, TrackError> {
    let src = fs::read_to_string(path)?;
    parse_playlist(&src)
}
