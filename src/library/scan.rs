use std::path::Path;
use std::time::Duration;

use log::debug;
use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;
use crate::time::format_duration;
use crate::track::Track;

pub(super) fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

pub(super) fn display_title(title: &str, artist: Option<&str>) -> String {
    match artist.map(str::trim) {
        Some(a) if !a.is_empty() => format!("{a} - {title}"),
        _ => title.to_string(),
    }
}

struct Tags {
    title: Option<String>,
    artist: Option<String>,
    duration: Option<Duration>,
}

fn non_blank(value: Option<std::borrow::Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn read_tags(path: &Path) -> Tags {
    let tagged = match lofty::read_from_path(path) {
        Ok(tagged) => tagged,
        Err(e) => {
            debug!("no tags for {}: {e}", path.display());
            return Tags {
                title: None,
                artist: None,
                duration: None,
            };
        }
    };
    let duration = Some(tagged.properties().duration()).filter(|d| !d.is_zero());
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag());
    Tags {
        title: tag.and_then(|t| non_blank(t.title())),
        artist: tag.and_then(|t| non_blank(t.artist())),
        duration,
    }
}

/// Collect local audio files under `dir` as playable tracks, sorted by
/// title (case-insensitive). Unreadable entries are skipped.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    let mut tracks: Vec<Track> = walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .filter(|e| is_audio_file(e.path(), settings))
        .map(|entry| {
            let path = entry.path();
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("UNKNOWN");
            let tags = read_tags(path);
            let title = display_title(
                tags.title.as_deref().unwrap_or(stem),
                tags.artist.as_deref(),
            );

            let track = Track::local_audio(path.to_string_lossy(), title);
            match tags.duration {
                Some(d) => track.with_duration_label(format_duration(d)),
                None => track,
            }
        })
        .collect();

    tracks.sort_by_key(|t| t.title.to_lowercase());
    debug!("scanned {} tracks under {}", tracks.len(), dir.display());
    tracks
}
