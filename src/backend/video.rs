use log::warn;

use crate::error::BackendError;
use crate::track::BackendKind;

use super::embed::{EmbedHost, EmbedPlayer, EmbedRequest, EmbedSignals, volume_percent};
use super::types::{BackendEvent, BackendOptions, EventSink, PlaybackBackend, Transport};

const STATE_ENDED: i32 = 0;
const STATE_PLAYING: i32 = 1;
const STATE_PAUSED: i32 = 2;

/// Player parameters: no native controls, no related videos, minimal
/// branding, annotations hidden.
pub(crate) fn player_params(autoplay: bool) -> Vec<(&'static str, String)> {
    vec![
        ("autoplay", if autoplay { "1" } else { "0" }.to_string()),
        ("controls", "0".to_string()),
        ("rel", "0".to_string()),
        ("showinfo", "0".to_string()),
        ("modestbranding", "1".to_string()),
        ("iv_load_policy", "3".to_string()),
    ]
}

/// Unstarted (-1), buffering (3) and cued (5) carry no transport change.
pub(crate) fn event_for_state(code: i32) -> Option<BackendEvent> {
    match code {
        STATE_ENDED => Some(BackendEvent::Ended),
        STATE_PLAYING => Some(BackendEvent::StateChanged(Transport::Playing)),
        STATE_PAUSED => Some(BackendEvent::StateChanged(Transport::Paused)),
        _ => None,
    }
}

pub(crate) fn describe_error(code: i32) -> String {
    match code {
        2 => "invalid video id".to_string(),
        5 => "the video cannot be played in this player".to_string(),
        100 => "video not found or private".to_string(),
        101 | 150 => "the owner does not allow embedding".to_string(),
        other => format!("video player error {other}"),
    }
}

/// Translates the video SDK's `onReady` / `onStateChange` / `onError`
/// callbacks into backend events.
#[derive(Debug, Clone)]
pub struct VideoSignals {
    events: EventSink,
}

impl VideoSignals {
    pub(crate) fn new(events: EventSink) -> Self {
        Self { events }
    }

    pub fn on_ready(&self) {
        self.events.ready();
    }

    pub fn on_state_change(&self, code: i32) {
        if let Some(event) = event_for_state(code) {
            self.events.emit(event);
        }
    }

    pub fn on_error(&self, code: i32) {
        self.events.error(describe_error(code));
    }
}

pub struct VideoEmbedBackend {
    player: Box<dyn EmbedPlayer>,
}

impl VideoEmbedBackend {
    pub fn mount(
        host: &mut dyn EmbedHost,
        video_id: &str,
        options: &BackendOptions,
        events: EventSink,
    ) -> Result<Self, BackendError> {
        let request = EmbedRequest::Video {
            container: options.container.clone(),
            video_id: video_id.to_string(),
            params: player_params(options.autoplay),
        };
        let player = host
            .mount(request, EmbedSignals::Video(VideoSignals::new(events)))
            .map_err(|e| match e {
                BackendError::Runtime(reason) => BackendError::init(BackendKind::Video, reason),
                other => other,
            })?;
        Ok(Self { player })
    }
}

impl PlaybackBackend for VideoEmbedBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Video
    }

    fn play(&mut self) -> Result<(), BackendError> {
        self.player.play()
    }

    fn pause(&mut self) -> Result<(), BackendError> {
        self.player.pause()
    }

    fn stop(&mut self) {
        self.player.stop();
        self.player.destroy();
    }

    fn seek(&mut self, seconds: f64) -> Result<(), BackendError> {
        self.player.seek_to(seconds.max(0.0));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), BackendError> {
        self.player.set_volume_percent(volume_percent(volume));
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.player.current_time()
    }

    fn duration(&self) -> f64 {
        let d = self.player.duration();
        if d.is_finite() {
            d
        } else {
            warn!("video player reported a non-finite duration");
            0.0
        }
    }
}
