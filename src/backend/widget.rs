use crate::error::BackendError;
use crate::track::BackendKind;

use super::embed::{EmbedHost, EmbedPlayer, EmbedRequest, EmbedSignals, volume_percent};
use super::types::{BackendOptions, EventSink, PlaybackBackend};

const WIDGET_BASE: &str = "https://w.soundcloud.com/player/";

/// Build the audio widget's iframe source for a public track URL.
pub fn widget_url(track_url: &str, autoplay: bool) -> String {
    format!(
        "{WIDGET_BASE}?url={}&auto_play={autoplay}&hide_related=true&show_comments=false&show_user=false&show_reposts=false&visual=false",
        urlencoding::encode(track_url)
    )
}

/// Translates the audio widget's `READY`, `PLAY`, `PAUSE`, `FINISH` and
/// `ERROR` events.
#[derive(Debug, Clone)]
pub struct WidgetSignals {
    events: EventSink,
}

impl WidgetSignals {
    pub(crate) fn new(events: EventSink) -> Self {
        Self { events }
    }

    pub fn on_ready(&self) {
        self.events.ready();
    }

    pub fn on_play(&self) {
        self.events.playing();
    }

    pub fn on_pause(&self) {
        self.events.paused();
    }

    pub fn on_finish(&self) {
        self.events.ended();
    }

    pub fn on_error(&self, message: &str) {
        let message = message.trim();
        if message.is_empty() {
            self.events.error("audio widget error");
        } else {
            self.events.error(message);
        }
    }
}

/// Audio embed adapter. The widget works in milliseconds.
pub struct WidgetBackend {
    player: Box<dyn EmbedPlayer>,
}

impl WidgetBackend {
    pub fn mount(
        host: &mut dyn EmbedHost,
        track_url: &str,
        options: &BackendOptions,
        events: EventSink,
    ) -> Result<Self, BackendError> {
        let request = EmbedRequest::Widget {
            container: options.container.clone(),
            src: widget_url(track_url, options.autoplay),
        };
        let player = host
            .mount(request, EmbedSignals::Widget(WidgetSignals::new(events)))
            .map_err(|e| match e {
                BackendError::Runtime(reason) => {
                    BackendError::init(BackendKind::AudioEmbed, reason)
                }
                other => other,
            })?;
        Ok(Self { player })
    }
}

impl PlaybackBackend for WidgetBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::AudioEmbed
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
        self.player.seek_to((seconds.max(0.0) * 1000.0).round());
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), BackendError> {
        self.player.set_volume_percent(volume_percent(volume));
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.player.current_time() / 1000.0
    }

    fn duration(&self) -> f64 {
        let ms = self.player.duration();
        if ms.is_finite() { ms / 1000.0 } else { 0.0 }
    }
}
