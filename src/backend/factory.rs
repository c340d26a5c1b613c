use log::debug;

use crate::error::BackendError;
use crate::track::{BackendKind, TrackSource};

use super::embed::EmbedHost;
use super::local::{LocalAudioBackend, LocalAudioOutput};
use super::types::{BackendFactory, BackendOptions, EventSink, PlaybackBackend};
use super::video::VideoEmbedBackend;
use super::widget::WidgetBackend;

/// Production factory: embeds go through the host, local files through
/// `rodio`.
#[derive(Default)]
pub struct StandardBackends {
    embeds: Option<Box<dyn EmbedHost>>,
    local: LocalAudioOutput,
}

impl StandardBackends {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_embed_host(mut self, host: Box<dyn EmbedHost>) -> Self {
        self.embeds = Some(host);
        self
    }
}

impl BackendFactory for StandardBackends {
    fn is_available(&self, kind: BackendKind) -> bool {
        match kind {
            BackendKind::LocalAudio => true,
            BackendKind::Video | BackendKind::AudioEmbed => {
                self.embeds.as_ref().is_some_and(|h| h.sdk_loaded(kind))
            }
        }
    }

    fn create(
        &mut self,
        source: &TrackSource,
        options: &BackendOptions,
        events: EventSink,
    ) -> Result<Box<dyn PlaybackBackend>, BackendError> {
        debug!("creating {} backend for {}", source.kind(), source.reference());
        match source {
            TrackSource::VideoEmbed { video_id } => {
                let host = self
                    .embeds
                    .as_deref_mut()
                    .ok_or(BackendError::Unavailable(BackendKind::Video))?;
                Ok(Box::new(VideoEmbedBackend::mount(
                    host, video_id, options, events,
                )?))
            }
            TrackSource::AudioEmbed { url } => {
                let host = self
                    .embeds
                    .as_deref_mut()
                    .ok_or(BackendError::Unavailable(BackendKind::AudioEmbed))?;
                Ok(Box::new(WidgetBackend::mount(host, url, options, events)?))
            }
            TrackSource::LocalAudio { url } => {
                let stream = self.local.stream()?;
                Ok(Box::new(LocalAudioBackend::open(
                    stream, url, options, events,
                )?))
            }
        }
    }
}
