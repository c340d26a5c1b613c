//! Local audio adapter on top of `rodio`.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::error::BackendError;
use crate::track::BackendKind;

use super::types::{BackendOptions, EventSink, PlaybackBackend};

/// Lazily opened audio output shared by every local track.
#[derive(Default)]
pub struct LocalAudioOutput {
    stream: Option<OutputStream>,
}

impl LocalAudioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stream(&mut self) -> Result<&OutputStream, BackendError> {
        if self.stream.is_none() {
            let mut stream = OutputStreamBuilder::open_default_stream().map_err(|e| {
                BackendError::init(BackendKind::LocalAudio, format!("no audio output: {e}"))
            })?;
            // rodio logs to stderr on drop, which tears through a raw-mode terminal.
            stream.log_on_drop(false);
            self.stream = Some(stream);
        }
        self.stream
            .as_ref()
            .ok_or_else(|| BackendError::init(BackendKind::LocalAudio, "no audio output"))
    }
}

pub(crate) fn local_path(url: &str) -> PathBuf {
    PathBuf::from(url.strip_prefix("file://").unwrap_or(url))
}

pub struct LocalAudioBackend {
    sink: Sink,
    duration: f64,
    events: EventSink,
    ended_sent: bool,
}

impl LocalAudioBackend {
    /// Decode `url` into a paused sink. Emits `Ready` once the sink is
    /// primed.
    pub fn open(
        stream: &OutputStream,
        url: &str,
        options: &BackendOptions,
        events: EventSink,
    ) -> Result<Self, BackendError> {
        let path = local_path(url);
        let file = File::open(&path).map_err(|e| {
            BackendError::init(BackendKind::LocalAudio, format!("{}: {e}", path.display()))
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| {
            BackendError::init(BackendKind::LocalAudio, format!("{}: {e}", path.display()))
        })?;
        let duration = source
            .total_duration()
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);

        let sink = Sink::connect_new(stream.mixer());
        sink.set_volume(options.volume.clamp(0.0, 1.0));
        sink.append(source);
        sink.pause();
        debug!("opened {} ({duration:.1}s)", path.display());

        events.ready();
        Ok(Self {
            sink,
            duration,
            events,
            ended_sent: false,
        })
    }
}

impl PlaybackBackend for LocalAudioBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::LocalAudio
    }

    fn play(&mut self) -> Result<(), BackendError> {
        self.sink.play();
        self.events.playing();
        Ok(())
    }

    fn pause(&mut self) -> Result<(), BackendError> {
        self.sink.pause();
        self.events.paused();
        Ok(())
    }

    fn stop(&mut self) {
        self.sink.stop();
    }

    fn seek(&mut self, seconds: f64) -> Result<(), BackendError> {
        let target = Duration::from_secs_f64(seconds.max(0.0));
        self.sink
            .try_seek(target)
            .map_err(|e| BackendError::Runtime(format!("seek failed: {e}")))
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), BackendError> {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
        Ok(())
    }

    fn current_time(&self) -> f64 {
        self.sink.get_pos().as_secs_f64()
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn poll(&mut self) {
        if !self.ended_sent && !self.sink.is_paused() && self.sink.empty() {
            self.ended_sent = true;
            self.events.ended();
        }
    }
}
