//! The adapter contract and the event channel back to the controller.

use std::sync::mpsc::Sender;

use log::debug;

use crate::error::BackendError;
use crate::track::{BackendKind, TrackSource};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transport {
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// The backend can accept transport commands.
    Ready,
    StateChanged(Transport),
    Ended,
    Error(String),
}

/// Identifies one backend lifetime. A new session starts on every track
/// change and on close.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SessionId(pub(crate) u64);

impl SessionId {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// An event tagged with the session that emitted it.
pub type EventEnvelope = (SessionId, BackendEvent);

/// Per-session handle adapters use to report events.
#[derive(Debug, Clone)]
pub struct EventSink {
    session: SessionId,
    tx: Sender<EventEnvelope>,
}

impl EventSink {
    pub(crate) fn new(session: SessionId, tx: Sender<EventEnvelope>) -> Self {
        Self { session, tx }
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn emit(&self, event: BackendEvent) {
        if self.tx.send((self.session, event)).is_err() {
            debug!("controller dropped, discarding backend event");
        }
    }

    pub fn ready(&self) {
        self.emit(BackendEvent::Ready);
    }

    pub fn playing(&self) {
        self.emit(BackendEvent::StateChanged(Transport::Playing));
    }

    pub fn paused(&self) {
        self.emit(BackendEvent::StateChanged(Transport::Paused));
    }

    pub fn ended(&self) {
        self.emit(BackendEvent::Ended);
    }

    pub fn error(&self, reason: impl Into<String>) {
        self.emit(BackendEvent::Error(reason.into()));
    }
}

/// Settings handed to an adapter when it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendOptions {
    pub autoplay: bool,
    /// Initial volume in `[0, 1]`.
    pub volume: f32,
    /// Host element the embed mounts into.
    pub container: String,
}

/// Uniform transport surface every adapter implements.
///
/// Times are in seconds. Adapters translate to whatever unit their
/// technology uses.
pub trait PlaybackBackend {
    fn kind(&self) -> BackendKind;
    fn play(&mut self) -> Result<(), BackendError>;
    fn pause(&mut self) -> Result<(), BackendError>;
    /// Stop playback and detach from the underlying player.
    fn stop(&mut self);
    fn seek(&mut self, seconds: f64) -> Result<(), BackendError>;
    fn set_volume(&mut self, volume: f32) -> Result<(), BackendError>;
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    /// Called on every controller tick. Adapters without callbacks detect
    /// state changes here.
    fn poll(&mut self) {}
}

/// Creates adapters for tracks.
pub trait BackendFactory {
    /// Whether the technology for `kind` is loaded and can create players.
    fn is_available(&self, kind: BackendKind) -> bool {
        let _ = kind;
        true
    }

    fn create(
        &mut self,
        source: &TrackSource,
        options: &BackendOptions,
        events: EventSink,
    ) -> Result<Box<dyn PlaybackBackend>, BackendError>;
}
