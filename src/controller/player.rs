use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::backend::{
    BackendEvent, BackendFactory, BackendOptions, EventEnvelope, EventSink, PlaybackBackend,
    SessionId, Transport,
};
use crate::error::BackendError;
use crate::playlist::Playlist;
use crate::time::Progress;
use crate::track::Track;
use crate::views::ViewRecorder;

use super::state::{ControllerOptions, Level, Notice, PlayerState, RepeatMode, Status};
use super::timers::{Timers, Timing, countdown};

#[derive(Debug, Copy, Clone)]
enum Step {
    Next,
    Previous,
}

fn sanitize_seconds(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Owns the playlist, the active backend and all transport state.
pub struct Controller {
    state: PlayerState,
    playlist: Playlist,
    /// The active track; may be an ad-hoc track outside the playlist.
    current: Option<Track>,
    backend: Option<Box<dyn PlaybackBackend>>,
    session: SessionId,
    play_on_ready: bool,
    /// Set when a track ran out and playback settled at its start.
    finished: bool,
    factory: Box<dyn BackendFactory>,
    views: Box<dyn ViewRecorder>,
    events_tx: Sender<EventEnvelope>,
    events_rx: Receiver<EventEnvelope>,
    timers: Timers,
    timing: Timing,
    volume_step: f32,
    container: String,
    notices: VecDeque<Notice>,
}

impl Controller {
    pub fn new(
        factory: Box<dyn BackendFactory>,
        views: Box<dyn ViewRecorder>,
        options: ControllerOptions,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            state: PlayerState::new(&options),
            playlist: Playlist::default(),
            current: None,
            backend: None,
            session: SessionId::default(),
            play_on_ready: options.autoplay,
            finished: false,
            factory,
            views,
            events_tx,
            events_rx,
            timers: Timers::default(),
            timing: options.timing,
            volume_step: options.volume_step,
            container: options.container,
            notices: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            elapsed: self.state.position,
            total: self.state.duration,
        }
    }

    /// Drain queued user-visible notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Replace the playlist and start the track at `start` (clamped).
    pub fn load_playlist(&mut self, tracks: Vec<Track>, start: usize) {
        self.playlist.replace(tracks, start);
        info!(
            "playlist loaded with {} tracks, starting at {:?}",
            self.playlist.len(),
            self.playlist.index()
        );
        match self.playlist.current().cloned() {
            Some(track) => self.load(track, self.state.autoplay),
            None => debug!("empty playlist, nothing to play"),
        }
    }

    /// Select a playlist entry and load it. Returns false when out of range.
    pub fn play_index(&mut self, index: usize) -> bool {
        if !self.playlist.select(index) {
            return false;
        }
        if let Some(track) = self.playlist.current().cloned() {
            self.load(track, self.state.autoplay);
        }
        true
    }

    /// Load `track` as the active track, honouring the autoplay flag.
    pub fn load_track(&mut self, track: Track) {
        self.load(track, self.state.autoplay);
    }

    pub fn play_video(
        &mut self,
        video_id: impl Into<String>,
        title: impl Into<String>,
        thumbnail: Option<String>,
    ) {
        self.play_adhoc(Track::video(video_id, title), thumbnail);
    }

    pub fn play_audio_embed(
        &mut self,
        url: impl Into<String>,
        title: impl Into<String>,
        thumbnail: Option<String>,
    ) {
        self.play_adhoc(Track::audio_embed(url, title), thumbnail);
    }

    pub fn play_local(
        &mut self,
        url: impl Into<String>,
        title: impl Into<String>,
        thumbnail: Option<String>,
    ) {
        self.play_adhoc(Track::local_audio(url, title), thumbnail);
    }

    /// Ad-hoc tracks play immediately and leave the playlist untouched.
    fn play_adhoc(&mut self, track: Track, thumbnail: Option<String>) {
        let track = match thumbnail {
            Some(t) => track.with_thumbnail(t),
            None => track,
        };
        self.load(track, true);
    }

    pub fn toggle_play_pause(&mut self) {
        match self.state.status {
            Status::Idle | Status::Loading => {
                debug!("play/pause ignored while {:?}", self.state.status)
            }
            Status::Playing => self.pause_playback(),
            Status::Paused if self.finished => self.reload_current(),
            Status::Paused => self.start_playback(),
            Status::Ended => self.reload_current(),
        }
    }

    /// Jump to `fraction` of the current duration. Play/pause state is kept.
    pub fn seek(&mut self, fraction: f64) {
        if matches!(self.state.status, Status::Idle | Status::Loading) {
            debug!("seek ignored while {:?}", self.state.status);
            return;
        }
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let duration = sanitize_seconds(backend.duration());
        let target = duration * fraction;
        match backend.seek(target) {
            Ok(()) => {
                self.state.duration = duration;
                self.state.position = target;
            }
            // The backend keeps playing from where it was.
            Err(e) => {
                error!("{e}");
                self.notify(Level::Error, e.to_string());
            }
        }
    }

    pub fn next(&mut self) {
        self.step(Step::Next);
    }

    pub fn previous(&mut self) {
        self.step(Step::Previous);
    }

    /// Set the volume, clamped to `[0, 1]`; NaN counts as silence.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 1.0)
        };
        self.state.volume = volume;
        if self.state.status == Status::Loading {
            // Applied on ready.
            return;
        }
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.set_volume(volume) {
                warn!("could not set volume: {e}");
            }
        }
    }

    /// Slider input, 0..=100.
    pub fn set_volume_percent(&mut self, percent: i32) {
        self.set_volume(percent.clamp(0, 100) as f32 / 100.0);
    }

    pub fn volume_up(&mut self) {
        self.set_volume(self.state.volume + self.volume_step);
    }

    pub fn volume_down(&mut self) {
        self.set_volume(self.state.volume - self.volume_step);
    }

    /// Mute, remembering the current volume, or restore it.
    pub fn toggle_mute(&mut self) {
        if self.state.volume == 0.0 {
            let restore = self.state.muted_volume.take().unwrap_or(1.0);
            self.set_volume(restore);
        } else {
            self.state.muted_volume = Some(self.state.volume);
            self.set_volume(0.0);
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
        let message = if self.state.shuffle {
            "Shuffle on"
        } else {
            "Shuffle off"
        };
        self.notify(Level::Info, message);
    }

    pub fn cycle_repeat(&mut self) {
        self.state.repeat = self.state.repeat.cycle();
        let message = match self.state.repeat {
            RepeatMode::Off => "Repeat off",
            RepeatMode::One => "Repeating current track",
            RepeatMode::All => "Repeating playlist",
        };
        self.notify(Level::Info, message);
    }

    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.state.autoplay = autoplay;
    }

    pub fn toggle_fullscreen(&mut self) {
        if !self.state.visible {
            return;
        }
        self.state.fullscreen = !self.state.fullscreen;
    }

    /// Stop playback, release the backend and hide the player.
    pub fn close(&mut self) {
        info!("closing player");
        self.release();
        self.current = None;
        self.state.backend = None;
        self.state.position = 0.0;
        self.state.duration = 0.0;
        self.state.visible = false;
        self.state.fullscreen = false;
        self.set_status(Status::Idle);
    }

    /// Host clock tick: deliver backend events, then fire due timers.
    pub fn advance(&mut self, dt: Duration) {
        self.pump();
        if let Some(backend) = self.backend.as_mut() {
            backend.poll();
        }
        self.pump();

        if countdown(&mut self.timers.ready_poll, dt) {
            self.poll_readiness();
        }
        if countdown(&mut self.timers.ready_deadline, dt) && self.state.status == Status::Loading
        {
            self.ready_timed_out();
        }
        if countdown(&mut self.timers.repeat_reload, dt) {
            debug!("repeat delay elapsed, replaying");
            self.reload_current();
        }
        if countdown(&mut self.timers.progress, dt) {
            self.refresh_progress();
        }
    }

    fn pump(&mut self) {
        while let Ok((session, event)) = self.events_rx.try_recv() {
            if session != self.session {
                debug!("dropping {event:?} from released backend");
                continue;
            }
            self.on_backend_event(event);
        }
    }

    fn on_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Ready => self.on_ready(),
            BackendEvent::StateChanged(Transport::Playing) => {
                if matches!(self.state.status, Status::Paused | Status::Playing) {
                    self.finished = false;
                    self.set_status(Status::Playing);
                }
            }
            BackendEvent::StateChanged(Transport::Paused) => {
                if self.state.status == Status::Playing {
                    self.set_status(Status::Paused);
                }
            }
            BackendEvent::Ended => {
                if matches!(self.state.status, Status::Playing | Status::Paused) {
                    self.on_ended();
                }
            }
            BackendEvent::Error(reason) => self.on_backend_error(reason),
        }
    }

    fn on_ready(&mut self) {
        if self.state.status != Status::Loading {
            debug!("ready ignored while {:?}", self.state.status);
            return;
        }
        let volume = self.state.volume;
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        self.timers.ready_deadline = None;
        if let Err(e) = backend.set_volume(volume) {
            warn!("could not apply volume on ready: {e}");
        }
        self.state.duration = sanitize_seconds(backend.duration());

        if self.play_on_ready {
            self.start_playback();
        } else {
            self.set_status(Status::Paused);
        }
    }

    fn on_ended(&mut self) {
        info!("track ended, repeat {}", self.state.repeat);
        self.set_status(Status::Ended);
        match self.state.repeat {
            RepeatMode::One => {
                self.timers.repeat_reload = Some(self.timing.repeat_one_delay);
            }
            RepeatMode::All => {
                if !self.step(Step::Next) {
                    self.settle_at_start();
                }
            }
            RepeatMode::Off => {
                let advanced =
                    self.state.autoplay && !self.playlist.is_last() && self.step(Step::Next);
                if !advanced {
                    self.settle_at_start();
                }
            }
        }
    }

    fn on_backend_error(&mut self, reason: String) {
        match (self.state.status, self.state.backend) {
            (Status::Idle, _) => debug!("error ignored while idle: {reason}"),
            (Status::Loading, Some(kind)) => {
                self.release();
                self.fail(BackendError::Init { kind, reason });
            }
            _ => self.fail(BackendError::Runtime(reason)),
        }
    }

    fn step(&mut self, step: Step) -> bool {
        let target = if self.state.shuffle {
            self.playlist.random_index(&mut rand::rng())
        } else {
            match step {
                Step::Next => self.playlist.next_index(),
                Step::Previous => self.playlist.previous_index(),
            }
        };
        match target {
            Some(index) => self.play_index(index),
            None => {
                debug!("playlist empty, {step:?} ignored");
                false
            }
        }
    }

    fn load(&mut self, track: Track, autoplay: bool) {
        self.release();
        let kind = track.kind();
        info!("loading {kind} track {:?}", track.title);

        self.state.visible = true;
        self.state.backend = Some(kind);
        self.state.position = 0.0;
        self.state.duration = 0.0;
        self.set_status(Status::Loading);
        self.play_on_ready = autoplay;

        if let Some(id) = track.id {
            self.views.record_view(id);
        }
        self.current = Some(track);
        self.timers.ready_deadline = Some(self.timing.ready_timeout);

        if self.factory.is_available(kind) {
            self.create_backend();
        } else {
            debug!("{kind} player not loaded yet, polling");
            self.timers.ready_poll = Some(self.timing.ready_poll_interval);
        }
    }

    fn reload_current(&mut self) {
        if let Some(track) = self.current.clone() {
            self.load(track, true);
        }
    }

    fn create_backend(&mut self) {
        let Some(track) = self.current.as_ref() else {
            return;
        };
        let options = BackendOptions {
            autoplay: self.play_on_ready,
            volume: self.state.volume,
            container: self.container.clone(),
        };
        let events = EventSink::new(self.session, self.events_tx.clone());
        match self.factory.create(&track.source, &options, events) {
            Ok(backend) => self.backend = Some(backend),
            Err(e) => self.fail(e),
        }
    }

    fn poll_readiness(&mut self) {
        if self.state.status != Status::Loading || self.backend.is_some() {
            return;
        }
        let Some(kind) = self.state.backend else {
            return;
        };
        if self.factory.is_available(kind) {
            debug!("{kind} player loaded");
            self.create_backend();
        } else {
            self.timers.ready_poll = Some(self.timing.ready_poll_interval);
        }
    }

    fn ready_timed_out(&mut self) {
        let Some(kind) = self.state.backend else {
            return;
        };
        self.release();
        self.fail(BackendError::Timeout(kind));
    }

    fn start_playback(&mut self) {
        let result = match self.backend.as_mut() {
            Some(backend) => backend.play(),
            None => return,
        };
        match result {
            Ok(()) => {
                self.finished = false;
                self.set_status(Status::Playing);
            }
            Err(e) => self.fail(e),
        }
    }

    fn pause_playback(&mut self) {
        let result = match self.backend.as_mut() {
            Some(backend) => backend.pause(),
            None => return,
        };
        match result {
            Ok(()) => self.set_status(Status::Paused),
            Err(e) => self.fail(e),
        }
    }

    fn refresh_progress(&mut self) {
        if self.state.status != Status::Playing {
            return;
        }
        if let Some(backend) = self.backend.as_ref() {
            self.state.position = sanitize_seconds(backend.current_time());
            self.state.duration = sanitize_seconds(backend.duration());
        }
        self.timers.progress = Some(self.timing.progress_interval);
    }

    /// Track ran out without advancing: rest paused at the start.
    fn settle_at_start(&mut self) {
        self.finished = true;
        self.state.position = 0.0;
        self.set_status(Status::Paused);
    }

    /// Report `err` once and leave a well-defined state: `Paused` when the
    /// backend survives, `Idle` otherwise.
    fn fail(&mut self, err: BackendError) {
        error!("{err}");
        self.notify(Level::Error, err.to_string());
        self.timers.clear();
        if self.backend.is_some() {
            self.set_status(Status::Paused);
        } else {
            self.current = None;
            self.state.backend = None;
            self.set_status(Status::Idle);
        }
    }

    /// Stop and detach the active backend. Bumping the session makes any
    /// event it still emits stale.
    fn release(&mut self) {
        if let Some(mut backend) = self.backend.take() {
            debug!("releasing {} backend", backend.kind());
            backend.stop();
        }
        self.session = self.session.next();
        self.timers.clear();
        self.finished = false;
    }

    fn set_status(&mut self, status: Status) {
        if self.state.status != status {
            debug!("{:?} -> {status:?}", self.state.status);
        }
        self.state.status = status;
        if status == Status::Playing {
            if self.timers.progress.is_none() {
                self.timers.progress = Some(self.timing.progress_interval);
            }
        } else {
            self.timers.progress = None;
        }
    }

    fn notify(&mut self, level: Level, message: impl Into<String>) {
        self.notices.push_back(Notice {
            level,
            message: message.into(),
        });
    }
}
