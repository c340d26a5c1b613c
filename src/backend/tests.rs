use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use super::embed::volume_percent;
use super::local::local_path;
use super::video::{describe_error, event_for_state, player_params};
use super::*;
use crate::error::BackendError;
use crate::track::{BackendKind, TrackSource};

fn sink() -> (EventSink, Receiver<(SessionId, BackendEvent)>) {
    let (tx, rx) = mpsc::channel();
    (EventSink::new(SessionId(3), tx), rx)
}

fn options(autoplay: bool) -> BackendOptions {
    BackendOptions {
        autoplay,
        volume: 0.5,
        container: "player".into(),
    }
}

#[derive(Default)]
struct Recorded {
    calls: Vec<String>,
    requests: Vec<EmbedRequest>,
    signals: Vec<EmbedSignals>,
}

struct FakePlayer {
    log: Rc<RefCell<Recorded>>,
    time: f64,
    duration: f64,
}

impl EmbedPlayer for FakePlayer {
    fn play(&mut self) -> Result<(), BackendError> {
        self.log.borrow_mut().calls.push("play".into());
        Ok(())
    }
    fn pause(&mut self) -> Result<(), BackendError> {
        self.log.borrow_mut().calls.push("pause".into());
        Ok(())
    }
    fn stop(&mut self) {
        self.log.borrow_mut().calls.push("stop".into());
    }
    fn seek_to(&mut self, position: f64) {
        self.log.borrow_mut().calls.push(format!("seek:{position}"));
    }
    fn set_volume_percent(&mut self, percent: u8) {
        self.log.borrow_mut().calls.push(format!("volume:{percent}"));
    }
    fn current_time(&self) -> f64 {
        self.time
    }
    fn duration(&self) -> f64 {
        self.duration
    }
    fn destroy(&mut self) {
        self.log.borrow_mut().calls.push("destroy".into());
    }
}

struct FakeHost {
    log: Rc<RefCell<Recorded>>,
    loaded: bool,
    refuse: bool,
    time: f64,
    duration: f64,
}

impl FakeHost {
    fn new(log: Rc<RefCell<Recorded>>) -> Self {
        Self {
            log,
            loaded: true,
            refuse: false,
            time: 0.0,
            duration: 0.0,
        }
    }
}

impl EmbedHost for FakeHost {
    fn sdk_loaded(&self, _kind: BackendKind) -> bool {
        self.loaded
    }

    fn mount(
        &mut self,
        request: EmbedRequest,
        signals: EmbedSignals,
    ) -> Result<Box<dyn EmbedPlayer>, BackendError> {
        if self.refuse {
            return Err(BackendError::Runtime("container missing".into()));
        }
        let mut log = self.log.borrow_mut();
        log.requests.push(request);
        log.signals.push(signals);
        Ok(Box::new(FakePlayer {
            log: self.log.clone(),
            time: self.time,
            duration: self.duration,
        }))
    }
}

#[test]
fn video_state_codes_map_to_transport_events() {
    assert_eq!(event_for_state(0), Some(BackendEvent::Ended));
    assert_eq!(
        event_for_state(1),
        Some(BackendEvent::StateChanged(Transport::Playing))
    );
    assert_eq!(
        event_for_state(2),
        Some(BackendEvent::StateChanged(Transport::Paused))
    );
    for quiet in [-1, 3, 5] {
        assert_eq!(event_for_state(quiet), None);
    }
}

#[test]
fn video_error_codes_have_readable_reasons() {
    assert_eq!(describe_error(100), "video not found or private");
    assert_eq!(describe_error(150), describe_error(101));
    assert_eq!(describe_error(42), "video player error 42");
}

#[test]
fn video_params_follow_autoplay() {
    let params = player_params(true);
    assert!(params.contains(&("autoplay", "1".to_string())));
    assert!(params.contains(&("controls", "0".to_string())));
    assert!(params.contains(&("iv_load_policy", "3".to_string())));
    assert!(player_params(false).contains(&("autoplay", "0".to_string())));
}

#[test]
fn video_signals_forward_through_the_session_sink() {
    let (events, rx) = sink();
    let signals = VideoSignals::new(events);
    signals.on_ready();
    signals.on_state_change(3);
    signals.on_state_change(1);
    signals.on_error(2);

    let got: Vec<_> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            (SessionId(3), BackendEvent::Ready),
            (SessionId(3), BackendEvent::StateChanged(Transport::Playing)),
            (SessionId(3), BackendEvent::Error("invalid video id".into())),
        ]
    );
}

#[test]
fn widget_url_encodes_track_and_autoplay() {
    let url = widget_url("https://soundcloud.com/artist/song?x=1", false);
    assert!(url.starts_with(
        "https://w.soundcloud.com/player/?url=https%3A%2F%2Fsoundcloud.com%2Fartist%2Fsong%3Fx%3D1&"
    ));
    assert!(url.contains("&auto_play=false&"));
    assert!(url.ends_with("&visual=false"));
    assert!(widget_url("a", true).contains("auto_play=true"));
}

#[test]
fn widget_signals_map_finish_to_ended() {
    let (events, rx) = sink();
    let signals = WidgetSignals::new(events);
    signals.on_play();
    signals.on_pause();
    signals.on_finish();
    signals.on_error("  ");

    let got: Vec<_> = rx.try_iter().map(|(_, e)| e).collect();
    assert_eq!(
        got,
        vec![
            BackendEvent::StateChanged(Transport::Playing),
            BackendEvent::StateChanged(Transport::Paused),
            BackendEvent::Ended,
            BackendEvent::Error("audio widget error".into()),
        ]
    );
}

#[test]
fn volume_is_scaled_to_percent() {
    assert_eq!(volume_percent(0.0), 0);
    assert_eq!(volume_percent(0.56), 56);
    assert_eq!(volume_percent(1.0), 100);
    assert_eq!(volume_percent(3.0), 100);
    assert_eq!(volume_percent(-1.0), 0);
}

#[test]
fn video_backend_mounts_and_forwards_transport() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let mut host = FakeHost::new(log.clone());
    host.duration = 212.0;
    let (events, _rx) = sink();

    let mut backend =
        VideoEmbedBackend::mount(&mut host, "abc123", &options(false), events).unwrap();
    backend.play().unwrap();
    backend.seek(-4.0).unwrap();
    backend.set_volume(0.25).unwrap();
    assert_eq!(backend.duration(), 212.0);
    backend.stop();

    let log = log.borrow();
    assert!(matches!(
        &log.requests[0],
        EmbedRequest::Video { container, video_id, .. }
            if container == "player" && video_id == "abc123"
    ));
    assert!(matches!(log.signals[0], EmbedSignals::Video(_)));
    assert_eq!(log.calls, vec!["play", "seek:0", "volume:25", "stop", "destroy"]);
}

#[test]
fn widget_backend_converts_milliseconds() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let mut host = FakeHost::new(log.clone());
    host.time = 90_500.0;
    host.duration = 180_000.0;
    let (events, _rx) = sink();

    let mut backend =
        WidgetBackend::mount(&mut host, "https://soundcloud.com/a/b", &options(true), events)
            .unwrap();
    assert_eq!(backend.kind(), BackendKind::AudioEmbed);
    assert_eq!(backend.current_time(), 90.5);
    assert_eq!(backend.duration(), 180.0);
    backend.seek(12.25).unwrap();

    let log = log.borrow();
    assert!(matches!(
        &log.requests[0],
        EmbedRequest::Widget { src, .. } if src.contains("auto_play=true")
    ));
    assert_eq!(log.calls, vec!["seek:12250"]);
}

#[test]
fn mount_failure_becomes_init_error() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let mut host = FakeHost::new(log);
    host.refuse = true;
    let (events, _rx) = sink();

    let err = VideoEmbedBackend::mount(&mut host, "abc", &options(true), events)
        .err()
        .unwrap();
    assert_eq!(
        err,
        BackendError::init(BackendKind::Video, "container missing")
    );
}

#[test]
fn standard_backends_without_host_reject_embeds() {
    let mut factory = StandardBackends::new();
    assert!(factory.is_available(BackendKind::LocalAudio));
    assert!(!factory.is_available(BackendKind::Video));
    assert!(!factory.is_available(BackendKind::AudioEmbed));

    let (events, _rx) = sink();
    let source = TrackSource::VideoEmbed {
        video_id: "abc".into(),
    };
    let err = factory.create(&source, &options(true), events).err().unwrap();
    assert_eq!(err, BackendError::Unavailable(BackendKind::Video));
}

#[test]
fn standard_backends_report_host_sdk_state() {
    let log = Rc::new(RefCell::new(Recorded::default()));
    let mut host = FakeHost::new(log);
    host.loaded = false;
    let factory = StandardBackends::new().with_embed_host(Box::new(host));
    assert!(!factory.is_available(BackendKind::Video));
}

#[test]
fn local_path_strips_file_scheme() {
    assert_eq!(local_path("file:///music/a.mp3"), std::path::PathBuf::from("/music/a.mp3"));
    assert_eq!(local_path("/music/b.ogg"), std::path::PathBuf::from("/music/b.ogg"));
}
