//! Fire-and-forget view counting.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::track::TrackId;

/// Notified when a track with an id starts loading.
///
/// Implementations must not block and must swallow their own failures;
/// view counting never affects playback.
pub trait ViewRecorder {
    fn record_view(&self, id: TrackId);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopViewRecorder;

impl ViewRecorder for NoopViewRecorder {
    fn record_view(&self, id: TrackId) {
        debug!("view for track {id} not recorded, no endpoint configured");
    }
}

fn endpoint(base_url: &str, id: TrackId) -> String {
    format!(
        "{}/ajax/increment-view/{id}/",
        base_url.trim_end_matches('/')
    )
}

/// POSTs to `<base_url>/ajax/increment-view/<id>/` from one background
/// worker. Requests queue up in order; the worker exits once the recorder
/// is dropped and the queue is drained.
#[derive(Debug)]
pub struct HttpViewRecorder {
    base_url: String,
    tx: Sender<TrackId>,
}

impl HttpViewRecorder {
    pub fn new(
        base_url: impl Into<String>,
        csrf_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let base_url = base_url.into();
        let (tx, rx) = mpsc::channel();
        let worker_base = base_url.clone();
        thread::spawn(move || post_views(client, worker_base, csrf_token, rx));
        Ok(Self { base_url, tx })
    }

    pub fn endpoint(&self, id: TrackId) -> String {
        endpoint(&self.base_url, id)
    }
}

fn post_views(
    client: reqwest::blocking::Client,
    base_url: String,
    csrf_token: Option<String>,
    rx: Receiver<TrackId>,
) {
    for id in rx {
        let url = endpoint(&base_url, id);
        let mut request = client.post(&url);
        if let Some(token) = &csrf_token {
            request = request.header("X-CSRFToken", token);
        }
        match request.send().and_then(|r| r.error_for_status()) {
            Ok(_) => debug!("recorded view at {url}"),
            Err(e) => warn!("failed to record view at {url}: {e}"),
        }
    }
    debug!("view recorder stopped");
}

impl ViewRecorder for HttpViewRecorder {
    fn record_view(&self, id: TrackId) {
        if self.tx.send(id).is_err() {
            warn!("view worker gone, view for track {id} dropped");
        }
    }
}
