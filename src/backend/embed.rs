//! Seam to the hosting page's embed SDKs.

use crate::error::BackendError;
use crate::track::BackendKind;

use super::video::VideoSignals;
use super::widget::WidgetSignals;

/// Raw handle to a mounted embed, in the SDK's native units.
///
/// The video SDK works in seconds and volume 0..100; the audio widget in
/// milliseconds and volume 0..100.
pub trait EmbedPlayer {
    fn play(&mut self) -> Result<(), BackendError>;
    fn pause(&mut self) -> Result<(), BackendError>;
    fn stop(&mut self);
    fn seek_to(&mut self, position: f64);
    fn set_volume_percent(&mut self, percent: u8);
    fn current_time(&self) -> f64;
    fn duration(&self) -> f64;
    /// Remove the embed from the page and drop its listeners.
    fn destroy(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum EmbedRequest {
    Video {
        container: String,
        video_id: String,
        params: Vec<(&'static str, String)>,
    },
    Widget {
        container: String,
        src: String,
    },
}

/// Callback translators handed to the host together with a mount request.
#[derive(Debug, Clone)]
pub enum EmbedSignals {
    Video(VideoSignals),
    Widget(WidgetSignals),
}

pub trait EmbedHost {
    /// Whether the SDK script for `kind` has finished loading.
    fn sdk_loaded(&self, kind: BackendKind) -> bool;

    fn mount(
        &mut self,
        request: EmbedRequest,
        signals: EmbedSignals,
    ) -> Result<Box<dyn EmbedPlayer>, BackendError>;
}

pub(super) fn volume_percent(volume: f32) -> u8 {
    (volume.clamp(0.0, 1.0) * 100.0).round() as u8
}
