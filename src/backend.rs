//! Backend adapters behind a uniform playback contract.
//!
//! Each adapter is created for one track and torn down when the track
//! changes. Adapters report back through an [`EventSink`] stamped with the
//! session they were created for; the controller ignores events from any
//! session other than the active one.

mod embed;
mod factory;
mod local;
mod types;
mod video;
mod widget;

pub use embed::{EmbedHost, EmbedPlayer, EmbedRequest, EmbedSignals};
pub use factory::StandardBackends;
pub use local::{LocalAudioBackend, LocalAudioOutput};
pub use types::*;
pub use video::{VideoEmbedBackend, VideoSignals};
pub use widget::{WidgetBackend, WidgetSignals, widget_url};

#[cfg(test)]
mod tests;
