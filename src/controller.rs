//! The playback controller: playlist, active track and transport state.
//!
//! Everything runs on the host's event loop. Commands mutate state
//! directly; backend callbacks arrive on a channel and are drained, along
//! with due timers, by [`Controller::advance`].

mod keyboard;
mod player;
mod state;
mod timers;

pub use player::Controller;
pub use state::*;
pub use timers::Timing;
