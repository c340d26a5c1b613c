//! Playback controller for an embeddable media player.
//!
//! A [`Controller`](controller::Controller) owns a playlist and a single
//! active track, and drives one of three backends (video embed, audio
//! embed, local audio) through a uniform adapter contract. Hosts construct
//! the controller explicitly, feed it clock ticks and key presses, and read
//! back its state and notices.

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod keys;
pub mod library;
pub mod playlist;
pub mod time;
pub mod track;
pub mod views;
