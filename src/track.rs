//! Playable items and the loose record shape pages hand over.
//!
//! A `Track` carries exactly one backend reference, encoded as a
//! `TrackSource` variant. `TrackRecord` is the permissive input form and is
//! converted once, at the edge, with `Track::try_from`.

mod model;
mod record;

pub use model::*;
pub use record::*;
