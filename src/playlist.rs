//! Ordered tracks with a current-index pointer.
//!
//! The index always points at a valid entry while the playlist is
//! non-empty and rests at 0 when it is empty.

use rand::Rng;

use crate::track::Track;

#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<Track>,
    index: usize,
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { index.min(len - 1) }
}

impl Playlist {
    pub fn new(tracks: Vec<Track>, start: usize) -> Self {
        let index = clamp_index(start, tracks.len());
        Self { tracks, index }
    }

    /// Replace the whole playlist; `start` is clamped into range.
    pub fn replace(&mut self, tracks: Vec<Track>, start: usize) {
        self.index = clamp_index(start, tracks.len());
        self.tracks = tracks;
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Current index, or `None` for an empty playlist.
    pub fn index(&self) -> Option<usize> {
        (!self.tracks.is_empty()).then_some(self.index)
    }

    pub fn current(&self) -> Option<&Track> {
        self.tracks.get(self.index)
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Point at `index`. Returns false and leaves the playlist untouched
    /// when the index is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.index = index;
            true
        } else {
            false
        }
    }

    pub fn next_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        (len > 0).then(|| (self.index + 1) % len)
    }

    pub fn previous_index(&self) -> Option<usize> {
        let len = self.tracks.len();
        (len > 0).then(|| (self.index + len - 1) % len)
    }

    /// Uniform pick over the whole playlist. The current index is not
    /// excluded, so the same track may come up again.
    pub fn random_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        let len = self.tracks.len();
        (len > 0).then(|| rng.random_range(0..len))
    }

    pub fn is_last(&self) -> bool {
        !self.tracks.is_empty() && self.index + 1 >= self.tracks.len()
    }
}
