use std::{collections::VecDeque, time::Duration};
use super::track::{SearchResult, Track, TrackPlaylist};

/// Pending tracks of a player plus the one playing and what already played.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    pub(crate) current: Option<Track>,
    pub(crate) upcoming: VecDeque<Track>,
    pub(crate) previous: Vec<Track>
}

/// Anything that can be appended to a [`Queue`].
pub enum QueueItem {
    Single(Track),
    Many(Vec<Track>)
}

impl From<Track> for QueueItem {
    fn from(track: Track) -> Self {
        QueueItem::Single(track)
    }
}

impl From<TrackPlaylist> for QueueItem {
    fn from(playlist: TrackPlaylist) -> Self {
        QueueItem::Many(playlist.tracks)
    }
}

impl From<SearchResult> for QueueItem {
    fn from(result: SearchResult) -> Self {
        match result {
            SearchResult::Track(t) => QueueItem::Single(t),
            SearchResult::Playlist(p) => p.into()
        }
    }
}

impl From<Vec<Track>> for QueueItem {
    fn from(tracks: Vec<Track>) -> Self {
        QueueItem::Many(tracks)
    }
}

impl Queue {
    pub fn new() -> Self {
        Default::default()
    }

    /// Removes the head of the upcoming tracks.
    pub fn shift(&mut self) -> Option<Track> {
        self.upcoming.pop_front()
    }

    /// Appends a track, or every member of a playlist in order.
    pub fn add(&mut self, item: impl Into<QueueItem>) {
        match item.into() {
            QueueItem::Single(track) => self.upcoming.push_back(track),
            QueueItem::Many(tracks) => self.upcoming.extend(tracks)
        }
    }

    /// Number of upcoming tracks, the current one is not counted.
    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    pub fn current(&self) -> Option<&Track> {
        self.current.as_ref()
    }

    pub fn set_current(&mut self, track: Option<Track>) -> Option<Track> {
        std::mem::replace(&mut self.current, track)
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &Track> {
        self.upcoming.iter()
    }

    pub fn previous(&self) -> &[Track] {
        &self.previous
    }

    pub fn remove(&mut self, index: usize) -> Option<Track> {
        self.upcoming.remove(index)
    }

    /// Drops every upcoming track, current and history are kept.
    pub fn clear(&mut self) {
        self.upcoming.clear();
    }

    pub fn total_duration(&self) -> Duration {
        self.upcoming.iter().map(|t| t.duration).sum()
    }

    /// Tracks held anywhere in the queue, history included.
    pub fn total_tracks(&self) -> usize {
        self.upcoming.len() + self.previous.len() + self.current.is_some() as usize
    }
}
