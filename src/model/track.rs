use serde::{
    Serialize,
    Deserialize
};
use serenity::model::id::UserId as DiscordUserId;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct Thumbnail {
    pub url: String,
    pub width: u32,
    pub height: u32
}

impl Thumbnail {
    pub fn new(url: impl ToString, width: u32, height: u32) -> Self {
        Self {
            url: url.to_string(),
            width,
            height
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// A single resolved media item.
///
/// `requester`, `icon` and `thumbnail` stay empty until the track goes through
/// [`SearchRouter::search`], which fills them in.
///
/// [`SearchRouter::search`]: crate::search::SearchRouter::search
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub identifier: String,
    pub uri: String,
    pub title: String,
    pub author: String,
    pub duration: Duration,
    pub is_stream: bool,
    pub icons: Vec<Thumbnail>,
    pub thumbnails: Vec<Thumbnail>,
    pub icon: Option<Thumbnail>,
    pub thumbnail: Option<Thumbnail>,
    pub requester: Option<TrackRequester>
}

impl Track {
    pub fn new(identifier: impl ToString, title: impl ToString) -> Self {
        Self {
            identifier: identifier.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct TrackPlaylist {
    pub name: Option<String>,
    pub tracks: Vec<Track>
}

impl TrackPlaylist {
    pub fn new(name: Option<String>, tracks: Vec<Track>) -> Self {
        Self { name, tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Track> {
        self.tracks.iter_mut()
    }
}

impl IntoIterator for TrackPlaylist {
    type Item = Track;
    type IntoIter = std::vec::IntoIter<Track>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.into_iter()
    }
}

/// What a single search call produced. Callers match on the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Track(Track),
    Playlist(TrackPlaylist)
}

impl SearchResult {
    /// Returns `true` when there is no track at all to play.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Track(_) => false,
            Self::Playlist(p) => p.is_empty()
        }
    }

    /// First track of the result, used when only one hit is wanted.
    pub fn into_first(self) -> Option<Track> {
        match self {
            Self::Track(t) => Some(t),
            Self::Playlist(p) => p.tracks.into_iter().next()
        }
    }

    pub fn into_tracks(self) -> Vec<Track> {
        match self {
            Self::Track(t) => vec![t],
            Self::Playlist(p) => p.tracks
        }
    }
}

impl From<Track> for SearchResult {
    fn from(track: Track) -> SearchResult {
        SearchResult::Track(track)
    }
}

impl From<TrackPlaylist> for SearchResult {
    fn from(playlist: TrackPlaylist) -> SearchResult {
        SearchResult::Playlist(playlist)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TrackRequester {
    pub id: Option<DiscordUserId>,
    pub name: Option<String>
}

impl From<DiscordUserId> for TrackRequester {
    fn from(id: DiscordUserId) -> TrackRequester {
        TrackRequester{id: Some(id), name: None}
    }
}

impl From<String> for TrackRequester {
    fn from(name: String) -> TrackRequester {
        TrackRequester{id: None, name: Some(name)}
    }
}

impl From<&str> for TrackRequester {
    fn from(name: &str) -> TrackRequester {
        TrackRequester{id: None, name: Some(name.to_string())}
    }
}

impl From<(DiscordUserId, String)> for TrackRequester {
    fn from(data: (DiscordUserId, String)) -> TrackRequester {
        TrackRequester {id: Some(data.0), name: Some(data.1)}
    }
}

impl From<(u64, String)> for TrackRequester {
    fn from(data: (u64, String)) -> TrackRequester {
        // Zero is not a valid snowflake.
        let id = if data.0 == 0 { None } else { Some(DiscordUserId::new(data.0)) };
        TrackRequester{id, name: Some(data.1)}
    }
}
