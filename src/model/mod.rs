pub mod track;
pub mod queue;
pub mod player;

pub use track::{SearchResult, Thumbnail, Track, TrackPlaylist, TrackRequester};
pub use queue::{Queue, QueueItem};
pub use player::PlayerState;
