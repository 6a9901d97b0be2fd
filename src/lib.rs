pub mod types;
pub mod error;
pub mod model;
pub mod player;
pub mod policy;
pub mod transport;
pub mod events;
pub mod search;
pub mod manager;
pub mod builder;
pub mod util;

pub use error::{CreationError, PlayerError, SearchError, TransportError};
pub use events::EventHandler;
pub use manager::Manager;
pub use model::{Queue, SearchResult, Thumbnail, Track, TrackPlaylist, TrackRequester};
pub use player::Player;
pub use search::{Resolver, SearchRouter, Source};
pub use transport::{Connector, Signal, SignalSender, Transport};
