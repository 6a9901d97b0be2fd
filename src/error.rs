use std::{
    error::Error,
    fmt::{
        Display,
        Formatter,
        Result,
    },
};
use serenity::model::id::GuildId as DiscordGuildId;

pub type TransportResult<T> = ::std::result::Result<T, TransportError>;

/// Failure reported by a voice transport, forwarded untouched to consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    Connection(String),
    Playback(String),
    Closed,
}

impl Error for TransportError {}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            TransportError::Connection(why) => write!(f, "Voice connection failed: {}", why),
            TransportError::Playback(why) => write!(f, "Playback failed: {}", why),
            TransportError::Closed => write!(f, "The voice session is already closed."),
        }
    }
}

pub type PlayerResult<T> = ::std::result::Result<T, PlayerError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerError {
    NothingToPlay,
    Destroyed,
    Transport(TransportError),
}

impl Error for PlayerError {}

impl Display for PlayerError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PlayerError::NothingToPlay => write!(f, "There is no current track to play."),
            PlayerError::Destroyed => write!(f, "The player was already destroyed."),
            PlayerError::Transport(e) => e.fmt(f),
        }
    }
}

impl From<TransportError> for PlayerError {
    fn from(e: TransportError) -> PlayerError {
        Self::Transport(e)
    }
}

pub type CreationResult<T> = ::std::result::Result<T, CreationError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CreationError {
    AlreadyExists(DiscordGuildId),
    Transport(TransportError),
}

impl Error for CreationError {}

impl Display for CreationError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            CreationError::AlreadyExists(guild) => write!(f, "Guild {} already has a player, destroy it first", guild),
            CreationError::Transport(e) => e.fmt(f),
        }
    }
}

impl From<TransportError> for CreationError {
    fn from(e: TransportError) -> CreationError {
        Self::Transport(e)
    }
}

pub type ResolverResult<T> = ::std::result::Result<T, ResolverError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ResolverError {
    Request(String),
    Unsupported(String),
}

impl Error for ResolverError {}

impl Display for ResolverError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            ResolverError::Request(why) => write!(f, "Resolver request failed: {}", why),
            ResolverError::Unsupported(query) => write!(f, "Resolver cannot handle query `{}`", query),
        }
    }
}

pub type RouterResult<T> = ::std::result::Result<T, SearchError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    NotFound,
    Resolver(ResolverError),
}

impl Error for SearchError {}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            SearchError::NotFound => write!(f, "No track found"),
            SearchError::Resolver(e) => e.fmt(f),
        }
    }
}

impl From<ResolverError> for SearchError {
    fn from(e: ResolverError) -> SearchError {
        Self::Resolver(e)
    }
}
