use async_trait::async_trait;
use tracing::debug_span;
use tracing_futures::Instrument;

use crate::{
    error::TransportError,
    model::track::Track,
    player::Player,
};
use std::sync::Arc;

#[async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Event that triggers when the transport starts playing the current track.
    async fn track_start(&self, _player: Arc<Player>, _track: Option<Track>) {}
    /// Event that triggers when a track finishes and another one is about to play.
    async fn track_end(&self, _player: Arc<Player>, _track: Track) {}
    /// Event that triggers when the queue ran out, the player is destroyed right after.
    async fn queue_end(&self, _player: Arc<Player>, _track: Option<Track>) {}
    /// Event triggered when the transport reports a failure. Queue state is left untouched.
    async fn player_error(&self, _player: Arc<Player>, _error: TransportError) {}
}

pub(crate) fn process(player: Arc<Player>, handler: Arc<dyn EventHandler>, event_type: EventType) {
    let span = debug_span!("event", guild = %player.guild(), kind = event_type.name());

    match event_type {
        EventType::TrackStart(track) => {
            tokio::spawn(async move {
                handler.track_start(player, track).await;
            }.instrument(span));
        },
        EventType::TrackEnd(track) => {
            tokio::spawn(async move {
                handler.track_end(player, track).await;
            }.instrument(span));
        },
        EventType::QueueEnd(track) => {
            tokio::spawn(async move {
                handler.queue_end(player, track).await;
            }.instrument(span));
        },
        EventType::PlayerError(e) => {
            tokio::spawn(async move {
                handler.player_error(player, e).await;
            }.instrument(span));
        }
    }
}

pub(crate) enum EventType {
    TrackStart(Option<Track>),
    TrackEnd(Track),
    QueueEnd(Option<Track>),
    PlayerError(TransportError)
}

impl EventType {
    fn name(&self) -> &'static str {
        match self {
            Self::TrackStart(_) => "track_start",
            Self::TrackEnd(_) => "track_end",
            Self::QueueEnd(_) => "queue_end",
            Self::PlayerError(_) => "player_error"
        }
    }
}
