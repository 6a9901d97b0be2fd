use async_trait::async_trait;
use serenity::model::id::{
    ChannelId as DiscordChannelId,
    GuildId as DiscordGuildId
};
use tokio::sync::{
    mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    oneshot
};
use std::sync::Arc;
use crate::{
    error::{TransportError, TransportResult},
    model::track::Track
};

/// Lifecycle signal raised by a transport for the player it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Audible playback of the current track has begun.
    Ready,
    /// The current track is exhausted and the transport is idle.
    Finish,
    Error(TransportError)
}

/// A queued signal, `done` fires once the manager has handled it.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub(crate) signal: Signal,
    pub(crate) done: Option<oneshot::Sender<()>>
}

/// Handle given to a transport so it can report [`Signal`]s.
///
/// Signals of one player are processed in the order they are sent.
#[derive(Debug, Clone)]
pub struct SignalSender {
    inner: UnboundedSender<Envelope>
}

impl SignalSender {
    pub(crate) fn channel() -> (Self, UnboundedReceiver<Envelope>) {
        let (tx, rx) = unbounded_channel();

        (Self { inner: tx }, rx)
    }

    /// Sends a signal, returns `false` if the player is gone.
    pub fn send(&self, signal: Signal) -> bool {
        self.inner.send(Envelope { signal, done: None }).is_ok()
    }

    /// Queues a signal behind the pending ones and resolves once it was handled.
    ///
    /// Returns `false` if the player stopped listening before handling it.
    pub(crate) async fn send_and_wait(&self, signal: Signal) -> bool {
        let (tx, rx) = oneshot::channel();

        if self.inner.send(Envelope { signal, done: Some(tx) }).is_err() {
            return false;
        }

        rx.await.is_ok()
    }

    pub fn ready(&self) -> bool {
        self.send(Signal::Ready)
    }

    pub fn finish(&self) -> bool {
        self.send(Signal::Finish)
    }

    pub fn error(&self, error: TransportError) -> bool {
        self.send(Signal::Error(error))
    }
}

/// Voice session of a single guild.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Starts streaming the given track, replacing whatever is playing.
    async fn play(&self, track: &Track) -> TransportResult<()>;
    /// Stops the current track; the transport is expected to signal `Finish`.
    async fn stop(&self) -> TransportResult<()>;
    /// Releases the voice session. No signal may follow.
    async fn destroy(&self);
}

/// Opens transports for new players.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, guild: DiscordGuildId, channel: DiscordChannelId, signals: SignalSender) -> TransportResult<Arc<dyn Transport>>;
}
