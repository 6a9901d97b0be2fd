use parking_lot::Mutex;
use serenity::model::id::{
    ChannelId as DiscordChannelId,
    GuildId as DiscordGuildId
};
use std::sync::{
    Arc,
    Weak,
    atomic::{AtomicBool, Ordering}
};
use tokio::sync::Notify;
use tracing::{debug, info};
use crate::{
    error::{PlayerError, PlayerResult},
    model::{player::PlayerState, queue::QueueItem, track::Track},
    transport::{SignalSender, Transport},
    types::Registry
};

/// One guild's voice session together with its queue.
///
/// The player derefs to the lock guarding its [`PlayerState`], so the queue
/// and flags can be inspected with `player.lock()`. Never hold that guard
/// across an `.await`.
pub struct Player {
    inner: Mutex<PlayerState>,
    guild: DiscordGuildId,
    voice_channel: DiscordChannelId,
    text_channel: DiscordChannelId,
    transport: Arc<dyn Transport>,
    signals: SignalSender,
    shutdown: Notify,
    destroyed: AtomicBool,
    registry: Weak<Registry>
}

impl std::ops::Deref for Player {
    type Target = Mutex<PlayerState>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("guild", &self.guild)
            .field("voice_channel", &self.voice_channel)
            .field("text_channel", &self.text_channel)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

impl Player {
    pub(crate) fn new(
        guild: DiscordGuildId,
        voice_channel: DiscordChannelId,
        text_channel: DiscordChannelId,
        transport: Arc<dyn Transport>,
        signals: SignalSender,
        registry: Weak<Registry>
    ) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(PlayerState::default()),
            guild,
            voice_channel,
            text_channel,
            transport,
            signals,
            shutdown: Notify::new(),
            destroyed: AtomicBool::new(false),
            registry
        })
    }

    /// Same channel the transport reports to.
    pub(crate) fn signals(&self) -> &SignalSender {
        &self.signals
    }

    /// Resolves once [`Player::destroy`] was called.
    pub(crate) async fn wait_destroyed(&self) {
        self.shutdown.notified().await
    }

    pub fn guild(&self) -> DiscordGuildId {
        self.guild
    }

    pub fn voice_channel(&self) -> DiscordChannelId {
        self.voice_channel
    }

    pub fn text_channel(&self) -> DiscordChannelId {
        self.text_channel
    }

    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Clone of the track currently held by the queue.
    pub fn current(&self) -> Option<Track> {
        self.lock().queue.current.clone()
    }

    pub fn set_track_repeat(&self, repeat: bool) {
        self.lock().track_repeat = repeat;
    }

    pub fn set_queue_repeat(&self, repeat: bool) {
        self.lock().queue_repeat = repeat;
    }

    /// Tells the transport to stream the current track of the queue.
    pub async fn play(&self) -> PlayerResult<()> {
        if self.is_destroyed() {
            return Err(PlayerError::Destroyed);
        }

        let track = match self.current() {
            Some(t) => t,
            None => return Err(PlayerError::NothingToPlay)
        };

        debug!("Guild {} playing {}", self.guild, track.identifier);

        self.transport.play(&track).await?;

        Ok(())
    }

    /// Adds the item to the queue, starting playback if nothing is current.
    pub async fn queue(&self, item: impl Into<QueueItem>) -> PlayerResult<()> {
        if self.is_destroyed() {
            return Err(PlayerError::Destroyed);
        }

        let should_start = {
            let mut state = self.lock();

            state.queue.add(item);

            if state.queue.current.is_none() {
                state.queue.current = state.queue.shift();
                state.queue.current.is_some()
            } else {
                false
            }
        };

        if should_start {
            self.play().await?;
        }

        Ok(())
    }

    /// Stops the current track, the transport's finish signal then moves the queue on.
    pub async fn skip(&self) -> PlayerResult<()> {
        if self.is_destroyed() {
            return Err(PlayerError::Destroyed);
        }

        self.transport.stop().await?;

        Ok(())
    }

    /// Releases the voice session and drops the player from its manager.
    ///
    /// Only the first call has any effect.
    pub async fn destroy(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }

        {
            let mut state = self.lock();
            state.playing = false;
            state.paused = false;
        }

        self.shutdown.notify_one();
        self.transport.destroy().await;

        if let Some(registry) = self.registry.upgrade() {
            registry.remove_if(&self.guild, |_, registered| std::ptr::eq(registered.as_ref(), self));
        }

        info!("Player of guild {} destroyed", self.guild);
    }
}
