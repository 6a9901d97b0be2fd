use std::sync::{Arc, Weak};
use dashmap::mapref::entry::Entry;
use serenity::model::id::{
    ChannelId as DiscordChannelId,
    GuildId as DiscordGuildId
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, debug_span, info, warn};
use tracing_futures::Instrument;
use crate::{
    error::{CreationError, CreationResult, PlayerError, RouterResult},
    events::{process, EventHandler, EventType},
    model::track::{SearchResult, TrackRequester},
    player::Player,
    policy::{transition, Transition},
    search::{SearchRouter, Source},
    transport::{Connector, Envelope, Signal, SignalSender},
    types::Registry
};

/// Registry of every active [`Player`], one per guild.
///
/// Signals of a player are handled one at a time by a listener task spawned in
/// [`Manager::new_player`], so the queue of a guild only has a single writer.
#[non_exhaustive]
pub struct Manager {
    pub event_handler: Arc<dyn EventHandler>,
    pub connector: Arc<dyn Connector>,
    pub router: SearchRouter,
    players: Arc<Registry>,
    self_ref: Weak<Manager>
}

impl Manager {
    pub fn new<H: EventHandler, C: Connector>(handler: H, connector: C, router: SearchRouter) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            event_handler: Arc::new(handler),
            connector: Arc::new(connector),
            router,
            players: Arc::new(Registry::new()),
            self_ref: self_ref.clone()
        })
    }

    /// Connects to the voice channel and registers a player for the guild.
    ///
    /// A guild can only have one player, destroy the old one before creating another.
    pub async fn new_player(
        &self,
        guild: impl Into<DiscordGuildId>,
        voice_channel: impl Into<DiscordChannelId>,
        text_channel: impl Into<DiscordChannelId>
    ) -> CreationResult<Arc<Player>> {
        let guild: DiscordGuildId = guild.into();
        let voice_channel: DiscordChannelId = voice_channel.into();
        let text_channel: DiscordChannelId = text_channel.into();

        if self.players.contains_key(&guild) {
            return Err(CreationError::AlreadyExists(guild));
        }

        let (signals, receiver) = SignalSender::channel();
        let transport = self.connector.connect(guild, voice_channel, signals.clone()).await?;
        let player = Player::new(guild, voice_channel, text_channel, transport, signals, Arc::downgrade(&self.players));

        let registered = match self.players.entry(guild) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(Arc::clone(&player));
                true
            }
        };

        if !registered {
            // Lost a race against another creation for the same guild.
            player.destroy().await;

            return Err(CreationError::AlreadyExists(guild));
        }

        Self::listen(self.self_ref.clone(), Arc::clone(&player), receiver);

        info!("Player created for guild {} on channel {}", guild, voice_channel);

        Ok(player)
    }

    fn listen(manager: Weak<Manager>, player: Arc<Player>, mut receiver: UnboundedReceiver<Envelope>) {
        let span = debug_span!("player", guild = %player.guild());

        tokio::spawn(async move {
            loop {
                let envelope = tokio::select! {
                    biased;
                    _ = player.wait_destroyed() => break,
                    received = receiver.recv() => match received {
                        Some(e) => e,
                        None => break
                    }
                };

                let manager = match manager.upgrade() {
                    Some(m) => m,
                    None => break
                };

                manager.process_signal(&player, envelope.signal).await;

                if let Some(done) = envelope.done {
                    let _ = done.send(());
                }

                if player.is_destroyed() {
                    break;
                }
            }

            debug!("Signal listener stopped");
        }.instrument(span));
    }

    /// Applies a signal to the player of the guild, as if its transport had sent it.
    ///
    /// The signal is queued behind the ones the transport already sent and this
    /// resolves once it was handled. Returns `false` when the guild has no
    /// registered player.
    pub async fn handle_signal(&self, guild: impl Into<DiscordGuildId>, signal: Signal) -> bool {
        match self.get(guild) {
            Some(player) => {
                if !player.signals().send_and_wait(signal).await {
                    debug!("Player of guild {} stopped listening", player.guild());
                }
                true
            },
            None => false
        }
    }

    async fn process_signal(&self, player: &Arc<Player>, signal: Signal) {
        if player.is_destroyed() {
            debug!("Ignoring {:?} for destroyed player of guild {}", signal, player.guild());
            return;
        }

        let next = {
            let mut state = player.lock();
            transition(&mut state, signal)
        };

        match next {
            Transition::Start(track) => {
                self.dispatch(player, EventType::TrackStart(track));
            },
            Transition::RepeatTrack(track) | Transition::CycleQueue(track) => {
                self.dispatch(player, EventType::TrackEnd(track));
                self.play(player).await;
            },
            Transition::Advance(finished) => {
                if let Some(track) = finished {
                    self.dispatch(player, EventType::TrackEnd(track));
                }
                self.play(player).await;
            },
            Transition::QueueEnd(last) => {
                debug!("Queue of guild {} ended", player.guild());
                self.dispatch(player, EventType::QueueEnd(last));
                player.destroy().await;
            },
            Transition::Error(e) => {
                warn!("Transport of guild {} failed: {}", player.guild(), e);
                self.dispatch(player, EventType::PlayerError(e));
            }
        }
    }

    async fn play(&self, player: &Arc<Player>) {
        match player.play().await {
            Ok(()) => (),
            Err(PlayerError::Transport(e)) => self.dispatch(player, EventType::PlayerError(e)),
            Err(why) => warn!("Cannot play next track on guild {}: {}", player.guild(), why)
        }
    }

    fn dispatch(&self, player: &Arc<Player>, event: EventType) {
        process(Arc::clone(player), Arc::clone(&self.event_handler), event);
    }

    pub fn get(&self, guild: impl Into<DiscordGuildId>) -> Option<Arc<Player>> {
        let guild: DiscordGuildId = guild.into();

        self.players.get(&guild).map(|item| Arc::clone(item.value()))
    }

    /// Drops the guild's registry entry. The player itself is not torn down.
    pub fn destroy(&self, guild: impl Into<DiscordGuildId>) -> Option<Arc<Player>> {
        let guild: DiscordGuildId = guild.into();

        self.players.remove(&guild).map(|(_, player)| player)
    }

    pub fn get_playing_players(&self) -> Vec<Arc<Player>> {
        self.players.iter()
            .filter(|item| item.value().is_playing())
            .map(|item| Arc::clone(item.value()))
            .collect()
    }

    pub fn players_count(&self) -> usize {
        self.players.len()
    }

    pub async fn search(&self, query: &str, requester: impl Into<TrackRequester>, source: Option<Source>) -> RouterResult<SearchResult> {
        self.router.search(query, requester, source).await
    }
}

impl typemap_rev::TypeMapKey for Manager {
    type Value = Arc<Manager>;
}
