#![allow(dead_code)]

use andelink_queue::{
    error::{ResolverResult, TransportResult},
    Connector, EventHandler, Player, Resolver, SearchResult, SignalSender, Track, Transport, TransportError,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serenity::model::id::{ChannelId, GuildId};
use std::{
    collections::HashMap,
    sync::Arc,
    time::Duration,
};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Default)]
pub struct TransportLog {
    pub plays: Vec<String>,
    pub stops: usize,
    pub destroys: usize,
}

pub struct MockTransport {
    log: Arc<Mutex<TransportLog>>,
    fail_play: bool,
}

#[async_trait]
impl Transport for MockTransport {
    async fn play(&self, track: &Track) -> TransportResult<()> {
        if self.fail_play {
            return Err(TransportError::Playback("decoder crashed".to_string()));
        }

        // Real transports await the voice socket here.
        tokio::task::yield_now().await;

        self.log.lock().plays.push(track.identifier.clone());
        Ok(())
    }

    async fn stop(&self) -> TransportResult<()> {
        self.log.lock().stops += 1;
        Ok(())
    }

    async fn destroy(&self) {
        self.log.lock().destroys += 1;
    }
}

#[derive(Clone, Default)]
pub struct MockConnector {
    pub logs: Arc<Mutex<HashMap<GuildId, Arc<Mutex<TransportLog>>>>>,
    pub signals: Arc<Mutex<HashMap<GuildId, SignalSender>>>,
    pub fail_connect: bool,
    pub fail_play: bool,
}

impl MockConnector {
    pub fn log(&self, guild: GuildId) -> Arc<Mutex<TransportLog>> {
        Arc::clone(&self.logs.lock()[&guild])
    }

    pub fn sender(&self, guild: GuildId) -> SignalSender {
        self.signals.lock()[&guild].clone()
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect(&self, guild: GuildId, _channel: ChannelId, signals: SignalSender) -> TransportResult<Arc<dyn Transport>> {
        if self.fail_connect {
            return Err(TransportError::Connection("voice server unreachable".to_string()));
        }

        let log = Arc::new(Mutex::new(TransportLog::default()));
        self.logs.lock().insert(guild, Arc::clone(&log));
        self.signals.lock().insert(guild, signals);

        Ok(Arc::new(MockTransport { log, fail_play: self.fail_play }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Start(GuildId, Option<String>),
    End(GuildId, String),
    QueueEnd(GuildId, Option<String>),
    Error(GuildId, TransportError),
}

pub struct Recorder {
    tx: UnboundedSender<Recorded>,
}

impl Recorder {
    pub fn new() -> (Self, UnboundedReceiver<Recorded>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl EventHandler for Recorder {
    async fn track_start(&self, player: Arc<Player>, track: Option<Track>) {
        let _ = self.tx.send(Recorded::Start(player.guild(), track.map(|t| t.identifier)));
    }

    async fn track_end(&self, player: Arc<Player>, track: Track) {
        let _ = self.tx.send(Recorded::End(player.guild(), track.identifier));
    }

    async fn queue_end(&self, player: Arc<Player>, track: Option<Track>) {
        let _ = self.tx.send(Recorded::QueueEnd(player.guild(), track.map(|t| t.identifier)));
    }

    async fn player_error(&self, player: Arc<Player>, error: TransportError) {
        let _ = self.tx.send(Recorded::Error(player.guild(), error));
    }
}

pub async fn next_event(rx: &mut UnboundedReceiver<Recorded>) -> Recorded {
    tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("timed out waiting for an event")
        .expect("event channel closed")
}

pub async fn assert_no_event(rx: &mut UnboundedReceiver<Recorded>) {
    let waited = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
    assert!(waited.is_err(), "unexpected event {:?}", waited);
}

pub struct Fixed(pub Option<SearchResult>);

#[async_trait]
impl Resolver for Fixed {
    async fn search(&self, _query: &str) -> ResolverResult<Option<SearchResult>> {
        Ok(self.0.clone())
    }
}

pub fn track(id: &str) -> Track {
    Track::new(id, id)
}
