use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::{str::FromStr, sync::Arc};
use tracing::{debug, warn};
use crate::{
    builder::SearchRouterBuilder,
    error::{ResolverError, ResolverResult, RouterResult, SearchError},
    model::track::{SearchResult, Track, TrackRequester},
    util::reduce_thumbnails
};

lazy_static!(
    static ref URL_REGEX: Regex = Regex::new(r"^https?://.+").unwrap();
    static ref SOUNDCLOUD_REGEX: Regex = Regex::new(r"^https?://(?:www\.|m\.|on\.)?(?:soundcloud\.com|snd\.sc)/").unwrap();
    static ref SPOTIFY_REGEX: Regex = Regex::new(r"^(?:https?://open\.spotify\.com/|spotify:)").unwrap();
);

/// Content source a search can be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    SoundCloud,
    Spotify,
    YouTube
}

impl FromStr for Source {
    type Err = ResolverError;

    fn from_str(s: &str) -> ResolverResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "soundcloud" => Ok(Self::SoundCloud),
            "spotify" => Ok(Self::Spotify),
            "youtube" => Ok(Self::YouTube),
            _ => Err(ResolverError::Unsupported(s.to_string()))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SoundCloud => write!(f, "soundcloud"),
            Self::Spotify => write!(f, "spotify"),
            Self::YouTube => write!(f, "youtube")
        }
    }
}

/// External service turning a query into tracks.
#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    /// Free text search, `None` when nothing matched.
    async fn search(&self, query: &str) -> ResolverResult<Option<SearchResult>>;

    /// Loads a direct link. Defaults to a plain search.
    async fn load(&self, url: &str) -> ResolverResult<Option<SearchResult>> {
        self.search(url).await
    }
}

/// Resolver used when no source is given: links go to the service they point
/// at, everything else is searched on youtube.
pub struct AutoResolver {
    youtube: Arc<dyn Resolver>,
    soundcloud: Option<Arc<dyn Resolver>>,
    spotify: Option<Arc<dyn Resolver>>
}

impl AutoResolver {
    pub fn new(youtube: Arc<dyn Resolver>, soundcloud: Option<Arc<dyn Resolver>>, spotify: Option<Arc<dyn Resolver>>) -> Self {
        Self { youtube, soundcloud, spotify }
    }

    fn for_link(&self, url: &str) -> &Arc<dyn Resolver> {
        if SOUNDCLOUD_REGEX.is_match(url) {
            if let Some(ref r) = self.soundcloud { return r; }
        }

        if SPOTIFY_REGEX.is_match(url) {
            if let Some(ref r) = self.spotify { return r; }
        }

        &self.youtube
    }
}

#[async_trait]
impl Resolver for AutoResolver {
    async fn search(&self, query: &str) -> ResolverResult<Option<SearchResult>> {
        if is_link(query) {
            self.for_link(query).load(query).await
        } else {
            self.youtube.search(query).await
        }
    }
}

/// Whether the query is a direct link rather than free text.
pub fn is_link(query: &str) -> bool {
    URL_REGEX.is_match(query) || SPOTIFY_REGEX.is_match(query)
}

/// Sends searches to the right [`Resolver`] and normalizes what comes back.
pub struct SearchRouter {
    pub(crate) youtube: Arc<dyn Resolver>,
    pub(crate) soundcloud: Option<Arc<dyn Resolver>>,
    pub(crate) spotify: Option<Arc<dyn Resolver>>,
    pub(crate) generic: Arc<dyn Resolver>
}

impl SearchRouter {
    pub fn builder<R: Resolver>(youtube: R) -> SearchRouterBuilder {
        SearchRouterBuilder::new(youtube)
    }

    fn resolver_for(&self, source: Option<Source>) -> Option<&Arc<dyn Resolver>> {
        match source {
            Some(Source::SoundCloud) => self.soundcloud.as_ref(),
            Some(Source::Spotify) => self.spotify.as_ref(),
            Some(Source::YouTube) => Some(&self.youtube),
            None => Some(&self.generic)
        }
    }

    /// Resolves the query, falling back to the first youtube hit.
    ///
    /// Every returned track carries `requester` and has its icon and thumbnail
    /// reduced to a single image.
    pub async fn search(&self, query: &str, requester: impl Into<TrackRequester>, source: Option<Source>) -> RouterResult<SearchResult> {
        let requester = requester.into();

        let primary = match self.resolver_for(source) {
            Some(resolver) => match resolver.search(query).await {
                Ok(found) => found,
                Err(why) => {
                    warn!("Resolver for {:?} failed on `{}`: {}", source, query, why);
                    None
                }
            },
            None => {
                debug!("No resolver configured for {:?}", source);
                None
            }
        };

        let found = match primary.filter(|r| !r.is_empty()) {
            Some(result) => result,
            None => {
                debug!("Falling back to youtube for `{}`", query);

                self.youtube.search(query).await?
                    .and_then(SearchResult::into_first)
                    .map(SearchResult::Track)
                    .ok_or(SearchError::NotFound)?
            }
        };

        Ok(normalize(found, &requester))
    }
}

fn normalize(result: SearchResult, requester: &TrackRequester) -> SearchResult {
    match result {
        SearchResult::Track(mut track) => {
            normalize_track(&mut track, requester);
            SearchResult::Track(track)
        },
        SearchResult::Playlist(mut playlist) => {
            playlist.iter_mut().for_each(|t| normalize_track(t, requester));
            SearchResult::Playlist(playlist)
        }
    }
}

fn normalize_track(track: &mut Track, requester: &TrackRequester) {
    track.requester = Some(requester.clone());
    track.icon = reduce_thumbnails(&track.icons);
    track.thumbnail = reduce_thumbnails(&track.thumbnails);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::track::{Thumbnail, TrackPlaylist};
    use parking_lot::Mutex;

    struct Fixed {
        result: Option<SearchResult>,
        calls: Arc<Mutex<Vec<String>>>
    }

    impl Fixed {
        fn new(result: Option<SearchResult>) -> (Self, Arc<Mutex<Vec<String>>>) {
            let calls = Arc::new(Mutex::new(Vec::new()));
            (Self { result, calls: Arc::clone(&calls) }, calls)
        }
    }

    #[async_trait]
    impl Resolver for Fixed {
        async fn search(&self, query: &str) -> ResolverResult<Option<SearchResult>> {
            self.calls.lock().push(format!("search:{}", query));
            Ok(self.result.clone())
        }

        async fn load(&self, url: &str) -> ResolverResult<Option<SearchResult>> {
            self.calls.lock().push(format!("load:{}", url));
            Ok(self.result.clone())
        }
    }

    struct Failing;

    #[async_trait]
    impl Resolver for Failing {
        async fn search(&self, _query: &str) -> ResolverResult<Option<SearchResult>> {
            Err(ResolverError::Request("503".to_string()))
        }
    }

    fn track(id: &str) -> Track {
        let mut t = Track::new(id, id);
        t.icons = vec![Thumbnail::new("icon-s", 32, 32), Thumbnail::new("icon-l", 256, 256)];
        t.thumbnails = vec![Thumbnail::new("thumb-l", 1280, 720), Thumbnail::new("thumb-s", 120, 90)];
        t
    }

    #[tokio::test]
    async fn youtube_link_is_normalized() {
        let (youtube, _) = Fixed::new(Some(track("x").into()));
        let router = SearchRouter::builder(youtube).build();

        let result = router.search("https://youtu.be/x", "alice", Some(Source::YouTube)).await;

        match result {
            Ok(SearchResult::Track(t)) => {
                assert_eq!(t.requester, Some(TrackRequester::from("alice")));
                assert_eq!(t.icon.map(|i| i.url), Some("icon-l".to_string()));
                assert_eq!(t.thumbnail.map(|i| i.url), Some("thumb-l".to_string()));
            },
            other => panic!("expected a track, got {:?}", other)
        }
    }

    #[tokio::test]
    async fn playlist_members_are_normalized() {
        let playlist = TrackPlaylist::new(Some("mix".to_string()), vec![track("a"), track("b")]);
        let (youtube, _) = Fixed::new(None);
        let (soundcloud, _) = Fixed::new(Some(playlist.into()));
        let router = SearchRouter::builder(youtube).set_soundcloud(soundcloud).build();

        let result = router.search("some set", "bob", Some(Source::SoundCloud)).await;

        match result {
            Ok(SearchResult::Playlist(p)) => {
                assert_eq!(p.len(), 2);
                for t in p.iter() {
                    assert_eq!(t.requester, Some(TrackRequester::from("bob")));
                    assert_eq!(t.icon.as_ref().map(|i| i.url.as_str()), Some("icon-l"));
                    assert_eq!(t.thumbnail.as_ref().map(|i| i.url.as_str()), Some("thumb-l"));
                }
            },
            other => panic!("expected a playlist, got {:?}", other)
        }
    }

    #[tokio::test]
    async fn nothing_found_anywhere() {
        let (youtube, calls) = Fixed::new(None);
        let router = SearchRouter::builder(youtube).build();

        let result = router.search("no such song", "alice", None).await;

        assert_eq!(result, Err(SearchError::NotFound));
        assert_eq!(*calls.lock(), vec!["search:no such song", "search:no such song"]);
    }

    #[tokio::test]
    async fn empty_source_falls_back_to_first_youtube_hit() {
        let hits = TrackPlaylist::new(None, vec![track("first"), track("second")]);
        let (youtube, _) = Fixed::new(Some(hits.into()));
        let (spotify, spotify_calls) = Fixed::new(Some(TrackPlaylist::default().into()));
        let mut builder = SearchRouter::builder(youtube);
        builder.set_spotify(spotify);
        let router = builder.build();

        let result = router.search("song", "alice", Some(Source::Spotify)).await;

        match result {
            Ok(SearchResult::Track(t)) => assert_eq!(t.identifier, "first"),
            other => panic!("expected a track, got {:?}", other)
        }
        assert_eq!(spotify_calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn unconfigured_source_falls_back() {
        let (youtube, calls) = Fixed::new(Some(track("yt").into()));
        let router = SearchRouter::builder(youtube).build();

        let result = router.search("song", "alice", Some(Source::SoundCloud)).await;

        assert!(matches!(result, Ok(SearchResult::Track(ref t)) if t.identifier == "yt"));
        assert_eq!(*calls.lock(), vec!["search:song"]);
    }

    #[tokio::test]
    async fn failing_source_falls_back() {
        let (youtube, _) = Fixed::new(Some(track("yt").into()));
        let mut builder = SearchRouter::builder(youtube);
        builder.set_soundcloud(Failing);
        let router = builder.build();

        let result = router.search("song", "alice", Some(Source::SoundCloud)).await;

        assert!(matches!(result, Ok(SearchResult::Track(ref t)) if t.identifier == "yt"));
    }

    #[tokio::test]
    async fn failing_fallback_is_surfaced() {
        let router = SearchRouter::builder(Failing).build();

        let result = router.search("song", "alice", Some(Source::YouTube)).await;

        assert_eq!(result, Err(SearchError::Resolver(ResolverError::Request("503".to_string()))));
    }

    #[tokio::test]
    async fn auto_resolver_routes_links() {
        let (youtube, youtube_calls) = Fixed::new(Some(track("yt").into()));
        let (soundcloud, soundcloud_calls) = Fixed::new(Some(track("sc").into()));
        let mut builder = SearchRouter::builder(youtube);
        builder.set_soundcloud(soundcloud);
        let router = builder.build();

        let link = "https://soundcloud.com/artist/song";
        let result = router.search(link, "alice", None).await;
        assert!(matches!(result, Ok(SearchResult::Track(ref t)) if t.identifier == "sc"));

        let result = router.search("free text", "alice", None).await;
        assert!(matches!(result, Ok(SearchResult::Track(ref t)) if t.identifier == "yt"));

        assert_eq!(*soundcloud_calls.lock(), vec![format!("load:{}", link)]);
        assert_eq!(*youtube_calls.lock(), vec!["search:free text".to_string()]);
    }

    #[test]
    fn detects_links() {
        assert!(is_link("https://www.youtube.com/watch?v=x"));
        assert!(is_link("http://example.com/x"));
        assert!(is_link("spotify:track:abc"));
        assert!(!is_link("never gonna give you up"));
        assert!(!is_link("https://"));
    }

    #[test]
    fn parses_sources() {
        assert_eq!("SoundCloud".parse::<Source>(), Ok(Source::SoundCloud));
        assert_eq!("youtube".parse::<Source>(), Ok(Source::YouTube));
        assert!("bandcamp".parse::<Source>().is_err());
    }
}
