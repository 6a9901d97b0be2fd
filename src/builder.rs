use std::sync::Arc;
use crate::search::{AutoResolver, Resolver, SearchRouter};

pub struct SearchRouterBuilder {
    pub(crate) youtube: Arc<dyn Resolver>,
    pub(crate) soundcloud: Option<Arc<dyn Resolver>>,
    pub(crate) spotify: Option<Arc<dyn Resolver>>,
    pub(crate) generic: Option<Arc<dyn Resolver>>
}

impl SearchRouterBuilder {
    /// The youtube resolver is mandatory, it is the fallback of every search.
    pub fn new<R: Resolver>(youtube: R) -> Self {
        Self {
            youtube: Arc::new(youtube),
            soundcloud: None,
            spotify: None,
            generic: None
        }
    }

    pub fn set_soundcloud<R: Resolver>(&mut self, resolver: R) -> &mut Self {
        self.soundcloud = Some(Arc::new(resolver));
        self
    }

    pub fn set_spotify<R: Resolver>(&mut self, resolver: R) -> &mut Self {
        self.spotify = Some(Arc::new(resolver));
        self
    }

    /// Replaces the [`AutoResolver`] used by searches without a source.
    pub fn set_generic<R: Resolver>(&mut self, resolver: R) -> &mut Self {
        self.generic = Some(Arc::new(resolver));
        self
    }

    pub fn build(&self) -> SearchRouter {
        let generic = match &self.generic {
            Some(g) => Arc::clone(g),
            None => Arc::new(AutoResolver::new(
                Arc::clone(&self.youtube),
                self.soundcloud.clone(),
                self.spotify.clone()
            ))
        };

        SearchRouter {
            youtube: Arc::clone(&self.youtube),
            soundcloud: self.soundcloud.clone(),
            spotify: self.spotify.clone(),
            generic
        }
    }
}
