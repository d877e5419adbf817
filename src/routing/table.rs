//! Route table module
//!
//! Implements path matching for the dispatcher.

/// Path prefix of the mock music API
pub const MUSIC_PROXY_PREFIX: &str = "/api/music-proxy";

/// Handler a request is dispatched to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// Mock search / url / lyric / passthrough endpoint
    MusicProxy,
    /// Files under the serving root
    Static,
}

/// Ordered list of path-prefix routes with a default target
///
/// Prefixes are plain string prefixes: `/api/music-proxy` also matches
/// `/api/music-proxy.json`.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<(String, RouteTarget)>,
    fallback: RouteTarget,
}

impl RouteTable {
    pub const fn new(fallback: RouteTarget) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// Append a route; earlier routes take priority
    #[must_use]
    pub fn route(mut self, prefix: impl Into<String>, target: RouteTarget) -> Self {
        self.routes.push((prefix.into(), target));
        self
    }

    /// Find the target for a request path
    pub fn resolve(&self, path: &str) -> RouteTarget {
        self.routes
            .iter()
            .find(|(prefix, _)| path.starts_with(prefix.as_str()))
            .map_or(self.fallback, |(_, target)| *target)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(RouteTarget::Static).route(MUSIC_PROXY_PREFIX, RouteTarget::MusicProxy)
    }
}
