//! Navigation engine.
//!
//! # Responsibilities
//! - Match a target path against the compiled table
//! - Resolve the matched view, loading lazily through the cache
//! - Commit the result to the current-route slot
//! - Notify listeners of committed navigations
//!
//! # Design Decisions
//! - Last navigation wins: every call takes a sequence number at entry;
//!   a result whose sequence is no longer the latest settles as
//!   `Superseded` without touching the current route
//! - The current-route slot is an `ArcSwapOption`, so reads never lock
//! - Listeners run synchronously, in registration order, only for
//!   committed navigations
//! - Failures leave the router in its last-good state

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use serde::Serialize;
use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::pattern::normalize_path;
use crate::routing::table::{RouteDef, RouteTable};
use crate::view::cache::ViewCache;
use crate::view::loader::{ViewId, ViewLoadError, ViewRef};

/// Outcome of a committed navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    /// The full concrete path that matched, normalized.
    pub matched_path: String,

    /// The resolved view, post-load for deferred routes.
    pub view: ViewId,

    /// Parameter bindings extracted from the path.
    pub params: HashMap<String, String>,
}

/// Why a navigation did not commit.
#[derive(Debug, Error)]
pub enum NavigationError {
    /// The target is not a well-formed path.
    #[error("malformed path {path:?}: {reason}")]
    MalformedPath { path: String, reason: &'static str },

    /// No declared route matches the target.
    #[error("no route matches {path:?}")]
    NoMatch { path: String },

    /// The matched route's deferred loader failed. The route is not
    /// poisoned; a later navigation retries the load.
    #[error("view load failed for {path:?}")]
    ViewLoad {
        path: String,
        #[source]
        source: ViewLoadError,
    },

    /// A later navigation was issued before this one settled. Bookkeeping
    /// rather than a fault: the result was discarded, the current route
    /// and listeners untouched.
    #[error("navigation {seq} superseded by navigation {latest}")]
    Superseded { seq: u64, latest: u64 },
}

/// Policy for paths no declared route matches.
#[derive(Debug, Clone)]
pub enum MatchPolicy {
    /// Surface `NoMatch`.
    Strict,

    /// Resolve to a fixed fallback view with empty params.
    Fallback(ViewId),
}

type Listener = Arc<dyn Fn(&ResolvedRoute) + Send + Sync>;

/// Handle returned by [`Router::register_listener`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle(u64);

/// The navigation engine. One per application instance.
///
/// The route table is immutable after construction; all runtime mutation
/// is confined to the current-route slot, the view-load cache, and the
/// listener registry.
pub struct Router {
    table: RouteTable,
    policy: MatchPolicy,
    cache: ViewCache,
    current: ArcSwapOption<ResolvedRoute>,
    seq: AtomicU64,
    commit: Mutex<()>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener: AtomicU64,
}

impl Router {
    /// Create a router with strict matching.
    pub fn new(table: RouteTable) -> Self {
        Self::with_policy(table, MatchPolicy::Strict)
    }

    pub fn with_policy(table: RouteTable, policy: MatchPolicy) -> Self {
        Self {
            table,
            policy,
            cache: ViewCache::new(),
            current: ArcSwapOption::empty(),
            seq: AtomicU64::new(0),
            commit: Mutex::new(()),
            listeners: Mutex::new(Vec::new()),
            next_listener: AtomicU64::new(0),
        }
    }

    /// Build a router from a declarative table, validating it first.
    pub fn from_config(config: &RouterConfig) -> Result<Self, Vec<ValidationError>> {
        validate_config(config)?;
        let defs: Vec<RouteDef> = config.routes.iter().map(RouteDef::from).collect();
        let table = RouteTable::compile(defs).map_err(|e| vec![ValidationError::from(e)])?;
        let policy = match (config.strict_match, &config.fallback_view) {
            (true, _) => MatchPolicy::Strict,
            (false, Some(view)) => MatchPolicy::Fallback(view.as_str().into()),
            (false, None) => return Err(vec![ValidationError::MissingFallback]),
        };
        Ok(Self::with_policy(table, policy))
    }

    /// Resolve `path` and, unless a later navigation has been issued in
    /// the meantime, install the result as the current route.
    ///
    /// The only suspension point is a deferred view load.
    pub async fn navigate(&self, path: &str) -> Result<Arc<ResolvedRoute>, NavigationError> {
        // Precondition checks happen before a sequence number is taken:
        // malformed input is not an issued navigation and must not
        // supersede one already in flight.
        if !path.starts_with('/') {
            return Err(NavigationError::MalformedPath {
                path: path.to_string(),
                reason: "missing leading slash",
            });
        }
        if path.contains("://") {
            return Err(NavigationError::MalformedPath {
                path: path.to_string(),
                reason: "embedded scheme",
            });
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let matched = match self.table.lookup(path) {
            Some(matched) => matched,
            None => match &self.policy {
                MatchPolicy::Fallback(view) => {
                    tracing::debug!(path, seq, "no route matched, resolving fallback view");
                    let resolved = Arc::new(ResolvedRoute {
                        matched_path: normalize_path(path),
                        view: view.clone(),
                        params: HashMap::new(),
                    });
                    return self.commit(seq, resolved);
                }
                MatchPolicy::Strict => {
                    tracing::debug!(path, seq, "no route matched");
                    return Err(NavigationError::NoMatch {
                        path: path.to_string(),
                    });
                }
            },
        };

        let view = match matched.view.clone() {
            ViewRef::Eager(view) => view,
            ViewRef::Deferred(loader) => self
                .cache
                .get_or_load(matched.route_id, &loader)
                .await
                .map_err(|source| NavigationError::ViewLoad {
                    path: path.to_string(),
                    source,
                })?,
        };

        let resolved = Arc::new(ResolvedRoute {
            matched_path: matched.matched_path,
            view,
            params: matched.params,
        });
        self.commit(seq, resolved)
    }

    /// The last committed route, or `None` before the first successful
    /// navigation.
    pub fn current_route(&self) -> Option<Arc<ResolvedRoute>> {
        self.current.load_full()
    }

    /// Register a callback invoked after every committed navigation, in
    /// registration order. Mutations made during a notification take
    /// effect from the next navigation.
    pub fn register_listener<F>(&self, listener: F) -> ListenerHandle
    where
        F: Fn(&ResolvedRoute) + Send + Sync + 'static,
    {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed) + 1;
        self.listeners
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(listener)));
        ListenerHandle(id)
    }

    /// Remove a listener. Returns whether the handle was registered.
    pub fn unregister_listener(&self, handle: ListenerHandle) -> bool {
        let mut listeners = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(id, _)| *id != handle.0);
        listeners.len() != before
    }

    fn commit(
        &self,
        seq: u64,
        resolved: Arc<ResolvedRoute>,
    ) -> Result<Arc<ResolvedRoute>, NavigationError> {
        let _held = self.commit.lock().unwrap_or_else(|e| e.into_inner());

        let latest = self.seq.load(Ordering::SeqCst);
        if seq != latest {
            tracing::debug!(
                seq,
                latest,
                path = %resolved.matched_path,
                "stale navigation discarded"
            );
            return Err(NavigationError::Superseded { seq, latest });
        }

        self.current.store(Some(resolved.clone()));
        tracing::info!(
            seq,
            path = %resolved.matched_path,
            view = %resolved.view,
            "navigation committed"
        );

        let listeners: Vec<Listener> = {
            let registered = self.listeners.lock().unwrap_or_else(|e| e.into_inner());
            registered.iter().map(|(_, l)| l.clone()).collect()
        };
        for listener in listeners {
            listener(&resolved);
        }

        Ok(resolved)
    }
}
