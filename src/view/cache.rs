//! Per-route cache for deferred view loads.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::routing::table::RouteId;
use crate::view::loader::{ViewId, ViewLoadError, ViewLoader};

/// A thread-safe cache of loaded views, keyed by route.
///
/// A successful load is cached for the process lifetime. A failed load
/// leaves no trace, so the next navigation to the same route retries.
#[derive(Default)]
pub struct ViewCache {
    views: DashMap<RouteId, ViewId>,
    // One gate per route so overlapping navigations to the same route
    // invoke the loader once; loads for different routes stay independent.
    gates: DashMap<RouteId, Arc<Mutex<()>>>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached view for `route`, invoking `loader` on a miss.
    pub async fn get_or_load(
        &self,
        route: RouteId,
        loader: &Arc<dyn ViewLoader>,
    ) -> Result<ViewId, ViewLoadError> {
        if let Some(view) = self.views.get(&route) {
            return Ok(view.clone());
        }

        let gate = self
            .gates
            .entry(route)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _held = gate.lock().await;

        // A load that finished while we waited on the gate wins.
        if let Some(view) = self.views.get(&route) {
            return Ok(view.clone());
        }

        let view = loader.load().await?;
        self.views.insert(route, view.clone());
        tracing::debug!(route = ?route, view = %view, "deferred view loaded");
        Ok(view)
    }

    /// Number of routes with a cached view.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
