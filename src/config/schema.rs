//! Route table schema definitions.
//!
//! This module defines the declarative form of the route table. All types
//! derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Surface unmatched paths as errors. When `false`, unmatched paths
    /// resolve to `fallback_view` instead.
    pub strict_match: bool,

    /// View rendered for unmatched paths under non-strict matching.
    pub fallback_view: Option<String>,

    /// Route declarations, in match-priority order.
    pub routes: Vec<RouteSpec>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strict_match: true,
            fallback_view: None,
            routes: Vec::new(),
        }
    }
}

/// A single route declaration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteSpec {
    /// Path pattern: literal segments, `:name` parameters, and a final
    /// `*` / `*name` catch-all. Child paths are relative to the parent.
    pub path: String,

    /// View identifier rendered when this route matches exactly. A route
    /// without a view only groups its children.
    #[serde(default)]
    pub view: Option<String>,

    /// Nested routes, matched relative to this path.
    #[serde(default)]
    pub children: Vec<RouteSpec>,
}
