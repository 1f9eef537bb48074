//! Client-Side View Router Library
//!
//! A path-matching and view-resolution engine: a static, ordered, nested
//! route table is compiled once; concrete paths resolve to view
//! identifiers, loading deferred views at most once; listeners observe
//! each committed navigation; a later navigation always supersedes an
//! in-flight one.

pub mod config;
pub mod observability;
pub mod routing;
pub mod view;

pub use config::{ConfigError, RouterConfig};
pub use routing::router::{
    ListenerHandle, MatchPolicy, NavigationError, ResolvedRoute, Router,
};
pub use routing::table::{RouteDef, RouteTable};
pub use view::{ViewId, ViewLoadError, ViewLoader};
