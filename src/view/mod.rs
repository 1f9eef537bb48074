//! View resolution subsystem.
//!
//! # Data Flow
//! ```text
//! RouteDef declares a view:
//!     Eager(ViewId)            → resolved immediately on match
//!     Deferred(ViewLoader)     → cache.rs consulted on match
//!
//! Cache miss:
//!     loader.load() invoked (the only suspension point in a navigation)
//!     → success: ViewId cached for the process lifetime
//!     → failure: nothing cached; next navigation retries
//! ```
//!
//! # Design Decisions
//! - Views are opaque identifiers; rendering is an external collaborator
//! - Loaders are invoked at most once per route; success is sticky
//! - Failure is never sticky (no negative caching)

pub mod cache;
pub mod loader;

pub use cache::ViewCache;
pub use loader::{ViewId, ViewLoadError, ViewLoader, ViewRef};
