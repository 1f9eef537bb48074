//! View identifiers and the deferred loader contract.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a renderable unit.
///
/// The router never inspects what a view is; the rendering collaborator
/// maps identifiers to actual components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Failure produced by a deferred view loader.
#[derive(Debug, Clone, Error)]
#[error("view load failed: {reason}")]
pub struct ViewLoadError {
    reason: String,
}

impl ViewLoadError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A deferred view source.
///
/// Takes no arguments, produces a [`ViewId`] or fails. The router invokes a
/// loader at most once per route on the happy path; a failed load may be
/// retried by a later navigation.
pub trait ViewLoader: Send + Sync {
    fn load(&self) -> BoxFuture<'static, Result<ViewId, ViewLoadError>>;
}

impl<F, Fut> ViewLoader for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<ViewId, ViewLoadError>> + Send + 'static,
{
    fn load(&self) -> BoxFuture<'static, Result<ViewId, ViewLoadError>> {
        Box::pin((self)())
    }
}

/// How a route obtains its view.
#[derive(Clone)]
pub enum ViewRef {
    /// View available at table construction time.
    Eager(ViewId),

    /// View produced on first demand by a loader.
    Deferred(Arc<dyn ViewLoader>),
}

impl fmt::Debug for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewRef::Eager(id) => f.debug_tuple("Eager").field(id).finish(),
            ViewRef::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_closure_loader() {
        let loader = || async { Ok::<ViewId, ViewLoadError>(ViewId::new("Lazy")) };
        let view = loader.load().await.unwrap();
        assert_eq!(view, ViewId::new("Lazy"));
    }

    #[test]
    fn test_view_id_display() {
        assert_eq!(ViewId::new("Home").to_string(), "Home");
        assert_eq!(ViewId::from("Home").as_str(), "Home");
    }
}
