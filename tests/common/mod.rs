//! Shared loaders and tables for integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use view_router::view::loader::{ViewId, ViewLoadError, ViewLoader};
use view_router::{RouteDef, RouteTable};

/// A loader that counts its invocations and always succeeds.
pub fn counting_loader(view: &str) -> (Arc<AtomicU32>, impl ViewLoader) {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let view = ViewId::new(view);
    let loader = move || {
        counter.fetch_add(1, Ordering::SeqCst);
        let view = view.clone();
        async move { Ok::<ViewId, ViewLoadError>(view) }
    };
    (calls, loader)
}

/// A loader that fails on its first call and succeeds afterwards.
#[allow(dead_code)]
pub fn flaky_loader(view: &str) -> (Arc<AtomicU32>, impl ViewLoader) {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let view = ViewId::new(view);
    let loader = move || {
        let attempt = counter.fetch_add(1, Ordering::SeqCst);
        let view = view.clone();
        async move {
            if attempt == 0 {
                Err(ViewLoadError::new("chunk fetch failed"))
            } else {
                Ok(view)
            }
        }
    };
    (calls, loader)
}

/// A loader that signals when entered and waits for an explicit release.
/// Lets a test hold one navigation in flight while issuing another.
#[allow(dead_code)]
pub fn gated_loader(view: &str) -> (Arc<Notify>, Arc<Notify>, impl ViewLoader) {
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let entered_tx = entered.clone();
    let release_rx = release.clone();
    let view = ViewId::new(view);
    let loader = move || {
        let entered = entered_tx.clone();
        let release = release_rx.clone();
        let view = view.clone();
        async move {
            entered.notify_one();
            release.notified().await;
            Ok::<ViewId, ViewLoadError>(view)
        }
    };
    (entered, release, loader)
}

/// The route table of the original demo application.
#[allow(dead_code)]
pub fn demo_table() -> RouteTable {
    RouteTable::new(vec![
        RouteDef::new("/").view("Home"),
        RouteDef::new("/data")
            .view("DataManage")
            .child(RouteDef::new("table").view("Dummy"))
            .child(RouteDef::new("import").view("Dummy"))
            .child(RouteDef::new("export").view("Dummy"))
            .child(RouteDef::new("stat").view("Dummy")),
    ])
    .expect("demo table is valid")
}
