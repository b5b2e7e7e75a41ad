//! # Hot Reload Module
//!
//! Live reloading of the route file without restarting the host.
//!
//! ## Overview
//!
//! The watcher listens for modify/create events on the route file and then:
//! - Reloads and parses the table (YAML or JSON)
//! - Compiles a fresh [`Router`]
//! - Swaps it into the shared `ArcSwap`
//!
//! Requests that already took a snapshot finish on the old router.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use arc_swap::ArcSwap;
//! use microroute::hot_reload::watch_routes;
//! use microroute::router::Router;
//! use microroute::table::load_table;
//! use std::sync::Arc;
//!
//! let table = load_table("config/routes.yaml")?;
//! let router = Arc::new(ArcSwap::from_pointee(Router::new(&table)?));
//!
//! // Keep the watcher alive for as long as reloads should happen
//! let _watcher = watch_routes("config/routes.yaml", router.clone())?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! If the new file fails to parse or a pattern fails to compile:
//! - The error is logged
//! - The previous router remains active
//!
//! A half-saved file therefore never takes routing down.

use crate::router::Router;
use crate::table::load_table;
use arc_swap::ArcSwap;
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Reload `path` and store the compiled router. Returns the number of compiled rules.
pub fn reload_routes(path: &Path, router: &ArcSwap<Router>) -> anyhow::Result<usize> {
    let table = load_table(path)?;
    let compiled = Router::new(&table)?;
    let count = compiled.rules().len();
    router.store(Arc::new(compiled));
    Ok(count)
}

/// Watch a route file and swap in a recompiled [`Router`] when it changes.
pub fn watch_routes<P>(
    routes_path: P,
    router: Arc<ArcSwap<Router>>,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
{
    let path: PathBuf = routes_path.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    match reload_routes(&watch_path, &router) {
                        Ok(count) => info!(
                            path = %watch_path.display(),
                            routes_count = count,
                            "hot-reload: routing table replaced"
                        ),
                        Err(e) => error!(
                            path = %watch_path.display(),
                            error = %format!("{e:#}"),
                            "hot-reload: keeping previous routing table"
                        ),
                    }
                }
            }
            Err(e) => error!(error = ?e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    info!(path = %path.display(), "hot-reload: watching route file");
    Ok(watcher)
}
