//! # Application Module
//!
//! Wires the pipeline together for a host: normalize the request URI, pick a
//! rule, resolve the handler names, bind and invoke.
//!
//! ```text
//! RequestInput ─▶ normalize ─▶ Router::route ─▶ resolve_target ─▶ Dispatcher::dispatch
//! ```
//!
//! The compiled [`Router`] lives behind an `Arc<ArcSwap<Router>>`. Each
//! request takes a lock-free snapshot, so a hot reload never blocks or
//! tears an in-flight request.
//!
//! ## Example
//!
//! ```rust
//! use microroute::app::Application;
//! use microroute::context::RequestInput;
//! use microroute::dispatcher::{HandlerRegistry, HandlerSignature};
//! use microroute::router::Router;
//! use microroute::runtime_config::RuntimeConfig;
//! use microroute::table::RouteTable;
//!
//! let table = RouteTable::new()
//!     .route("/", "Home", "index")
//!     .route("user/(:int)", "User", "show");
//!
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .controller("User", |_ctx| ())
//!     .method("show", HandlerSignature::new().required("id"), |_c, args, ctx| {
//!         ctx.write(&format!("user {}", args.str(0).unwrap_or_default()));
//!         Ok(())
//!     })
//!     .register();
//!
//! let app = Application::new(Router::new(&table)?, registry, RuntimeConfig::default());
//! let outcome = app.handle(&RequestInput::new("/index.php/user/42", "/index.php"))?;
//! assert_eq!(outcome.output, "user 42");
//! # Ok::<(), microroute::error::DispatchError>(())
//! ```

use crate::context::{RequestContext, RequestInput};
use crate::dispatcher::{DispatchOutcome, Dispatcher, HandlerRegistry};
use crate::error::DispatchError;
use crate::hot_reload;
use crate::path::{normalize, normalize_strict, NormalizedPath};
use crate::router::{resolve_target, ResolvedTarget, RouteMatch, Router};
use crate::runtime_config::RuntimeConfig;
use crate::session::SessionStore;
use crate::table::load_table;
use anyhow::Context;
use arc_swap::ArcSwap;
use notify::RecommendedWatcher;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{info, warn};

/// Where a request would go, without running the handler.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub path: NormalizedPath,
    pub route_match: RouteMatch,
    pub target: ResolvedTarget,
}

/// Router, dispatcher and runtime settings for one host process.
pub struct Application {
    router: Arc<ArcSwap<Router>>,
    dispatcher: Dispatcher,
    config: RuntimeConfig,
    session: Option<Arc<dyn SessionStore>>,
}

impl Application {
    #[must_use]
    pub fn new(router: Router, registry: HandlerRegistry, config: RuntimeConfig) -> Self {
        Self {
            router: Arc::new(ArcSwap::from_pointee(router)),
            dispatcher: Dispatcher::new(registry),
            config,
            session: None,
        }
    }

    /// Load and compile the route file named by `config`.
    pub fn from_config(config: RuntimeConfig, registry: HandlerRegistry) -> anyhow::Result<Self> {
        let table = load_table(&config.routes_path)?;
        let router = Router::new(&table).with_context(|| {
            format!("failed to compile routes from {}", config.routes_path.display())
        })?;
        Ok(Self::new(router, registry, config))
    }

    /// Share one session store across every request this application serves.
    #[must_use]
    pub fn with_session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Shared handle to the live router, for hot reload.
    #[must_use]
    pub fn router_handle(&self) -> Arc<ArcSwap<Router>> {
        Arc::clone(&self.router)
    }

    /// Swap in a new router; requests already in flight keep the old one.
    pub fn replace_router(&self, router: Router) {
        self.router.store(Arc::new(router));
        info!("Router replaced");
    }

    /// Start watching the route file when hot reload is enabled.
    ///
    /// The watcher stops when the returned value is dropped.
    pub fn watch(&self) -> notify::Result<Option<RecommendedWatcher>> {
        if !self.config.hot_reload {
            return Ok(None);
        }
        hot_reload::watch_routes(&self.config.routes_path, self.router_handle()).map(Some)
    }

    /// The input with the configured script name filled in when the
    /// transport left it empty.
    fn effective_input<'a>(&self, input: &'a RequestInput) -> Cow<'a, RequestInput> {
        if input.script_name.is_empty() {
            Cow::Owned(RequestInput {
                script_name: self.config.script_name.clone(),
                ..input.clone()
            })
        } else {
            Cow::Borrowed(input)
        }
    }

    /// Normalize the request URI with the configured normalizer.
    #[must_use]
    pub fn normalize(&self, input: &RequestInput) -> NormalizedPath {
        let input = self.effective_input(input);
        if self.config.strict_paths {
            normalize_strict(&input.uri, &input.script_name)
        } else {
            normalize(&input.uri, &input.script_name)
        }
    }

    /// Match and resolve a request without dispatching it.
    pub fn resolve(&self, input: &RequestInput) -> Result<Resolution, DispatchError> {
        let path = self.normalize(input);
        let router = self.router.load();
        let route_match = router.route(&path)?;
        let target = resolve_target(&route_match)?;
        Ok(Resolution {
            path,
            route_match,
            target,
        })
    }

    /// Run one request through the whole pipeline.
    ///
    /// Errors are logged with their kind and the status a host would send,
    /// then returned for the host to render.
    pub fn handle(&self, input: &RequestInput) -> Result<DispatchOutcome, DispatchError> {
        let input = self.effective_input(input);
        let resolution = self.resolve(&input);
        let result = resolution.and_then(|resolution| {
            let mut ctx = RequestContext::new(&input, resolution.path)
                .with_login_route(self.config.login_route.as_str());
            if let Some(session) = &self.session {
                ctx = ctx.with_session(Arc::clone(session));
            }
            self.dispatcher.dispatch(&resolution.target, &mut ctx)
        });

        if let Err(err) = &result {
            warn!(
                uri = %input.uri,
                kind = err.kind(),
                status = err.status_code(),
                error = %err,
                "Request failed"
            );
        }
        result
    }
}
