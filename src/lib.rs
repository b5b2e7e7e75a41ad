//! # microroute
//!
//! **microroute** is a small front-controller routing core: it turns a raw
//! request URI into a call on a named controller method, driven entirely by
//! an ordered table of URL patterns.
//!
//! ## Overview
//!
//! A route table maps patterns such as `user/(:int)` to a controller and a
//! method. Either name may be given indirectly as `@N`, meaning "whatever
//! capture group N matched". Path segments left over after the handler is
//! named become its positional arguments.
//!
//! ## Architecture
//!
//! - **[`path`]** - URI normalization against the script/base prefix
//! - **[`table`]** - Route table types and YAML/JSON loading
//! - **[`router`]** - Pattern compilation, first-match routing and `@N` resolution
//! - **[`dispatcher`]** - Handler registry, positional argument binding and invocation
//! - **[`app`]** - The whole pipeline behind one call, with a hot-swappable router
//! - **[`context`]** - Per-request state (request id, URLs, session, output buffer)
//! - **[`session`]** - Session storage interface and the login redirect helper
//! - **[`linter`]** - Static checks for route tables
//! - **[`hot_reload`]** - Recompile routes when the route file changes
//! - **[`runtime_config`]** / **[`logging`]** - Environment-driven settings
//!
//! ### Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host
//!     participant App as app::Application
//!     participant Path as path::normalize
//!     participant Router as router::Router
//!     participant Resolve as router::resolve_target
//!     participant Dispatcher as dispatcher::Dispatcher
//!     participant Handler
//!
//!     Host->>App: handle(RequestInput)
//!     App->>Path: normalize(uri, script_name)
//!     Path-->>App: NormalizedPath
//!     App->>Router: route(path)
//!     Router-->>App: RouteMatch (captures)
//!     App->>Resolve: resolve_target(match)
//!     Resolve-->>App: ResolvedTarget (controller, method, arg_start)
//!     App->>Dispatcher: dispatch(target, ctx)
//!     Dispatcher->>Handler: call(bound arguments, ctx)
//!     Handler-->>Dispatcher: Ok / Err
//!     Dispatcher-->>App: DispatchOutcome
//!     App-->>Host: Result<DispatchOutcome, DispatchError>
//! ```
//!
//! ## Route Tables
//!
//! ```yaml
//! routes:
//!   - pattern: "/"
//!     controller: Home
//!     method: index
//!   - pattern: "user/(:int)"
//!     controller: User
//!     method: show
//!   - pattern: "(:string)/(:string)"
//!     controller: "@1"
//!     method: "@2"
//! placeholders:
//!   - token: "(:slug)"
//!     regex: "[a-z0-9-]+"
//! ```
//!
//! Rules are tried in declaration order and the first one that matches wins,
//! however specific a later rule may be. `/` is special: the root path goes
//! straight to it without any matching.
//!
//! ## Quick Start
//!
//! ```rust
//! use microroute::{Application, HandlerRegistry, HandlerSignature, RequestInput, RouteTable, Router, RuntimeConfig};
//!
//! let table = RouteTable::new().route("user/(:int)", "User", "show");
//!
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .controller("User", |_ctx| ())
//!     .method(
//!         "show",
//!         HandlerSignature::new().required("id").optional("tab", "profile"),
//!         |_user, args, ctx| {
//!             ctx.write(&format!("{} {}", args.str(0).unwrap_or_default(), args.str(1).unwrap_or_default()));
//!             Ok(())
//!         },
//!     )
//!     .register();
//!
//! let app = Application::new(Router::new(&table)?, registry, RuntimeConfig::default());
//! let outcome = app.handle(&RequestInput::new("/index.php/user/42", "/index.php"))?;
//! assert_eq!(outcome.output, "42 profile");
//! # Ok::<(), microroute::DispatchError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`DispatchError`]. Nothing is rendered by the library;
//! [`DispatchError::status_code`] suggests the status a host should send.
//!
//! ## CLI
//!
//! ```bash
//! microroute routes  --routes config/routes.yaml
//! microroute resolve --routes config/routes.yaml --uri /index.php/api/users/list
//! microroute lint    --routes config/routes.yaml --fail-on-error
//! ```

pub mod app;
pub mod cli;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod hot_reload;
pub mod ids;
pub mod linter;
pub mod logging;
pub mod path;
pub mod router;
pub mod runtime_config;
pub mod session;
pub mod table;

pub use app::{Application, Resolution};
pub use context::{RequestContext, RequestInput};
pub use dispatcher::{
    BoundArguments, DispatchOutcome, Dispatcher, HandlerRegistry, HandlerSignature,
};
pub use error::DispatchError;
pub use path::{normalize, normalize_strict, NormalizedPath};
pub use router::{resolve_target, ResolvedTarget, RouteMatch, Router};
pub use runtime_config::RuntimeConfig;
pub use session::{login_redirect, MemorySession, SessionStore};
pub use table::{load_table, RouteTable};
