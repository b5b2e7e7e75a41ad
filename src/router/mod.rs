//! # Router Module
//!
//! Compiles the declared route table into regex matchers and maps normalized
//! request paths onto controller/method targets.
//!
//! ## Architecture
//!
//! 1. **Compilation**: each declared pattern (e.g. `user/(:int)`) is split on
//!    `/`. Segments equal to a placeholder token become capture groups, all
//!    other segments are regex-escaped. The result is anchored and compiled
//!    once, at startup or on hot reload.
//!
//! 2. **Matching**: the root path selects the `/` rule directly. Any other
//!    path is tried against the compiled rules in declaration order; the first
//!    match wins, even when a later rule is more specific.
//!
//! 3. **Resolution**: `@N` descriptors take the controller or method name from
//!    capture group N, and the segments after the last one consumed that way
//!    are left for positional binding.
//!
//! ## Example
//!
//! ```rust
//! use microroute::path::normalize;
//! use microroute::router::{resolve_target, Router};
//! use microroute::table::RouteTable;
//!
//! let table = RouteTable::new()
//!     .route("/", "Home", "index")
//!     .route("api/(:string)", "Api", "@1");
//! let router = Router::new(&table).unwrap();
//!
//! let path = normalize("/api/users/list", "/index.php");
//! let matched = router.route(&path).unwrap();
//! let target = resolve_target(&matched).unwrap();
//! assert_eq!(target.method, "users");
//! assert_eq!(path.segment(target.arg_start), Some("list"));
//! ```

mod compile;
mod core;
mod placeholder;
mod resolve;
#[cfg(test)]
mod tests;

pub use compile::{compile_rule, compile_rules, Compiled, CompiledRule};
pub use core::{CaptureVec, MatchedRule, RouteMatch, Router, MAX_INLINE_CAPTURES};
pub use placeholder::{PlaceholderTable, INT_TOKEN, STRING_TOKEN};
pub use resolve::{resolve_target, ResolvedTarget};
