//! # Path Module
//!
//! Turns the raw request URI handed over by the transport layer into the
//! canonical route key the router matches against.
//!
//! ## Normalization steps
//!
//! 1. Strip the script/base prefix (e.g. `/index.php`), or its parent
//!    directory when the request does not name the script explicitly.
//! 2. Strip a leading `?/` (query-style routing: `/index.php?/user/42`).
//! 3. Cut the query string off at the first `?`.
//! 4. An empty remainder, or a lone `/`, is the root path.
//! 5. Keep only the path component, rewrite `../` into `/`, collapse runs of `/`
//!    into `/` and trim surrounding slashes.
//!
//! ```rust
//! use microroute::path::normalize;
//!
//! let path = normalize("/index.php/user/42?tab=posts", "/index.php");
//! assert_eq!(path.as_str(), "user/42");
//! assert_eq!(path.segments().collect::<Vec<_>>(), vec!["user", "42"]);
//! ```
//!
//! Step 5 is a single pass, so input such as `a/....//b` can still yield a
//! traversal sequence after one round. [`normalize_strict`] removes empty, `.`
//! and `..` segments until nothing changes; hosts that treat the route key as
//! anything close to a filesystem path should use it.

mod core;

pub use core::{normalize, normalize_strict, split_query, NormalizedPath};
