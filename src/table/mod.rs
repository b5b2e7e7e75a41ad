//! # Table Module
//!
//! In-memory form of the declared route table and its file loader.
//!
//! A route file is an ordered list; order decides which rule wins when several
//! match:
//!
//! ```yaml
//! routes:
//!   - pattern: "/"
//!     controller: Home
//!     method: index
//!   - pattern: "user/(:int)"
//!     controller: User
//!     method: show
//!   - pattern: "api/(:string)"
//!     controller: Api
//!     method: "@1"
//! placeholders:
//!   - token: "(:slug)"
//!     regex: "[a-z0-9-]+"
//! ```
//!
//! `@N` in `controller` or `method` takes the name from capture group N of the
//! rule's own pattern.

mod load;
mod types;

pub use load::{load_table, parse_table};
pub use types::{PlaceholderDecl, RouteRule, RouteTable, RouteTarget, TargetDescriptor};
