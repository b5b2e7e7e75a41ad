//! # Dispatcher Module
//!
//! Turns a [`ResolvedTarget`](crate::router::ResolvedTarget) into a handler
//! call.
//!
//! ## Overview
//!
//! - [`HandlerRegistry`] maps controller names to factories and declares the
//!   parameter list of every method. Nothing is discovered by reflection or
//!   naming convention: a controller that is not registered does not exist.
//! - [`bind_arguments`] lays leftover path segments onto a method's declared
//!   [`HandlerSignature`] left to right, using defaults for the tail.
//! - [`Dispatcher`] strings the two together: look up, instantiate, bind,
//!   invoke.
//!
//! ## Handler Registration
//!
//! ```rust
//! use microroute::dispatcher::{HandlerRegistry, HandlerSignature};
//!
//! struct Blog {
//!     prefix: &'static str,
//! }
//!
//! let mut registry = HandlerRegistry::new();
//! registry
//!     .controller("Blog", |_ctx| Blog { prefix: "post" })
//!     .method(
//!         "show",
//!         HandlerSignature::new().required("id").optional("page", 1),
//!         |blog, args, ctx| {
//!             let id = args.str(0).unwrap_or_default();
//!             let page = args.get(1).and_then(|a| a.as_i64()).unwrap_or(1);
//!             ctx.write(&format!("{} {} page {}", blog.prefix, id, page));
//!             Ok(())
//!         },
//!     )
//!     .register();
//! ```
//!
//! ## Error Handling
//!
//! Lookup and binding failures come back as
//! [`DispatchError`](crate::error::DispatchError) values; an `Err` returned by
//! the handler is wrapped in `DispatchError::Handler`. The dispatcher never
//! renders an error itself.

mod binder;
mod core;
mod registry;

pub use binder::{
    bind_arguments, ArgVec, Argument, BoundArguments, HandlerSignature, Param, MAX_INLINE_ARGS,
};
pub use core::{DispatchOutcome, Dispatcher};
pub use registry::{
    ControllerBuilder, ControllerFactory, ControllerInstance, HandlerRegistry, HandlerResult,
    MethodHandle,
};
