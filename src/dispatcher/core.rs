//! Dispatcher core module - handler lookup, binding and invocation.

use super::binder::{bind_arguments, BoundArguments};
use super::registry::HandlerRegistry;
use crate::context::RequestContext;
use crate::error::DispatchError;
use crate::ids::RequestId;
use crate::router::ResolvedTarget;
use std::time::Instant;
use tracing::{debug, error, info};

/// What a successful dispatch did: which handler ran with which arguments.
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub request_id: RequestId,
    pub controller: String,
    pub method: String,
    pub arguments: BoundArguments,
    /// Whatever the handler wrote to the context's output buffer
    pub output: String,
}

/// Invokes resolved targets through the handler registry.
#[derive(Clone, Default)]
pub struct Dispatcher {
    registry: HandlerRegistry,
}

impl Dispatcher {
    #[must_use]
    pub fn new(registry: HandlerRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Instantiate the target's controller, bind the leftover path segments
    /// onto the method's signature and call it.
    ///
    /// Failures, in the order they are checked: unknown controller, unknown
    /// method, missing required argument, handler error.
    pub fn dispatch(
        &self,
        target: &ResolvedTarget,
        ctx: &mut RequestContext,
    ) -> Result<DispatchOutcome, DispatchError> {
        let request_id = ctx.request_id;

        // D1: Handler lookup
        debug!(
            request_id = %request_id,
            controller = %target.controller,
            available_controllers = self.registry.len(),
            "Handler lookup"
        );

        let Some(factory) = self.registry.get(&target.controller) else {
            error!(
                request_id = %request_id,
                controller = %target.controller,
                available_controllers = ?self.registry.controller_names(),
                "Controller not registered"
            );
            return Err(DispatchError::HandlerNotFound {
                controller: target.controller.clone(),
            });
        };

        let mut instance = factory.instantiate(ctx);

        let Some(handle) = instance.method(&target.method) else {
            error!(
                request_id = %request_id,
                controller = %target.controller,
                method = %target.method,
                "Controller has no such method"
            );
            return Err(DispatchError::HandlerMethodNotFound {
                controller: target.controller.clone(),
                method: target.method.clone(),
            });
        };

        let arguments = bind_arguments(handle.signature(), &ctx.path, target.arg_start)?;

        // D3: Request dispatched to handler
        info!(
            request_id = %request_id,
            controller = %target.controller,
            method = %target.method,
            arguments = ?arguments.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "Request dispatched to handler"
        );

        let start = Instant::now();
        let result = handle.call(&arguments, ctx);
        let elapsed = start.elapsed();

        match result {
            Ok(()) => {
                info!(
                    request_id = %request_id,
                    controller = %target.controller,
                    method = %target.method,
                    execution_time_us = elapsed.as_micros(),
                    "Handler execution complete"
                );
                Ok(DispatchOutcome {
                    request_id,
                    controller: target.controller.clone(),
                    method: target.method.clone(),
                    arguments,
                    output: ctx.take_output(),
                })
            }
            Err(source) => {
                error!(
                    request_id = %request_id,
                    controller = %target.controller,
                    method = %target.method,
                    error = %source,
                    execution_time_us = elapsed.as_micros(),
                    "Handler returned an error"
                );
                Err(DispatchError::Handler {
                    controller: target.controller.clone(),
                    method: target.method.clone(),
                    source,
                })
            }
        }
    }
}
