use std::fmt;

/// Failure raised anywhere in the dispatch pipeline.
///
/// Every kind is terminal for the current request: routing is deterministic,
/// so retrying with the same input produces the same failure. Hosts map the
/// error to a user-visible response with [`DispatchError::status_code`].
#[derive(Debug)]
pub enum DispatchError {
    /// No compiled rule matches a non-root normalized path, or the root path
    /// was requested and no `/` rule is declared.
    RouteNotFound {
        /// The normalized path that failed to match
        path: String,
    },
    /// A declared pattern is malformed (empty segment, bad placeholder, ...)
    InvalidPattern {
        /// The pattern as declared
        pattern: String,
        /// What is wrong with it
        reason: String,
    },
    /// An `@N` descriptor references a capture group absent from the match
    IndirectionOutOfRange {
        /// The descriptor as declared, e.g. `@3`
        descriptor: String,
        /// Number of capture groups the match actually produced
        available: usize,
    },
    /// The resolved controller name has no registered factory
    HandlerNotFound {
        /// Resolved controller name
        controller: String,
    },
    /// The controller exists but exposes no method of the resolved name
    HandlerMethodNotFound {
        /// Resolved controller name
        controller: String,
        /// Resolved method name
        method: String,
    },
    /// A required parameter has neither a leftover segment nor a default
    MissingRequiredArgument {
        /// Zero-based position in the handler signature
        position: usize,
        /// Declared parameter name
        name: String,
    },
    /// The handler ran and reported a failure of its own
    Handler {
        /// Resolved controller name
        controller: String,
        /// Resolved method name
        method: String,
        /// Error returned by the handler
        source: anyhow::Error,
    },
}

impl DispatchError {
    /// HTTP status a host would typically answer with for this failure.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            DispatchError::RouteNotFound { .. }
            | DispatchError::HandlerNotFound { .. }
            | DispatchError::HandlerMethodNotFound { .. }
            | DispatchError::MissingRequiredArgument { .. } => 404,
            DispatchError::IndirectionOutOfRange { .. }
            | DispatchError::InvalidPattern { .. }
            | DispatchError::Handler { .. } => 500,
        }
    }

    /// Short machine-readable name of the error kind, used as a log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::RouteNotFound { .. } => "route_not_found",
            DispatchError::InvalidPattern { .. } => "invalid_pattern",
            DispatchError::IndirectionOutOfRange { .. } => "indirection_out_of_range",
            DispatchError::HandlerNotFound { .. } => "handler_not_found",
            DispatchError::HandlerMethodNotFound { .. } => "handler_method_not_found",
            DispatchError::MissingRequiredArgument { .. } => "missing_required_argument",
            DispatchError::Handler { .. } => "handler_failed",
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::RouteNotFound { path } => {
                write!(f, "no route matches path '{}'", path)
            }
            DispatchError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid route pattern '{}': {}", pattern, reason)
            }
            DispatchError::IndirectionOutOfRange {
                descriptor,
                available,
            } => {
                write!(
                    f,
                    "{} not found in regex (match has {} capture group(s))",
                    descriptor, available
                )
            }
            DispatchError::HandlerNotFound { controller } => {
                write!(f, "controller '{}' is not registered", controller)
            }
            DispatchError::HandlerMethodNotFound { controller, method } => {
                write!(f, "controller '{}' has no method '{}'", controller, method)
            }
            DispatchError::MissingRequiredArgument { position, name } => {
                write!(
                    f,
                    "missing required argument '{}' at position {}",
                    name, position
                )
            }
            DispatchError::Handler {
                controller,
                method,
                source,
            } => {
                write!(f, "handler {}::{} failed: {}", controller, method, source)
            }
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Handler { source, .. } => Some(&**source),
            _ => None,
        }
    }
}
