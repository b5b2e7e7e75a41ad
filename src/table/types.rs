use serde::{Deserialize, Serialize};
use std::fmt;

/// How a rule names its controller or method.
///
/// Declared as a bare identifier (`User`) or as `@N`, meaning "the value of
/// capture group N of this rule's match". `N` that is not a positive integer
/// parses to `Capture(0)`, which never resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetDescriptor {
    Literal(String),
    Capture(usize),
}

impl From<String> for TargetDescriptor {
    fn from(raw: String) -> Self {
        match raw.strip_prefix('@') {
            Some(index) => TargetDescriptor::Capture(index.trim().parse().unwrap_or(0)),
            None => TargetDescriptor::Literal(raw),
        }
    }
}

impl From<&str> for TargetDescriptor {
    fn from(raw: &str) -> Self {
        TargetDescriptor::from(raw.to_string())
    }
}

impl From<TargetDescriptor> for String {
    fn from(descriptor: TargetDescriptor) -> Self {
        descriptor.to_string()
    }
}

impl fmt::Display for TargetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetDescriptor::Literal(name) => f.write_str(name),
            TargetDescriptor::Capture(index) => write!(f, "@{}", index),
        }
    }
}

/// Controller/method pair a rule dispatches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTarget {
    pub controller: TargetDescriptor,
    pub method: TargetDescriptor,
}

impl RouteTarget {
    #[must_use]
    pub fn new(controller: impl Into<TargetDescriptor>, method: impl Into<TargetDescriptor>) -> Self {
        Self {
            controller: controller.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.controller, self.method)
    }
}

/// One declared entry of the route table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// `/`-separated literal segments and placeholder tokens, e.g. `user/(:int)`
    pub pattern: String,
    #[serde(flatten)]
    pub target: RouteTarget,
}

impl RouteRule {
    #[must_use]
    pub fn new(pattern: impl Into<String>, target: RouteTarget) -> Self {
        Self {
            pattern: pattern.into(),
            target,
        }
    }
}

/// The declared route table.
///
/// Rules are kept in declaration order: the first matching rule wins, so the
/// order is part of the routing contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTable {
    #[serde(default)]
    pub routes: Vec<RouteRule>,
    /// Extra placeholder tokens declared next to the routes, token → regex fragment
    #[serde(default)]
    pub placeholders: Vec<PlaceholderDecl>,
}

/// Placeholder token declared in a route file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderDecl {
    pub token: String,
    pub regex: String,
}

impl RouteTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule; it matches after every rule already declared.
    #[must_use]
    pub fn route(
        mut self,
        pattern: impl Into<String>,
        controller: impl Into<TargetDescriptor>,
        method: impl Into<TargetDescriptor>,
    ) -> Self {
        self.routes
            .push(RouteRule::new(pattern, RouteTarget::new(controller, method)));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
