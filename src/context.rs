//! # Request Context
//!
//! Everything a handler may need to know about the request it serves, built
//! once per request and passed explicitly down the pipeline. Nothing here is
//! process-global: the base URL in particular is computed per request from
//! the transport-layer input.

use crate::ids::RequestId;
use crate::path::{split_query, NormalizedPath};
use crate::session::SessionStore;
use std::fmt;
use std::sync::Arc;

/// Route a visitor without the required session key is sent to, relative to
/// the base URL.
pub const DEFAULT_LOGIN_ROUTE: &str = "login";

/// Raw request data handed over by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct RequestInput {
    /// Request URI as received, including any script prefix and query string
    pub uri: String,
    /// Script/base path prefix (e.g. `/index.php`)
    pub script_name: String,
    /// `Host` header, if any
    pub host: Option<String>,
    /// TLS indicator as the host reports it (`on`, `off`, ...)
    pub https: Option<String>,
    /// Server name, used when reconstructing the current URL
    pub server_name: Option<String>,
    /// Server port, used when reconstructing the current URL
    pub server_port: Option<u16>,
    /// Upstream correlation id (e.g. an `x-request-id` header)
    pub request_id: Option<String>,
}

impl RequestInput {
    /// Minimal input: a URI under a script prefix, no host information.
    #[must_use]
    pub fn new(uri: impl Into<String>, script_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            script_name: script_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn with_https(mut self, https: impl Into<String>) -> Self {
        self.https = Some(https.into());
        self
    }

    #[must_use]
    pub fn with_server(mut self, name: impl Into<String>, port: u16) -> Self {
        self.server_name = Some(name.into());
        self.server_port = Some(port);
        self
    }

    fn is_https(&self) -> bool {
        self.https
            .as_deref()
            .map(|v| !v.is_empty() && !v.eq_ignore_ascii_case("off"))
            .unwrap_or(false)
    }

    /// `scheme://host/dir/` of the script, or `http://localhost/` without a host.
    #[must_use]
    pub fn base_url(&self) -> String {
        let Some(host) = self.host.as_deref() else {
            return "http://localhost/".to_string();
        };
        let scheme = if self.is_https() { "https" } else { "http" };
        let dir = match self.script_name.rfind('/') {
            Some(idx) => &self.script_name[..=idx],
            None => "",
        };
        format!("{scheme}://{host}{dir}")
    }

    /// Full URL of the current request; the port is spelled out unless it is 80.
    #[must_use]
    pub fn current_url(&self) -> String {
        let scheme = if self.is_https() { "https" } else { "http" };
        let name = self
            .server_name
            .as_deref()
            .or(self.host.as_deref())
            .unwrap_or("localhost");
        match self.server_port {
            Some(port) if port != 80 => format!("{scheme}://{name}:{port}{}", self.uri),
            _ => format!("{scheme}://{name}{}", self.uri),
        }
    }
}

/// Per-request state threaded through matching, binding and the handler call.
pub struct RequestContext {
    pub request_id: RequestId,
    pub path: NormalizedPath,
    /// Raw query string, if the URI had one
    pub query: Option<String>,
    base_url: String,
    current_url: String,
    login_route: String,
    session: Option<Arc<dyn SessionStore>>,
    output: String,
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request_id", &self.request_id)
            .field("path", &self.path)
            .field("query", &self.query)
            .field("base_url", &self.base_url)
            .field("login_route", &self.login_route)
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

impl RequestContext {
    /// Build the context for one request from its transport input and the
    /// already normalized path.
    #[must_use]
    pub fn new(input: &RequestInput, path: NormalizedPath) -> Self {
        let query = split_query(&input.uri).1.map(str::to_string);
        Self {
            request_id: RequestId::from_upstream(input.request_id.as_deref()),
            path,
            query,
            base_url: input.base_url(),
            current_url: input.current_url(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            session: None,
            output: String::new(),
        }
    }

    #[must_use]
    pub fn with_session(mut self, session: Arc<dyn SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    /// Base URL joined with a relative URI, e.g. `base_url("user/42")`.
    #[must_use]
    pub fn base_url(&self, uri: &str) -> String {
        format!("{}{}", self.base_url, uri)
    }

    #[must_use]
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    /// Route [`login_redirect`](crate::session::login_redirect) sends visitors to.
    #[must_use]
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Session handle, when the host wired one in.
    #[must_use]
    pub fn session(&self) -> Option<&Arc<dyn SessionStore>> {
        self.session.as_ref()
    }

    /// Append to the response output buffer.
    pub fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    pub(crate) fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
