//! # Session Module
//!
//! Key-value session storage as an explicit collaborator. Handlers reach it
//! through [`RequestContext::session`](crate::context::RequestContext::session);
//! the host decides what backs it.

use crate::context::RequestContext;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// Session storage seen by handlers.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    fn set(&self, key: &str, value: Value);
    fn remove(&self, key: &str);
    /// Snapshot of every stored entry
    fn all(&self) -> HashMap<String, Value>;
    /// Drop every entry
    fn destroy(&self);
}

/// Process-local session store, enough for tests and single-process hosts.
#[derive(Debug, Default)]
pub struct MemorySession {
    values: Mutex<HashMap<String, Value>>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }

    fn all(&self) -> HashMap<String, Value> {
        self.values
            .lock()
            .map(|values| values.clone())
            .unwrap_or_default()
    }

    fn destroy(&self) {
        if let Ok(mut values) = self.values.lock() {
            values.clear();
        }
    }
}

/// Where to send a visitor whose session lacks `key`.
///
/// Returns `{base_url}{login_route}?redirect={current url, encoded}`, where
/// the login route is the context's (set from `RuntimeConfig::login_route`),
/// or `None` when the key is present. Without a session every key is absent.
#[must_use]
pub fn login_redirect(ctx: &RequestContext, key: &str) -> Option<String> {
    let present = ctx
        .session()
        .map(|session| session.get(key).is_some())
        .unwrap_or(false);
    if present {
        return None;
    }

    let target = format!(
        "{}?redirect={}",
        ctx.base_url(ctx.login_route()),
        urlencoding::encode(ctx.current_url())
    );
    debug!(request_id = %ctx.request_id, key = %key, redirect = %target, "Session key missing, redirecting");
    Some(target)
}
