//! Request ids.
//!
//! Every request gets one [`RequestId`] when its
//! [`RequestContext`](crate::context::RequestContext) is built. The dispatcher
//! logs it as the `request_id` field on each of its log points and hands it
//! back on the [`DispatchOutcome`](crate::dispatcher::DispatchOutcome), so a
//! host can correlate its access log with the routing trace.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use tracing::debug;

/// ULID identifying one dispatched request.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Id for a request whose transport may have passed an upstream
    /// correlation id (`RequestInput::request_id`). A valid ULID is kept so
    /// the trace lines up with the caller's; anything else is replaced.
    #[must_use]
    pub fn from_upstream(upstream: Option<&str>) -> Self {
        let Some(raw) = upstream else {
            return Self::new();
        };
        match raw.parse() {
            Ok(id) => id,
            Err(_) => {
                let id = Self::new();
                debug!(upstream = %raw, request_id = %id, "Upstream request id is not a ULID, minted a new one");
                id
            }
        }
    }

    /// Milliseconds since the epoch at which the id was minted.
    #[must_use]
    pub fn timestamp_ms(&self) -> u64 {
        self.0.timestamp_ms()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(RequestId(ulid::Ulid::from_string(s.trim())?))
    }
}
