//! Per-request context passed explicitly to every service operation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: Uuid,
    /// The single "now" used for every timestamp the request writes.
    pub now: DateTime<Utc>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// A context with a fixed clock, for tests and replays.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            now,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
