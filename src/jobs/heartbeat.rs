use super::{record, Clock, Job, LogSink, DAY_FIRST};
use crate::api::{ApiBoundary, Operation, TransportError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Checks that the API answers `hello`. No retry.
///
/// Any success status counts as alive, whatever the body holds.
pub struct HeartbeatJob {
    api: Arc<dyn ApiBoundary>,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
}

impl HeartbeatJob {
    pub fn new(api: Arc<dyn ApiBoundary>, sink: Arc<dyn LogSink>, clock: Arc<dyn Clock>) -> Self {
        Self { api, sink, clock }
    }
}

#[async_trait]
impl Job for HeartbeatJob {
    fn name(&self) -> &'static str {
        "heartbeat"
    }

    async fn run(&self) {
        let timestamp = self.clock.now().format(DAY_FIRST);
        let status = match self.api.execute(Operation::Hello).await {
            Ok(_) | Err(TransportError::UnreadableBody(_)) => "GraphQL OK".to_string(),
            Err(TransportError::Status(code)) => format!("GraphQL FAILED {code}"),
            Err(e) => format!("GraphQL ERROR: {e}"),
        };
        info!(job = self.name(), %status, "Heartbeat");
        record(
            self.name(),
            self.sink.as_ref(),
            vec![format!("{timestamp} CRM is alive ({status})")],
        )
        .await;
    }
}
