use super::{call, record, Clock, Job, LogSink, DAY_FIRST, ISO_LIKE};
use crate::api::{ApiBoundary, Operation};
use crate::service::UpdateLowStockProductsPayload;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs `updateLowStockProducts` and logs every restocked product.
pub struct LowStockJob {
    api: Arc<dyn ApiBoundary>,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
}

impl LowStockJob {
    pub fn new(api: Arc<dyn ApiBoundary>, sink: Arc<dyn LogSink>, clock: Arc<dyn Clock>) -> Self {
        Self { api, sink, clock }
    }
}

#[async_trait]
impl Job for LowStockJob {
    fn name(&self) -> &'static str {
        "low-stock"
    }

    async fn run(&self) {
        let now = self.clock.now();
        let result =
            call::<UpdateLowStockProductsPayload>(self.api.as_ref(), Operation::UpdateLowStockProducts)
                .await;

        let lines = match result {
            Ok(payload) => {
                info!(job = self.name(), count = payload.count, "Low-stock products restocked");
                let mut lines = vec![format!("{} - {}", now.format(DAY_FIRST), payload.success)];
                lines.extend(
                    payload
                        .updated_products
                        .iter()
                        .map(|p| format!("  Updated: {} -> Stock: {}", p.name, p.stock)),
                );
                lines
            }
            Err(e) => {
                warn!(job = self.name(), error = %e, "Restock failed");
                vec![format!("Error at {}: {e}", now.format(ISO_LIKE))]
            }
        };
        record(self.name(), self.sink.as_ref(), lines).await;
    }
}
