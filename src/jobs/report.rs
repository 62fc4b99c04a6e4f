use super::{call, record, Clock, Job, JobError, LogSink, ISO_LIKE};
use crate::api::{ApiBoundary, Operation};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

/// Logs customer, order and revenue totals.
pub struct ReportJob {
    api: Arc<dyn ApiBoundary>,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
}

impl ReportJob {
    pub fn new(api: Arc<dyn ApiBoundary>, sink: Arc<dyn LogSink>, clock: Arc<dyn Clock>) -> Self {
        Self { api, sink, clock }
    }

    async fn totals(&self) -> Result<(usize, usize, Decimal), JobError> {
        let api = self.api.as_ref();
        let customers = call(api, Operation::TotalCustomers).await?;
        let orders = call(api, Operation::TotalOrders).await?;
        let revenue = call(api, Operation::TotalRevenue).await?;
        Ok((customers, orders, revenue))
    }
}

#[async_trait]
impl Job for ReportJob {
    fn name(&self) -> &'static str {
        "report"
    }

    async fn run(&self) {
        let timestamp = self.clock.now().format(ISO_LIKE);
        let line = match self.totals().await {
            Ok((customers, orders, revenue)) => {
                info!(job = self.name(), customers, orders, %revenue, "Report generated");
                format!("{timestamp} - Report: {customers} customers, {orders} orders, {revenue} revenue")
            }
            Err(e) => {
                warn!(job = self.name(), error = %e, "Report failed");
                format!("Error at {timestamp}: {e}")
            }
        };
        record(self.name(), self.sink.as_ref(), vec![line]).await;
    }
}
