use super::{call, record, Clock, Job, JobError, LogSink, ISO_LIKE};
use crate::api::{ApiBoundary, Operation};
use crate::model::OrderStatus;
use crate::query::{Connection, PageArgs};
use crate::service::{OrderFilter, OrderNode};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How far back pending orders are reminded about.
pub const LOOKBACK_DAYS: i64 = 7;

const PAGE_SIZE: usize = 50;

/// Logs every pending order placed in the last seven days.
pub struct OrderRemindersJob {
    api: Arc<dyn ApiBoundary>,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
}

impl OrderRemindersJob {
    pub fn new(api: Arc<dyn ApiBoundary>, sink: Arc<dyn LogSink>, clock: Arc<dyn Clock>) -> Self {
        Self { api, sink, clock }
    }

    async fn fetch_pending(&self, since: DateTime<Utc>) -> Result<Vec<OrderNode>, JobError> {
        let filter = OrderFilter {
            order_date_gte: Some(since),
            status: Some(OrderStatus::Pending),
            ..Default::default()
        };
        let mut orders = Vec::new();
        let mut after = None;

        loop {
            let page = PageArgs {
                first: Some(PAGE_SIZE),
                after,
            };
            let connection: Connection<OrderNode> =
                call(self.api.as_ref(), Operation::orders(filter.clone(), page)).await?;
            let next = if connection.page_info.has_next_page {
                connection.page_info.end_cursor.clone()
            } else {
                None
            };
            debug!(fetched = connection.edges.len(), total = connection.total_count, "Fetched page");
            orders.extend(connection.into_nodes());

            match next {
                Some(cursor) => after = Some(cursor),
                None => return Ok(orders),
            }
        }
    }
}

#[async_trait]
impl Job for OrderRemindersJob {
    fn name(&self) -> &'static str {
        "order-reminders"
    }

    async fn run(&self) {
        let now = self.clock.now();
        let timestamp = now.format(ISO_LIKE);

        let lines = match self.fetch_pending(now - TimeDelta::days(LOOKBACK_DAYS)).await {
            Ok(orders) => {
                info!(job = self.name(), pending = orders.len(), "Order reminders processed");
                let mut lines = vec![format!("[{timestamp}] Processing {} pending orders:", orders.len())];
                lines.extend(orders.iter().map(|o| {
                    format!("Order ID: {}, Customer Email: {}", o.id.0, o.customer.email)
                }));
                lines
            }
            Err(e) => {
                warn!(job = self.name(), error = %e, "Failed to fetch orders");
                vec![format!("[{timestamp}] ERROR: Failed to fetch orders - {e}")]
            }
        };
        record(self.name(), self.sink.as_ref(), lines).await;
    }
}
