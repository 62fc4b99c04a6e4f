//! # Maintenance Jobs
//!
//! Periodic jobs that call the CRM API through an [`ApiBoundary`] and append
//! their results to a [`LogSink`]. A job never returns an error: failures are
//! written to its sink and logged with `tracing`.

pub mod clock;
pub mod heartbeat;
pub mod low_stock;
pub mod order_reminders;
pub mod report;
pub mod scheduler;
pub mod sink;

pub use clock::{Clock, FixedClock, SystemClock};
pub use heartbeat::HeartbeatJob;
pub use low_stock::LowStockJob;
pub use order_reminders::OrderRemindersJob;
pub use report::ReportJob;
pub use scheduler::{IntervalScheduler, ManualScheduler, Scheduler};
pub use sink::{FileSink, LogSink, MemorySink};

use crate::api::{ApiBoundary, Operation, TransportError};
use crate::config::CrmConfig;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Timestamp format of the heartbeat and low-stock logs.
pub(crate) const DAY_FIRST: &str = "%d/%m/%Y-%H:%M:%S";
/// Timestamp format of the reminder, report and error lines.
pub(crate) const ISO_LIKE: &str = "%Y-%m-%d %H:%M:%S";

#[async_trait]
pub trait Job: Send + Sync {
    fn name(&self) -> &'static str;

    async fn run(&self);
}

#[derive(Debug, Error)]
pub enum JobError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The API answered with an operation error.
    #[error("{code}: {message}")]
    Api { code: String, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Executes `operation` and decodes its `data`.
pub(crate) async fn call<T: DeserializeOwned>(
    api: &dyn ApiBoundary,
    operation: Operation,
) -> Result<T, JobError> {
    let response = api.execute(operation).await?;
    if let Some(error) = response.errors.into_iter().next() {
        return Err(JobError::Api {
            code: error.code,
            message: error.message,
        });
    }
    let data = response
        .data
        .ok_or_else(|| JobError::MalformedResponse("missing data".to_string()))?;
    serde_json::from_value(data).map_err(|e| JobError::MalformedResponse(e.to_string()))
}

/// Writes a job's lines; a failed write is logged and otherwise ignored.
pub(crate) async fn record(job: &str, sink: &dyn LogSink, lines: Vec<String>) {
    if let Err(e) = sink.write_lines(&lines).await {
        warn!(job, error = %e, "Failed to write job log");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum JobKind {
    Heartbeat,
    LowStock,
    OrderReminders,
    Report,
}

impl JobKind {
    pub const ALL: [JobKind; 4] = [
        JobKind::Heartbeat,
        JobKind::LowStock,
        JobKind::OrderReminders,
        JobKind::Report,
    ];

    pub fn log_file_name(&self) -> &'static str {
        match self {
            JobKind::Heartbeat => "crm_heartbeat_log.txt",
            JobKind::LowStock => "low_stock_updates_log.txt",
            JobKind::OrderReminders => "order_reminders_log.txt",
            JobKind::Report => "crm_report_log.txt",
        }
    }

    pub fn interval(&self, config: &CrmConfig) -> Duration {
        match self {
            JobKind::Heartbeat => config.heartbeat_interval,
            JobKind::LowStock => config.low_stock_interval,
            JobKind::OrderReminders => config.reminder_interval,
            JobKind::Report => config.report_interval,
        }
    }

    pub fn build(
        &self,
        api: Arc<dyn ApiBoundary>,
        sink: Arc<dyn LogSink>,
        clock: Arc<dyn Clock>,
    ) -> Arc<dyn Job> {
        match self {
            JobKind::Heartbeat => Arc::new(HeartbeatJob::new(api, sink, clock)),
            JobKind::LowStock => Arc::new(LowStockJob::new(api, sink, clock)),
            JobKind::OrderReminders => Arc::new(OrderRemindersJob::new(api, sink, clock)),
            JobKind::Report => Arc::new(ReportJob::new(api, sink, clock)),
        }
    }

    /// Builds the job with a [`FileSink`] under `config.log_dir`.
    pub fn build_with_file_sink(
        &self,
        config: &CrmConfig,
        api: Arc<dyn ApiBoundary>,
        clock: Arc<dyn Clock>,
    ) -> Arc<dyn Job> {
        let sink = Arc::new(FileSink::new(config.log_dir.join(self.log_file_name())));
        self.build(api, sink, clock)
    }
}

/// Registers all four jobs with their configured intervals.
pub fn register_jobs(
    scheduler: &mut dyn Scheduler,
    config: &CrmConfig,
    api: Arc<dyn ApiBoundary>,
    clock: Arc<dyn Clock>,
) {
    for kind in JobKind::ALL {
        let job = kind.build_with_file_sink(config, api.clone(), clock.clone());
        scheduler.schedule(job, kind.interval(config));
    }
}
