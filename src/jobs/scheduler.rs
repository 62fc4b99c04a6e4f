//! Job triggers.
//!
//! [`IntervalScheduler`] runs each job on its own Tokio timer. [`ManualScheduler`]
//! only records registrations and runs jobs when told to.

use super::Job;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

pub trait Scheduler: Send {
    /// Registers `job` to run every `every`, first after one full interval.
    fn schedule(&mut self, job: Arc<dyn Job>, every: Duration);
}

/// One timer task per job.
///
/// Shutdown stops the timers but never interrupts a run in progress: a job that
/// is running finishes before its task exits.
pub struct IntervalScheduler {
    shutdown: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl IntervalScheduler {
    pub fn new() -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            shutdown,
            handles: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Stops every timer and waits for in-flight runs to finish.
    pub async fn shutdown(self) {
        info!(timers = self.handles.len(), "Stopping scheduler");
        let _ = self.shutdown.send(true);
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Job timer task failed: {:?}", e);
            }
        }
    }
}

impl Default for IntervalScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule(&mut self, job: Arc<dyn Job>, every: Duration) {
        let mut stop = self.shutdown.subscribe();
        info!(job = job.name(), ?every, "Scheduled");

        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = stop.changed() => break,
                }
                job.run().await;
                if *stop.borrow() {
                    break;
                }
            }
            info!(job = job.name(), "Timer stopped");
        });
        self.handles.push(handle);
    }
}

/// Records registrations; jobs run only through [`ManualScheduler::trigger`].
#[derive(Default)]
pub struct ManualScheduler {
    jobs: Vec<(Arc<dyn Job>, Duration)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered job names and intervals, in registration order.
    pub fn registered(&self) -> Vec<(&'static str, Duration)> {
        self.jobs.iter().map(|(job, every)| (job.name(), *every)).collect()
    }

    /// Runs every job named `name`. Returns how many ran.
    pub async fn trigger(&self, name: &str) -> usize {
        let mut ran = 0;
        for (job, _) in self.jobs.iter().filter(|(job, _)| job.name() == name) {
            job.run().await;
            ran += 1;
        }
        ran
    }

    pub async fn trigger_all(&self) {
        for (job, _) in &self.jobs {
            job.run().await;
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, job: Arc<dyn Job>, every: Duration) {
        self.jobs.push((job, every));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting {
        runs: AtomicUsize,
        pause: Duration,
    }

    #[async_trait]
    impl Job for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn run(&self) {
            tokio::time::sleep(self.pause).await;
            self.runs.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn interval_runs_after_each_period() {
        let job = Arc::new(Counting {
            runs: AtomicUsize::new(0),
            pause: Duration::ZERO,
        });
        let mut scheduler = IntervalScheduler::new();
        scheduler.schedule(job.clone(), Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(job.runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(121)).await;
        assert_eq!(job.runs.load(Ordering::SeqCst), 2);

        scheduler.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_waits_for_a_running_job() {
        let job = Arc::new(Counting {
            runs: AtomicUsize::new(0),
            pause: Duration::from_secs(10),
        });
        let mut scheduler = IntervalScheduler::new();
        scheduler.schedule(job.clone(), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(6)).await;
        scheduler.shutdown().await;
        assert_eq!(job.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn manual_scheduler_runs_on_demand() {
        let job = Arc::new(Counting {
            runs: AtomicUsize::new(0),
            pause: Duration::ZERO,
        });
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(job.clone(), Duration::from_secs(300));

        assert_eq!(scheduler.registered(), vec![("counting", Duration::from_secs(300))]);
        assert_eq!(scheduler.trigger("counting").await, 1);
        assert_eq!(scheduler.trigger("other").await, 0);
        scheduler.trigger_all().await;
        assert_eq!(job.runs.load(Ordering::SeqCst), 2);
    }
}
