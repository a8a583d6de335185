//! Background polling.
//!
//! One repeated [`JobScheduler`] job runs a polling cycle every
//! `POSTWATCH_POLL_INTERVAL_SECS`. Cycles never overlap; the most recent
//! [`RunStats`] is kept for the health endpoint.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use postwatch_tracker::{DefaultRunner, RunMode, RunStats};

/// Statistics of the most recently finished cycle, if any.
pub type LastCycle = Arc<RwLock<Option<RunStats>>>;

/// A shareable handle that runs at most one cycle at a time.
#[derive(Clone)]
pub struct CycleTask {
    runner: Arc<DefaultRunner>,
    running: Arc<Mutex<()>>,
    last_cycle: LastCycle,
}

impl CycleTask {
    pub fn new(runner: DefaultRunner) -> Self {
        Self {
            runner: Arc::new(runner),
            running: Arc::new(Mutex::new(())),
            last_cycle: Arc::new(RwLock::new(None)),
        }
    }

    pub fn last_cycle(&self) -> LastCycle {
        Arc::clone(&self.last_cycle)
    }

    /// Runs one automated cycle, or returns `None` without doing anything if
    /// another cycle is still in flight.
    pub async fn run_if_idle(&self) -> Option<RunStats> {
        let Ok(_guard) = self.running.try_lock() else {
            tracing::warn!("scheduler: previous polling cycle still running; skipping this tick");
            return None;
        };

        let stats = self.runner.run_cycle(RunMode::Automated).await;
        *self.last_cycle.write().await = Some(stats.clone());
        Some(stats)
    }
}

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process. Dropping it shuts down the polling job.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised, the
/// job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    task: CycleTask,
    interval: Duration,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_poll_job(&scheduler, task, interval).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_poll_job(
    scheduler: &JobScheduler,
    task: CycleTask,
    interval: Duration,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let task = task.clone();

        Box::pin(async move {
            tracing::info!("scheduler: polling cycle tick");
            task.run_if_idle().await;
        })
    })?;

    scheduler.add(job).await?;
    tracing::info!(
        interval_secs = interval.as_secs(),
        "scheduler: registered polling job"
    );
    Ok(())
}
