//! Daily ingest on a cron schedule (evaluated in UTC).

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{info, warn};

use lib_rates::RateIngestor;

/// Creates (but does not start) a scheduler that runs `ingestor.ingest()` on `cron`.
///
/// # Errors
/// Fails if `cron` is not a valid six-field expression or the scheduler cannot be created.
pub async fn build_ingest_scheduler(
    cron: &str,
    ingestor: Arc<RateIngestor>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(cron, move |uuid, mut l| {
        let ingestor = ingestor.clone();
        Box::pin(async move {
            let envelope = ingestor.ingest().await;
            if envelope.is_success() {
                info!(job = %uuid, "scheduled ingest finished");
            } else {
                warn!(job = %uuid, status = envelope.status_code, "scheduled ingest failed");
            }

            match l.next_tick_for_job(uuid).await {
                Ok(Some(ts)) => info!("next scheduled ingest at {:?}", ts),
                _ => warn!("could not determine next ingest time"),
            }
        })
    })?;

    scheduler.add(job).await?;
    Ok(scheduler)
}
