use tokio_cron_scheduler::{Job, JobScheduler};
use std::sync::Arc;
use crate::app::AppContext;
use crate::utils::logging::log_system_event;

/// Hourly housekeeping: forgets per-participant locks nobody holds and logs
/// how many tournaments are running.
pub struct MaintenanceService {
    ctx: Arc<AppContext>,
    scheduler: JobScheduler,
}

impl MaintenanceService {
    pub async fn new(ctx: Arc<AppContext>) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            ctx,
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = self.ctx.clone();

        let sweep_job = Job::new_async("0 0 * * * *", move |_uuid, _l| {
            let ctx = ctx.clone();
            Box::pin(async move {
                run_sweep(&ctx);
            })
        })?;

        self.scheduler.add(sweep_job).await?;
        self.scheduler.start().await?;

        tracing::info!("Maintenance service started - sweeping idle locks every hour");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    // Manual trigger for testing
    pub fn sweep_now(&self) -> SweepReport {
        run_sweep(&self.ctx)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepReport {
    pub pruned_locks: usize,
    pub active_sessions: usize,
}

fn run_sweep(ctx: &AppContext) -> SweepReport {
    let report = SweepReport {
        pruned_locks: ctx.locks.prune_idle(),
        active_sessions: ctx.registry().active_count(),
    };

    log_system_event(
        "maintenance sweep",
        Some(&format!(
            "pruned {} idle locks, {} active tournaments",
            report.pruned_locks, report.active_sessions
        )),
    );

    report
}
