use crate::config::{PacingConfig, Platform};
use crate::core::JobBoard;
use crate::domain::model::{PlatformReport, RunSummary};
use chrono::Utc;
use std::time::Duration;

/// Walks the configured platforms once, in order, applying to the first
/// few listings of each.
pub struct ApplyEngine<B: JobBoard> {
    board: B,
    pacing: PacingConfig,
    dry_run: bool,
}

impl<B: JobBoard> ApplyEngine<B> {
    pub fn new(board: B, pacing: PacingConfig) -> Self {
        Self {
            board,
            pacing,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[cfg(test)]
    pub(crate) fn board(&self) -> &B {
        &self.board
    }

    /// One pass over `platforms`. A failing platform never stops the others.
    pub async fn run(&self, platforms: &[Platform]) -> RunSummary {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(platforms.len());

        for platform in platforms {
            if !platform.enabled {
                tracing::debug!("Skipping disabled platform {}", platform.name);
                continue;
            }

            reports.push(self.check_platform(platform).await);
            pause(self.pacing.platform_delay()).await;
        }

        RunSummary {
            started_at,
            finished_at: Utc::now(),
            dry_run: self.dry_run,
            platforms: reports,
        }
    }

    async fn check_platform(&self, platform: &Platform) -> PlatformReport {
        tracing::info!("Starting {} check...", platform.name);
        let mut report = PlatformReport::new(&platform.name);

        let listings = match self.board.fetch_listings(platform).await {
            Some(listings) => listings,
            None => return report,
        };
        report.listings_found = Some(listings.len());

        for listing in listings.iter().take(self.pacing.max_applications_per_platform) {
            if self.dry_run {
                tracing::info!("[dry run] Would apply for job {} on {}.", listing.id, platform.name);
                continue;
            }

            report.applications_attempted += 1;
            if self.board.submit_application(platform, &listing.id).await {
                report.applications_succeeded += 1;
                pause(self.pacing.apply_delay()).await;
            }
        }

        report
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

pub fn log_summary(summary: &RunSummary) {
    for report in &summary.platforms {
        match report.listings_found {
            Some(found) => tracing::info!(
                "{}: {} listings, {}/{} applications succeeded",
                report.platform,
                found,
                report.applications_succeeded,
                report.applications_attempted
            ),
            None => tracing::warn!("{}: listings unavailable", report.platform),
        }
    }

    let elapsed = summary.finished_at - summary.started_at;
    tracing::info!(
        "Run finished in {}s{}: {} platforms checked, {} failed fetches, {}/{} applications succeeded",
        elapsed.num_seconds(),
        if summary.dry_run { " (dry run)" } else { "" },
        summary.platforms.len(),
        summary.failed_fetches(),
        summary.applications_succeeded(),
        summary.applications_attempted()
    );
}
