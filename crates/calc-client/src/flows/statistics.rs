//! Periodic statistics polling and chart redraw.

use calc_core::wire::{Statistics, STATISTICS_PATH};

use super::CalcClient;
use crate::chart::{BarChart, ChartBackend, SharedSurface};
use crate::error::ClientError;
use crate::http::get_json;
use crate::poller::PeriodicTask;
use crate::transport::Transport;
use crate::view::View;

impl<T: Transport, V: View> CalcClient<T, V> {
    pub async fn fetch_statistics(&self) -> Result<Statistics, ClientError> {
        get_json(&*self.transport, STATISTICS_PATH).await
    }

    /// One poll. On success the chart is replaced; on failure the last
    /// chart stays up. Returns whether the chart was redrawn.
    pub async fn poll_statistics<B: ChartBackend>(&self, surface: &SharedSurface<B>) -> bool {
        match self.fetch_statistics().await {
            Ok(stats) => {
                tracing::debug!(operations = stats.operations.len(), "statistics received");
                let chart = BarChart::from_statistics(&stats);
                surface.lock().await.replace(chart);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "statistics poll failed, keeping last chart");
                false
            }
        }
    }

    /// Poll now and then every `polling.statistics_interval_secs` until the
    /// returned task is stopped or dropped.
    pub fn start_statistics<B: ChartBackend>(&self, surface: SharedSurface<B>) -> PeriodicTask {
        let client = self.clone();
        let policy = self.config.polling.overlap;

        PeriodicTask::spawn("statistics", self.config.polling.statistics_interval(), move || {
            let client = client.clone();
            let surface = surface.clone();
            async move {
                let Some(_admission) = client.stats_guard.admit(policy) else {
                    tracing::debug!("statistics poll still in flight, skipping tick");
                    return;
                };
                client.poll_statistics(&surface).await;
            }
        })
    }
}
