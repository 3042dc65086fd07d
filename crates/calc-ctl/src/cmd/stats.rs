//! Operation statistics: one-shot chart and the live watch loop.

use anyhow::{Context, Result};

use calc_client::ChartSurface;

use super::chart::TerminalChart;
use super::{Client, Outcome};

pub async fn cmd_stats(client: &Client) -> Result<Outcome> {
    let surface = ChartSurface::shared(TerminalChart::new());
    let drawn = client.poll_statistics(&surface).await;
    surface.lock().await.detach();
    Ok(Outcome::from_success(drawn))
}

/// Redraw the chart every poll interval until Ctrl-C.
pub async fn cmd_watch(client: &Client) -> Result<Outcome> {
    let surface = ChartSurface::shared(TerminalChart::new());
    let poller = client.start_statistics(surface.clone());

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    tracing::info!(task = poller.name(), "stopping statistics watch");
    poller.stop().await;
    surface.lock().await.detach();
    Ok(Outcome::Success)
}
