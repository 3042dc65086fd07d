//! Worker simulation commands.

use anyhow::Result;

use super::{Client, Outcome};

/// A failed fetch is only logged; the exit status is the sole signal.
pub async fn cmd_task_fetch(client: &Client) -> Result<Outcome> {
    Ok(Outcome::from_success(client.fetch_task().await.is_some()))
}

pub async fn cmd_task_submit(client: &Client, id: &str, result: &str) -> Result<Outcome> {
    Ok(Outcome::from_success(
        client.submit_result(id, result).await.is_some(),
    ))
}
