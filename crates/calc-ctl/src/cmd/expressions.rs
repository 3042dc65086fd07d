//! Expression commands: submit, get, list.

use anyhow::Result;

use calc_client::{ListPanel, LookupPanel};

use super::{Client, Outcome};

/// A failed submission is only logged; the exit status is the sole signal.
pub async fn cmd_submit(client: &Client, expression: &str) -> Result<Outcome> {
    Ok(Outcome::from_success(
        client.submit_expression(expression).await.is_some(),
    ))
}

pub async fn cmd_get(client: &Client, id: &str) -> Result<Outcome> {
    let found = matches!(
        client.lookup_expression(id).await,
        Some(LookupPanel::Found(_))
    );
    Ok(Outcome::from_success(found))
}

pub async fn cmd_list(client: &Client) -> Result<Outcome> {
    let loaded = matches!(
        client.refresh_expressions().await,
        ListPanel::Records(_)
    );
    Ok(Outcome::from_success(loaded))
}
