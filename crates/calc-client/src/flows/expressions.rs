//! Submission, lookup and listing of expressions.

use calc_core::wire::{
    expression_path, CalculateRequest, Created, ExpressionList, LookupBody, RecordId,
    CALCULATE_PATH, EXPRESSIONS_PATH,
};

use super::CalcClient;
use crate::http::{get_json, post_json_body};
use crate::transport::Transport;
use crate::view::{ListPanel, LookupPanel, Notice, View};

impl<T: Transport, V: View> CalcClient<T, V> {
    /// Submit an expression, announce its id, then refresh the list once.
    ///
    /// The text is sent as typed; the orchestrator is the only validator.
    /// On failure the error is logged and the view is left alone.
    pub async fn submit_expression(&self, expression: &str) -> Option<RecordId> {
        let request = CalculateRequest {
            expression: expression.to_string(),
        };

        match post_json_body::<_, _, Created>(&*self.transport, CALCULATE_PATH, &request).await {
            Ok(created) => {
                tracing::info!(id = %created.id, "expression submitted");
                self.view.notify(&Notice::Submitted {
                    id: created.id.clone(),
                });
                self.refresh_expressions().await;
                Some(created.id)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to submit expression");
                None
            }
        }
    }

    /// Look up one expression and render it.
    ///
    /// A blank id is rejected before any request is made. Any failure,
    /// whatever its cause, renders the same not-found panel.
    pub async fn lookup_expression(&self, id: &str) -> Option<LookupPanel> {
        let id = id.trim();
        if id.is_empty() {
            self.view.notify(&Notice::MissingExpressionId);
            return None;
        }

        let panel = match get_json::<_, LookupBody>(&*self.transport, &expression_path(id)).await {
            Ok(body) => LookupPanel::Found(body.into_record()),
            Err(e) => {
                tracing::error!(id, error = %e, "expression lookup failed");
                LookupPanel::NotFound { id: id.to_string() }
            }
        };
        self.view.render_lookup(&panel);
        Some(panel)
    }

    /// Fetch every known expression and replace the rendered list.
    pub async fn refresh_expressions(&self) -> ListPanel {
        let panel = match get_json::<_, ExpressionList>(&*self.transport, EXPRESSIONS_PATH).await {
            Ok(list) => {
                tracing::debug!(count = list.expressions.len(), "expressions loaded");
                ListPanel::Records(list.expressions)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load expressions");
                ListPanel::Failed
            }
        };
        self.view.render_list(&panel);
        panel
    }
}
