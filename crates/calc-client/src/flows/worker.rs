//! Manual worker simulation: fetch a pending task, post its result.

use calc_core::wire::{ResultAccepted, ResultSubmission, Task, TaskEnvelope, TASK_PATH};

use super::CalcClient;
use crate::http::{get_json, post_json_body};
use crate::numeric::{parse_float_prefix, parse_int_prefix};
use crate::transport::Transport;
use crate::view::{Notice, View, RESULT_FAILED};

impl<T: Transport, V: View> CalcClient<T, V> {
    /// Fetch one task and render it.
    ///
    /// Failures are logged only; the task panel keeps whatever it showed.
    pub async fn fetch_task(&self) -> Option<Task> {
        let Some(_admission) = self.task_guard.admit(self.config.worker.fetch_overlap) else {
            tracing::debug!("task fetch already in flight, ignoring trigger");
            return None;
        };

        match get_json::<_, TaskEnvelope>(&*self.transport, TASK_PATH).await {
            Ok(TaskEnvelope { task }) => {
                tracing::info!(id = %task.id, operation = %task.operation, "task fetched");
                self.view.render_task(&task);
                Some(task)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch task");
                None
            }
        }
    }

    /// Post a computed result for a task.
    ///
    /// Both fields must be non-blank or nothing is sent. The id is read as an
    /// integer and the result as a float, each from its longest numeric prefix.
    /// Any 2xx reply is a success, whatever value the server echoes.
    pub async fn submit_result(&self, id_text: &str, result_text: &str) -> Option<ResultAccepted> {
        if id_text.trim().is_empty() || result_text.trim().is_empty() {
            self.view.notify(&Notice::MissingTaskFields);
            return None;
        }

        let submission = match self.coerce_submission(id_text, result_text) {
            Ok(submission) => submission,
            Err(notice) => {
                self.view.notify(&notice);
                return None;
            }
        };

        match post_json_body::<_, _, ResultAccepted>(&*self.transport, TASK_PATH, &submission).await
        {
            Ok(accepted) => {
                tracing::info!(id = ?submission.id, result = ?accepted.result, "result accepted");
                self.view.notify(&Notice::ResultAccepted {
                    result: accepted.result.clone(),
                });
                Some(accepted)
            }
            Err(e) => {
                tracing::error!(id = ?submission.id, error = %e, "failed to submit result");
                let message = if e.is_status() {
                    RESULT_FAILED.to_string()
                } else {
                    e.to_string()
                };
                self.view.notify(&Notice::ResultFailed { message });
                None
            }
        }
    }

    /// Lenient by default: unparseable values go out as `null`.
    fn coerce_submission(&self, id_text: &str, result_text: &str) -> Result<ResultSubmission, Notice> {
        let submission = ResultSubmission {
            id: parse_int_prefix(id_text),
            result: parse_float_prefix(result_text),
        };

        if self.config.worker.strict_numbers {
            if submission.id.is_none() {
                return Err(Notice::InvalidNumber {
                    field: "task id",
                    text: id_text.to_string(),
                });
            }
            if submission.result.is_none() {
                return Err(Notice::InvalidNumber {
                    field: "result",
                    text: result_text.to_string(),
                });
            }
        } else if submission.id.is_none() || submission.result.is_none() {
            tracing::warn!(id_text, result_text, "sending unparsed task fields as null");
        }

        Ok(submission)
    }
}
