//! The UI seam. Flows never format output themselves; they hand typed panels
//! and notices to a `View`, and each render call replaces that region wholesale.

use calc_core::wire::{ExpressionRecord, RecordId, Scalar, Task};

/// Shown for every failed lookup, whatever the server said.
pub const NOT_FOUND_PREFIX: &str = "Could not find an expression with ID";
/// Single-line notice for a failed list refresh.
pub const LIST_FAILED: &str = "Failed to load expressions";
/// Message for a result submission the server refused.
pub const RESULT_FAILED: &str = "Failed to submit result";
/// Placeholder for a record without a computed result.
pub const PENDING_RESULT: &str = "Calculation in progress";

/// Blocking, user-facing messages.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Submitted { id: RecordId },
    MissingExpressionId,
    MissingTaskFields,
    InvalidNumber { field: &'static str, text: String },
    /// `None` when the server stored and echoed `null`.
    ResultAccepted { result: Option<Scalar> },
    ResultFailed { message: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Submitted { id } => format!("Expression submitted for calculation. ID: {}", id),
            Notice::MissingExpressionId => "Enter an expression ID".to_string(),
            Notice::MissingTaskFields => "Please fill in all fields.".to_string(),
            Notice::InvalidNumber { field, text } => format!("'{}' is not a valid {}", text, field),
            Notice::ResultAccepted { result: Some(result) } => {
                format!("Result submitted successfully: {}", result)
            }
            Notice::ResultAccepted { result: None } => "Result submitted successfully: null".to_string(),
            Notice::ResultFailed { message } => format!("{}: {}", RESULT_FAILED, message),
        }
    }
}

/// Content of the single-expression panel.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupPanel {
    Found(ExpressionRecord),
    NotFound { id: String },
}

/// Content of the expression list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPanel {
    Records(Vec<ExpressionRecord>),
    Failed,
}

pub trait View: Send + Sync + 'static {
    fn notify(&self, notice: &Notice);
    fn render_lookup(&self, panel: &LookupPanel);
    fn render_list(&self, panel: &ListPanel);
    fn render_task(&self, task: &Task);
}

/// Result column text: the value, or the in-progress placeholder.
pub fn result_text(record: &ExpressionRecord) -> String {
    record
        .computed_result()
        .map(ToString::to_string)
        .unwrap_or_else(|| PENDING_RESULT.to_string())
}
