//! JSON wire types for the orchestrator's public and internal HTTP APIs.
//!
//! The client only ever reads snapshots of server state, so every type here is
//! tolerant of the shape drift between orchestrator generations: identifiers
//! and values may arrive as numbers or strings, collections may arrive as
//! `null`, and unknown fields are ignored.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ── Paths ─────────────────────────────────────────────────────────────────────

pub const CALCULATE_PATH: &str = "/api/v1/calculate";
pub const EXPRESSIONS_PATH: &str = "/api/v1/expressions";
pub const STATISTICS_PATH: &str = "/api/v1/statistics";
pub const TASK_PATH: &str = "/internal/task";

/// Path of a single expression record.
pub fn expression_path(id: &str) -> String {
    format!("{}/{}", EXPRESSIONS_PATH, id)
}

// ── Scalars ───────────────────────────────────────────────────────────────────

/// Opaque record identifier. Never assumed to be sequential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// A server value that is numeric in some orchestrator builds and a string in others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// True for an empty (or whitespace-only) string value.
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

/// Go encodes nil slices and maps as `null`; treat that the same as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ── Expressions ───────────────────────────────────────────────────────────────

/// Snapshot of one submitted calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionRecord {
    pub id: RecordId,
    #[serde(default)]
    pub expression: String,
    /// Server-defined label, e.g. "pending", "in progress", "done", "error".
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Scalar>,
}

impl ExpressionRecord {
    /// The result, if the server has produced one. Blank strings count as not yet computed.
    pub fn computed_result(&self) -> Option<&Scalar> {
        self.result.as_ref().filter(|r| !r.is_blank())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CalculateRequest {
    pub expression: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Created {
    pub id: RecordId,
}

/// Response of `GET /api/v1/expressions/{id}`.
///
/// Newer orchestrators wrap the record as `{"expression": {...}}`, older ones
/// return it bare. Wrapped is tried first; a bare record fails that attempt
/// because its `expression` field is a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LookupBody {
    Wrapped { expression: ExpressionRecord },
    Bare(ExpressionRecord),
}

impl LookupBody {
    pub fn into_record(self) -> ExpressionRecord {
        match self {
            LookupBody::Wrapped { expression } => expression,
            LookupBody::Bare(record) => record,
        }
    }
}

/// Response of `GET /api/v1/expressions`. A missing or null list is empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpressionList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub expressions: Vec<ExpressionRecord>,
}

// ── Tasks ─────────────────────────────────────────────────────────────────────

/// One unit of work a worker would perform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    pub arg1: Scalar,
    pub arg2: Scalar,
    pub operation: String,
    /// Expected duration of the operation, in seconds.
    pub operation_time: Scalar,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaskEnvelope {
    pub task: Task,
}

/// Body of `POST /internal/task`. Unparseable values go out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSubmission {
    pub id: Option<i64>,
    pub result: Option<f64>,
}

/// Reply to a result submission. The orchestrator echoes whatever value it
/// stored, which is `null` when the submitted result was `null`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResultAccepted {
    #[serde(default)]
    pub result: Option<Scalar>,
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Aggregate operation counts. Each poll yields an independent snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(deserialize_with = "null_as_default")]
    pub operations: BTreeMap<String, u64>,
    /// Average duration per operation, when the orchestrator reports it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub avg_time: BTreeMap<String, i64>,
}

// ── Errors ────────────────────────────────────────────────────────────────────

/// Error body returned by the orchestrator on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
