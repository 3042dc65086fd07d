//! calc integration test harness.
//!
//! Every test starts its own stand-in orchestrator (an axum router on an
//! ephemeral 127.0.0.1 port) and drives the real reqwest transport against
//! it. The stand-in records every request it serves, so tests can assert on
//! exactly what went over the wire.

mod expressions;

use std::sync::{Arc, Mutex as StdMutex};

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use calc_client::{CalcClient, HttpTransport, ListPanel, LookupPanel, Notice, View};
use calc_core::wire::Task;
use calc_core::CalcConfig;

// ── Stand-in orchestrator ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Knobs and recorded traffic of the stand-in orchestrator.
#[derive(Default)]
pub struct Orchestrator {
    pub hits: Vec<Hit>,
    pub expressions: Vec<Value>,
    pub next_id: i64,
    /// Answer lookups with a bare record instead of `{"expression": ...}`.
    pub bare_lookup: bool,
    /// Answer the list endpoint with `{}`.
    pub omit_list_field: bool,
    pub task: Option<Value>,
    pub operations: Value,
    pub statistics_down: bool,
}

pub type Shared = Arc<Mutex<Orchestrator>>;

async fn record(state: &Shared, method: Method, uri: &Uri, body: Option<Value>) {
    state.lock().await.hits.push(Hit {
        method,
        path: uri.path().to_string(),
        body,
    });
}

async fn handle_calculate(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, method, &uri, Some(body.clone())).await;

    let expression = body["expression"].as_str().unwrap_or_default().to_string();
    if expression.trim().is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "empty expression" })),
        );
    }

    let mut orch = state.lock().await;
    orch.next_id += 1;
    let id = orch.next_id;
    orch.expressions
        .push(json!({ "id": id, "expression": expression, "status": "pending", "result": "" }));
    (StatusCode::CREATED, Json(json!({ "id": id })))
}

async fn handle_list(State(state): State<Shared>, method: Method, uri: Uri) -> Json<Value> {
    record(&state, method, &uri, None).await;
    let orch = state.lock().await;
    if orch.omit_list_field {
        Json(json!({}))
    } else {
        Json(json!({ "expressions": orch.expressions }))
    }
}

async fn handle_lookup(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    record(&state, method, &uri, None).await;
    let orch = state.lock().await;
    let found = orch
        .expressions
        .iter()
        .find(|e| e["id"].to_string() == id)
        .cloned();
    match found {
        Some(record) if orch.bare_lookup => (StatusCode::OK, Json(record)),
        Some(record) => (StatusCode::OK, Json(json!({ "expression": record }))),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "expression not found" })),
        ),
    }
}

async fn handle_task_get(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
) -> (StatusCode, Json<Value>) {
    record(&state, method, &uri, None).await;
    match state.lock().await.task.clone() {
        Some(task) => (StatusCode::OK, Json(json!({ "task": task }))),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "no tasks" }))),
    }
}

async fn handle_task_post(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&state, method, &uri, Some(body.clone())).await;
    // Any result value is stored and echoed back, `null` included.
    if body["id"].is_i64() {
        (
            StatusCode::OK,
            Json(json!({ "id": body["id"], "result": body["result"], "user_id": 0 })),
        )
    } else {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "invalid result" })),
        )
    }
}

async fn handle_statistics(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
) -> (StatusCode, Json<Value>) {
    record(&state, method, &uri, None).await;
    let orch = state.lock().await;
    if orch.statistics_down {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "statistics unavailable" })),
        )
    } else {
        (StatusCode::OK, Json(json!({ "operations": orch.operations })))
    }
}

pub struct FakeOrchestrator {
    pub url: String,
    pub state: Shared,
    server: JoinHandle<()>,
}

impl FakeOrchestrator {
    pub async fn start() -> Result<Self> {
        let state: Shared = Arc::new(Mutex::new(Orchestrator {
            operations: json!({}),
            ..Orchestrator::default()
        }));

        let app = Router::new()
            .route("/api/v1/calculate", axum::routing::post(handle_calculate))
            .route("/api/v1/expressions", get(handle_list))
            .route("/api/v1/expressions/{id}", get(handle_lookup))
            .route("/internal/task", get(handle_task_get).post(handle_task_post))
            .route("/api/v1/statistics", get(handle_statistics))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind stand-in orchestrator")?;
        let url = format!("http://{}", listener.local_addr()?);
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self { url, state, server })
    }

    pub async fn hits(&self) -> Vec<Hit> {
        self.state.lock().await.hits.clone()
    }

    pub async fn count(&self, method: Method, path: &str) -> usize {
        self.hits()
            .await
            .iter()
            .filter(|h| h.method == method && h.path == path)
            .count()
    }

    pub fn config(&self) -> CalcConfig {
        let mut config = CalcConfig::default();
        config.server.base_url = self.url.clone();
        config
    }
}

impl Drop for FakeOrchestrator {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// ── Recording view ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Notice(Notice),
    Lookup(LookupPanel),
    List(ListPanel),
    Task(Task),
}

#[derive(Default)]
pub struct Screen {
    shown: StdMutex<Vec<Shown>>,
}

impl Screen {
    pub fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }
}

impl View for Screen {
    fn notify(&self, notice: &Notice) {
        self.shown.lock().unwrap().push(Shown::Notice(notice.clone()));
    }

    fn render_lookup(&self, panel: &LookupPanel) {
        self.shown.lock().unwrap().push(Shown::Lookup(panel.clone()));
    }

    fn render_list(&self, panel: &ListPanel) {
        self.shown.lock().unwrap().push(Shown::List(panel.clone()));
    }

    fn render_task(&self, task: &Task) {
        self.shown.lock().unwrap().push(Shown::Task(task.clone()));
    }
}

pub type Client = CalcClient<HttpTransport, Screen>;

/// A client wired to `orch` through the real HTTP transport.
pub fn client_for(orch: &FakeOrchestrator, config: CalcConfig) -> (Client, Arc<Screen>) {
    let transport = HttpTransport::new(&config.server).expect("transport");
    let screen = Arc::new(Screen::default());
    let client = CalcClient::from_shared(Arc::new(transport), screen.clone(), config);
    (client, screen)
}

// ── Smoke ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unreachable_orchestrator_is_a_transport_failure() {
    let mut config = CalcConfig::default();
    // Port 9 (discard) is closed on test machines.
    config.server.base_url = "http://127.0.0.1:9".to_string();
    let transport = HttpTransport::new(&config.server).unwrap();
    let screen = Arc::new(Screen::default());
    let client = CalcClient::from_shared(Arc::new(transport), screen.clone(), config);

    assert!(client.submit_expression("1+1").await.is_none());
    assert!(client.fetch_task().await.is_none());
    assert!(client.fetch_statistics().await.is_err());
    assert!(screen.shown().is_empty());

    assert_eq!(
        client.refresh_expressions().await,
        ListPanel::Failed,
        "unreachable list endpoint should render the failure notice"
    );
}
