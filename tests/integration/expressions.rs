use axum::http::Method;
use serde_json::json;

use calc_client::{ListPanel, LookupPanel, Notice};
use calc_core::wire::{ExpressionRecord, RecordId, Scalar};

use crate::*;

fn pending(id: i64, expression: &str) -> ExpressionRecord {
    ExpressionRecord {
        id: RecordId::Int(id),
        expression: expression.to_string(),
        status: "pending".to_string(),
        result: Some(Scalar::Text(String::new())),
    }
}

/// One create request per submit, followed by exactly one list refresh.
#[tokio::test]
async fn test_submit_then_single_refresh() {
    let orch = FakeOrchestrator::start().await.unwrap();
    let (client, screen) = client_for(&orch, orch.config());

    let id = client.submit_expression("2+2*2").await;
    assert_eq!(id, Some(RecordId::Int(1)));

    let hits = orch.hits().await;
    assert_eq!(hits.len(), 2, "unexpected traffic: {:?}", hits);
    assert_eq!(hits[0].method, Method::POST);
    assert_eq!(hits[0].path, "/api/v1/calculate");
    assert_eq!(hits[0].body, Some(json!({ "expression": "2+2*2" })));
    assert_eq!(hits[1].method, Method::GET);
    assert_eq!(hits[1].path, "/api/v1/expressions");

    assert_eq!(
        screen.shown(),
        vec![
            Shown::Notice(Notice::Submitted { id: RecordId::Int(1) }),
            Shown::List(ListPanel::Records(vec![pending(1, "2+2*2")])),
        ]
    );
}

#[tokio::test]
async fn test_rejected_submission_does_not_refresh() {
    let orch = FakeOrchestrator::start().await.unwrap();
    let (client, screen) = client_for(&orch, orch.config());

    assert!(client.submit_expression("   ").await.is_none());
    assert_eq!(orch.count(Method::GET, "/api/v1/expressions").await, 0);
    assert!(screen.shown().is_empty());
}

#[tokio::test]
async fn test_lookup_blank_id_sends_nothing() {
    let orch = FakeOrchestrator::start().await.unwrap();
    let (client, screen) = client_for(&orch, orch.config());

    assert!(client.lookup_expression("").await.is_none());
    assert!(orch.hits().await.is_empty());
    assert_eq!(screen.shown(), vec![Shown::Notice(Notice::MissingExpressionId)]);
}

#[tokio::test]
async fn test_lookup_both_shapes_and_not_found() {
    let orch = FakeOrchestrator::start().await.unwrap();
    let (client, _screen) = client_for(&orch, orch.config());
    client.submit_expression("7-3").await.unwrap();

    assert_eq!(
        client.lookup_expression("1").await,
        Some(LookupPanel::Found(pending(1, "7-3")))
    );

    orch.state.lock().await.bare_lookup = true;
    assert_eq!(
        client.lookup_expression("1").await,
        Some(LookupPanel::Found(pending(1, "7-3")))
    );

    assert_eq!(
        client.lookup_expression("999").await,
        Some(LookupPanel::NotFound { id: "999".to_string() })
    );
    assert_eq!(orch.count(Method::GET, "/api/v1/expressions/999").await, 1);
}

#[tokio::test]
async fn test_list_without_field_renders_empty() {
    let orch = FakeOrchestrator::start().await.unwrap();
    let (client, screen) = client_for(&orch, orch.config());
    orch.state.lock().await.omit_list_field = true;

    assert_eq!(client.refresh_expressions().await, ListPanel::Records(Vec::new()));
    assert_eq!(screen.shown(), vec![Shown::List(ListPanel::Records(Vec::new()))]);
}
