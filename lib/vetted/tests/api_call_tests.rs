//! Tests of `ApiCall` state transitions against a wiremock server.

use std::time::Duration;

use assert2::{check, let_assert};
use serde::{Deserialize, Serialize};
use serde_json::json;
use vetted::{AbortReason, ApiCall, ApiClient, ApiError, CallState, Endpoint, Shape};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Project {
    id: u64,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Problem {
    error: String,
}

#[derive(Debug, Serialize)]
struct ProjectId {
    id: u64,
}

const GET_PROJECT: Endpoint<ProjectId, Shape<Project>, Shape<Problem>> =
    Endpoint::get("/projects/{id}", Shape::new(), Shape::new());

async fn mount_project(server: &MockServer, id: u64, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/projects/{id}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": id, "name": format!("project-{id}")}))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn holder(server: &MockServer) -> ApiCall<ProjectId, Shape<Project>, Shape<Problem>> {
    let client = ApiClient::builder(server.uri()).build().expect("client");
    ApiCall::new(client.bind(GET_PROJECT))
}

#[tokio::test]
async fn test_idle_until_first_call() {
    let mock_server = MockServer::start().await;
    mount_project(&mock_server, 1, Duration::ZERO).await;

    let call = holder(&mock_server);
    check!(matches!(call.state(), CallState::Idle));
    check!(!call.is_loading());

    let result = call.call(ProjectId { id: 1 }).await;
    let_assert!(Ok(response) = result);
    check!(response.body.name == "project-1");

    let_assert!(Some(Ok(stored)) = call.result());
    check!(stored.body.id == 1);
}

#[tokio::test]
async fn test_second_call_supersedes_first() {
    let mock_server = MockServer::start().await;
    mount_project(&mock_server, 1, Duration::from_secs(5)).await;
    mount_project(&mock_server, 2, Duration::ZERO).await;

    let call = holder(&mock_server);
    let first = tokio::spawn(call.call(ProjectId { id: 1 }));
    let second = call.call(ProjectId { id: 2 });

    let first = first.await.expect("join");
    let_assert!(Err(ApiError::Fetch { cause }) = first);
    check!(cause.abort_reason() == Some(AbortReason::Superseded));
    check!(call.is_loading());

    let second = second.await;
    check!(second.is_ok());

    let_assert!(Some(Ok(stored)) = call.result());
    check!(stored.body.id == 2);
}

#[tokio::test]
async fn test_manual_abort_publishes_failure() {
    let mock_server = MockServer::start().await;
    mount_project(&mock_server, 1, Duration::from_secs(5)).await;

    let call = holder(&mock_server);
    let pending = call.call(ProjectId { id: 1 });
    call.abort();

    let_assert!(Err(ApiError::Fetch { cause }) = pending.await);
    check!(cause.abort_reason() == Some(AbortReason::Manual));

    let_assert!(Some(Err(stored)) = call.result());
    check!(stored.is_fetch());
    check!(!call.is_loading());
}

#[tokio::test]
async fn test_teardown_cancels_without_publishing() {
    let mock_server = MockServer::start().await;
    mount_project(&mock_server, 1, Duration::from_secs(5)).await;

    let call = holder(&mock_server);
    let mut updates = call.subscribe();
    let pending = tokio::spawn(call.call(ProjectId { id: 1 }));
    updates.mark_unchanged();

    drop(call);

    let result = pending.await.expect("join");
    let_assert!(Err(ApiError::Fetch { cause }) = result);
    check!(cause.abort_reason() == Some(AbortReason::Teardown));
    check!(matches!(*updates.borrow(), CallState::InFlight));
}

#[tokio::test]
async fn test_on_mount_issues_one_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4, "name": "four"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::builder(mock_server.uri()).build().expect("client");
    let call = ApiCall::on_mount(client.bind(GET_PROJECT), ProjectId { id: 4 });
    check!(call.is_loading());

    let mut updates = call.subscribe();
    let settled = tokio::time::timeout(
        Duration::from_secs(5),
        updates.wait_for(|state| matches!(state, CallState::Settled(_))),
    )
    .await
    .expect("settled in time")
    .expect("sender alive")
    .clone();

    let_assert!(CallState::Settled(Ok(response)) = settled);
    check!(response.body.name == "four");
}

#[tokio::test]
async fn test_error_response_is_published() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "missing"})))
        .mount(&mock_server)
        .await;

    let call = holder(&mock_server);
    let _ = call.call(ProjectId { id: 404 }).await;

    let_assert!(Some(Err(ApiError::ErrorResponse { status, body, .. })) = call.result());
    check!(status == 404);
    check!(body.error == "missing");
}
