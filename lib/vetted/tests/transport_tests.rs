//! `HyperClient` exchanges against a wiremock server.

use std::time::Duration;

use assert2::{check, let_assert};
use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use vetted::{ClientConfig, HttpClient, HyperClient, Method, PathTemplate, Request};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path},
};

fn at(server: &MockServer, route: &str) -> url::Url {
    url::Url::parse(&format!("{}{route}", server.uri())).expect("url")
}

#[tokio::test]
async fn test_body_is_read_in_full() {
    let mock_server = MockServer::start().await;

    let projects: Vec<_> = (0..200)
        .map(|id| serde_json::json!({"id": id, "name": format!("project-{id}")}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&projects))
        .mount(&mock_server)
        .await;

    let request = Request::builder(Method::Get, at(&mock_server, "/projects")).build();
    let response = HyperClient::new().execute(request).await.expect("response");

    check!(response.is_success());
    let decoded: Vec<serde_json::Value> =
        serde_json::from_slice(response.body()).expect("json array");
    check!(decoded == projects);
}

#[tokio::test]
async fn test_headers_and_body_reach_the_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/projects/3"))
        .and(header("content-type", "application/json"))
        .and(header("x-tenant", "acme"))
        .and(body_string(r#"{"name":"gamma"}"#))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request = Request::builder(Method::Patch, at(&mock_server, "/projects/3"))
        .headers([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("X-Tenant".to_string(), "acme".to_string()),
        ])
        .body(Bytes::from_static(br#"{"name":"gamma"}"#))
        .build();

    let response = HyperClient::new().execute(request).await.expect("response");
    check!(response.status() == 204);
    check!(response.body().is_empty());
}

#[tokio::test]
async fn test_error_status_is_still_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/projects/9"))
        .respond_with(
            ResponseTemplate::new(409)
                .insert_header("X-Request-Id", "r-9")
                .set_body_string("busy"),
        )
        .mount(&mock_server)
        .await;

    let request = Request::builder(Method::Delete, at(&mock_server, "/projects/9")).build();
    let response = HyperClient::new().execute(request).await.expect("response");

    check!(response.is_client_error());
    check!(response.status_text() == "Conflict");
    check!(response.header("x-request-id") == Some("r-9"));
    check!(response.text().expect("text") == "busy");
}

#[tokio::test]
async fn test_custom_reason_phrase_is_kept() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = [0_u8; 1024];
        let _ = socket.read(&mut buf).await.expect("read");
        socket
            .write_all(
                b"HTTP/1.1 404 Project Archived\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
            )
            .await
            .expect("write");
    });

    let url = url::Url::parse(&format!("http://{addr}/projects/4")).expect("url");
    let request = Request::builder(Method::Get, url).build();
    let response = HyperClient::new().execute(request).await.expect("response");

    check!(response.status() == 404);
    check!(response.status_text() == "Project Archived");
}

#[tokio::test]
async fn test_transport_timeout_covers_slow_servers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .config(ClientConfig::default().timeout(Duration::from_millis(100)))
        .build();
    let request = Request::builder(Method::Get, at(&mock_server, "/slow")).build();

    let_assert!(Err(err) = client.execute(request).await);
    check!(err.is_timeout());
}

#[tokio::test]
async fn test_refused_connection_is_a_connection_error() {
    let url = url::Url::parse("http://127.0.0.1:1/projects").expect("url");
    let request = Request::builder(Method::Get, url).build();

    let_assert!(Err(err) = HyperClient::new().execute(request).await);
    check!(err.is_connection());
    check!(err.abort_reason() == None);
}

#[tokio::test]
async fn test_logged_client_behaves_like_plain_client() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let logged = HyperClient::builder()
        .with_logging()
        .with_debug_logging()
        .build();
    let request = || {
        Request::builder(Method::Get, at(&mock_server, "/projects/1"))
            .header("Authorization", "Bearer hidden")
            .extension(PathTemplate::new("/projects/{id}"))
            .build()
    };

    let plain = HyperClient::new().execute(request()).await.expect("plain");
    let logged = logged.execute(request()).await.expect("logged");
    check!(plain.status() == logged.status());
    check!(plain.body() == logged.body());
}
