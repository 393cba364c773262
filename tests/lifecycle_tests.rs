//! Lifecycle tests for the heartbeat HTTP listener.
//!
//! These tests bind real sockets (port 0) and talk to the server over TCP to
//! verify the start/stop contract end to end.

use heartbeatd::config::HeartbeatConfig;
use heartbeatd::error::AppError;
use heartbeatd::readiness::AtomicReadiness;
use heartbeatd::server::HttpService;
use heartbeatd::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

fn localhost_config(port: u16) -> HeartbeatConfig {
    HeartbeatConfig {
        port,
        bind_address: "127.0.0.1".to_string(),
        path: "/heartbeat".to_string(),
    }
}

fn service(ready: bool, port: u16) -> (HttpService, Arc<AtomicReadiness>) {
    let readiness = Arc::new(AtomicReadiness::new(ready));
    let state = Arc::new(AppState::new(readiness.clone()));
    (HttpService::new(localhost_config(port), state), readiness)
}

/// Issue a plain GET against the heartbeat path and return the raw response.
async fn send_heartbeat_request(addr: SocketAddr) -> String {
    tokio::time::timeout(Duration::from_secs(5), async {
        let mut stream = TcpStream::connect(addr).await.expect("connect failed");
        stream
            .write_all(b"GET /heartbeat HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .expect("write failed");
        let mut response = String::new();
        stream
            .read_to_string(&mut response)
            .await
            .expect("read failed");
        response
    })
    .await
    .expect("heartbeat request timed out")
}

#[tokio::test]
async fn served_heartbeat_reflects_readiness() {
    let (mut service, readiness) = service(true, 0);
    let addr = service.start().await.expect("start failed");

    let response = send_heartbeat_request(addr).await;
    assert!(response.starts_with("HTTP/1.1 200"), "got: {response}");

    readiness.set_ready(false);
    let response = send_heartbeat_request(addr).await;
    assert!(response.starts_with("HTTP/1.1 503"), "got: {response}");

    service.stop().await;
}

#[tokio::test]
async fn stop_without_start_is_a_noop() {
    let (mut service, _) = service(true, 0);
    service.stop().await;
}

#[tokio::test]
async fn double_stop_is_a_noop() {
    let (mut service, _) = service(true, 0);
    service.start().await.expect("start failed");
    service.stop().await;
    service.stop().await;
}

#[tokio::test]
async fn stop_closes_the_listener() {
    let (mut service, _) = service(true, 0);
    let addr = service.start().await.expect("start failed");
    service.stop().await;

    assert!(
        TcpStream::connect(addr).await.is_err(),
        "listener still accepting after stop"
    );
}

#[tokio::test]
async fn start_while_running_returns_current_address() {
    let (mut service, _) = service(true, 0);
    let first = service.start().await.expect("start failed");
    let second = service.start().await.expect("second start failed");
    assert_eq!(first, second);

    service.stop().await;
}

#[tokio::test]
async fn bind_conflict_is_an_error() {
    let (mut first, _) = service(true, 0);
    let addr = first.start().await.expect("start failed");

    let (mut second, _) = service(true, addr.port());
    match second.start().await {
        Err(AppError::Bind { .. }) => {}
        other => panic!("expected a bind error, got {other:?}"),
    }

    first.stop().await;
}

#[tokio::test]
async fn restart_after_stop_works() {
    let (mut service, _) = service(true, 0);
    let addr = service.start().await.expect("start failed");
    assert!(send_heartbeat_request(addr).await.starts_with("HTTP/1.1 200"));
    service.stop().await;

    let addr = service.start().await.expect("restart failed");
    assert!(send_heartbeat_request(addr).await.starts_with("HTTP/1.1 200"));
    service.stop().await;
}
