//! Unit tests for `SubprocessTransport`
//!
//! Tests spawning, framing over real pipes and termination, plus full
//! sessions against the shell server in `tests/fixtures`.

#![cfg(unix)]

use std::path::PathBuf;
use std::time::Duration;

use mcp_stdio_client::protocol::JsonRpcRequest;
use mcp_stdio_client::{
    McpClientError, RequestId, Session, SessionOptions, SubprocessTransport, Transport,
};
use serde_json::json;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn mock_server(mode: &str) -> SessionOptions {
    let script: PathBuf = [env!("CARGO_MANIFEST_DIR"), "tests", "fixtures", "mock_server.sh"]
        .iter()
        .collect();

    SessionOptions::builder("sh")
        .arg(script.display().to_string())
        .arg(mode)
        .response_timeout(Duration::from_secs(5))
        .build()
}

#[tokio::test]
async fn test_session_against_mock_server() {
    init_logger();

    let mut session = Session::connect(mock_server("normal")).await.unwrap();
    assert_eq!(session.server_info().unwrap().server_info.name, "mock");

    let tools = session.list_tools().await.unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name.as_str(), "get_weather");
    assert_eq!(tools[0].parameters["city"].description, "city name");

    let weather = session
        .call_tool("get_weather", json!({"city": "Beijing"}))
        .await
        .unwrap();
    assert_eq!(weather["content"][0]["text"], "sunny");

    let unknown = session.call_tool("nope", json!({})).await;
    assert!(matches!(unknown, Err(McpClientError::Server(ref e)) if e.code == -32601));
    assert!(session.is_ready());

    session.terminate().unwrap();
    session.terminate().unwrap();
}

#[tokio::test]
async fn test_connect_reports_handshake_error() {
    init_logger();

    let result = Session::connect(mock_server("bad-init")).await;
    assert!(matches!(result, Err(McpClientError::Server(ref e)) if e.message == "init failed"));
}

#[tokio::test]
async fn test_silent_server_times_out() {
    init_logger();

    let options = SessionOptions {
        response_timeout: Duration::from_millis(200),
        ..mock_server("silent")
    };
    let result = Session::connect(options).await;
    assert!(matches!(result, Err(McpClientError::Timeout(_))));
}

#[tokio::test]
async fn test_missing_executable_is_spawn_error() {
    let result = SubprocessTransport::spawn("/nonexistent/dir/mcp-server", Vec::<String>::new());
    assert!(matches!(result, Err(McpClientError::Spawn(_))));

    let result = SubprocessTransport::spawn("no-such-mcp-server-on-path", Vec::<String>::new());
    assert!(matches!(result, Err(McpClientError::Spawn(ref msg)) if msg.contains("PATH")));
}

#[tokio::test]
async fn test_non_executable_file_is_spawn_error() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let result = SubprocessTransport::spawn(file.path(), Vec::<String>::new());
    assert!(matches!(result, Err(McpClientError::Spawn(_))));
}

#[tokio::test]
async fn test_missing_working_directory_is_spawn_error() {
    let options = SessionOptions::builder("cat")
        .cwd("/nonexistent/working/dir")
        .build();

    let result = SubprocessTransport::spawn_with(&options);
    assert!(matches!(result, Err(McpClientError::Spawn(ref msg)) if msg.contains("Working directory")));
}

#[tokio::test]
async fn test_empty_command_is_invalid_config() {
    let result = SubprocessTransport::spawn_with(&SessionOptions::new(""));
    assert!(matches!(result, Err(McpClientError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_frames_round_trip_through_cat() {
    init_logger();

    let mut transport = SubprocessTransport::spawn("cat", Vec::<String>::new()).unwrap();
    assert!(transport.is_ready());
    assert!(transport.pid().is_some());

    let request = JsonRpcRequest::call(RequestId::new(4), "tools/call", json!({"name": "x"}));
    transport.write_frame(&request).await.unwrap();

    let echoed = transport.read_frame(Duration::from_secs(5)).await.unwrap();
    assert_eq!(
        echoed,
        json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "x"}})
    );

    transport.terminate().unwrap();
}

#[tokio::test]
async fn test_silent_child_read_times_out() {
    let mut transport = SubprocessTransport::spawn("sleep", ["5"]).unwrap();

    let result = transport.read_frame(Duration::from_millis(100)).await;
    assert!(matches!(result, Err(McpClientError::Timeout(_))));

    transport.terminate().unwrap();
}

#[tokio::test]
async fn test_exited_child_disconnects_and_rejects_writes() {
    let mut transport = SubprocessTransport::spawn("true", Vec::<String>::new()).unwrap();

    let result = transport.read_frame(Duration::from_secs(5)).await;
    assert!(matches!(result, Err(McpClientError::Disconnected(_))));
    assert!(!transport.is_ready());

    let result = transport.write_frame(&json!({"jsonrpc": "2.0"})).await;
    assert!(matches!(result, Err(McpClientError::Write(_))));

    transport.terminate().unwrap();
}

#[tokio::test]
async fn test_terminated_transport_rejects_io() {
    let mut transport = SubprocessTransport::spawn("cat", Vec::<String>::new()).unwrap();

    transport.terminate().unwrap();
    transport.terminate().unwrap();
    assert!(!transport.is_ready());
    assert_eq!(transport.pid(), None);

    let result = transport.write_frame(&json!({})).await;
    assert!(matches!(result, Err(McpClientError::Write(_))));

    let result = transport.read_frame(Duration::from_millis(100)).await;
    assert!(matches!(result, Err(McpClientError::Disconnected(_))));
}
