use std::process::Command;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::post;
use bytes::Bytes;
use participant_probe::{ProbeConfig, QueryRunner, RestErrorKind};
use tokio::net::TcpListener;

const PARTICIPANT_BODY: &str = r#"{"RegistrationData":{"RegistrationSubmit":{"Participant":{"@ParticipantName":"1R85","@CompanyShortName":"ACME"}}}}"#;

#[derive(Debug, Clone)]
struct SeenRequest {
    content_type: Option<String>,
    body: Bytes,
}

#[derive(Clone, Default)]
struct AppState {
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

#[tokio::test]
async fn e2e_request_shape_and_participant_output() {
    let server = TestServer::start().await;
    let runner = QueryRunner::new(ProbeConfig::new(
        server.url("/api/participants/query"),
        "1R85",
    ));

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    runner
        .run(&mut stdout, &mut stderr)
        .await
        .expect("in-memory sinks should accept output");
    let stdout = String::from_utf8(stdout).expect("utf-8 stdout");

    assert!(stderr.is_empty());
    assert!(stdout.contains("Status: 200\n"));
    assert!(stdout.contains("ParticipantName: 1R85\n"));
    assert!(stdout.contains("CompanyShortName: ACME\n"));

    let seen = server.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(&seen[0].body[..], br#"{"participantName":"1R85"}"#);
}

#[tokio::test]
async fn e2e_empty_object_reports_missing_participant() {
    let server = TestServer::start().await;
    let runner = QueryRunner::new(ProbeConfig::new(server.url("/empty"), "1R85"));

    let outcome = runner.query().await.expect("empty object should parse");
    assert_eq!(outcome.status, 200);
    assert!(outcome.participant().is_none());
}

#[tokio::test]
async fn e2e_html_body_is_a_parse_error() {
    let server = TestServer::start().await;
    let runner = QueryRunner::new(ProbeConfig::new(server.url("/html"), "1R85"));

    let err = runner.query().await.expect_err("html should not parse");
    assert_eq!(err.kind(), RestErrorKind::Parse);
}

#[tokio::test]
async fn e2e_connection_refused_is_reported_not_raised() {
    let endpoint = refused_endpoint();
    let runner = QueryRunner::new(ProbeConfig::new(endpoint, "1R85"));

    let err = runner.query().await.expect_err("nothing listens on the port");
    assert_eq!(err.kind(), RestErrorKind::Connect);

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    runner
        .run(&mut stdout, &mut stderr)
        .await
        .expect("failure should be swallowed");
    let stderr = String::from_utf8(stderr).expect("utf-8 stderr");
    assert!(stderr.starts_with("❌ Error testing query: "));
    assert!(stderr.len() > "❌ Error testing query: \n".len());
}

#[test]
fn e2e_binary_exits_zero_on_connection_refused() {
    let output = Command::new(env!("CARGO_BIN_EXE_participant-probe"))
        .args(["--endpoint", &refused_endpoint()])
        .env_remove("RUST_LOG")
        .output()
        .expect("probe binary should launch");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stdout, "Testing participant query for 1R85...\n");
    assert!(stderr.contains("❌ Error testing query: "));
}

#[test]
fn e2e_binary_exits_zero_on_bad_arguments() {
    for args in [
        vec!["extra-arg".to_string()],
        vec!["--timeout-ms".to_string(), "abc".to_string()],
    ] {
        let output = Command::new(env!("CARGO_BIN_EXE_participant-probe"))
            .args(&args)
            .env_remove("RUST_LOG")
            .output()
            .expect("probe binary should launch");

        assert!(output.status.success(), "args {args:?}");
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stdout.starts_with("Testing participant query for 1R85...\n"));
        assert!(stderr.contains("error:"), "stderr was: {stderr}");
    }
}

fn refused_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/api/participants/query")
}

struct TestServer {
    base_url: String,
    state: AppState,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn start() -> Self {
        let state = AppState::default();
        let app = Router::new()
            .route("/api/participants/query", post(query_handler))
            .route("/empty", post(empty_handler))
            .route("/html", post(html_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("local addr");
        let base_url = format!("http://{}", addr);

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url,
            state,
            task,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn seen(&self) -> Vec<SeenRequest> {
        self.state.seen.lock().expect("seen log poisoned").clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn query_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    state
        .seen
        .lock()
        .expect("seen log poisoned")
        .push(SeenRequest { content_type, body });
    (StatusCode::OK, PARTICIPANT_BODY)
}

async fn empty_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "{}")
}

async fn html_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "<html>Internal error</html>")
}
