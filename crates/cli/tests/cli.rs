//! End-to-end runs of the compiled binary with a controlled environment

use std::process::Output;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use serde_json::{Value, json};
use tokio::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_hook-to-rest");

fn hook(program: &str) -> Command {
    let mut cmd = Command::new(program);
    cmd.env_clear();
    cmd
}

async fn output(cmd: &mut Command) -> (Output, String) {
    let out = cmd.output().await.unwrap();
    let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
    (out, stderr)
}

#[derive(Clone)]
struct Endpoint {
    status: StatusCode,
    bodies: Arc<Mutex<Vec<String>>>,
}

async fn receive(State(endpoint): State<Endpoint>, body: String) -> StatusCode {
    endpoint.bodies.lock().unwrap().push(body);
    endpoint.status
}

/// Accept POSTs on any path of an ephemeral port; returns its base URL
async fn spawn_endpoint(status: StatusCode) -> (String, Arc<Mutex<Vec<String>>>) {
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/{*path}", post(receive))
        .with_state(Endpoint {
            status,
            bodies: Arc::clone(&bodies),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), bodies)
}

#[tokio::test]
async fn dry_run_logs_request_and_exits_zero() {
    let (out, stderr) = output(
        hook(BIN)
            .arg("-n")
            .env("BP_FOO_DATA", r#"{"x":1}"#)
            .env("BP_FOO", "hello")
            .env("OTHER", "ignored"),
    )
    .await;

    assert!(out.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("POST: http://127.0.0.1/api/v1/hook/hook-to-rest"));
    assert!(stderr.contains(r#"{"BP_FOO":"hello","BP_FOO_DATA":{"x":1}}"#));
    assert!(!stderr.contains("OTHER"));
}

#[tokio::test]
async fn invalid_json_is_sent_as_string_with_warning() {
    let (out, stderr) = output(
        hook(BIN)
            .arg("-n")
            .env("BP_HOOK_DATA_SUFFIX_LIST", "_X,_Y")
            .env("BP_THING_X", "not valid json"),
    )
    .await;

    assert!(out.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("WARN"));
    assert!(stderr.contains(r#"{"BP_THING_X":"not valid json"}"#));
    assert!(!stderr.contains(r#""BP_HOOK_DATA_SUFFIX_LIST""#));
}

#[tokio::test]
async fn verbose_reports_ignored_variables() {
    let (out, stderr) = output(hook(BIN).args(["-n", "-v"]).env("OTHER", "ignored")).await;

    assert!(out.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("ignoring environment variable 'OTHER'"));
    assert!(stderr.contains("BP_HOOK_URL_REDIRECT_HOOK_TO_REST"));
}

#[tokio::test]
async fn delivers_to_redirected_url() {
    let (base_url, bodies) = spawn_endpoint(StatusCode::OK).await;

    let (out, stderr) = output(
        hook(BIN)
            .env("BP_HOOK_URL_REDIRECT_HOOK_TO_REST", format!("{}/hook", base_url))
            .env("BP_FOO_DATA", r#"{"x":1}"#)
            .env("BP_FOO", "hello"),
    )
    .await;

    assert!(out.status.success(), "stderr: {}", stderr);
    let bodies = bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    let body: Value = serde_json::from_str(&bodies[0]).unwrap();
    assert_eq!(body, json!({"BP_FOO_DATA": {"x": 1}, "BP_FOO": "hello"}));
}

#[tokio::test]
async fn post_line_is_debug_outside_dry_run() {
    let (base_url, bodies) = spawn_endpoint(StatusCode::OK).await;
    let redirect = format!("{}/hook", base_url);

    let (out, quiet) = output(
        hook(BIN)
            .env("BP_HOOK_URL_REDIRECT_HOOK_TO_REST", &redirect)
            .env("BP_FOO", "hello"),
    )
    .await;
    assert!(out.status.success(), "stderr: {}", quiet);
    assert!(!quiet.contains("POST:"), "stderr: {}", quiet);

    let (out, verbose) = output(
        hook(BIN)
            .arg("-v")
            .env("BP_HOOK_URL_REDIRECT_HOOK_TO_REST", &redirect)
            .env("BP_FOO", "hello"),
    )
    .await;
    assert!(out.status.success(), "stderr: {}", verbose);
    assert!(verbose.contains("DEBUG"));
    assert!(verbose.contains(&format!(r#"POST: {} '{{"BP_FOO":"hello"}}'"#, redirect)));
    assert_eq!(bodies.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn verbose_delivery_omits_http_client_internals() {
    let (base_url, _bodies) = spawn_endpoint(StatusCode::OK).await;

    let (out, stderr) = output(
        hook(BIN)
            .arg("-v")
            .env("BP_HOOK_URL_REDIRECT_HOOK_TO_REST", format!("{}/hook", base_url))
            .env("BP_FOO", "hello"),
    )
    .await;

    assert!(out.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("hook_to_rest_core"));
    assert!(!stderr.contains("hyper"), "stderr: {}", stderr);
    assert!(!stderr.contains("reqwest::"), "stderr: {}", stderr);
}

#[tokio::test]
async fn server_error_exits_nonzero() {
    let (base_url, _bodies) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR).await;

    let (out, stderr) = output(
        hook(BIN)
            .env("BP_HOOK_URL_REDIRECT_HOOK_TO_REST", format!("{}/hook", base_url))
            .env("BP_FOO", "hello"),
    )
    .await;

    assert!(!out.status.success());
    assert!(stderr.contains("500 Internal Server Error"), "stderr: {}", stderr);
}

#[tokio::test]
async fn unreachable_endpoint_exits_nonzero() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (out, stderr) = output(
        hook(BIN).env(
            "BP_HOOK_URL_REDIRECT_HOOK_TO_REST",
            format!("http://{}/hook", addr),
        ),
    )
    .await;

    assert!(!out.status.success());
    assert!(stderr.contains("unable to POST to URL"), "stderr: {}", stderr);
}

#[cfg(unix)]
#[tokio::test]
async fn symlink_name_selects_hook() {
    let dir = tempfile::TempDir::new().unwrap();
    let link = dir.path().join("southbound-update");
    std::os::unix::fs::symlink(BIN, &link).unwrap();
    let link = link.to_str().unwrap().to_string();

    let (out, stderr) = output(hook(&link).arg("-n").env("BP_FOO", "hello")).await;
    assert!(out.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("POST: http://127.0.0.1/api/v1/hook/southbound-update"));

    let (base_url, bodies) = spawn_endpoint(StatusCode::ACCEPTED).await;
    let (out, stderr) = output(
        hook(&link)
            .env(
                "BP_HOOK_URL_REDIRECT_SOUTHBOUND_UPDATE",
                format!("{}/custom", base_url),
            )
            .env("BP_FOO", "hello"),
    )
    .await;
    assert!(out.status.success(), "stderr: {}", stderr);
    assert_eq!(*bodies.lock().unwrap(), [r#"{"BP_FOO":"hello"}"#]);
}
