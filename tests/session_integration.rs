//! Command loop tests against a local mock server.

use std::time::Duration;

use serde_json::json;
use tokio::sync::oneshot;
use upb::{BrowserConfig, Command, Flow, Session, USAGE};
use upb_services::{Endpoints, ServiceConfig, Services};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> Session {
    let config = ServiceConfig {
        timeout_seconds: 5,
        endpoints: Endpoints::rebased(&server.uri()),
        ..Default::default()
    };
    Session::new(Services::new(config).expect("valid config"), "MicroPython")
}

async fn run_line(session: &mut Session, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let flow = session
        .execute(Command::parse(line), &mut out)
        .await
        .expect("write to buffer");
    (flow, String::from_utf8(out).expect("utf-8 output"))
}

#[tokio::test]
async fn search_then_reload_fetch_the_same_summary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Rust"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Rust (programming language)",
            "extract": "Rust is a general-purpose programming language."
        })))
        .expect(2)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let expected = "Fetching: Rust\n\n=== Rust (programming language) ===\n\
                    Rust is a general-purpose programming language.\n\n";

    let (flow, text) = run_line(&mut session, "search Rust").await;
    assert_eq!(flow, Flow::Continue);
    assert_eq!(text, expected);

    let (_, text) = run_line(&mut session, "reload").await;
    assert_eq!(text, expected);
    assert_eq!(session.current_term(), "Rust");
}

#[tokio::test]
async fn reload_before_search_uses_initial_term() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/MicroPython"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "MicroPython", "extract": "A Python for microcontrollers."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let (_, text) = run_line(&mut session, "reload").await;
    assert!(text.contains("=== MicroPython ===\nA Python for microcontrollers.\n"));
}

#[tokio::test]
async fn unknown_command_makes_no_request() {
    let server = MockServer::start().await;
    let mut session = session_for(&server);

    let (flow, text) = run_line(&mut session, "foobar").await;
    assert_eq!(flow, Flow::Continue);
    assert_eq!(text, format!("{USAGE}\n"));
    assert_eq!(session.current_term(), "MicroPython");

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn xkcd_commands_pick_the_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/500/info.0.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "num": 500, "title": "Election", "alt": "Vote."
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/info.0.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "num": 3000, "title": "Latest", "alt": "New."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let (_, text) = run_line(&mut session, "xkcd 500").await;
    assert_eq!(text, "\n=== #500 - Election ===\nVote.\n\n");

    let (_, text) = run_line(&mut session, "xkcd").await;
    assert_eq!(text, "\n=== #3000 - Latest ===\nNew.\n\n");
    assert_eq!(session.current_term(), "MicroPython");
}

#[tokio::test]
async fn ddg_answer_becomes_current_term() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Heading": "Ferris", "AbstractText": "The Rust mascot."
        })))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let (_, text) = run_line(&mut session, "ddg ferris crab").await;
    assert_eq!(
        text,
        "Searching DuckDuckGo: ferris crab\n\n=== Ferris ===\nThe Rust mascot.\n\n"
    );
    assert_eq!(session.current_term(), "ferris crab");
}

#[tokio::test]
async fn upstream_failure_keeps_the_loop_alive() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let (flow, text) = run_line(&mut session, "quote").await;
    assert_eq!(flow, Flow::Continue);
    assert!(text.starts_with("\n=== Error ===\nQuote fetch failed: HTTP status 503"));
}

#[tokio::test]
async fn run_reads_until_quit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Ferris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Ferris", "extract": "Crab."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = session_for(&server);
    let mut out = Vec::new();
    session
        .run(&b"\nsearch Ferris\nquit\nsearch ignored\n"[..], &mut out)
        .await
        .expect("run");

    let text = String::from_utf8(out).expect("utf-8 output");
    assert_eq!(
        text,
        "uPB> uPB> Fetching: Ferris\n\n=== Ferris ===\nCrab.\n\nuPB> Bye!\n"
    );
}

#[tokio::test]
async fn interrupt_during_fetch_ends_the_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"title": "Slow", "extract": "x"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let (tx, rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        let _ = tx.send(());
    });

    let mut session = session_for(&server);
    let mut out = Vec::new();
    let finished = tokio::time::timeout(
        Duration::from_secs(2),
        session.run_until(&b"search Slow\nquit\n"[..], &mut out, async {
            let _ = rx.await;
        }),
    )
    .await;

    assert!(finished.is_ok(), "loop kept running after interrupt");
    finished.expect("in time").expect("run");
    let text = String::from_utf8(out).expect("utf-8 output");
    assert_eq!(text, "uPB> Fetching: Slow\n\nBye!\n");
}

#[tokio::test]
async fn config_file_drives_the_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/rest_v1/page/summary/Tokio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Tokio", "extract": "An async runtime."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("config.toml");
    let mut config = BrowserConfig::default();
    config.session.default_term = "Tokio".into();
    config.services.endpoints = Endpoints::rebased(&server.uri());
    config.save_to_file(&file).expect("save");

    let loaded = BrowserConfig::load(Some(&file)).expect("load");
    let services = Services::new(loaded.services).expect("valid config");
    let mut session = Session::new(services, loaded.session.default_term);

    let (_, text) = run_line(&mut session, "reload").await;
    assert!(text.starts_with("Fetching: Tokio\n"));
    assert!(text.contains("=== Tokio ===\nAn async runtime."));
}
