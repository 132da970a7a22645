use std::time::Duration;

use summa_engine::{EngineConfig, EngineEvent, EngineHandle, ExtractError, FetchError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EVENT_WAIT: Duration = Duration::from_secs(10);

fn wait_for(handle: &EngineHandle) -> EngineEvent {
    handle.recv_timeout(EVENT_WAIT).expect("engine event")
}

#[tokio::test(flavor = "multi_thread")]
async fn extract_command_produces_article_markdown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Post</title></head><body><article><p>Body text</p></article></body></html>",
            "text/html; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let handle = EngineHandle::new(EngineConfig::default());
    handle.commands().extract(1, format!("{}/post", server.uri()));

    match wait_for(&handle) {
        EngineEvent::ArticleExtracted { run_id, result } => {
            assert_eq!(run_id, 1);
            let markdown = result.expect("extraction ok");
            assert!(markdown.starts_with("# Post"), "{markdown:?}");
            assert!(markdown.contains("Body text"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn extract_command_reports_http_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let handle = EngineHandle::new(EngineConfig::default());
    handle.commands().extract(7, format!("{}/gone", server.uri()));

    match wait_for(&handle) {
        EngineEvent::ArticleExtracted { run_id, result } => {
            assert_eq!(run_id, 7);
            assert_eq!(result, Err(ExtractError::Fetch(FetchError::HttpStatus(404))));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn render_command_produces_html() {
    let handle = EngineHandle::new(EngineConfig::default());
    handle.commands().render(3, "## Summary\nOK");

    match wait_for(&handle) {
        EngineEvent::SummaryRendered { run_id, result } => {
            assert_eq!(run_id, 3);
            let html = result.expect("render ok");
            assert!(html.contains("<h2>Summary</h2>"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn events_carry_their_run_ids_across_interleaved_commands() {
    let handle = EngineHandle::new(EngineConfig::default());
    handle.commands().render(10, "first");
    handle.commands().render(11, "second");

    let mut seen = Vec::new();
    for _ in 0..2 {
        match wait_for(&handle) {
            EngineEvent::SummaryRendered { run_id, .. } => seen.push(run_id),
            other => panic!("unexpected event {other:?}"),
        }
    }
    seen.sort_unstable();
    assert_eq!(seen, vec![10, 11]);
}
