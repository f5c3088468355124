use std::sync::{Arc, Once};
use std::time::Duration;

use chat_core::{Outcome, Turn, FAILED_RESPONSE_TEXT};
use chat_engine::{
    ChatEndpoint, CommonMarkRenderer, ContentKind, EndpointError, EndpointSettings, EngineEvent,
    EngineHandle, PresentationSink, RequestDispatcher, ReqwestEndpoint, SubmissionController,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(chat_logging::initialize_for_tests);
}

struct StaticEndpoint(Result<String, EndpointError>);

#[async_trait::async_trait]
impl ChatEndpoint for StaticEndpoint {
    async fn complete(&self, _conversation: &[Turn]) -> Result<String, EndpointError> {
        self.0.clone()
    }
}

struct PanickingEndpoint;

#[async_trait::async_trait]
impl ChatEndpoint for PanickingEndpoint {
    async fn complete(&self, _conversation: &[Turn]) -> Result<String, EndpointError> {
        panic!("endpoint exploded");
    }
}

/// Keeps only the latest content of each entry, which is all these tests look at.
#[derive(Default)]
struct LastContentSink {
    entries: Vec<(String, ContentKind, bool)>,
}

impl PresentationSink for LastContentSink {
    type Handle = usize;

    fn render_turn(&mut self, _role: chat_core::Role, content: &str, kind: ContentKind) -> usize {
        self.entries.push((content.to_string(), kind, false));
        self.entries.len() - 1
    }

    fn update_turn(&mut self, handle: &usize, content: &str, kind: ContentKind) {
        self.entries[*handle].0 = content.to_string();
        self.entries[*handle].1 = kind;
    }

    fn mark_error(&mut self, handle: &usize) {
        self.entries[*handle].2 = true;
    }
}

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn engine_reports_exactly_one_completion_per_request() {
    init_logging();
    let engine = EngineHandle::new(Arc::new(StaticEndpoint(Ok("pong".to_string()))));

    engine.dispatch(7, vec![Turn::user("ping")]).unwrap();

    assert_eq!(
        engine.recv(),
        Some(EngineEvent::Completed {
            request_id: 7,
            outcome: Outcome::Reply("pong".to_string()),
        })
    );
    assert_eq!(engine.recv_timeout(Duration::from_millis(100)), None);
}

#[test]
fn engine_maps_endpoint_errors_to_outcomes() {
    init_logging();
    let engine = EngineHandle::new(Arc::new(StaticEndpoint(Err(EndpointError::Status(503)))));

    engine.dispatch(1, vec![Turn::user("ping")]).unwrap();

    assert_eq!(
        engine.recv_timeout(WAIT),
        Some(EngineEvent::Completed {
            request_id: 1,
            outcome: Outcome::Rejected { status: 503 },
        })
    );
}

#[test]
fn panicking_endpoint_still_completes_as_transport_failure() {
    init_logging();
    let engine = EngineHandle::new(Arc::new(PanickingEndpoint));

    engine.dispatch(3, vec![Turn::user("ping")]).unwrap();

    match engine.recv_timeout(WAIT) {
        Some(EngineEvent::Completed {
            request_id: 3,
            outcome: Outcome::Transport { .. },
        }) => {}
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn controller_recovers_from_unreachable_endpoint() {
    init_logging();
    let endpoint = ReqwestEndpoint::new(EndpointSettings {
        url: "http://127.0.0.1:1/api/chat".to_string(),
        ..EndpointSettings::default()
    })
    .unwrap();
    let engine = EngineHandle::new(Arc::new(endpoint));
    let mut controller =
        SubmissionController::new(LastContentSink::default(), engine.clone(), CommonMarkRenderer);

    controller.submit("Hello");
    assert!(controller.is_busy());
    controller.handle_event(engine.recv_timeout(WAIT).expect("completion"));

    assert!(!controller.is_busy());
    assert_eq!(controller.transcript().turns(), &[Turn::user("Hello")]);
    let (content, kind, errored) = &controller.sink().entries[1];
    assert_eq!(content, FAILED_RESPONSE_TEXT);
    assert_eq!(*kind, ContentKind::Text);
    assert!(*errored);
}

#[tokio::test(flavor = "multi_thread")]
async fn full_cycle_against_http_endpoint() {
    init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "**Hi**" })))
        .mount(&server)
        .await;

    let endpoint = ReqwestEndpoint::new(EndpointSettings {
        url: format!("{}/api/chat", server.uri()),
        ..EndpointSettings::default()
    })
    .unwrap();
    let engine = EngineHandle::new(Arc::new(endpoint));
    let mut controller =
        SubmissionController::new(LastContentSink::default(), engine.clone(), CommonMarkRenderer);

    controller.submit("Hello");
    let waiter = engine.clone();
    let event = tokio::task::spawn_blocking(move || waiter.recv_timeout(WAIT))
        .await
        .unwrap()
        .expect("completion");
    controller.handle_event(event);

    assert_eq!(
        controller.transcript().turns(),
        &[Turn::user("Hello"), Turn::model("**Hi**")]
    );
    let (content, kind, errored) = &controller.sink().entries[1];
    assert!(content.contains("<strong>Hi</strong>"));
    assert_eq!(*kind, ContentKind::Markup);
    assert!(!*errored);
}
