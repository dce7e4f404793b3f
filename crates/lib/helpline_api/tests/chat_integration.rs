//! Integration tests — build the router with in-memory providers and drive it
//! with `oneshot` requests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use helpline_api::{AppState, router};
use helpline_core::chat::{ChatService, ESCALATION_CONFIRMED_REPLY, EscalationRoute};
use helpline_core::chat_log::{ChatLogRecord, ChatLogStore, StoreError};
use helpline_core::completion::{CompletionError, CompletionProvider};
use helpline_core::faq::FaqTable;
use helpline_core::messaging::{MessagingError, MessagingProvider};
use tower::ServiceExt;

struct StubCompletion {
    result: Result<String, CompletionError>,
    calls: AtomicU32,
}

#[async_trait]
impl CompletionProvider for StubCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct StubMessaging {
    sent: AtomicU32,
}

#[async_trait]
impl MessagingProvider for StubMessaging {
    async fn send(&self, _from: &str, _to: &str, _body: &str) -> Result<(), MessagingError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct MemoryStore {
    fail: bool,
    records: Mutex<Vec<ChatLogRecord>>,
}

#[async_trait]
impl ChatLogStore for MemoryStore {
    async fn insert_one(&self, record: &ChatLogRecord) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable("down".into()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail {
            Err(StoreError::Unavailable("down".into()))
        } else {
            Ok(())
        }
    }
}

struct Harness {
    app: axum::Router,
    completion: Arc<StubCompletion>,
    messaging: Arc<StubMessaging>,
    store: Arc<MemoryStore>,
}

fn harness(completion: Result<String, CompletionError>, store_fails: bool) -> Harness {
    let completion = Arc::new(StubCompletion {
        result: completion,
        calls: AtomicU32::new(0),
    });
    let messaging = Arc::new(StubMessaging {
        sent: AtomicU32::new(0),
    });
    let store = Arc::new(MemoryStore {
        fail: store_fails,
        records: Mutex::new(Vec::new()),
    });

    let chat = ChatService::new(
        FaqTable::builtin(),
        completion.clone(),
        messaging.clone(),
        store.clone(),
        EscalationRoute {
            from: Some("+15550001".into()),
            to: Some("+15550002".into()),
        },
    );

    let state = AppState {
        chat: Arc::new(chat),
        store: store.clone(),
    };

    Harness {
        app: router(state),
        completion,
        messaging,
        store,
    }
}

fn post_chat(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(resp: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("parse JSON")
}

#[tokio::test]
async fn faq_question_returns_canned_answer() {
    let h = harness(Ok("unused".into()), false);

    let resp = h
        .app
        .oneshot(post_chat(
            r#"{"message": "What are your business hours?", "phone": "+1000"}"#,
        ))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp).await;
    assert_eq!(
        json,
        serde_json::json!({
            "reply": "Our business hours are from 9 AM to 6 PM, Monday to Friday."
        })
    );
    assert_eq!(h.completion.calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.messaging.sent.load(Ordering::SeqCst), 0);
    assert_eq!(h.store.records.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn completion_error_escalates_to_human() {
    let h = harness(
        Err(CompletionError::Provider {
            status: 503,
            body: "overloaded".into(),
        }),
        false,
    );

    let resp = h
        .app
        .oneshot(post_chat(
            r#"{"message": "I need help urgently", "phone": "+1000"}"#,
        ))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp).await;
    assert_eq!(json["reply"], ESCALATION_CONFIRMED_REPLY);
    assert_eq!(h.messaging.sent.load(Ordering::SeqCst), 1);

    let records = h.store.records.lock().unwrap().clone();
    assert_eq!(
        records,
        vec![ChatLogRecord {
            user: "+1000".into(),
            message: "I need help urgently".into(),
            response: ESCALATION_CONFIRMED_REPLY.into(),
        }]
    );
}

#[tokio::test]
async fn missing_fields_default_to_empty() {
    let h = harness(Ok("  Hello! How can I help?  ".into()), false);

    let resp = h.app.oneshot(post_chat("{}")).await.expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp).await;
    assert_eq!(json["reply"], "Hello! How can I help?");
    let records = h.store.records.lock().unwrap().clone();
    assert_eq!(records[0].user, "");
    assert_eq!(records[0].message, "");
}

#[tokio::test]
async fn store_failure_is_opaque_500() {
    let h = harness(Ok("Sure.".into()), true);

    let resp = h
        .app
        .oneshot(post_chat(r#"{"message": "hi", "phone": "+1000"}"#))
        .await
        .expect("request");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(resp).await;
    assert_eq!(json["error"], "internal_error");
    assert_eq!(json["message"], "Internal server error");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let h = harness(Ok("unused".into()), false);

    let resp = h.app.oneshot(post_chat("not json")).await.expect("request");

    assert!(resp.status().is_client_error());
    assert_eq!(h.completion.calls.load(Ordering::SeqCst), 0);
    assert!(h.store.records.lock().unwrap().is_empty());
}

#[tokio::test]
async fn health_reports_store_state() {
    let h = harness(Ok("unused".into()), true);

    let req = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let resp = h.app.oneshot(req).await.expect("request");

    assert_eq!(resp.status(), StatusCode::OK);
    let json = json_body(resp).await;
    assert_eq!(json["storeConnected"], false);
    assert_eq!(json["faqEntries"], 3);
    assert!(json["version"].is_string());
}
