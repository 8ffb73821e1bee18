use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use practice_core::model::Verdict;
use serde_json::{Value, json};
use services::submission::OutboundSubmission;
use services::{
    SubmissionError, SubmissionRelay, SubmissionRequest, WebhookResponse, WebhookTransport,
};

/// Replays a canned reply and remembers every payload it was given.
struct FakeWebhook {
    reply: Result<WebhookResponse, String>,
    calls: AtomicUsize,
    payloads: Mutex<Vec<OutboundSubmission>>,
}

impl FakeWebhook {
    fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(WebhookResponse {
                status,
                body: body.to_string(),
            }),
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            reply: Err("connection refused".to_string()),
            calls: AtomicUsize::new(0),
            payloads: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WebhookTransport for FakeWebhook {
    async fn post(&self, payload: &OutboundSubmission) -> Result<WebhookResponse, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.payloads.lock().unwrap().push(payload.clone());
        self.reply.clone().map_err(SubmissionError::Transport)
    }
}

fn relay(fake: &Arc<FakeWebhook>) -> SubmissionRelay {
    let transport: Arc<dyn WebhookTransport> = fake.clone();
    SubmissionRelay::new(transport)
}

#[tokio::test]
async fn blank_code_is_rejected_without_calling_the_webhook() {
    let fake = FakeWebhook::replying(200, r#"{"verdict":"PASS"}"#);
    let relay = relay(&fake);

    for body in [r#"{"code":""}"#, r#"{"code":"   "}"#, r#"{"problemId":1}"#] {
        let reply = relay.handle(body).await;
        assert_eq!(reply.status, 400, "{body}");
        assert!(reply.error_message().is_some());
    }
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn success_passes_the_webhook_json_through() {
    let body = r#"{"verdict":"LIKELY_PASS","confidence":0.7,"reasons":["looks right"]}"#;
    let fake = FakeWebhook::replying(200, body);
    let relay = relay(&fake);

    let reply = relay
        .handle(r#"{"code":"  print(1)  ","problemId":"1920","hintUsed":1}"#)
        .await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body, serde_json::from_str::<Value>(body).unwrap());
    assert_eq!(
        reply.judge_report().map(|report| report.verdict),
        Some(Verdict::LikelyPass)
    );

    let sent = fake.payloads.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].code, "print(1)");
    assert_eq!(sent[0].problem_id, 1920);
    assert!(sent[0].hint_used);
}

#[tokio::test]
async fn remote_error_status_is_relayed_with_its_text() {
    let fake = FakeWebhook::replying(500, "workflow crashed");
    let reply = relay(&fake).handle(r#"{"code":"x"}"#).await;

    assert_eq!(reply.status, 500);
    assert_eq!(reply.body["details"], json!("workflow crashed"));
    assert_eq!(
        reply.error_message(),
        Some("webhook request failed: HTTP 500")
    );
}

#[tokio::test]
async fn empty_body_is_a_distinct_bad_gateway() {
    let fake = FakeWebhook::replying(200, "  \n ");
    let reply = relay(&fake).handle(r#"{"code":"x"}"#).await;

    assert_eq!(reply.status, 502);
    assert!(reply.body.get("rawResponse").is_none());
    assert!(reply.body.get("details").is_none());
}

#[tokio::test]
async fn unparseable_body_echoes_truncated_raw_text() {
    let raw = format!("<html>{}</html>", "x".repeat(1000));
    let fake = FakeWebhook::replying(200, &raw);
    let reply = relay(&fake).handle(r#"{"code":"x"}"#).await;

    assert_eq!(reply.status, 502);
    let echoed = reply.body["rawResponse"].as_str().unwrap();
    assert_eq!(echoed.chars().count(), 500);
    assert!(raw.starts_with(echoed));
    assert!(reply.body["details"].as_str().is_some());
}

#[tokio::test]
async fn malformed_inbound_json_is_an_internal_error() {
    let fake = FakeWebhook::replying(200, "{}");
    let reply = relay(&fake).handle("{not json").await;

    assert_eq!(reply.status, 500);
    assert!(reply.body["details"].as_str().is_some());
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn transport_failure_is_an_internal_error() {
    let fake = FakeWebhook::unreachable();
    let reply = relay(&fake).handle(r#"{"code":"x"}"#).await;

    assert_eq!(reply.status, 500);
    assert_eq!(reply.body["details"], json!("connection refused"));
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn typed_request_uses_the_same_fallbacks() {
    let fake = FakeWebhook::replying(200, r#"{"verdict":"FAIL"}"#);
    let relay = relay(&fake);

    let reply = relay
        .submit(&SubmissionRequest {
            code: "def f(): pass".into(),
            problem_id: Some("abc".into()),
            ..SubmissionRequest::default()
        })
        .await;
    assert!(reply.is_success());

    let sent = fake.payloads.lock().unwrap();
    assert_eq!(sent[0].problem_id, 1000);
    assert_eq!(sent[0].user_id, json!("test-user"));
    assert_eq!(sent[0].time_spent_min, 10);
    assert_eq!(sent[0].self_report_difficulty, 3);
}
