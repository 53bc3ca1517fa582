use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde_json::json;
use tokio::time::Instant;
use webhook_notifier::{
    verify_webhook_request, Dispatcher, InMemoryDirectory, SenderConfig, ServiceError, Webhook,
    WebhookId, WebhookService,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service(webhooks: Vec<Webhook>) -> WebhookService {
    let directory = Arc::new(InMemoryDirectory::with_webhooks(webhooks));
    let dispatcher = Dispatcher::from_config(SenderConfig::default()).unwrap();
    WebhookService::new(directory, dispatcher)
}

#[tokio::test]
async fn validate_pings_and_returns_record() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let webhook = Webhook::new(1, "alerts", format!("{}/hook", server.uri()), "k");
    let svc = service(vec![webhook.clone()]);

    let validated = svc.validate(WebhookId(1)).await.unwrap();
    assert_eq!(validated, webhook);

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(request.body, br#"{"event":"ping","webhook_id":1}"#);

    let headers: Vec<(&str, &str)> = request
        .headers
        .iter()
        .map(|(name, value)| (name.as_str(), value.to_str().unwrap()))
        .collect();
    assert_eq!(verify_webhook_request(headers, &request.body, "k"), Ok(()));
}

#[tokio::test]
async fn validate_reports_bad_gateway_when_remote_rejects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let svc = service(vec![Webhook::new(1, "alerts", server.uri(), "k")]);
    let err = svc.validate(WebhookId(1)).await.unwrap_err();

    assert!(matches!(err, ServiceError::Delivery(_)), "got {err:?}");
    assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    assert!(!err.response().success);
}

#[tokio::test]
async fn validate_unknown_webhook_is_internal_error() {
    let svc = service(vec![]);
    let err = svc.validate(WebhookId(99)).await.unwrap_err();

    assert!(matches!(err, ServiceError::Directory(_)), "got {err:?}");
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.response().message, "webhook not found: 99");
}

#[tokio::test]
async fn list_returns_all_webhooks() {
    let svc = service(vec![
        Webhook::new(2, "b", "http://b", "k").with_active(false),
        Webhook::new(1, "a", "http://a", "k"),
    ]);

    let names: Vec<String> = svc.list().await.unwrap().into_iter().map(|w| w.name).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[tokio::test]
async fn notify_active_skips_inactive_webhooks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/active"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/inactive"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let svc = service(vec![
        Webhook::new(1, "a", format!("{}/active", server.uri()), "k1"),
        Webhook::new(2, "b", format!("{}/inactive", server.uri()), "k2").with_active(false),
        Webhook::new(3, "c", format!("{}/active", server.uri()), "k3"),
    ]);

    let scheduled = svc.notify_active(&json!({"event": "Clicked Link"})).await.unwrap();
    assert_eq!(scheduled, 2);

    let deadline = Instant::now() + Duration::from_secs(5);
    while server.received_requests().await.unwrap().len() < 2 && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}
