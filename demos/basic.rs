use std::time::Duration;

use serde_json::json;
use webhook_notifier::{Dispatcher, Endpoint, SenderConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = SenderConfig::default().with_timeout(Duration::from_secs(5));
    let dispatcher = Dispatcher::from_config(config).expect("http client");

    let endpoint = Endpoint::new("https://example.com/webhook", "supersecret");
    let event = json!({"campaign_id": 1, "email": "someone@example.com", "message": "Email Opened"});

    if let Err(err) = dispatcher.send_single(&endpoint, &event).await {
        eprintln!("delivery failed: {err}");
    }

    let endpoints = vec![
        endpoint,
        Endpoint::new("https://example.org/hooks/phish", "othersecret"),
    ];
    dispatcher.send_all(&endpoints, &event);

    // Give the broadcast tasks a moment before the runtime shuts down.
    tokio::time::sleep(Duration::from_secs(1)).await;
}
