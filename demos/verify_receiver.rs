use webhook_notifier::{sign, verify_webhook_request, SIGNATURE_HEADER};

fn main() {
    let payload = br#"{"id":123}"#;
    let signature = sign("supersecret", payload).expect("hmac");

    let headers = vec![
        ("Content-Type", "application/json"),
        (SIGNATURE_HEADER, signature.as_str()),
    ];

    match verify_webhook_request(headers, payload, "supersecret") {
        Ok(()) => println!("signature ok"),
        Err(err) => println!("rejected: {err}"),
    }
}
