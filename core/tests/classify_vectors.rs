//! Verify the error classifier against the vectors in `test-vectors/`.
//!
//! Each case describes a raw failure, the operation it occurred in, and the
//! notification the user must see. The classifier is also run twice per
//! case to pin down that classification is deterministic.

use storefront_core::{classify, FetchError, Operation, Severity};

fn parse_operation(s: &str) -> Operation {
    match s {
        "list" => Operation::List,
        "get" => Operation::Get,
        "create" => Operation::Create,
        "update" => Operation::Update,
        "delete" => Operation::Delete,
        "image" => Operation::Image,
        other => panic!("unknown operation: {other}"),
    }
}

fn parse_severity(s: &str) -> Severity {
    match s {
        "loading" => Severity::Loading,
        "success" => Severity::Success,
        "error" => Severity::Error,
        "info" => Severity::Info,
        other => panic!("unknown severity: {other}"),
    }
}

fn parse_failure(value: &serde_json::Value) -> FetchError {
    match value["kind"].as_str().unwrap() {
        "network" => FetchError::Network(
            value["detail"].as_str().unwrap_or("no response").to_string(),
        ),
        "status" => FetchError::Status {
            status: value["status"].as_u64().unwrap() as u16,
            body: String::new(),
        },
        other => panic!("unknown failure kind: {other}"),
    }
}

#[test]
fn classification_table_vectors() {
    let raw = include_str!("../../test-vectors/classify.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let failure = parse_failure(&case["failure"]);
        let operation = parse_operation(case["operation"].as_str().unwrap());
        let expected = &case["expected"];

        let notification = classify(&failure, operation);

        assert_eq!(
            notification.category,
            parse_severity(expected["category"].as_str().unwrap()),
            "{name}: category"
        );
        assert_eq!(
            notification.title,
            expected["title"].as_str().unwrap(),
            "{name}: title"
        );
        if let Some(message) = expected.get("message") {
            assert_eq!(notification.message, message.as_str().unwrap(), "{name}: message");
        }

        // Same failure, same context, same notification.
        assert_eq!(notification, classify(&failure, operation), "{name}: idempotence");
    }
}
