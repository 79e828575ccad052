//! Tests for webhook event payload parsing.

use super::*;

/// A trimmed-down but structurally faithful `pull_request` payload.
fn opened_payload() -> &'static str {
    r#"{
        "action": "opened",
        "number": 42,
        "pull_request": {
            "id": 987654321,
            "number": 42,
            "state": "open",
            "title": "Add feature",
            "base": {
                "ref": "main",
                "sha": "abc123"
            },
            "head": {
                "ref": "feature/add-thing",
                "sha": "def456"
            }
        },
        "repository": {
            "id": 123456,
            "name": "meme-repo",
            "full_name": "octocat/meme-repo",
            "owner": {
                "login": "octocat",
                "id": 1
            }
        },
        "sender": {
            "login": "octocat"
        }
    }"#
}

#[test]
fn test_parse_opened_pull_request_event() {
    let event: PullRequestEvent =
        serde_json::from_str(opened_payload()).expect("payload should parse");

    assert_eq!(event.action, "opened");
    assert!(event.is_opened());
    assert_eq!(event.pull_request.number, 42);
    assert_eq!(event.pull_request.base.name, "main");
    assert_eq!(event.pull_request.head.name, "feature/add-thing");
    assert_eq!(event.repository.name, "meme-repo");
    assert_eq!(event.repository.owner.login, "octocat");
}

#[test]
fn test_non_opened_action_is_not_opened() {
    let payload = opened_payload().replacen("\"opened\"", "\"synchronize\"", 1);
    let event: PullRequestEvent = serde_json::from_str(&payload).expect("payload should parse");

    assert_eq!(event.action, "synchronize");
    assert!(!event.is_opened());
}

#[test]
fn test_repository_full_name() {
    let event: PullRequestEvent =
        serde_json::from_str(opened_payload()).expect("payload should parse");

    assert_eq!(event.repository.full_name(), "octocat/meme-repo");
}

#[test]
fn test_missing_pull_request_field_is_an_error() {
    // Issue events and pings do not carry a pull_request object
    let payload = r#"{
        "action": "opened",
        "repository": {
            "name": "meme-repo",
            "owner": { "login": "octocat" }
        }
    }"#;

    let result: Result<PullRequestEvent, _> = serde_json::from_str(payload);
    assert!(result.is_err());
}

#[test]
fn test_extra_fields_are_ignored() {
    // GitHub payloads carry far more fields than the bot reads
    let event: PullRequestEvent =
        serde_json::from_str(opened_payload()).expect("unknown fields must not fail parsing");

    assert_eq!(event.pull_request.number, 42);
}
