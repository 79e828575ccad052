//! Tests for issue comment operations.

use super::*;
use crate::auth::InstallationId;
use chrono::{Duration, Utc};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_token() -> InstallationToken {
    InstallationToken::new(
        "ghs_testtoken".to_string(),
        InstallationId::new(987654),
        Utc::now() + Duration::hours(1),
    )
}

fn test_api(api_url: &str) -> InstallationApi {
    let config = ClientConfig::default().with_github_api_url(api_url);
    let http = config.build_http_client().unwrap();
    InstallationApi::new(http, &config)
}

fn comment_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "body": "![Alt Text](https://example.com/meme.jpg)",
        "user": { "login": "memebot[bot]", "id": 41898282 },
        "created_at": "2026-08-30T12:00:00Z",
        "html_url": "https://github.com/octocat/hello-world/pull/1#issuecomment-1"
    })
}

#[tokio::test]
async fn create_comment_posts_markdown_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/hello-world/issues/1/comments"))
        .and(header("Authorization", "Bearer ghs_testtoken"))
        .and(header("Accept", "application/vnd.github+json"))
        .and(body_json(serde_json::json!({
            "body": "![Alt Text](https://example.com/meme.jpg)"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_json()))
        .expect(1)
        .mount(&server)
        .await;

    let api = test_api(&server.uri());
    let comment = api
        .create_comment(
            &test_token(),
            "octocat",
            "hello-world",
            1,
            "![Alt Text](https://example.com/meme.jpg)",
        )
        .await
        .expect("comment creation should succeed");

    assert_eq!(comment.id, 1);
    assert_eq!(comment.user.login, "memebot[bot]");
    assert!(comment.body.contains("meme.jpg"));
}

#[tokio::test]
async fn create_comment_maps_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/hello-world/issues/999/comments"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let api = test_api(&server.uri());
    let result = api
        .create_comment(&test_token(), "octocat", "hello-world", 999, "body")
        .await;

    assert!(matches!(result, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn create_comment_maps_authorization_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/hello-world/issues/1/comments"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let api = test_api(&server.uri());
    let result = api
        .create_comment(&test_token(), "octocat", "hello-world", 1, "body")
        .await;

    assert!(matches!(result, Err(ApiError::AuthorizationFailed)));
}

#[tokio::test]
async fn create_comment_maps_validation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/hello-world/issues/1/comments"))
        .respond_with(ResponseTemplate::new(422).set_body_string("Validation Failed"))
        .mount(&server)
        .await;

    let api = test_api(&server.uri());
    let result = api
        .create_comment(&test_token(), "octocat", "hello-world", 1, "")
        .await;

    match result {
        Err(ApiError::InvalidRequest { message }) => {
            assert!(message.contains("Validation Failed"));
        }
        other => panic!("Expected InvalidRequest, got {:?}", other),
    }
}
