//! Like/unlike and delete behavior against a mock backend.

use serde_json::json;
use toebeans::api::ToeBeansClient;
use toebeans::error::ApiError;
use toebeans::feed::{toggle_like, LikeOutcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_like_unlike_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/likes/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/likes/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());

    // {liked:false, count:5} -> like -> {liked:true, count:6}
    let first = toggle_like(&client, 5, false, 5).await.unwrap();
    assert_eq!(
        first,
        LikeOutcome {
            liked: true,
            liked_count: 6
        }
    );

    // applying the toggle to its own result returns to the start
    let second = toggle_like(&client, 5, first.liked, first.liked_count)
        .await
        .unwrap();
    assert_eq!(
        second,
        LikeOutcome {
            liked: false,
            liked_count: 5
        }
    );
}

#[tokio::test]
async fn test_failed_like_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/likes/7"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "message": "already liked"
        })))
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    let err = toggle_like(&client, 7, false, 3).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 400,
            message: "already liked".to_string()
        }
    );
    // Pessimistic update: the caller only applies a confirmed outcome,
    // and no outcome was produced here.
}

#[tokio::test]
async fn test_unlike_count_never_underflows() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/likes/9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    // A server/client drift could show count 0 with liked=true.
    let outcome = toggle_like(&client, 9, true, 0).await.unwrap();
    assert_eq!(outcome.liked_count, 0);
    assert!(!outcome.liked);
}

#[tokio::test]
async fn test_delete_posting_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/postings/12"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    toebeans::feed::delete_posting(&client, 12).await.unwrap();
}

#[tokio::test]
async fn test_delete_posting_forbidden_surfaces_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/postings/12"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "status": 403,
            "message": "not your posting"
        })))
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    let err = toebeans::feed::delete_posting(&client, 12).await.unwrap_err();
    assert_eq!(err.user_message(), "not your posting");
}
