//! Endpoint-level tests: request shapes and response parsing against a
//! mock backend.

use serde_json::json;
use toebeans::api::ToeBeansClient;
use toebeans::error::ApiError;
use toebeans::models::UpdateUserRequest;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_sends_email_and_password() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    client.login("alice@example.com", "secret").await.unwrap();
}

#[tokio::test]
async fn test_login_rejection_surfaces_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "status": 400,
            "message": "email or password is wrong"
        })))
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    let err = client.login("alice@example.com", "nope").await.unwrap_err();
    assert_eq!(err.user_message(), "email or password is wrong");
}

#[tokio::test]
async fn test_get_my_profile_parses_counters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_name": "alice",
            "icon": "",
            "self_introduction": "cat pics only",
            "posting_count": 4,
            "like_count": 9,
            "liked_count": 2,
            "follow_count": 3,
            "followed_count": 7,
            "created_at": "2020-06-01T09:00:00Z"
        })))
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    let profile = client.get_my_profile().await.unwrap();
    assert_eq!(profile.user_name, "alice");
    assert_eq!(profile.posting_count, 4);
    assert_eq!(profile.followed_count, 7);
    assert_eq!(profile.created_date(), "2020-06-01");
}

#[tokio::test]
async fn test_get_user_profile_passes_name_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("user_name", "bob the cat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_name": "bob the cat"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    let profile = client.get_user_profile("bob the cat").await.unwrap();
    assert_eq!(profile.user_name, "bob the cat");
}

#[tokio::test]
async fn test_register_user_posts_to_named_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/alice"))
        .and(body_json(json!({
            "email": "alice@example.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    client
        .register_user("alice", "alice@example.com", "secret")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_user_sends_full_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/alice"))
        .and(body_json(json!({
            "password": "",
            "icon": "",
            "self_introduction": "new intro"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    let request = UpdateUserRequest {
        password: String::new(),
        icon: String::new(),
        self_introduction: "new intro".to_string(),
    };
    client.update_user("alice", &request).await.unwrap();
}

#[tokio::test]
async fn test_change_password_puts_old_and_new() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/password"))
        .and(body_json(json!({
            "old_password": "old",
            "new_password": "new"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    client.change_password("old", "new").await.unwrap();
}

#[tokio::test]
async fn test_delete_user_hits_named_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    client.delete_user("alice").await.unwrap();
}

#[tokio::test]
async fn test_create_posting_carries_title_and_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/postings"))
        .and(body_json(json!({
            "title": "paws",
            "image": "aGVsbG8="
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    client.create_posting("paws", "aGVsbG8=").await.unwrap();
}

#[tokio::test]
async fn test_follow_unfollow_and_state() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/follows/bob"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/follows/bob"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/follows/bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "following": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    client.follow("bob").await.unwrap();
    let state = client.get_follow_state("bob").await.unwrap();
    assert!(state.following);
    client.unfollow("bob").await.unwrap();
}

#[tokio::test]
async fn test_undecodable_success_body_is_no_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    let err = client.get_my_profile().await.unwrap_err();
    assert!(matches!(err, ApiError::NoResponse(_)));
    assert_eq!(err.user_message(), "Request failed");
}

#[tokio::test]
async fn test_truncated_error_body_still_classifies() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream timeout"))
        .mount(&server)
        .await;

    let client = ToeBeansClient::with_base_url(server.uri());
    let err = client.login("a@b.co", "pw").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 503,
            message: "upstream timeout".to_string()
        }
    );
}
