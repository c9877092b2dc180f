//! Discussion API integration tests
//!
//! Posts in club feeds, comments, replies, and like toggling.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{create_club, register_and_login, spawn_app};

async fn create_post(server: &TestServer, token: &str, club_id: &str, content: &str) -> String {
    let response = server
        .post("/api/post")
        .authorization_bearer(token)
        .json(&serde_json::json!({ "club_id": club_id, "content": content }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    body["post_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_posting_requires_club_membership() {
    let app = spawn_app().await;
    let owner = register_and_login(&app.server, "alice@example.com", "Alice").await;
    let outsider = register_and_login(&app.server, "bob@example.com", "Bob").await;
    let club_id = create_club(&app.server, &owner, "Rustaceans Read").await;

    let response = app
        .server
        .post("/api/post")
        .authorization_bearer(&outsider)
        .json(&serde_json::json!({ "club_id": club_id, "content": "hello" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_club_feed_newest_first() {
    let app = spawn_app().await;
    let owner = register_and_login(&app.server, "alice@example.com", "Alice").await;
    let club_id = create_club(&app.server, &owner, "Rustaceans Read").await;

    create_post(&app.server, &owner, &club_id, "first").await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_post(&app.server, &owner, &club_id, "second").await;

    let response = app
        .server
        .get(&format!("/api/post?clubId={}", club_id))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 2);
    let posts = body["posts"].as_array().unwrap();
    assert_eq!(posts[0]["content"], "second");
    assert_eq!(posts[0]["user_display_name"], "Alice");
    assert_eq!(posts[0]["club_name"], "Rustaceans Read");
}

#[tokio::test]
async fn test_like_toggles_on_and_off() {
    let app = spawn_app().await;
    let owner = register_and_login(&app.server, "alice@example.com", "Alice").await;
    let club_id = create_club(&app.server, &owner, "Rustaceans Read").await;
    let post_id = create_post(&app.server, &owner, &club_id, "hello").await;

    let response = app
        .server
        .put(&format!("/api/post/{}/like", post_id))
        .authorization_bearer(&owner)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Post liked");

    let response = app
        .server
        .put(&format!("/api/post/{}/like", post_id))
        .authorization_bearer(&owner)
        .await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Post unliked");
}

#[tokio::test]
async fn test_comment_thread() {
    let app = spawn_app().await;
    let owner = register_and_login(&app.server, "alice@example.com", "Alice").await;
    let club_id = create_club(&app.server, &owner, "Rustaceans Read").await;
    let post_id = create_post(&app.server, &owner, &club_id, "hello").await;

    let response = app
        .server
        .post("/api/comment")
        .authorization_bearer(&owner)
        .json(&serde_json::json!({ "post_id": post_id, "content": "nice" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let response = app
        .server
        .get(&format!("/api/comment?postId={}", post_id))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let comments = body.as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "nice");
    assert_eq!(comments[0]["likes_count"], 0);
}

#[tokio::test]
async fn test_reply_thread() {
    let app = spawn_app().await;
    let owner = register_and_login(&app.server, "alice@example.com", "Alice").await;
    let club_id = create_club(&app.server, &owner, "Rustaceans Read").await;
    let post_id = create_post(&app.server, &owner, &club_id, "hello").await;

    let response = app
        .server
        .post(&format!("/api/reply/post/{}/reply", post_id))
        .authorization_bearer(&owner)
        .json(&serde_json::json!({ "content": "me too" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: serde_json::Value = response.json();
    let reply_id = created["reply"]["id"].as_str().unwrap();

    let response = app
        .server
        .put(&format!("/api/reply/{}/like", reply_id))
        .authorization_bearer(&owner)
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Liked reply");

    let response = app
        .server
        .get(&format!("/api/reply/post/{}/replies", post_id))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let replies = body["replies"].as_array().unwrap();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0]["likes_count"], 1);
}

#[tokio::test]
async fn test_delete_post_is_author_only() {
    let app = spawn_app().await;
    let owner = register_and_login(&app.server, "alice@example.com", "Alice").await;
    let member = register_and_login(&app.server, "bob@example.com", "Bob").await;
    let club_id = create_club(&app.server, &owner, "Rustaceans Read").await;
    let post_id = create_post(&app.server, &owner, &club_id, "hello").await;

    app.server
        .post(&format!("/api/club/{}/join", club_id))
        .authorization_bearer(&member)
        .await
        .assert_status_ok();

    let response = app
        .server
        .delete(&format!("/api/post/{}", post_id))
        .authorization_bearer(&member)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = app
        .server
        .delete(&format!("/api/post/{}", post_id))
        .authorization_bearer(&owner)
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_random_feed_caps_at_ten() {
    let app = spawn_app().await;
    let owner = register_and_login(&app.server, "alice@example.com", "Alice").await;
    let club_id = create_club(&app.server, &owner, "Rustaceans Read").await;

    for i in 0..12 {
        create_post(&app.server, &owner, &club_id, &format!("post {}", i)).await;
    }

    let response = app.server.get("/api/post/random").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["count"], 10);
}
