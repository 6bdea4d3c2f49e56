//! Photo API integration tests
//!
//! Covers photo creation and listing, populated reads, and the comment
//! attachment protocol, including concurrent attachment.

use axum::http::StatusCode;
use futures_util::future::join_all;
use pretty_assertions::assert_eq;
use snapshare::backend::store::{CommentStore, PhotoStore};
use snapshare::shared::{Comment, Photo, PhotoWithComments};
use uuid::Uuid;

use crate::common::{auth_header, create_test_user, TestApp};

async fn create_photo(app: &TestApp, title: &str) -> Photo {
    let response = app
        .server
        .post("/api/photos")
        .json(&serde_json::json!({
            "title": title,
            "image_url": "https://example.com/photo.jpg",
            "description": "taken at dawn"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

async fn post_comment(app: &TestApp, photo_id: &str, body: &str) -> axum_test::TestResponse {
    app.server
        .post(&format!("/api/photos/{}/comments", photo_id))
        .json(&serde_json::json!({ "body": body }))
        .await
}

#[tokio::test]
async fn test_create_then_list_contains_photo_once() {
    let app = TestApp::new();
    let photo = create_photo(&app, "Sunrise").await;
    assert_eq!(photo.title, "Sunrise");
    assert!(photo.comments.is_empty());

    let response = app.server.get("/api/photos").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    let photos: Vec<Photo> = serde_json::from_value(body["photos"].clone()).unwrap();
    assert_eq!(photos.iter().filter(|p| p.id == photo.id).count(), 1);
}

#[tokio::test]
async fn test_list_is_in_creation_order() {
    let app = TestApp::new();
    let first = create_photo(&app, "First").await;
    let second = create_photo(&app, "Second").await;

    let body: serde_json::Value = app.server.get("/api/photos").await.json();
    let ids: Vec<Uuid> = serde_json::from_value::<Vec<Photo>>(body["photos"].clone())
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_create_photo_validation() {
    let app = TestApp::new();

    let missing_url = app
        .server
        .post("/api/photos")
        .json(&serde_json::json!({ "title": "No image" }))
        .await;
    assert_eq!(missing_url.status_code(), StatusCode::BAD_REQUEST);

    let bad_scheme = app
        .server
        .post("/api/photos")
        .json(&serde_json::json!({ "title": "Bad", "image_url": "javascript:alert(1)" }))
        .await;
    assert_eq!(bad_scheme.status_code(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = app.server.get("/api/photos").await.json();
    assert_eq!(body["photos"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_photo_without_comments_has_empty_list() {
    let app = TestApp::new();
    let photo = create_photo(&app, "Quiet").await;

    let response = app.server.get(&format!("/api/photos/{}", photo.id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["comments"], serde_json::json!([]));
}

#[tokio::test]
async fn test_get_photo_errors() {
    let app = TestApp::new();

    let missing = app.server.get(&format!("/api/photos/{}", Uuid::new_v4())).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    let malformed = app.server.get("/api/photos/not-an-id").await;
    assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_comment_is_appended_at_the_end() {
    let app = TestApp::new();
    let photo = create_photo(&app, "Busy").await;
    let id = photo.id.to_string();

    let first: Comment = post_comment(&app, &id, "first!").await.json();
    let response = post_comment(&app, &id, "second").await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let second: Comment = response.json();

    let stored = app.store.find_photo(photo.id).await.unwrap().unwrap();
    assert_eq!(stored.comments, vec![first.id, second.id]);
    assert_eq!(stored.version, 2);

    let populated: PhotoWithComments = app.server.get(&format!("/api/photos/{}", id)).await.json();
    let bodies: Vec<String> = populated
        .comments
        .into_iter()
        .map(|c| c.expect("comment exists").body)
        .collect();
    assert_eq!(bodies, vec!["first!".to_string(), "second".to_string()]);
}

#[tokio::test]
async fn test_comment_on_unknown_photo_persists_nothing() {
    let app = TestApp::new();

    let response = post_comment(&app, &Uuid::new_v4().to_string(), "hello?").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(app.store.comment_count().await, 0);
}

#[tokio::test]
async fn test_comment_validation() {
    let app = TestApp::new();
    let photo = create_photo(&app, "Strict").await;
    let id = photo.id.to_string();

    let blank = post_comment(&app, &id, "   ").await;
    assert_eq!(blank.status_code(), StatusCode::BAD_REQUEST);

    let long = post_comment(&app, &id, &"x".repeat(1001)).await;
    assert_eq!(long.status_code(), StatusCode::BAD_REQUEST);

    let malformed = post_comment(&app, "not-an-id", "hi").await;
    assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);

    assert_eq!(app.store.comment_count().await, 0);
}

#[tokio::test]
async fn test_comment_records_session_author() {
    let app = TestApp::new();
    let user = create_test_user(&app.server, "alice").await;
    let photo = create_photo(&app, "Signed").await;

    let (name, value) = auth_header(&user.token);
    let response = app
        .server
        .post(&format!("/api/photos/{}/comments", photo.id))
        .add_header(name, value)
        .json(&serde_json::json!({ "body": "mine" }))
        .await;

    let comment: Comment = response.json();
    assert_eq!(comment.author.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_dangling_reference_is_null() {
    let app = TestApp::new();
    let photo = create_photo(&app, "Gap").await;
    let id = photo.id.to_string();

    let kept: Comment = post_comment(&app, &id, "kept").await.json();
    let gone: Comment = post_comment(&app, &id, "gone").await.json();
    app.store.remove_comment(gone.id).await;

    let body: serde_json::Value = app.server.get(&format!("/api/photos/{}", id)).await.json();
    assert_eq!(body["comments"][0]["id"], kept.id.to_string());
    assert!(body["comments"][1].is_null());
    assert!(app.store.find_comment(gone.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_comments_all_attached() {
    const N: usize = 32;

    let app = TestApp::new();
    let photo = create_photo(&app, "Popular").await;
    let id = photo.id.to_string();

    let app_ref = &app;
    let id_ref = id.as_str();
    let responses = join_all((0..N).map(|i| async move {
        post_comment(app_ref, id_ref, &format!("comment {}", i)).await
    }))
    .await;

    let mut created = Vec::new();
    for response in responses {
        assert_eq!(response.status_code(), StatusCode::CREATED);
        created.push(response.json::<Comment>().id);
    }

    let stored = app.store.find_photo(photo.id).await.unwrap().unwrap();
    assert_eq!(stored.comments.len(), N);
    assert_eq!(stored.version, N as i64);
    for id in created {
        assert!(stored.comments.contains(&id));
    }
}

#[tokio::test]
async fn test_malformed_json_body() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/photos")
        .bytes(axum::body::Bytes::from_static(b"{ \"title\": "))
        .content_type("application/json")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 400);
    assert!(app.store.list_photos().await.unwrap().is_empty());
}
