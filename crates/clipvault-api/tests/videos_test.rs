//! Video record CRUD integration tests.

mod helpers;

use clipvault_core::models::Video;
use helpers::setup_test_app;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn create_and_get_video() {
    let app = setup_test_app().await;
    let user_id = Uuid::new_v4();
    let token = app.token_for(user_id);

    let created: Video = app
        .server
        .post("/api/videos")
        .authorization_bearer(&token)
        .json(&json!({ "title": "Boots plays chess", "description": "opening blunders" }))
        .await
        .json();

    let response = app
        .server
        .get(&format!("/api/videos/{}", created.id))
        .authorization_bearer(&token)
        .await;

    response.assert_status_ok();
    let fetched: Video = response.json();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.title, "Boots plays chess");
    assert_eq!(fetched.user_id, user_id);
    assert!(fetched.video_url.is_none());
}

#[tokio::test]
async fn create_rejects_empty_title() {
    let app = setup_test_app().await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .server
        .post("/api/videos")
        .authorization_bearer(&token)
        .json(&json!({ "title": "" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn list_returns_only_own_videos() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    app.seed_video(owner);
    app.seed_video(owner);
    app.seed_video(stranger);

    let listed: Vec<Video> = app
        .server
        .get("/api/videos")
        .authorization_bearer(&app.token_for(owner))
        .await
        .json();

    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|v| v.user_id == owner));
}

#[tokio::test]
async fn get_requires_ownership() {
    let app = setup_test_app().await;
    let video = app.seed_video(Uuid::new_v4());

    let response = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .authorization_bearer(&app.token_for(Uuid::new_v4()))
        .await;

    response.assert_status_forbidden();
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = setup_test_app().await;

    let response = app.server.get("/api/videos").await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let app = setup_test_app().await;

    let response = app
        .server
        .get("/api/videos")
        .authorization_bearer("not.a.real.token")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = setup_test_app().await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .server
        .get("/api/videos/not-a-uuid")
        .authorization_bearer(&token)
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn delete_removes_record() {
    let app = setup_test_app().await;
    let user_id = Uuid::new_v4();
    let video = app.seed_video(user_id);
    let token = app.token_for(user_id);

    let response = app
        .server
        .delete(&format!("/api/videos/{}", video.id))
        .authorization_bearer(&token)
        .await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    let response = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .authorization_bearer(&token)
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn get_signs_stored_reference_without_mutating_it() {
    let app = setup_test_app().await;
    let user_id = Uuid::new_v4();
    let mut video = app.seed_video(user_id);
    video.video_url = Some(format!("{},landscape/abc.mp4", helpers::TEST_BUCKET));
    app.videos.insert(video.clone());
    let token = app.token_for(user_id);

    for _ in 0..2 {
        let fetched: Video = app
            .server
            .get(&format!("/api/videos/{}", video.id))
            .authorization_bearer(&token)
            .await
            .json();

        let url = fetched.video_url.unwrap();
        assert!(url.starts_with("https://signed.test/landscape/abc.mp4"));

        // the persisted record keeps the raw reference
        let stored = app.videos.get(video.id).unwrap();
        assert_eq!(
            stored.video_url.as_deref(),
            Some(format!("{},landscape/abc.mp4", helpers::TEST_BUCKET).as_str())
        );
    }
}

#[tokio::test]
async fn signing_failure_propagates_as_server_error() {
    let app = setup_test_app().await;
    let user_id = Uuid::new_v4();
    let mut video = app.seed_video(user_id);
    video.video_url = Some(format!("{},landscape/abc.mp4", helpers::TEST_BUCKET));
    app.videos.insert(video.clone());
    app.objects
        .fail_signing
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let response = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .authorization_bearer(&app.token_for(user_id))
        .await;

    response.assert_status_internal_server_error();
}

#[tokio::test]
async fn corrupt_stored_reference_is_server_error() {
    let app = setup_test_app().await;
    let user_id = Uuid::new_v4();
    let mut video = app.seed_video(user_id);
    video.video_url = Some("missing-separator".to_string());
    app.videos.insert(video.clone());

    let response = app
        .server
        .get(&format!("/api/videos/{}", video.id))
        .authorization_bearer(&app.token_for(user_id))
        .await;

    response.assert_status_internal_server_error();
}
