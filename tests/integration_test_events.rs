mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{TestApp, ADMIN_CODE};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_create_and_get_event() {
    let app = TestApp::new().await;
    let auth = app.login(ADMIN_CODE).await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .body(Body::from(
                    json!({
                        "name": "Wine & Cheese 2026",
                        "date": "2026-06-12",
                        "time": "18:30:00",
                        "location": "Aula Magna",
                        "banner_url": "https://cdn.example.com/banner.png",
                        "accent_color": "#7b1e3c"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let created = parse_body(res).await;
    assert_eq!(created["name"], "Wine & Cheese 2026");
    assert_eq!(created["accent_color"], "#7b1e3c");
    let event_id = created["id"].as_str().unwrap();

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/events/{}", event_id))
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let fetched = parse_body(res).await;
    assert_eq!(fetched["id"], event_id);
    assert_eq!(fetched["date"], "2026-06-12");
    assert_eq!(fetched["location"], "Aula Magna");
}

#[tokio::test]
async fn test_create_event_rejects_blank_name() {
    let app = TestApp::new().await;
    let auth = app.login(ADMIN_CODE).await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/events")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .body(Body::from(
                    json!({
                        "name": "   ",
                        "date": "2026-06-12",
                        "time": "18:30:00",
                        "location": "Hall"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_events() {
    let app = TestApp::new().await;
    let auth = app.login(ADMIN_CODE).await;

    app.create_event(&auth, "First").await;
    app.create_event(&auth, "Second").await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/events")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_event_partial() {
    let app = TestApp::new().await;
    let auth = app.login(ADMIN_CODE).await;
    let event_id = app.create_event(&auth, "Original").await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/v1/events/{}", event_id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .body(Body::from(json!({"location": "New Venue"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let updated = parse_body(res).await;
    assert_eq!(updated["name"], "Original");
    assert_eq!(updated["location"], "New Venue");
}

#[tokio::test]
async fn test_update_unknown_event_is_404() {
    let app = TestApp::new().await;
    let auth = app.login(ADMIN_CODE).await;

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/events/does-not-exist")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .body(Body::from(json!({"name": "Ghost"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
