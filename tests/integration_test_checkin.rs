mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp, ADMIN_CODE, CHECKIN_CODE};
use guestlist_backend::domain::ports::GuestRepository;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn scan(
    app: &TestApp,
    auth: &AuthHeaders,
    event_id: &str,
    payload: &str,
) -> axum::response::Response {
    app.router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/events/{}/checkin/scan", event_id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("access_token={}", auth.access_token))
                .header("X-CSRF-Token", &auth.csrf_token)
                .body(Body::from(json!({ "payload": payload }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_scan_checks_guest_in_once() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN_CODE).await;
    let event_id = app.create_event(&admin, "Gala").await;
    let guest = app
        .create_guest(&admin, &event_id, "João", "joao@example.com")
        .await;
    let guest_id = guest["id"].as_str().unwrap();

    let door = app.login(CHECKIN_CODE).await;
    let qr = json!({"id": guest_id, "nome": "João"}).to_string();

    let res = scan(&app, &door, &event_id, &qr).await;
    assert_eq!(res.status(), StatusCode::OK);
    let first = parse_body(res).await;
    assert_eq!(first["already_checked_in"], false);
    assert_eq!(first["guest"]["checked_in"], true);
    let first_ts = first["checked_in_at"].as_str().unwrap().to_string();

    // Second scan warns and leaves the original timestamp alone.
    let res = scan(&app, &door, &event_id, &qr).await;
    assert_eq!(res.status(), StatusCode::OK);
    let second = parse_body(res).await;
    assert_eq!(second["already_checked_in"], true);
    assert_eq!(second["checked_in_at"].as_str().unwrap(), first_ts);
}

#[tokio::test]
async fn test_scan_rejects_malformed_payload() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN_CODE).await;
    let event_id = app.create_event(&admin, "Gala").await;
    let door = app.login(CHECKIN_CODE).await;

    let res = scan(&app, &door, &event_id, "not a qr payload").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = scan(&app, &door, &event_id, r#"{"nome":"Ana"}"#).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scan_guest_from_other_event_is_404() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN_CODE).await;
    let event_a = app.create_event(&admin, "Gala A").await;
    let event_b = app.create_event(&admin, "Gala B").await;
    let guest = app
        .create_guest(&admin, &event_a, "Ana", "ana@example.com")
        .await;
    let guest_id = guest["id"].as_str().unwrap();

    let door = app.login(CHECKIN_CODE).await;
    let qr = json!({"id": guest_id, "nome": "Ana"}).to_string();

    let res = scan(&app, &door, &event_b, &qr).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // And the guest stays untouched in its own event.
    let check = app
        .state
        .guest_repo
        .find_in_event(&event_a, guest_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!check.checked_in);
}

#[tokio::test]
async fn test_manual_checkin_by_name_fragment() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN_CODE).await;
    let event_id = app.create_event(&admin, "Gala").await;
    app.create_guest(&admin, &event_id, "Maria Silva", "maria@example.com")
        .await;

    let door = app.login(CHECKIN_CODE).await;
    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/v1/events/{}/checkin/manual", event_id))
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("access_token={}", door.access_token))
                .header("X-CSRF-Token", &door.csrf_token)
                .body(Body::from(json!({"query": "silva"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["guest"]["name"], "Maria Silva");
    assert_eq!(body["already_checked_in"], false);
}

#[tokio::test]
async fn test_stats_and_recent_checkins() {
    let app = TestApp::new().await;
    let admin = app.login(ADMIN_CODE).await;
    let event_id = app.create_event(&admin, "Gala").await;

    let g1 = app
        .create_guest(&admin, &event_id, "Um", "um@example.com")
        .await;
    let g2 = app
        .create_guest(&admin, &event_id, "Dois", "dois@example.com")
        .await;
    app.create_guest(&admin, &event_id, "Três", "tres@example.com")
        .await;

    let g1_id = g1["id"].as_str().unwrap();
    let g2_id = g2["id"].as_str().unwrap();

    app.state.guest_repo.set_rsvp(g1_id, true, false).await.unwrap();
    app.state.guest_repo.set_rsvp(g2_id, false, true).await.unwrap();
    app.state.guest_repo.check_in(&event_id, g1_id).await.unwrap();

    let door = app.login(CHECKIN_CODE).await;
    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/events/{}/checkin/stats", event_id))
                .header(header::COOKIE, format!("access_token={}", door.access_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let stats = parse_body(res).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["confirmed"], 1);
    assert_eq!(stats["rejected"], 1);
    assert_eq!(stats["pending"], 1);
    assert_eq!(stats["present"], 1);

    let res = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/v1/events/{}/checkin/recent", event_id))
                .header(header::COOKIE, format!("access_token={}", door.access_token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let recent = parse_body(res).await;
    let arr = recent.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["id"], g1_id);
}
