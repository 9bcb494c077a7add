use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

use crate::api::handlers::{auth, checkin, communication, event, guest, health, rsvp};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))

        // Public RSVP (guest id is the bearer token)
        .route("/api/v1/rsvp/{guest_id}", get(rsvp::get_rsvp))
        .route("/api/v1/rsvp/{guest_id}/confirm", post(rsvp::confirm))
        .route("/api/v1/rsvp/{guest_id}/reject", post(rsvp::reject))
        .route("/api/v1/rsvp/{guest_id}/status", get(rsvp::status))

        // Events
        .route("/api/v1/events", post(event::create_event).get(event::list_events))
        .route("/api/v1/events/{event_id}", get(event::get_event).put(event::update_event))

        // Guests
        .route("/api/v1/events/{event_id}/guests", post(guest::create_guest).get(guest::list_guests))
        .route("/api/v1/events/{event_id}/guests/import", post(guest::import_guests))
        .route("/api/v1/events/{event_id}/guests/export", get(guest::export_guests))
        .route("/api/v1/events/{event_id}/guests/{guest_id}", put(guest::update_guest).delete(guest::delete_guest))
        .route("/api/v1/events/{event_id}/guests/{guest_id}/rsvp", put(guest::set_rsvp))
        .route("/api/v1/events/{event_id}/guests/{guest_id}/table", put(guest::set_table))
        .route("/api/v1/events/{event_id}/guests/{guest_id}/checkin", put(guest::set_checked_in))
        .route("/api/v1/events/{event_id}/guests/{guest_id}/invite", get(guest::download_invite))

        // Door check-in
        .route("/api/v1/events/{event_id}/checkin/scan", post(checkin::scan))
        .route("/api/v1/events/{event_id}/checkin/manual", post(checkin::manual))
        .route("/api/v1/events/{event_id}/checkin/recent", get(checkin::recent))
        .route("/api/v1/events/{event_id}/checkin/stats", get(checkin::stats))

        // Communication
        .route("/api/v1/events/{event_id}/template", get(communication::get_template).put(communication::save_template))
        .route("/api/v1/events/{event_id}/emails/send", post(communication::send_bulk))
        .route("/api/v1/events/{event_id}/emails/logs", get(communication::list_logs))
        .route("/api/v1/events/{event_id}/emails/jobs", get(communication::list_jobs))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        role = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
