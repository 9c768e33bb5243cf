//! Shared router and request handlers.
//!
//! # Responsibilities
//! - Build the Axum Router served by every listener
//! - Wire up middleware (request ID, tracing, request timeout)
//! - Expose the info route and the in-band stop route
//!
//! # Design Decisions
//! - One router instance is built at startup and cloned per listener, so
//!   every bound address serves the identical surface
//! - The stop route flips the same shutdown state as the OS signal path;
//!   the 200 response is delivered while the listener drains

use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderValue, Request},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::lifecycle::Shutdown;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide shutdown coordinator, shared with the signal watcher.
    pub shutdown: Shutdown,
}

/// Fixed-message JSON response body.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// UUID v4 request IDs for the `x-request-id` header.
#[derive(Clone, Copy, Default)]
struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = HeaderValue::from_str(&uuid::Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(id))
    }
}

/// Build the router with all middleware layers.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/server", get(server_info))
        .route("/stop", get(stop))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn server_info() -> Json<MessageResponse> {
    metrics::record_request("/server");
    Json(MessageResponse { message: "server" })
}

async fn stop(State(state): State<AppState>) -> Json<MessageResponse> {
    metrics::record_request("/stop");
    tracing::info!("Stop requested via HTTP");
    state.shutdown.trigger();
    Json(MessageResponse {
        message: "shutting down",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn test_app() -> (AppState, Router) {
        let state = AppState {
            shutdown: Shutdown::new(),
        };
        let router = build_router(state.clone(), Duration::from_secs(5));
        (state, router)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn server_route_returns_message() {
        let (state, app) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/server").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "server");
        assert!(!state.shutdown.is_triggered());
    }

    #[tokio::test]
    async fn stop_route_triggers_shutdown() {
        let (state, app) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/stop").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "shutting down");
        assert!(state.shutdown.is_triggered());
    }

    #[tokio::test]
    async fn stop_route_is_idempotent() {
        let (state, app) = test_app();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(Request::builder().uri("/stop").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert!(state.shutdown.is_triggered());
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (_state, app) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (_state, app) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/server").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
