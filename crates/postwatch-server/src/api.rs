use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use postwatch_tracker::RunStats;

use crate::middleware::{request_id, RequestId};
use crate::scheduler::LastCycle;

#[derive(Clone)]
pub struct AppState {
    pub creators: usize,
    pub last_cycle: LastCycle,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
struct HealthData {
    status: &'static str,
    creators: usize,
    last_cycle: Option<RunStats>,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/api/v1/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Plain-text probe for uptime pingers.
async fn liveness() -> &'static str {
    "postwatch is running"
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<HealthData>> {
    let last_cycle = state.last_cycle.read().await.clone();
    Json(ApiResponse {
        data: HealthData {
            status: "ok",
            creators: state.creators,
            last_cycle,
        },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tokio::sync::RwLock;
    use tower::ServiceExt;

    fn app(last_cycle: Option<RunStats>) -> Router {
        build_app(AppState {
            creators: 3,
            last_cycle: Arc::new(RwLock::new(last_cycle)),
        })
    }

    async fn get(app: Router, uri: &str, request_id: Option<&str>) -> axum::response::Response {
        let mut builder = Request::builder().uri(uri);
        if let Some(id) = request_id {
            builder = builder.header("x-request-id", id);
        }
        app.oneshot(builder.body(Body::empty()).expect("request"))
            .await
            .expect("response")
    }

    #[tokio::test]
    async fn root_returns_liveness_text() {
        let response = get(app(None), "/", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        assert_eq!(&body[..], b"postwatch is running");
    }

    #[tokio::test]
    async fn health_reports_creators_before_first_cycle() {
        let response = get(app(None), "/api/v1/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["creators"], 3);
        assert!(json["data"]["last_cycle"].is_null());
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn health_includes_last_cycle_stats() {
        let mut stats = RunStats::new(Utc::now());
        stats.creators_checked = 3;
        stats.new_posts = 1;
        stats.state_saved = true;

        let response = get(app(Some(stats)), "/api/v1/health", None).await;
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["data"]["last_cycle"]["creators_checked"], 3);
        assert_eq!(json["data"]["last_cycle"]["new_posts"], 1);
        assert_eq!(json["data"]["last_cycle"]["state_saved"], true);
    }

    #[tokio::test]
    async fn request_id_header_is_echoed() {
        let response = get(app(None), "/api/v1/health", Some("abc-123")).await;
        assert_eq!(
            response.headers().get("x-request-id").map(|v| v.as_bytes()),
            Some(&b"abc-123"[..])
        );
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json parse");
        assert_eq!(json["meta"]["request_id"], "abc-123");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = get(app(None), "/api/v1/nope", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
