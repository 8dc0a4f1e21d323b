use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use portfolio_core_health_contracts::{HealthFeatureService, HealthStatus};
use serde::Serialize;

pub fn router(service: Arc<impl HealthFeatureService>) -> Router<()> {
    Router::new()
        .route("/health", routing::get(health))
        .with_state(service)
}

#[derive(Serialize)]
struct HealthResponse {
    http: bool,
    email: bool,
}

async fn health(service: State<Arc<impl HealthFeatureService>>) -> Response {
    let status = service.get_status().await;
    let HealthStatus { email } = status;

    let code = if status.ok() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (code, Json(HealthResponse { http: true, email })).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use portfolio_core_health_contracts::MockHealthFeatureService;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;

    async fn get(service: MockHealthFeatureService) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = router(Arc::new(service)).oneshot(request).await.unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn healthy() {
        let service = MockHealthFeatureService::new().with_get_status(HealthStatus { email: true });

        let (status, body) = get(service).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"http": true, "email": true}));
    }

    #[tokio::test]
    async fn smtp_unreachable() {
        let service =
            MockHealthFeatureService::new().with_get_status(HealthStatus { email: false });

        let (status, body) = get(service).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"http": true, "email": false}));
    }
}
