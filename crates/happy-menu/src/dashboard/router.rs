use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::service::DashboardService;
use crate::error::AppError;

/// Router builder exposing the dashboard screens as JSON endpoints.
pub fn dashboard_router(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/api/v1/soul/vibrations", get(vibrations_handler))
        .route("/api/v1/mind/texture", get(texture_handler))
        .route("/api/v1/mind/mood", get(mood_handler))
        .route("/api/v1/body/meals", get(meals_handler))
        .route("/api/v1/disorders", get(disorders_handler))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct VibrationsQuery {
    model: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TextureQuery {
    texture: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MoodQuery {
    rating: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MealsQuery {
    feeling: Option<String>,
    meal_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DisordersQuery {
    condition: Option<String>,
    diabetes_model: Option<String>,
}

/// Missing parameters are parsed as empty tokens so they fail validation
/// with the same message as unknown ones.
fn param(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// Runs a screen on the blocking pool; every screen reads the export from disk.
async fn offload<T, F>(screen: &'static str, service: Arc<DashboardService>, run: F) -> Response
where
    T: Serialize + Send + 'static,
    F: FnOnce(&DashboardService) -> Result<T, AppError> + Send + 'static,
{
    let outcome = tokio::task::spawn_blocking(move || run(&service))
        .await
        .map_err(|err| AppError::Server(axum::Error::new(err)))
        .and_then(|outcome| outcome);
    respond(screen, outcome)
}

fn respond<T: Serialize>(screen: &'static str, outcome: Result<T, AppError>) -> Response {
    match outcome {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => {
            warn!(screen, status = %error.status(), error = %error, "dashboard request failed");
            error.into_response()
        }
    }
}

pub(crate) async fn vibrations_handler(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<VibrationsQuery>,
) -> Response {
    offload("soul", service, move |service| {
        service.vibrations(query.model.as_deref())
    })
    .await
}

pub(crate) async fn texture_handler(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<TextureQuery>,
) -> Response {
    offload("texture", service, move |service| {
        service.texture(param(&query.texture))
    })
    .await
}

pub(crate) async fn mood_handler(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<MoodQuery>,
) -> Response {
    offload("mood", service, move |service| {
        service.mood(param(&query.rating), param(&query.category))
    })
    .await
}

pub(crate) async fn meals_handler(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<MealsQuery>,
) -> Response {
    offload("body", service, move |service| {
        service.meals(param(&query.feeling), param(&query.meal_type))
    })
    .await
}

pub(crate) async fn disorders_handler(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<DisordersQuery>,
) -> Response {
    offload("disorders", service, move |service| {
        service.disorders(param(&query.condition), query.diabetes_model.as_deref())
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{DegeneratePolicy, KMeans};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::path::PathBuf;
    use tower::ServiceExt;

    fn service(path: PathBuf) -> Arc<DashboardService> {
        Arc::new(DashboardService::with_assigner(
            path,
            DegeneratePolicy::Neutral,
            Arc::new(KMeans::default()),
        ))
    }

    #[tokio::test]
    async fn handler_rejects_unknown_texture_with_bad_request() {
        let response = texture_handler(
            State(service(PathBuf::from("./missing.csv"))),
            Query(TextureQuery {
                texture: Some("gooey".to_string()),
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_parameter_is_reported_as_invalid_input() {
        let router = dashboard_router(service(PathBuf::from("./missing.csv")));
        let response = router
            .oneshot(
                Request::get("/api/v1/mind/mood?category=veg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(payload["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid input"));
    }

    #[tokio::test]
    async fn unreadable_export_is_a_server_error() {
        let router = dashboard_router(service(PathBuf::from("./missing.csv")));
        let response = router
            .oneshot(
                Request::get("/api/v1/soul/vibrations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
