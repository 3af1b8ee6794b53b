use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::{VERSION, WeatherBlogError, pipeline::Pipeline};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub message: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// A failed run, rendered as `500 {"message": ...}`
pub struct ApiError(WeatherBlogError);

impl From<WeatherBlogError> for ApiError {
    fn from(err: WeatherBlogError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(stage = self.0.stage(), "Automation failed: {}", self.0);
        let body = ErrorBody {
            message: format!("Automation failed: {}", self.0),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/create-post", post(create_post))
        .route("/health", get(health))
        .with_state(state)
}

async fn create_post(
    State(state): State<AppState>,
) -> Result<Json<CreatePostResponse>, ApiError> {
    let outcome = state.pipeline.run().await?;
    Ok(Json(CreatePostResponse {
        message: "Post created successfully!".to_string(),
        url: outcome.url,
    }))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}
