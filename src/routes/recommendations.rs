use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::recommendations::{MlHealth, Recommendations},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::recommendation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_recommendations))
}

#[utoipa::path(get, path = "/recommendations", tag = "Recommendations")]
pub async fn get_recommendations(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Recommendations>>> {
    recommendation_service::get_recommendations(&state, &user)
        .await
        .map(Json)
}

#[utoipa::path(get, path = "/ml/health", tag = "Recommendations")]
pub async fn ml_health(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<MlHealth>>> {
    recommendation_service::ml_health(&state).await.map(Json)
}
