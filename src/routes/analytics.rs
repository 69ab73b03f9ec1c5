use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::analytics::PlatformTotals,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Analytics,
    response::ApiResponse,
    services::analytics_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_analytics))
        .route("/platform", get(platform_totals))
}

#[utoipa::path(get, path = "/analytics", tag = "Analytics")]
pub async fn get_analytics(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Analytics>>> {
    analytics_service::get_analytics(&state, &user).map(Json)
}

#[utoipa::path(get, path = "/analytics/platform", tag = "Analytics")]
pub async fn platform_totals(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PlatformTotals>>> {
    analytics_service::platform_totals(&state, &user).map(Json)
}
