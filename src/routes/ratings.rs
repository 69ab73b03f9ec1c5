use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::ratings::{RateNgoRequest, RatingList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::NgoRating,
    response::ApiResponse,
    routes::params::RatingQuery,
    services::rating_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_ratings).post(rate_ngo))
}

#[utoipa::path(post, path = "/ngo-ratings", request_body = RateNgoRequest, tag = "Ratings")]
pub async fn rate_ngo(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RateNgoRequest>,
) -> AppResult<Json<ApiResponse<NgoRating>>> {
    rating_service::rate_ngo(&state, &user, payload).map(Json)
}

#[utoipa::path(get, path = "/ngo-ratings", params(RatingQuery), tag = "Ratings")]
pub async fn list_ratings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RatingQuery>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    rating_service::list_ratings(&state, &user, query.ngo_id).map(Json)
}
