use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::rewards::{RedeemRequest, RedemptionList, RedemptionPatch},
    error::AppResult,
    middleware::auth::AuthUser,
    models::RewardRedemption,
    response::ApiResponse,
    services::reward_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_redemptions).post(redeem_points))
        .route("/{id}", patch(update_redemption))
}

#[utoipa::path(post, path = "/redemptions", request_body = RedeemRequest, tag = "Rewards")]
pub async fn redeem_points(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<RedeemRequest>,
) -> AppResult<Json<ApiResponse<RewardRedemption>>> {
    reward_service::redeem_points(&state, &user, payload).map(Json)
}

#[utoipa::path(get, path = "/redemptions", tag = "Rewards")]
pub async fn list_redemptions(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<RedemptionList>>> {
    reward_service::list_redemptions(&state, &user).map(Json)
}

#[utoipa::path(patch, path = "/redemptions/{id}", request_body = RedemptionPatch, tag = "Rewards")]
pub async fn update_redemption(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<RedemptionPatch>,
) -> AppResult<Json<ApiResponse<RewardRedemption>>> {
    reward_service::update_redemption(&state, &user, id, patch).map(Json)
}
