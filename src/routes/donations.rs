use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::donations::{CreateDonationRequest, DonationList, FulfillmentPatch},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Donation,
    response::ApiResponse,
    routes::params::FulfillmentQuery,
    services::donation_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_donations).post(create_donation))
        .route("/available", get(available_donations))
        .route("/{id}", patch(update_donation))
}

#[utoipa::path(get, path = "/donations", params(FulfillmentQuery), tag = "Donations")]
pub async fn list_donations(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FulfillmentQuery>,
) -> AppResult<Json<ApiResponse<DonationList>>> {
    donation_service::list_donations(&state, &user, &query).map(Json)
}

#[utoipa::path(get, path = "/donations/available", tag = "Donations")]
pub async fn available_donations(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<DonationList>>> {
    donation_service::available_donations(&state).map(Json)
}

#[utoipa::path(post, path = "/donations", request_body = CreateDonationRequest, tag = "Donations")]
pub async fn create_donation(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateDonationRequest>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    donation_service::create_donation(&state, &user, payload).map(Json)
}

#[utoipa::path(patch, path = "/donations/{id}", request_body = FulfillmentPatch, tag = "Donations")]
pub async fn update_donation(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<FulfillmentPatch>,
) -> AppResult<Json<ApiResponse<Donation>>> {
    donation_service::update_donation(&state, &user, id, patch).map(Json)
}
