use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};
use uuid::Uuid;

use crate::{
    dto::donations::{CreateDonationRequest, DisposalList, FulfillmentPatch},
    error::AppResult,
    middleware::auth::AuthUser,
    models::DisposalRequest,
    response::ApiResponse,
    routes::params::FulfillmentQuery,
    services::disposal_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_disposal_requests).post(create_disposal_request))
        .route("/available", get(available_disposal_requests))
        .route("/{id}", patch(update_disposal_request))
}

#[utoipa::path(get, path = "/disposal-requests", params(FulfillmentQuery), tag = "Disposal")]
pub async fn list_disposal_requests(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FulfillmentQuery>,
) -> AppResult<Json<ApiResponse<DisposalList>>> {
    disposal_service::list_disposal_requests(&state, &user, &query).map(Json)
}

#[utoipa::path(get, path = "/disposal-requests/available", tag = "Disposal")]
pub async fn available_disposal_requests(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<ApiResponse<DisposalList>>> {
    disposal_service::available_disposal_requests(&state).map(Json)
}

#[utoipa::path(post, path = "/disposal-requests", request_body = CreateDonationRequest, tag = "Disposal")]
pub async fn create_disposal_request(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateDonationRequest>,
) -> AppResult<Json<ApiResponse<DisposalRequest>>> {
    disposal_service::create_disposal_request(&state, &user, payload).map(Json)
}

#[utoipa::path(patch, path = "/disposal-requests/{id}", request_body = FulfillmentPatch, tag = "Disposal")]
pub async fn update_disposal_request(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<FulfillmentPatch>,
) -> AppResult<Json<ApiResponse<DisposalRequest>>> {
    disposal_service::update_disposal_request(&state, &user, id, patch).map(Json)
}
