use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::food_items::{CreateFoodItemRequest, FoodItemList, FoodItemPatch},
    error::AppResult,
    middleware::auth::AuthUser,
    models::FoodItem,
    response::ApiResponse,
    routes::params::FoodItemQuery,
    services::food_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_food_items).post(create_food_item))
        .route(
            "/{id}",
            get(get_food_item)
                .patch(update_food_item)
                .delete(delete_food_item),
        )
}

#[utoipa::path(get, path = "/food-items", params(FoodItemQuery), tag = "Food Items")]
pub async fn list_food_items(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FoodItemQuery>,
) -> AppResult<Json<ApiResponse<FoodItemList>>> {
    food_service::list_food_items(&state, &user, query.restaurant_id).map(Json)
}

#[utoipa::path(post, path = "/food-items", request_body = CreateFoodItemRequest, tag = "Food Items")]
pub async fn create_food_item(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFoodItemRequest>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    food_service::create_food_item(&state, &user, payload).map(Json)
}

#[utoipa::path(get, path = "/food-items/{id}", tag = "Food Items")]
pub async fn get_food_item(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    food_service::get_food_item(&state, id).map(Json)
}

#[utoipa::path(patch, path = "/food-items/{id}", request_body = FoodItemPatch, tag = "Food Items")]
pub async fn update_food_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<FoodItemPatch>,
) -> AppResult<Json<ApiResponse<FoodItem>>> {
    food_service::update_food_item(&state, &user, id, patch).map(Json)
}

#[utoipa::path(delete, path = "/food-items/{id}", tag = "Food Items")]
pub async fn delete_food_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    food_service::delete_food_item(&state, &user, id).map(Json)
}
