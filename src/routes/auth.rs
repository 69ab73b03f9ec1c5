use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, UserList, UserProfile},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::auth_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users", get(list_users))
}

#[utoipa::path(post, path = "/auth/register", request_body = RegisterRequest, tag = "Auth")]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<UserProfile>>> {
    auth_service::register_user(&state, payload).map(Json)
}

#[utoipa::path(post, path = "/auth/login", request_body = LoginRequest, tag = "Auth")]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    auth_service::login_user(&state, payload).map(Json)
}

#[utoipa::path(get, path = "/auth/users", tag = "Auth")]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UserList>>> {
    auth_service::list_users(&state, &user).map(Json)
}
