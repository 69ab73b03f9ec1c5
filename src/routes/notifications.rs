use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::notifications::{NotificationList, UnreadCount},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::notification_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/{id}/read", post(mark_read))
        .route("/read-all", post(mark_all_read))
}

#[utoipa::path(get, path = "/notifications", tag = "Notifications")]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<NotificationList>>> {
    notification_service::list_notifications(&state, &user).map(Json)
}

#[utoipa::path(get, path = "/notifications/unread-count", tag = "Notifications")]
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<UnreadCount>>> {
    notification_service::unread_count(&state, &user).map(Json)
}

#[utoipa::path(post, path = "/notifications/{id}/read", tag = "Notifications")]
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    notification_service::mark_read(&state, &user, id).map(Json)
}

#[utoipa::path(post, path = "/notifications/read-all", tag = "Notifications")]
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    notification_service::mark_all_read(&state, &user).map(Json)
}
