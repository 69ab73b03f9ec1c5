use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    dto::reports::{CreateReportRequest, ReportList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::CompletionReport,
    response::ApiResponse,
    routes::params::ReportQuery,
    services::report_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_reports).post(create_report))
}

#[utoipa::path(post, path = "/reports", request_body = CreateReportRequest, tag = "Reports")]
pub async fn create_report(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateReportRequest>,
) -> AppResult<Json<ApiResponse<CompletionReport>>> {
    report_service::create_report(&state, &user, payload).map(Json)
}

#[utoipa::path(get, path = "/reports", params(ReportQuery), tag = "Reports")]
pub async fn list_reports(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ApiResponse<ReportList>>> {
    report_service::list_reports(&state, &user, query.donation_id).map(Json)
}
