use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::reports::{CreateReportRequest, ReportList},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{CompletionReport, FulfillmentStatus, NotificationKind, Role},
    response::{ApiResponse, Meta},
    services::notification_service,
    state::AppState,
};

/// NGOs file a report after a completed pickup: photo proof plus impact
/// details, with the restaurant notified that documentation arrived.
pub fn create_report(
    state: &AppState,
    user: &AuthUser,
    payload: CreateReportRequest,
) -> AppResult<ApiResponse<CompletionReport>> {
    ensure_role(user, Role::Ngo)?;

    let report = state.store.write(|c| {
        let donation = c
            .donations
            .iter()
            .find(|d| d.id == payload.donation_id)
            .ok_or(AppError::NotFound)?;
        if donation.ngo_id != Some(user.user_id) {
            return Err(AppError::Forbidden);
        }
        if donation.status != FulfillmentStatus::Completed {
            return Err(AppError::BadRequest(
                "Donation is not completed yet".into(),
            ));
        }
        if c.completion_reports.iter().any(|r| r.donation_id == donation.id) {
            return Err(AppError::BadRequest(
                "Donation already has a completion report".into(),
            ));
        }
        let restaurant_id = donation.restaurant_id;

        let report = CompletionReport {
            id: Uuid::new_v4(),
            donation_id: payload.donation_id,
            ngo_id: user.user_id,
            restaurant_id,
            completion_date: payload.completion_date,
            photo_url: payload.photo_url,
            description: payload.description,
            people_served: payload.people_served,
            location: payload.location,
            additional_notes: payload.additional_notes,
            created_at: Utc::now(),
        };
        c.completion_reports.push(report.clone());

        notification_service::notify(
            c,
            restaurant_id,
            "Completion Report Received",
            "An NGO has documented the delivery of your donation".to_string(),
            NotificationKind::Donation,
        );

        Ok(report)
    })?;

    Ok(ApiResponse::success(
        "Report created",
        report,
        Some(Meta::empty()),
    ))
}

/// Restaurants see reports about their donations, NGOs their own filings,
/// admins everything. The donation filter narrows to a single pickup, how
/// a delivery certificate is looked up.
pub fn list_reports(
    state: &AppState,
    user: &AuthUser,
    donation_id: Option<Uuid>,
) -> AppResult<ApiResponse<ReportList>> {
    let mut items = state.store.read(|c| {
        c.completion_reports
            .iter()
            .filter(|r| match user.role {
                Role::Restaurant => r.restaurant_id == user.user_id,
                Role::Ngo => r.ngo_id == user.user_id,
                Role::Admin => true,
            })
            .filter(|r| donation_id.is_none_or(|id| r.donation_id == id))
            .cloned()
            .collect::<Vec<_>>()
    });
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Completion reports",
        ReportList { items },
        Some(Meta::new(1, total, total)),
    ))
}
