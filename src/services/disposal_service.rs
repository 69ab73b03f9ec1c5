use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::donations::{CreateDonationRequest, DisposalList, DisposalWithItem, FulfillmentPatch},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{DisposalRequest, FoodStatus, FulfillmentStatus, NotificationKind, Role},
    response::{ApiResponse, Meta},
    routes::params::FulfillmentQuery,
    services::notification_service,
    state::AppState,
    store::Collections,
};

fn join_items(c: &Collections, rows: Vec<DisposalRequest>) -> Vec<DisposalWithItem> {
    rows.into_iter()
        .filter_map(|request| {
            let food_item = c.food_item(request.food_item_id)?.clone();
            Some(DisposalWithItem { request, food_item })
        })
        .collect()
}

pub fn list_disposal_requests(
    state: &AppState,
    user: &AuthUser,
    query: &FulfillmentQuery,
) -> AppResult<ApiResponse<DisposalList>> {
    let mut items = state.store.read(|c| {
        let rows = c
            .disposal_requests
            .iter()
            .filter(|d| match user.role {
                Role::Restaurant => d.restaurant_id == user.user_id,
                Role::Ngo => {
                    d.ngo_id == Some(user.user_id) || d.status == FulfillmentStatus::Pending
                }
                Role::Admin => true,
            })
            .filter(|d| query.status.is_none_or(|s| d.status == s))
            .filter(|d| query.restaurant_id.is_none_or(|id| d.restaurant_id == id))
            .filter(|d| query.ngo_id.is_none_or(|id| d.ngo_id == Some(id)))
            .cloned()
            .collect();
        join_items(c, rows)
    });
    items.sort_by(|a, b| b.request.created_at.cmp(&a.request.created_at));
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Disposal requests",
        DisposalList { items },
        Some(Meta::new(1, total, total)),
    ))
}

/// All pending disposal requests across the platform, the NGO browse view.
pub fn available_disposal_requests(state: &AppState) -> AppResult<ApiResponse<DisposalList>> {
    let mut items = state.store.read(|c| {
        let rows = c
            .disposal_requests
            .iter()
            .filter(|d| d.status == FulfillmentStatus::Pending)
            .cloned()
            .collect();
        join_items(c, rows)
    });
    items.sort_by(|a, b| b.request.created_at.cmp(&a.request.created_at));
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Available disposal requests",
        DisposalList { items },
        Some(Meta::new(1, total, total)),
    ))
}

/// Mirrors donation creation: the item leaves the inventory pool (status
/// forced to `donated`) and every NGO hears about the pickup.
pub fn create_disposal_request(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDonationRequest,
) -> AppResult<ApiResponse<DisposalRequest>> {
    ensure_role(user, Role::Restaurant)?;

    let request = state.store.write(|c| {
        let item = c.food_item(payload.food_item_id).ok_or(AppError::NotFound)?;
        if item.restaurant_id != user.user_id {
            return Err(AppError::Forbidden);
        }
        if c.disposal_requests
            .iter()
            .any(|d| d.food_item_id == item.id && d.status != FulfillmentStatus::Rejected)
        {
            return Err(AppError::BadRequest(
                "Food item already has an open disposal request".into(),
            ));
        }
        let (name, quantity) = (item.name.clone(), item.quantity);

        let now = Utc::now();
        let request = DisposalRequest {
            id: Uuid::new_v4(),
            food_item_id: payload.food_item_id,
            restaurant_id: user.user_id,
            ngo_id: None,
            status: FulfillmentStatus::Pending,
            pickup_date: None,
            pickup_time: None,
            pickup_location: None,
            pickup_notes: None,
            created_at: now,
            updated_at: now,
        };
        c.disposal_requests.push(request.clone());

        if let Some(item) = c.food_item_mut(payload.food_item_id) {
            item.status = FoodStatus::Donated;
            item.updated_at = now;
        }

        notification_service::notify_all_ngos(
            c,
            "New Disposal Request",
            format!("{name} ({quantity}kg) is available for disposal"),
        );

        Ok(request)
    })?;

    Ok(ApiResponse::success(
        "Disposal request created",
        request,
        Some(Meta::empty()),
    ))
}

/// Same state machine as donations but no analytics on completion; disposed
/// food is waste either way.
pub fn update_disposal_request(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    patch: FulfillmentPatch,
) -> AppResult<ApiResponse<DisposalRequest>> {
    let updated = state.store.write(|c| {
        let request = c
            .disposal_requests
            .iter()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound)?;
        let previous = request.status;
        let owner = request.restaurant_id;
        let assignee = request.ngo_id;

        // Orphaned rows answer like missing ones, checked before mutating.
        let item = c
            .food_item(request.food_item_id)
            .cloned()
            .ok_or(AppError::NotFound)?;

        // Only the participants may touch the row at all.
        if user.role != Role::Admin && user.role != Role::Ngo && owner != user.user_id {
            return Err(AppError::Forbidden);
        }
        if patch.ngo_id.is_some() && user.role != Role::Admin {
            return Err(AppError::Forbidden);
        }
        if let Some(next) = patch.status {
            if !previous.can_transition(next) {
                return Err(AppError::BadRequest(format!(
                    "Cannot move disposal request from {previous:?} to {next:?}"
                )));
            }
            let allowed = match next {
                FulfillmentStatus::Accepted => matches!(user.role, Role::Ngo | Role::Admin),
                FulfillmentStatus::Rejected => {
                    matches!(user.role, Role::Ngo | Role::Admin) || owner == user.user_id
                }
                FulfillmentStatus::Completed => {
                    user.role == Role::Admin || assignee == Some(user.user_id)
                }
                FulfillmentStatus::Pending => user.role == Role::Admin,
            };
            if !allowed {
                return Err(AppError::Forbidden);
            }
        }

        let request = c.disposal_request_mut(id).ok_or(AppError::NotFound)?;
        if let Some(next) = patch.status {
            request.status = next;
            if next == FulfillmentStatus::Accepted && user.role == Role::Ngo {
                request.ngo_id = Some(user.user_id);
            }
        }
        if let Some(ngo_id) = patch.ngo_id {
            request.ngo_id = Some(ngo_id);
        }
        if let Some(pickup_date) = patch.pickup_date {
            request.pickup_date = Some(pickup_date);
        }
        if let Some(pickup_time) = patch.pickup_time {
            request.pickup_time = Some(pickup_time);
        }
        if let Some(pickup_location) = patch.pickup_location {
            request.pickup_location = Some(pickup_location);
        }
        if let Some(pickup_notes) = patch.pickup_notes {
            request.pickup_notes = Some(pickup_notes);
        }
        request.updated_at = Utc::now();
        let updated = request.clone();

        if updated.status == FulfillmentStatus::Accepted && previous != FulfillmentStatus::Accepted
        {
            notification_service::notify(
                c,
                updated.restaurant_id,
                "Disposal Request Accepted",
                format!("Your disposal request for {} has been accepted", item.name),
                NotificationKind::Donation,
            );
        }

        Ok(updated)
    })?;

    Ok(ApiResponse::success(
        "Disposal request updated",
        updated,
        Some(Meta::empty()),
    ))
}
