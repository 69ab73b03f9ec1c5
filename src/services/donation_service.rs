use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::donations::{CreateDonationRequest, DonationList, DonationWithItem, FulfillmentPatch},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Donation, FoodStatus, FulfillmentStatus, NotificationKind, Role},
    response::{ApiResponse, Meta},
    routes::params::FulfillmentQuery,
    services::{analytics_service, notification_service},
    state::AppState,
    store::Collections,
};

/// Join each donation with its food item, dropping rows whose item has been
/// deleted. The orphans stay on disk but never surface in a read.
fn join_items(c: &Collections, rows: Vec<Donation>) -> Vec<DonationWithItem> {
    rows.into_iter()
        .filter_map(|donation| {
            let food_item = c.food_item(donation.food_item_id)?.clone();
            Some(DonationWithItem {
                donation,
                food_item,
            })
        })
        .collect()
}

/// Restaurants see their own donations; NGOs see everything still pending
/// plus anything assigned to them; admins see all. The optional query
/// filters are ANDed on top of the role scope.
pub fn list_donations(
    state: &AppState,
    user: &AuthUser,
    query: &FulfillmentQuery,
) -> AppResult<ApiResponse<DonationList>> {
    let mut items = state.store.read(|c| {
        let rows = c
            .donations
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
    items.sort_by(|a, b| b.donation.created_at.cmp(&a.donation.created_at));
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Donations",
        DonationList { items },
        Some(Meta::new(1, total, total)),
    ))
}

/// All pending donations across the platform, the NGO browse view.
pub fn available_donations(state: &AppState) -> AppResult<ApiResponse<DonationList>> {
    let mut items = state.store.read(|c| {
        let rows = c
            .donations
            .iter()
            .filter(|d| d.status == FulfillmentStatus::Pending)
            .cloned()
            .collect();
        join_items(c, rows)
    });
    items.sort_by(|a, b| b.donation.created_at.cmp(&a.donation.created_at));
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Available donations",
        DonationList { items },
        Some(Meta::new(1, total, total)),
    ))
}

/// Offering an item for donation flips it to `donated` and fans a
/// notification out to every NGO.
pub fn create_donation(
    state: &AppState,
    user: &AuthUser,
    payload: CreateDonationRequest,
) -> AppResult<ApiResponse<Donation>> {
    ensure_role(user, Role::Restaurant)?;

    let donation = state.store.write(|c| {
        let item = c.food_item(payload.food_item_id).ok_or(AppError::NotFound)?;
        if item.restaurant_id != user.user_id {
            return Err(AppError::Forbidden);
        }
        if c.donations
            .iter()
            .any(|d| d.food_item_id == item.id && d.status != FulfillmentStatus::Rejected)
        {
            return Err(AppError::BadRequest(
                "Food item already has an open donation".into(),
            ));
        }
        let (name, quantity) = (item.name.clone(), item.quantity);

        let now = Utc::now();
        let donation = Donation {
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
        c.donations.push(donation.clone());

        if let Some(item) = c.food_item_mut(payload.food_item_id) {
            item.status = FoodStatus::Donated;
            item.updated_at = now;
        }

        notification_service::notify_all_ngos(
            c,
            "New Donation Available",
            format!("{name} ({quantity}kg) is available for donation"),
        );

        Ok(donation)
    })?;

    tracing::info!(donation_id = %donation.id, "donation created");
    Ok(ApiResponse::success(
        "Donation created",
        donation,
        Some(Meta::empty()),
    ))
}

/// Status changes go through the fulfillment state machine; an out-of-order
/// transition is a 400, not a silent overwrite. Accepting stamps the acting
/// NGO onto the row, completing feeds the analytics counters.
pub fn update_donation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    patch: FulfillmentPatch,
) -> AppResult<ApiResponse<Donation>> {
    let updated = state.store.write(|c| {
        let donation = c
            .donations
            .iter()
            .find(|d| d.id == id)
            .ok_or(AppError::NotFound)?;
        let previous = donation.status;
        let owner = donation.restaurant_id;
        let assignee = donation.ngo_id;

        // An update to an orphaned row would leave analytics half-applied,
        // so a missing item is treated as a missing donation, checked
        // before anything is touched.
        let item = c
            .food_item(donation.food_item_id)
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
                    "Cannot move donation from {previous:?} to {next:?}"
                )));
            }
            // NGOs drive acceptance and completion; a restaurant may only
            // withdraw its own pending offer.
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

        let donation = c.donation_mut(id).ok_or(AppError::NotFound)?;
        if let Some(next) = patch.status {
            donation.status = next;
            if next == FulfillmentStatus::Accepted && user.role == Role::Ngo {
                donation.ngo_id = Some(user.user_id);
            }
        }
        if let Some(ngo_id) = patch.ngo_id {
            donation.ngo_id = Some(ngo_id);
        }
        if let Some(pickup_date) = patch.pickup_date {
            donation.pickup_date = Some(pickup_date);
        }
        if let Some(pickup_time) = patch.pickup_time {
            donation.pickup_time = Some(pickup_time);
        }
        if let Some(pickup_location) = patch.pickup_location {
            donation.pickup_location = Some(pickup_location);
        }
        if let Some(pickup_notes) = patch.pickup_notes {
            donation.pickup_notes = Some(pickup_notes);
        }
        donation.updated_at = Utc::now();
        let updated = donation.clone();

        match updated.status {
            FulfillmentStatus::Accepted if previous != FulfillmentStatus::Accepted => {
                notification_service::notify(
                    c,
                    updated.restaurant_id,
                    "Donation Accepted",
                    format!("Your donation of {} has been accepted", item.name),
                    NotificationKind::Donation,
                );
            }
            FulfillmentStatus::Completed if previous != FulfillmentStatus::Completed => {
                analytics_service::record_donation_completed(c, &updated, &item);
            }
            _ => {}
        }

        Ok(updated)
    })?;

    Ok(ApiResponse::success(
        "Donation updated",
        updated,
        Some(Meta::empty()),
    ))
}
