use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::analytics::PlatformTotals,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    models::{Analytics, Donation, FoodItem, Role},
    response::{ApiResponse, Meta},
    state::AppState,
    store::Collections,
};

/// kg CO2 avoided per kg of food kept out of the waste stream.
const CARBON_FACTOR: f64 = 2.5;
/// Meal conversion used for NGO impact figures.
const MEALS_PER_KG: f64 = 2.0;
const MEALS_PER_PERSON: f64 = 3.0;

/// Locate or lazily create the per-user analytics row. NGO accounts carry
/// the extra impact counters from the start.
pub(crate) fn row_mut(c: &mut Collections, user_id: Uuid) -> &mut Analytics {
    let role = c.user(user_id).map(|u| u.role).unwrap_or(Role::Restaurant);
    let pos = match c.analytics.iter().position(|a| a.user_id == user_id) {
        Some(pos) => pos,
        None => {
            c.analytics.push(Analytics::zeroed(user_id, role));
            c.analytics.len() - 1
        }
    };
    &mut c.analytics[pos]
}

/// An item was marked consumed: the waste it would have become counts as
/// saved for the owning restaurant.
pub(crate) fn record_consumption(c: &mut Collections, restaurant_id: Uuid, quantity: f64) {
    let row = row_mut(c, restaurant_id);
    row.items_consumed += 1;
    row.waste_saved += quantity;
    row.carbon_footprint_reduced += quantity * CARBON_FACTOR;
    row.last_updated = Utc::now();
}

/// A donation reached `completed`: credit the restaurant (impact + reward
/// points) and, when an NGO claimed it, the NGO's impact counters.
/// `people_served` is re-derived from the running meal total rather than
/// incremented.
pub(crate) fn record_donation_completed(c: &mut Collections, donation: &Donation, item: &FoodItem) {
    let quantity = item.quantity;

    let row = row_mut(c, donation.restaurant_id);
    row.donations_made += 1;
    row.waste_saved += quantity;
    row.carbon_footprint_reduced += quantity * CARBON_FACTOR;
    row.last_updated = Utc::now();

    // 10 points per kg, floor of 10.
    let points_earned = ((quantity * 10.0).round() as i64).max(10);
    if let Some(restaurant) = c.user_mut(donation.restaurant_id) {
        restaurant.reward_points = Some(restaurant.reward_points.unwrap_or(0) + points_earned);
    }

    if let Some(ngo_id) = donation.ngo_id {
        let row = row_mut(c, ngo_id);
        row.donations_received = Some(row.donations_received.unwrap_or(0) + 1);
        let meals = row.meals_provided.unwrap_or(0.0) + quantity * MEALS_PER_KG;
        row.meals_provided = Some(meals);
        row.people_served = Some((meals / MEALS_PER_PERSON).floor() as i64);
        row.last_updated = Utc::now();
    }
}

pub fn get_analytics(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Analytics>> {
    let row = state
        .store
        .write(|c| Ok(row_mut(c, user.user_id).clone()))?;
    Ok(ApiResponse::success("Analytics", row, Some(Meta::empty())))
}

/// Admin-wide totals, summed over all rows at query time.
pub fn platform_totals(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<PlatformTotals>> {
    ensure_admin(user)?;
    let totals = state.store.read(|c| {
        let mut totals = PlatformTotals::default();
        for row in &c.analytics {
            totals.waste_saved += row.waste_saved;
            totals.donations_made += row.donations_made;
            totals.items_consumed += row.items_consumed;
            totals.carbon_footprint_reduced += row.carbon_footprint_reduced;
            totals.donations_received += row.donations_received.unwrap_or(0);
            totals.meals_provided += row.meals_provided.unwrap_or(0.0);
            totals.people_served += row.people_served.unwrap_or(0);
        }
        totals
    });
    Ok(ApiResponse::success(
        "Platform totals",
        totals,
        Some(Meta::empty()),
    ))
}
