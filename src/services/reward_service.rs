use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::rewards::{RedeemRequest, RedemptionList, RedemptionPatch},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin, ensure_role},
    models::{NotificationKind, RedemptionStatus, RewardRedemption, Role},
    response::{ApiResponse, Meta},
    services::notification_service,
    state::AppState,
};

/// Points are deducted up front so a restaurant cannot spend the same
/// balance twice while a redemption sits pending. A rejection refunds them.
pub fn redeem_points(
    state: &AppState,
    user: &AuthUser,
    payload: RedeemRequest,
) -> AppResult<ApiResponse<RewardRedemption>> {
    ensure_role(user, Role::Restaurant)?;
    if payload.points_used <= 0 {
        return Err(AppError::BadRequest("points_used must be positive".into()));
    }

    let redemption = state.store.write(|c| {
        let restaurant = c.user_mut(user.user_id).ok_or(AppError::NotFound)?;
        let balance = restaurant.reward_points.unwrap_or(0);
        if balance < payload.points_used {
            return Err(AppError::BadRequest("Insufficient reward points".into()));
        }
        restaurant.reward_points = Some(balance - payload.points_used);

        let redemption = RewardRedemption {
            id: Uuid::new_v4(),
            restaurant_id: user.user_id,
            points_used: payload.points_used,
            reward_type: payload.reward_type,
            description: payload.description,
            status: RedemptionStatus::Pending,
            created_at: Utc::now(),
        };
        c.reward_redemptions.push(redemption.clone());
        Ok(redemption)
    })?;

    Ok(ApiResponse::success(
        "Redemption requested",
        redemption,
        Some(Meta::empty()),
    ))
}

pub fn list_redemptions(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<RedemptionList>> {
    let mut items = state.store.read(|c| {
        c.reward_redemptions
            .iter()
            .filter(|r| user.role == Role::Admin || r.restaurant_id == user.user_id)
            .cloned()
            .collect::<Vec<_>>()
    });
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Redemptions",
        RedemptionList { items },
        Some(Meta::new(1, total, total)),
    ))
}

/// Admin approves or rejects a pending redemption. Both outcomes notify the
/// restaurant; rejection puts the points back.
pub fn update_redemption(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    patch: RedemptionPatch,
) -> AppResult<ApiResponse<RewardRedemption>> {
    ensure_admin(user)?;

    let updated = state.store.write(|c| {
        let redemption = c
            .reward_redemptions
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(AppError::NotFound)?;
        if !redemption.status.can_transition(patch.status) {
            return Err(AppError::BadRequest(format!(
                "Cannot move redemption from {:?} to {:?}",
                redemption.status, patch.status
            )));
        }
        redemption.status = patch.status;
        let updated = redemption.clone();

        match updated.status {
            RedemptionStatus::Rejected => {
                if let Some(restaurant) = c.user_mut(updated.restaurant_id) {
                    restaurant.reward_points =
                        Some(restaurant.reward_points.unwrap_or(0) + updated.points_used);
                }
                notification_service::notify(
                    c,
                    updated.restaurant_id,
                    "Redemption Rejected",
                    format!(
                        "Your redemption of {} points was rejected and the points refunded",
                        updated.points_used
                    ),
                    NotificationKind::System,
                );
            }
            RedemptionStatus::Approved => {
                notification_service::notify(
                    c,
                    updated.restaurant_id,
                    "Redemption Approved",
                    format!(
                        "Your redemption of {} points ({}) was approved",
                        updated.points_used, updated.reward_type
                    ),
                    NotificationKind::System,
                );
            }
            RedemptionStatus::Pending => {}
        }

        Ok(updated)
    })?;

    Ok(ApiResponse::success(
        "Redemption updated",
        updated,
        Some(Meta::empty()),
    ))
}
