use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::food_items::{CreateFoodItemRequest, FoodItemList, FoodItemPatch},
    error::{AppError, AppResult},
    expiry,
    middleware::auth::{AuthUser, ensure_role},
    models::{FoodItem, FoodStatus, NotificationKind, Role},
    response::{ApiResponse, Meta},
    services::{analytics_service, notification_service},
    state::AppState,
};

/// Restaurants see their own inventory; admins may pass an explicit
/// restaurant filter or read everything.
pub fn list_food_items(
    state: &AppState,
    user: &AuthUser,
    restaurant_id: Option<Uuid>,
) -> AppResult<ApiResponse<FoodItemList>> {
    let filter = match user.role {
        Role::Restaurant => Some(user.user_id),
        _ => restaurant_id,
    };
    let items = state.store.read(|c| {
        c.food_items
            .iter()
            .filter(|i| filter.is_none_or(|id| i.restaurant_id == id))
            .cloned()
            .collect::<Vec<_>>()
    });
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Food items",
        FoodItemList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub fn get_food_item(state: &AppState, id: Uuid) -> AppResult<ApiResponse<FoodItem>> {
    let item = state
        .store
        .read(|c| c.food_item(id).cloned())
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Food item", item, Some(Meta::empty())))
}

pub fn create_food_item(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFoodItemRequest,
) -> AppResult<ApiResponse<FoodItem>> {
    ensure_role(user, Role::Restaurant)?;
    if payload.quantity <= 0.0 {
        return Err(AppError::BadRequest("quantity must be positive".into()));
    }

    let now = Utc::now();
    let status = expiry::status_for(payload.expiry_date, now);
    let priority_score = expiry::priority_score(payload.expiry_date, payload.quantity, now);

    let item = FoodItem {
        id: Uuid::new_v4(),
        restaurant_id: user.user_id,
        name: payload.name,
        category: payload.category,
        quantity: payload.quantity,
        purchase_date: payload.purchase_date,
        expiry_date: payload.expiry_date,
        status,
        priority_score,
        photo_url: payload.photo_url,
        created_at: now,
        updated_at: now,
    };

    state.store.write(|c| {
        c.food_items.push(item.clone());
        if status == FoodStatus::ExpiringSoon {
            let days = expiry::days_until_expiry(item.expiry_date, now);
            notification_service::notify(
                c,
                item.restaurant_id,
                "Item Expiring Soon",
                format!(
                    "{} is expiring in {} day(s). Consider consuming or donating it soon!",
                    item.name, days
                ),
                NotificationKind::Expiry,
            );
        }
        Ok(())
    })?;

    Ok(ApiResponse::success(
        "Food item created",
        item,
        Some(Meta::empty()),
    ))
}

/// Partial patch. Status and priority are re-derived when the patch touches
/// `expiry_date` or `quantity`, overriding any status supplied alongside.
/// Derivation happens only here, never on read, so a long-untouched row can
/// display a stale status until its next write.
pub fn update_food_item(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    patch: FoodItemPatch,
) -> AppResult<ApiResponse<FoodItem>> {
    let updated = state.store.write(|c| {
        let item = c.food_item(id).ok_or(AppError::NotFound)?;
        if user.role != Role::Admin && item.restaurant_id != user.user_id {
            return Err(AppError::Forbidden);
        }
        let previous_status = item.status;

        if let Some(quantity) = patch.quantity {
            if quantity <= 0.0 {
                return Err(AppError::BadRequest("quantity must be positive".into()));
            }
        }

        let recompute = patch.expiry_date.is_some() || patch.quantity.is_some();
        let now = Utc::now();

        let item = c.food_item_mut(id).ok_or(AppError::NotFound)?;
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(category) = patch.category {
            item.category = category;
        }
        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(purchase_date) = patch.purchase_date {
            item.purchase_date = Some(purchase_date);
        }
        if let Some(expiry_date) = patch.expiry_date {
            item.expiry_date = expiry_date;
        }
        if let Some(status) = patch.status {
            item.status = status;
        }
        if let Some(photo_url) = patch.photo_url {
            item.photo_url = Some(photo_url);
        }
        if recompute {
            item.status = expiry::status_for(item.expiry_date, now);
            item.priority_score = expiry::priority_score(item.expiry_date, item.quantity, now);
        }
        item.updated_at = now;
        let updated = item.clone();

        // Consumption is terminal and only ever set by explicit action.
        if updated.status == FoodStatus::Consumed && previous_status != FoodStatus::Consumed {
            analytics_service::record_consumption(c, updated.restaurant_id, updated.quantity);
        }

        Ok(updated)
    })?;

    Ok(ApiResponse::success(
        "Food item updated",
        updated,
        Some(Meta::empty()),
    ))
}

/// The only hard delete in the system. Donations referencing the item are
/// left in place and hidden by the orphan filter on read.
pub fn delete_food_item(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<()>> {
    state.store.write(|c| {
        let item = c.food_item(id).ok_or(AppError::NotFound)?;
        if user.role != Role::Admin && item.restaurant_id != user.user_id {
            return Err(AppError::Forbidden);
        }
        c.food_items.retain(|i| i.id != id);
        Ok(())
    })?;
    Ok(ApiResponse::success(
        "Food item deleted",
        (),
        Some(Meta::empty()),
    ))
}
