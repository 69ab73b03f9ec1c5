use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::notifications::{NotificationList, UnreadCount},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Notification, NotificationKind},
    response::{ApiResponse, Meta},
    state::AppState,
    store::Collections,
};

/// Insert a notification row. Called from inside other services' write
/// closures so the insert lands in the same atomic mutation as the event
/// that caused it.
pub(crate) fn notify(
    c: &mut Collections,
    user_id: Uuid,
    title: &str,
    message: String,
    kind: NotificationKind,
) {
    c.notifications.push(Notification {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_string(),
        message,
        kind,
        read: false,
        created_at: Utc::now(),
    });
}

/// Fan a notification out to every NGO account.
pub(crate) fn notify_all_ngos(c: &mut Collections, title: &str, message: String) {
    let ngo_ids: Vec<Uuid> = c
        .users
        .iter()
        .filter(|u| u.role == crate::models::Role::Ngo)
        .map(|u| u.id)
        .collect();
    for ngo_id in ngo_ids {
        notify(c, ngo_id, title, message.clone(), NotificationKind::Donation);
    }
}

pub fn list_notifications(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<NotificationList>> {
    let mut items = state.store.read(|c| {
        c.notifications
            .iter()
            .filter(|n| n.user_id == user.user_id)
            .cloned()
            .collect::<Vec<_>>()
    });
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "Notifications",
        NotificationList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub fn unread_count(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<UnreadCount>> {
    let count = state.store.read(|c| {
        c.notifications
            .iter()
            .filter(|n| n.user_id == user.user_id && !n.read)
            .count() as i64
    });
    Ok(ApiResponse::success(
        "Unread notifications",
        UnreadCount { count },
        Some(Meta::empty()),
    ))
}

pub fn mark_read(state: &AppState, user: &AuthUser, id: Uuid) -> AppResult<ApiResponse<()>> {
    state.store.write(|c| {
        let notification = c
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.user_id == user.user_id)
            .ok_or(AppError::NotFound)?;
        notification.read = true;
        Ok(())
    })?;
    Ok(ApiResponse::success(
        "Notification marked as read",
        (),
        Some(Meta::empty()),
    ))
}

pub fn mark_all_read(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<()>> {
    state.store.write(|c| {
        for n in c
            .notifications
            .iter_mut()
            .filter(|n| n.user_id == user.user_id && !n.read)
        {
            n.read = true;
        }
        Ok(())
    })?;
    Ok(ApiResponse::success(
        "All notifications marked as read",
        (),
        Some(Meta::empty()),
    ))
}
