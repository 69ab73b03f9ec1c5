use chrono::Utc;
use uuid::Uuid;

use crate::{
    dto::ratings::{RateNgoRequest, RatingList},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{FulfillmentStatus, NgoRating, Role},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Ratings are an admin oversight tool: one score per (ngo, donation) pair,
/// upserted, with the NGO's displayed rating re-averaged on every write.
/// Only completed donations are rateable.
pub fn rate_ngo(
    state: &AppState,
    user: &AuthUser,
    payload: RateNgoRequest,
) -> AppResult<ApiResponse<NgoRating>> {
    ensure_admin(user)?;
    if !(1.0..=5.0).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".into(),
        ));
    }

    let rating = state.store.write(|c| {
        let ngo = c.user(payload.ngo_id).ok_or(AppError::NotFound)?;
        if ngo.role != Role::Ngo {
            return Err(AppError::BadRequest("User is not an NGO".into()));
        }
        let donation = c
            .donations
            .iter()
            .find(|d| d.id == payload.donation_id)
            .ok_or(AppError::NotFound)?;
        if donation.status != FulfillmentStatus::Completed {
            return Err(AppError::BadRequest(
                "Only completed donations can be rated".into(),
            ));
        }

        let rating = match c
            .ngo_ratings
            .iter_mut()
            .find(|r| r.ngo_id == payload.ngo_id && r.donation_id == payload.donation_id)
        {
            Some(existing) => {
                existing.rating = payload.rating;
                existing.clone()
            }
            None => {
                let rating = NgoRating {
                    id: Uuid::new_v4(),
                    ngo_id: payload.ngo_id,
                    donation_id: payload.donation_id,
                    rating: payload.rating,
                    created_at: Utc::now(),
                };
                c.ngo_ratings.push(rating.clone());
                rating
            }
        };

        let scores: Vec<f64> = c
            .ngo_ratings
            .iter()
            .filter(|r| r.ngo_id == payload.ngo_id)
            .map(|r| r.rating)
            .collect();
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        if let Some(ngo) = c.user_mut(payload.ngo_id) {
            // One decimal place, as displayed.
            ngo.rating = Some((mean * 10.0).round() / 10.0);
        }

        Ok(rating)
    })?;

    Ok(ApiResponse::success(
        "NGO rated",
        rating,
        Some(Meta::empty()),
    ))
}

pub fn list_ratings(
    state: &AppState,
    user: &AuthUser,
    ngo_id: Option<Uuid>,
) -> AppResult<ApiResponse<RatingList>> {
    ensure_admin(user)?;
    let items = state.store.read(|c| {
        c.ngo_ratings
            .iter()
            .filter(|r| ngo_id.is_none_or(|id| r.ngo_id == id))
            .cloned()
            .collect::<Vec<_>>()
    });
    let total = items.len() as i64;
    Ok(ApiResponse::success(
        "NGO ratings",
        RatingList { items },
        Some(Meta::new(1, total, total)),
    ))
}
