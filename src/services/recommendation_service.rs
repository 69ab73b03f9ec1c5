use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::{
    dto::recommendations::{MlHealth, Recommendations},
    error::AppResult,
    middleware::auth::{AuthUser, ensure_role},
    ml::{MlPrediction, PredictionInput},
    models::{FulfillmentStatus, Role},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn ml_health(state: &AppState) -> AppResult<ApiResponse<MlHealth>> {
    let available = state.ml.health().await;
    Ok(ApiResponse::success(
        "ML service status",
        MlHealth { available },
        Some(Meta::empty()),
    ))
}

/// Run the restaurant's open inventory through the ML service and bucket it
/// into consume-soon, donate-now, and donation-eligible lists. A dead ML
/// service yields empty lists with `ml_available: false`, never an error.
pub async fn get_recommendations(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<Recommendations>> {
    ensure_role(user, Role::Restaurant)?;

    let (items, restaurant_type, already_donated) = state.store.read(|c| {
        let items = c
            .food_items
            .iter()
            .filter(|i| i.restaurant_id == user.user_id)
            .cloned()
            .collect::<Vec<_>>();
        let restaurant_type = c
            .user(user.user_id)
            .and_then(|u| u.restaurant_type.clone());
        let already_donated = c
            .donations
            .iter()
            .filter(|d| d.status != FulfillmentStatus::Rejected)
            .map(|d| d.food_item_id)
            .collect::<HashSet<_>>();
        (items, restaurant_type, already_donated)
    });

    let ml_available = state.ml.health().await;
    let mut predictions: HashMap<Uuid, MlPrediction> = HashMap::new();
    if ml_available {
        for item in &items {
            let input = PredictionInput::for_item(item, restaurant_type.as_deref());
            if let Some(prediction) = state.ml.predict_all(&input).await {
                predictions.insert(item.id, prediction);
            }
        }
    }

    let data = Recommendations {
        ml_available,
        consume_soon: crate::recommend::consumption_candidates(&items, &predictions, ml_available)
            .into_iter()
            .cloned()
            .collect(),
        donate_now: crate::recommend::donation_candidates(
            &items,
            &predictions,
            ml_available,
            &already_donated,
        )
        .into_iter()
        .cloned()
        .collect(),
        available_for_donation: crate::recommend::donation_eligible(
            &items,
            &predictions,
            ml_available,
            &already_donated,
        )
        .into_iter()
        .cloned()
        .collect(),
    };

    Ok(ApiResponse::success(
        "Recommendations",
        data,
        Some(Meta::empty()),
    ))
}
