use serde::Serialize;
use utoipa::ToSchema;

use crate::models::FoodItem;

#[derive(Debug, Serialize, ToSchema)]
pub struct Recommendations {
    pub ml_available: bool,
    /// ML forecasts expiry within 3 days; eat these first.
    pub consume_soon: Vec<FoodItem>,
    /// ML recommends donating (probability >= 0.45 or explicit flag).
    pub donate_now: Vec<FoodItem>,
    /// Allowed into the create-donation picker (probability >= 0.40).
    pub available_for_donation: Vec<FoodItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MlHealth {
    pub available: bool,
}
