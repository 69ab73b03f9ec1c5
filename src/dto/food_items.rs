use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{FoodItem, FoodStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFoodItemRequest {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub purchase_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub photo_url: Option<String>,
}

/// Partial patch; status and priority are re-derived whenever the patch
/// touches `expiry_date` or `quantity`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FoodItemPatch {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<f64>,
    pub purchase_date: Option<NaiveDate>,
    pub expiry_date: Option<NaiveDate>,
    pub status: Option<FoodStatus>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FoodItemList {
    pub items: Vec<FoodItem>,
}
