use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{DisposalRequest, Donation, FoodItem, FulfillmentStatus};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDonationRequest {
    pub food_item_id: Uuid,
}

/// Partial patch shared by donations and disposal requests (same shape,
/// same state machine). Status changes are validated against the current
/// state; anything else is merged as-is.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct FulfillmentPatch {
    pub status: Option<FulfillmentStatus>,
    pub ngo_id: Option<Uuid>,
    pub pickup_date: Option<NaiveDate>,
    pub pickup_time: Option<String>,
    pub pickup_location: Option<String>,
    pub pickup_notes: Option<String>,
}

/// Donation with its food item joined in, matching the read model: rows
/// whose item has been deleted never reach this type.
#[derive(Debug, Serialize, ToSchema)]
pub struct DonationWithItem {
    #[serde(flatten)]
    pub donation: Donation,
    pub food_item: FoodItem,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DonationList {
    pub items: Vec<DonationWithItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DisposalWithItem {
    #[serde(flatten)]
    pub request: DisposalRequest,
    pub food_item: FoodItem,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DisposalList {
    pub items: Vec<DisposalWithItem>,
}
