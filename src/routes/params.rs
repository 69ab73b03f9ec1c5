use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::FulfillmentStatus;

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct FoodItemQuery {
    /// Admin-only filter; restaurants are always scoped to themselves.
    pub restaurant_id: Option<Uuid>,
}

/// Filters are ANDed when several are supplied together.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct FulfillmentQuery {
    pub status: Option<FulfillmentStatus>,
    pub restaurant_id: Option<Uuid>,
    pub ngo_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct RatingQuery {
    pub ngo_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
pub struct ReportQuery {
    pub donation_id: Option<Uuid>,
}
