use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::NgoRating;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RateNgoRequest {
    pub ngo_id: Uuid,
    pub donation_id: Uuid,
    pub rating: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RatingList {
    pub items: Vec<NgoRating>,
}
