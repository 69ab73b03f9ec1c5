use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{RedemptionStatus, RewardRedemption};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RedeemRequest {
    pub points_used: i64,
    pub reward_type: String,
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RedemptionPatch {
    pub status: RedemptionStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RedemptionList {
    pub items: Vec<RewardRedemption>,
}
