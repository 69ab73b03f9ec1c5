use serde::Serialize;
use utoipa::ToSchema;

/// Admin-wide roll-up, summed over every user's analytics row at query
/// time. Nothing here is cached.
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct PlatformTotals {
    pub waste_saved: f64,
    pub donations_made: i64,
    pub items_consumed: i64,
    pub carbon_footprint_reduced: f64,
    pub donations_received: i64,
    pub meals_provided: f64,
    pub people_served: i64,
}
