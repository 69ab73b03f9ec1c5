use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Restaurant,
    Ngo,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FoodStatus {
    Active,
    ExpiringSoon,
    Expired,
    Consumed,
    Donated,
}

/// Shared lifecycle for donations and disposal requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    Pending,
    Accepted,
    Completed,
    Rejected,
}

impl FulfillmentStatus {
    /// `accepted`/`rejected` are reachable only from `pending`,
    /// `completed` only from `accepted`.
    pub fn can_transition(self, next: FulfillmentStatus) -> bool {
        use FulfillmentStatus::*;
        matches!(
            (self, next),
            (Pending, Accepted) | (Pending, Rejected) | (Accepted, Completed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    Pending,
    Approved,
    Rejected,
}

impl RedemptionStatus {
    pub fn can_transition(self, next: RedemptionStatus) -> bool {
        use RedemptionStatus::*;
        matches!((self, next), (Pending, Approved) | (Pending, Rejected))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Expiry,
    Donation,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub restaurant_type: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    /// Mean of all ratings for this NGO, one decimal place.
    pub rating: Option<f64>,
    /// Restaurants only; credited on donation completion.
    pub reward_points: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FoodItem {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
    pub category: String,
    /// Kilograms.
    pub quantity: f64,
    pub purchase_date: Option<NaiveDate>,
    pub expiry_date: NaiveDate,
    pub status: FoodStatus,
    pub priority_score: u8,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Donation {
    pub id: Uuid,
    pub food_item_id: Uuid,
    pub restaurant_id: Uuid,
    pub ngo_id: Option<Uuid>,
    pub status: FulfillmentStatus,
    pub pickup_date: Option<NaiveDate>,
    pub pickup_time: Option<String>,
    pub pickup_location: Option<String>,
    pub pickup_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Same shape as [`Donation`] but for expired items headed to waste removal.
/// A distinct type so the two lifecycles cannot be mixed up.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DisposalRequest {
    pub id: Uuid,
    pub food_item_id: Uuid,
    pub restaurant_id: Uuid,
    pub ngo_id: Option<Uuid>,
    pub status: FulfillmentStatus,
    pub pickup_date: Option<NaiveDate>,
    pub pickup_time: Option<String>,
    pub pickup_location: Option<String>,
    pub pickup_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CompletionReport {
    pub id: Uuid,
    pub donation_id: Uuid,
    pub ngo_id: Uuid,
    pub restaurant_id: Uuid,
    pub completion_date: NaiveDate,
    pub photo_url: String,
    pub description: String,
    pub people_served: Option<i64>,
    pub location: Option<String>,
    pub additional_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NgoRating {
    pub id: Uuid,
    pub ngo_id: Uuid,
    pub donation_id: Uuid,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Analytics {
    pub user_id: Uuid,
    pub waste_saved: f64,
    pub donations_made: i64,
    pub items_consumed: i64,
    pub carbon_footprint_reduced: f64,
    // NGO-only counters; absent for restaurants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donations_received: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals_provided: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub people_served: Option<i64>,
    pub last_updated: DateTime<Utc>,
}

impl Analytics {
    pub fn zeroed(user_id: Uuid, role: Role) -> Self {
        let ngo = role == Role::Ngo;
        Self {
            user_id,
            waste_saved: 0.0,
            donations_made: 0,
            items_consumed: 0,
            carbon_footprint_reduced: 0.0,
            donations_received: ngo.then_some(0),
            meals_provided: ngo.then_some(0.0),
            people_served: ngo.then_some(0),
            last_updated: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RewardRedemption {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub points_used: i64,
    pub reward_type: String,
    pub description: String,
    pub status: RedemptionStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fulfillment_transitions() {
        use FulfillmentStatus::*;
        assert!(Pending.can_transition(Accepted));
        assert!(Pending.can_transition(Rejected));
        assert!(Accepted.can_transition(Completed));

        assert!(!Pending.can_transition(Completed));
        assert!(!Accepted.can_transition(Rejected));
        assert!(!Completed.can_transition(Accepted));
        assert!(!Rejected.can_transition(Pending));
    }

    #[test]
    fn redemption_transitions() {
        use RedemptionStatus::*;
        assert!(Pending.can_transition(Approved));
        assert!(Pending.can_transition(Rejected));
        assert!(!Approved.can_transition(Rejected));
        assert!(!Rejected.can_transition(Pending));
    }
}
