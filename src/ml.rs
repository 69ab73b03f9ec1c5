//! Client for the external ML prediction service. Predictions are consumed,
//! never recomputed locally: every failure path degrades to `None`/`false`
//! so a missing collaborator can never take the API down.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::FoodItem;

pub const VALID_CATEGORIES: [&str; 10] = [
    "Fruits",
    "Vegetables",
    "Dairy",
    "Meat",
    "Bakery",
    "Grains",
    "Beverages",
    "Prepared Foods",
    "Frozen Foods",
    "Canned Goods",
];

pub const VALID_RESTAURANT_TYPES: [&str; 6] = [
    "Fast Food",
    "Fine Dining",
    "Cafe",
    "Buffet",
    "Food Truck",
    "Bakery",
];

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
const HEALTHY_STATUS: &str = "ML API is running";

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MlPrediction {
    pub expiration_days: Option<f64>,
    pub waste_risk: Option<f64>,
    pub waste_risk_level: Option<String>,
    pub should_donate: Option<bool>,
    pub donation_probability: Option<f64>,
    pub priority_score: Option<f64>,
    pub priority_level: Option<String>,
}

/// Request body for `/predict/all`. The service rejects unknown categories
/// and restaurant types, so fields are validated and defaulted up front.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionInput {
    pub category: String,
    pub restaurant_type: String,
    pub quantity: f64,
    pub purchase_date: String,
    pub expiry_date: String,
}

impl PredictionInput {
    pub fn for_item(item: &FoodItem, restaurant_type: Option<&str>) -> Self {
        let today = Utc::now().date_naive();
        Self {
            category: validate_category(&item.category).to_string(),
            restaurant_type: validate_restaurant_type(restaurant_type).to_string(),
            quantity: item.quantity.max(0.0),
            purchase_date: item
                .purchase_date
                .unwrap_or(today)
                .format("%Y-%m-%d")
                .to_string(),
            expiry_date: item.expiry_date.format("%Y-%m-%d").to_string(),
        }
    }
}

pub fn validate_category(category: &str) -> &str {
    if VALID_CATEGORIES.contains(&category) {
        category
    } else {
        "Fruits"
    }
}

pub fn validate_restaurant_type(restaurant_type: Option<&str>) -> &str {
    match restaurant_type {
        Some(rt) if VALID_RESTAURANT_TYPES.contains(&rt) => rt,
        _ => "Fast Food",
    }
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct PredictAllResponse {
    success: bool,
    predictions: Option<MlPrediction>,
}

#[derive(Clone)]
pub struct MlClient {
    http: reqwest::Client,
    base_url: String,
}

impl MlClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http.get(&url).send().await {
            Ok(resp) => match resp.json::<HealthResponse>().await {
                Ok(body) => body.status == HEALTHY_STATUS,
                Err(_) => false,
            },
            Err(err) => {
                tracing::debug!(error = %err, "ML health probe failed");
                false
            }
        }
    }

    pub async fn predict_all(&self, input: &PredictionInput) -> Option<MlPrediction> {
        let url = format!("{}/predict/all", self.base_url);
        let resp = match self.http.post(&url).json(input).send().await {
            Ok(resp) => resp,
            Err(err) => {
                tracing::debug!(error = %err, "ML prediction request failed");
                return None;
            }
        };
        if !resp.status().is_success() {
            return None;
        }
        match resp.json::<PredictAllResponse>().await {
            Ok(body) if body.success => body.predictions,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_defaults() {
        assert_eq!(validate_category("Dairy"), "Dairy");
        assert_eq!(validate_category("Sushi"), "Fruits");
        assert_eq!(validate_category(""), "Fruits");
    }

    #[test]
    fn unknown_restaurant_type_defaults() {
        assert_eq!(validate_restaurant_type(Some("Buffet")), "Buffet");
        assert_eq!(validate_restaurant_type(Some("Ghost Kitchen")), "Fast Food");
        assert_eq!(validate_restaurant_type(None), "Fast Food");
    }
}
