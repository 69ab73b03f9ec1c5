use axum::{Router, routing::get};

use crate::state::AppState;

pub mod analytics;
pub mod auth;
pub mod disposal;
pub mod doc;
pub mod donations;
pub mod food_items;
pub mod health;
pub mod notifications;
pub mod params;
pub mod ratings;
pub mod recommendations;
pub mod reports;
pub mod rewards;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/food-items", food_items::router())
        .nest("/donations", donations::router())
        .nest("/disposal-requests", disposal::router())
        .nest("/notifications", notifications::router())
        .nest("/analytics", analytics::router())
        .nest("/ngo-ratings", ratings::router())
        .nest("/redemptions", rewards::router())
        .nest("/reports", reports::router())
        .nest("/recommendations", recommendations::router())
        .route("/ml/health", get(recommendations::ml_health))
}
