pub mod analytics;
pub mod auth;
pub mod donations;
pub mod food_items;
pub mod notifications;
pub mod ratings;
pub mod recommendations;
pub mod reports;
pub mod rewards;
