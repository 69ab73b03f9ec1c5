pub mod analytics_service;
pub mod auth_service;
pub mod disposal_service;
pub mod donation_service;
pub mod food_service;
pub mod notification_service;
pub mod rating_service;
pub mod recommendation_service;
pub mod report_service;
pub mod reward_service;
