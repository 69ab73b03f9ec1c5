use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        analytics::PlatformTotals,
        auth::{LoginResponse, UserList, UserProfile},
        donations::{DisposalList, DisposalWithItem, DonationList, DonationWithItem},
        food_items::FoodItemList,
        notifications::{NotificationList, UnreadCount},
        ratings::RatingList,
        recommendations::{MlHealth, Recommendations},
        reports::ReportList,
        rewards::RedemptionList,
    },
    ml::MlPrediction,
    models::{
        Analytics, CompletionReport, DisposalRequest, Donation, FoodItem, NgoRating, Notification,
        RewardRedemption, User,
    },
    response::{ApiResponse, Meta},
    routes::{
        analytics, auth, disposal, donations, food_items, health, notifications, params, ratings,
        recommendations, reports, rewards,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::list_users,
        food_items::list_food_items,
        food_items::create_food_item,
        food_items::get_food_item,
        food_items::update_food_item,
        food_items::delete_food_item,
        donations::list_donations,
        donations::available_donations,
        donations::create_donation,
        donations::update_donation,
        disposal::list_disposal_requests,
        disposal::available_disposal_requests,
        disposal::create_disposal_request,
        disposal::update_disposal_request,
        notifications::list_notifications,
        notifications::unread_count,
        notifications::mark_read,
        notifications::mark_all_read,
        analytics::get_analytics,
        analytics::platform_totals,
        ratings::rate_ngo,
        ratings::list_ratings,
        rewards::redeem_points,
        rewards::list_redemptions,
        rewards::update_redemption,
        reports::create_report,
        reports::list_reports,
        recommendations::get_recommendations,
        recommendations::ml_health
    ),
    components(
        schemas(
            User,
            UserProfile,
            UserList,
            LoginResponse,
            FoodItem,
            FoodItemList,
            Donation,
            DonationWithItem,
            DonationList,
            DisposalRequest,
            DisposalWithItem,
            DisposalList,
            Notification,
            NotificationList,
            UnreadCount,
            Analytics,
            PlatformTotals,
            NgoRating,
            RatingList,
            RewardRedemption,
            RedemptionList,
            CompletionReport,
            ReportList,
            MlPrediction,
            Recommendations,
            MlHealth,
            params::FoodItemQuery,
            params::FulfillmentQuery,
            params::RatingQuery,
            params::ReportQuery,
            Meta,
            ApiResponse<FoodItem>,
            ApiResponse<FoodItemList>,
            ApiResponse<DonationList>,
            ApiResponse<DisposalList>,
            ApiResponse<Analytics>,
            ApiResponse<Recommendations>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Food Items", description = "Inventory endpoints"),
        (name = "Donations", description = "Donation endpoints"),
        (name = "Disposal", description = "Disposal request endpoints"),
        (name = "Notifications", description = "Notification endpoints"),
        (name = "Analytics", description = "Analytics endpoints"),
        (name = "Ratings", description = "NGO rating endpoints"),
        (name = "Rewards", description = "Reward redemption endpoints"),
        (name = "Reports", description = "Completion report endpoints"),
        (name = "Recommendations", description = "ML recommendation endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
