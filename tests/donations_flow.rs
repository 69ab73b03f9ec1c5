use chrono::{Days, Utc};
use uuid::Uuid;

use sharebite_api::{
    dto::{
        donations::{CreateDonationRequest, FulfillmentPatch},
        food_items::{CreateFoodItemRequest, FoodItemPatch},
        ratings::RateNgoRequest,
        reports::CreateReportRequest,
        rewards::{RedeemRequest, RedemptionPatch},
    },
    error::AppError,
    middleware::auth::AuthUser,
    models::{FoodStatus, FulfillmentStatus, RedemptionStatus, Role},
    routes::params::FulfillmentQuery,
    services::{
        analytics_service, donation_service, disposal_service, food_service,
        notification_service, rating_service, report_service, reward_service,
    },
    state::AppState,
};

fn seeded_state() -> AppState {
    let state = AppState::ephemeral();
    assert!(state.store.initialize().expect("seed"));
    state
}

fn auth(state: &AppState, email: &str) -> AuthUser {
    state
        .store
        .read(|c| {
            c.users
                .iter()
                .find(|u| u.email == email)
                .map(|u| AuthUser {
                    user_id: u.id,
                    role: u.role,
                })
        })
        .expect("seeded user")
}

fn create_item(state: &AppState, owner: &AuthUser, name: &str, qty: f64, days: u64) -> Uuid {
    let expiry_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(days))
        .expect("date in range");
    let resp = food_service::create_food_item(
        state,
        owner,
        CreateFoodItemRequest {
            name: name.into(),
            category: "Bakery".into(),
            quantity: qty,
            purchase_date: None,
            expiry_date,
            photo_url: None,
        },
    )
    .expect("create item");
    resp.data.expect("item").id
}

// Full lifecycle: restaurant lists an item, NGO accepts and completes the
// pickup, impact and reward counters land on both sides.
#[test]
fn donation_lifecycle_updates_analytics_and_rewards() {
    let state = seeded_state();
    let restaurant = auth(&state, "restaurant1@sharebite.com");
    let ngo = auth(&state, "ngo1@sharebite.com");

    let item_id = create_item(&state, &restaurant, "Sourdough", 5.0, 2);

    // Near-expiry item warns its owner on creation.
    let notes = notification_service::list_notifications(&state, &restaurant)
        .expect("notifications")
        .data
        .expect("list");
    assert!(notes.items.iter().any(|n| n.title == "Item Expiring Soon"));

    let donation = donation_service::create_donation(
        &state,
        &restaurant,
        CreateDonationRequest {
            food_item_id: item_id,
        },
    )
    .expect("create donation")
    .data
    .expect("donation");
    assert_eq!(donation.status, FulfillmentStatus::Pending);

    // Listing flips the item out of the inventory pool.
    let item = food_service::get_food_item(&state, item_id)
        .expect("get item")
        .data
        .expect("item");
    assert_eq!(item.status, FoodStatus::Donated);

    // Both seeded NGOs hear about it.
    let ngo_notes = notification_service::list_notifications(&state, &ngo)
        .expect("notifications")
        .data
        .expect("list");
    assert!(
        ngo_notes
            .items
            .iter()
            .any(|n| n.title == "New Donation Available")
    );

    let accepted = donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Accepted),
            ..Default::default()
        },
    )
    .expect("accept")
    .data
    .expect("donation");
    assert_eq!(accepted.ngo_id, Some(ngo.user_id));

    let rest_notes = notification_service::list_notifications(&state, &restaurant)
        .expect("notifications")
        .data
        .expect("list");
    assert!(
        rest_notes
            .items
            .iter()
            .any(|n| n.title == "Donation Accepted")
    );

    donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Completed),
            ..Default::default()
        },
    )
    .expect("complete");

    // 5kg: waste +5, carbon +12.5, 50 reward points for the restaurant.
    let rest_row = analytics_service::get_analytics(&state, &restaurant)
        .expect("analytics")
        .data
        .expect("row");
    assert_eq!(rest_row.donations_made, 1);
    assert!((rest_row.waste_saved - 5.0).abs() < 1e-9);
    assert!((rest_row.carbon_footprint_reduced - 12.5).abs() < 1e-9);

    let points = state
        .store
        .read(|c| c.user(restaurant.user_id).and_then(|u| u.reward_points));
    assert_eq!(points, Some(50));

    // NGO side: 10 meals from 5kg, people re-derived as floor(10 / 3).
    let ngo_row = analytics_service::get_analytics(&state, &ngo)
        .expect("analytics")
        .data
        .expect("row");
    assert_eq!(ngo_row.donations_received, Some(1));
    assert!((ngo_row.meals_provided.unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(ngo_row.people_served, Some(3));
}

#[test]
fn out_of_order_transitions_are_rejected() {
    let state = seeded_state();
    let restaurant = auth(&state, "restaurant1@sharebite.com");
    let ngo = auth(&state, "ngo1@sharebite.com");

    let item_id = create_item(&state, &restaurant, "Soup", 3.0, 5);
    let donation = donation_service::create_donation(
        &state,
        &restaurant,
        CreateDonationRequest {
            food_item_id: item_id,
        },
    )
    .expect("create donation")
    .data
    .expect("donation");

    // pending -> completed skips acceptance.
    let err = donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Completed),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Accepted),
            ..Default::default()
        },
    )
    .expect("accept");

    // accepted -> rejected is not a legal edge either.
    let err = donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Rejected),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // The failed transitions changed nothing.
    let status = state
        .store
        .read(|c| c.donations.iter().find(|d| d.id == donation.id).map(|d| d.status));
    assert_eq!(status, Some(FulfillmentStatus::Accepted));
}

#[test]
fn deleting_the_item_hides_its_donation() {
    let state = seeded_state();
    let restaurant = auth(&state, "restaurant1@sharebite.com");
    let ngo = auth(&state, "ngo1@sharebite.com");

    let item_id = create_item(&state, &restaurant, "Pasta", 2.0, 5);
    let donation = donation_service::create_donation(
        &state,
        &restaurant,
        CreateDonationRequest {
            food_item_id: item_id,
        },
    )
    .expect("create donation")
    .data
    .expect("donation");

    food_service::delete_food_item(&state, &restaurant, item_id).expect("delete");

    // The row still exists on disk but no read surfaces it.
    let listed =
        donation_service::list_donations(&state, &restaurant, &FulfillmentQuery::default())
            .expect("list")
            .data
            .expect("list");
    assert!(listed.items.is_empty());

    let available = donation_service::available_donations(&state)
        .expect("available")
        .data
        .expect("list");
    assert!(available.items.iter().all(|d| d.donation.id != donation.id));

    // Updates against the orphan fail rather than half-applying.
    let err = donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Accepted),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[test]
fn marking_consumed_feeds_consumption_analytics_once() {
    let state = seeded_state();
    let restaurant = auth(&state, "restaurant2@sharebite.com");

    let item_id = create_item(&state, &restaurant, "Rice", 4.0, 10);
    let patch = FoodItemPatch {
        status: Some(FoodStatus::Consumed),
        ..Default::default()
    };
    food_service::update_food_item(&state, &restaurant, item_id, patch).expect("consume");

    // A second identical patch must not double-count.
    let patch = FoodItemPatch {
        status: Some(FoodStatus::Consumed),
        ..Default::default()
    };
    food_service::update_food_item(&state, &restaurant, item_id, patch).expect("re-patch");

    let row = analytics_service::get_analytics(&state, &restaurant)
        .expect("analytics")
        .data
        .expect("row");
    assert_eq!(row.items_consumed, 1);
    assert!((row.waste_saved - 4.0).abs() < 1e-9);
    assert!((row.carbon_footprint_reduced - 10.0).abs() < 1e-9);
}

#[test]
fn disposal_requests_mirror_donations_without_analytics() {
    let state = seeded_state();
    let restaurant = auth(&state, "restaurant1@sharebite.com");
    let ngo = auth(&state, "ngo2@sharebite.com");

    let item_id = create_item(&state, &restaurant, "Old Stew", 2.0, 1);
    let request = disposal_service::create_disposal_request(
        &state,
        &restaurant,
        CreateDonationRequest {
            food_item_id: item_id,
        },
    )
    .expect("create request")
    .data
    .expect("request");
    assert_eq!(request.status, FulfillmentStatus::Pending);

    // The item leaves the inventory pool just like a donated one.
    let item = food_service::get_food_item(&state, item_id)
        .expect("get item")
        .data
        .expect("item");
    assert_eq!(item.status, FoodStatus::Donated);

    // One open request per item.
    let err = disposal_service::create_disposal_request(
        &state,
        &restaurant,
        CreateDonationRequest {
            food_item_id: item_id,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    // Pending requests show up in the platform-wide browse view.
    let available = disposal_service::available_disposal_requests(&state)
        .expect("available")
        .data
        .expect("list");
    assert!(available.items.iter().any(|d| d.request.id == request.id));

    let accepted = disposal_service::update_disposal_request(
        &state,
        &ngo,
        request.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Accepted),
            ..Default::default()
        },
    )
    .expect("accept")
    .data
    .expect("request");
    assert_eq!(accepted.ngo_id, Some(ngo.user_id));

    // Accepted requests drop out of the browse view.
    let available = disposal_service::available_disposal_requests(&state)
        .expect("available")
        .data
        .expect("list");
    assert!(available.items.iter().all(|d| d.request.id != request.id));

    let rest_notes = notification_service::list_notifications(&state, &restaurant)
        .expect("notifications")
        .data
        .expect("list");
    assert!(
        rest_notes
            .items
            .iter()
            .any(|n| n.title == "Disposal Request Accepted")
    );

    // Disposal completion moves no analytics.
    disposal_service::update_disposal_request(
        &state,
        &ngo,
        request.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Completed),
            ..Default::default()
        },
    )
    .expect("complete");
    let row = analytics_service::get_analytics(&state, &restaurant)
        .expect("analytics")
        .data
        .expect("row");
    assert_eq!(row.donations_made, 0);
}

#[test]
fn completion_report_requires_completed_donation() {
    let state = seeded_state();
    let restaurant = auth(&state, "restaurant1@sharebite.com");
    let ngo = auth(&state, "ngo1@sharebite.com");

    let item_id = create_item(&state, &restaurant, "Bread", 6.0, 2);
    let donation = donation_service::create_donation(
        &state,
        &restaurant,
        CreateDonationRequest {
            food_item_id: item_id,
        },
    )
    .expect("create donation")
    .data
    .expect("donation");

    let report_for = |donation_id| CreateReportRequest {
        donation_id,
        completion_date: Utc::now().date_naive(),
        photo_url: "https://example.com/proof.jpg".into(),
        description: "Distributed at the shelter".into(),
        people_served: Some(20),
        location: Some("Downtown shelter".into()),
        additional_notes: None,
    };

    // Pending donation: the NGO has not even accepted it yet.
    let err = report_service::create_report(&state, &ngo, report_for(donation.id)).unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Accepted),
            ..Default::default()
        },
    )
    .expect("accept");
    let err = report_service::create_report(&state, &ngo, report_for(donation.id)).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Completed),
            ..Default::default()
        },
    )
    .expect("complete");
    report_service::create_report(&state, &ngo, report_for(donation.id)).expect("report");

    // One report per donation.
    let err = report_service::create_report(&state, &ngo, report_for(donation.id)).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let listed = report_service::list_reports(&state, &restaurant, None)
        .expect("list")
        .data
        .expect("list");
    assert_eq!(listed.items.len(), 1);

    // Certificate lookup: same list narrowed to one donation.
    let by_donation = report_service::list_reports(&state, &ngo, Some(donation.id))
        .expect("list")
        .data
        .expect("list");
    assert_eq!(by_donation.items.len(), 1);
}

#[test]
fn ngo_rating_upserts_and_averages() {
    let state = seeded_state();
    let admin = auth(&state, "admin@sharebite.com");
    let restaurant = auth(&state, "restaurant1@sharebite.com");
    let ngo = auth(&state, "ngo1@sharebite.com");

    let item_id = create_item(&state, &restaurant, "Muffins", 1.0, 2);
    let donation = donation_service::create_donation(
        &state,
        &restaurant,
        CreateDonationRequest {
            food_item_id: item_id,
        },
    )
    .expect("create donation")
    .data
    .expect("donation");

    // A donation that has not run to completion is not rateable.
    let err = rating_service::rate_ngo(
        &state,
        &admin,
        RateNgoRequest {
            ngo_id: ngo.user_id,
            donation_id: donation.id,
            rating: 4.0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Accepted),
            ..Default::default()
        },
    )
    .expect("accept");
    donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Completed),
            ..Default::default()
        },
    )
    .expect("complete");

    let err = rating_service::rate_ngo(
        &state,
        &admin,
        RateNgoRequest {
            ngo_id: ngo.user_id,
            donation_id: donation.id,
            rating: 5.5,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    rating_service::rate_ngo(
        &state,
        &admin,
        RateNgoRequest {
            ngo_id: ngo.user_id,
            donation_id: donation.id,
            rating: 4.0,
        },
    )
    .expect("rate");

    // Re-rating the same donation replaces the score instead of stacking.
    rating_service::rate_ngo(
        &state,
        &admin,
        RateNgoRequest {
            ngo_id: ngo.user_id,
            donation_id: donation.id,
            rating: 5.0,
        },
    )
    .expect("re-rate");

    let listed = rating_service::list_ratings(&state, &admin, Some(ngo.user_id))
        .expect("list")
        .data
        .expect("list");
    assert_eq!(listed.items.len(), 1);
    assert!((listed.items[0].rating - 5.0).abs() < 1e-9);

    let displayed = state.store.read(|c| c.user(ngo.user_id).and_then(|u| u.rating));
    assert_eq!(displayed, Some(5.0));

    // Non-admins cannot rate.
    let err = rating_service::rate_ngo(
        &state,
        &restaurant,
        RateNgoRequest {
            ngo_id: ngo.user_id,
            donation_id: donation.id,
            rating: 1.0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

#[test]
fn rejected_redemption_refunds_points() {
    let state = seeded_state();
    let admin = auth(&state, "admin@sharebite.com");
    let restaurant = auth(&state, "restaurant1@sharebite.com");

    // Give the restaurant a balance to spend.
    state
        .store
        .write(|c| {
            c.user_mut(restaurant.user_id).expect("user").reward_points = Some(50);
            Ok(())
        })
        .expect("grant points");

    let err = reward_service::redeem_points(
        &state,
        &restaurant,
        RedeemRequest {
            points_used: 100,
            reward_type: "discount".into(),
            description: "Supplier discount".into(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let redemption = reward_service::redeem_points(
        &state,
        &restaurant,
        RedeemRequest {
            points_used: 30,
            reward_type: "discount".into(),
            description: "Supplier discount".into(),
        },
    )
    .expect("redeem")
    .data
    .expect("redemption");
    assert_eq!(redemption.status, RedemptionStatus::Pending);

    // Points come off the balance immediately.
    let balance = state
        .store
        .read(|c| c.user(restaurant.user_id).and_then(|u| u.reward_points));
    assert_eq!(balance, Some(20));

    reward_service::update_redemption(
        &state,
        &admin,
        redemption.id,
        RedemptionPatch {
            status: RedemptionStatus::Rejected,
        },
    )
    .expect("reject");

    let balance = state
        .store
        .read(|c| c.user(restaurant.user_id).and_then(|u| u.reward_points));
    assert_eq!(balance, Some(50));

    // A settled redemption cannot change state again.
    let err = reward_service::update_redemption(
        &state,
        &admin,
        redemption.id,
        RedemptionPatch {
            status: RedemptionStatus::Approved,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[test]
fn role_guards_hold_across_services() {
    let state = seeded_state();
    let restaurant = auth(&state, "restaurant1@sharebite.com");
    let ngo = auth(&state, "ngo1@sharebite.com");

    assert_eq!(restaurant.role, Role::Restaurant);
    assert_eq!(ngo.role, Role::Ngo);

    // NGOs cannot add inventory.
    let expiry_date = Utc::now()
        .date_naive()
        .checked_add_days(Days::new(5))
        .expect("date in range");
    let err = food_service::create_food_item(
        &state,
        &ngo,
        CreateFoodItemRequest {
            name: "Bread".into(),
            category: "Bakery".into(),
            quantity: 1.0,
            purchase_date: None,
            expiry_date,
            photo_url: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Restaurants cannot touch someone else's item.
    let other = auth(&state, "restaurant2@sharebite.com");
    let item_id = create_item(&state, &restaurant, "Cake", 1.0, 5);
    let err = food_service::delete_food_item(&state, &other, item_id).unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Fulfillment transitions are reserved for NGOs and admins.
    let donation = donation_service::create_donation(
        &state,
        &restaurant,
        CreateDonationRequest {
            food_item_id: item_id,
        },
    )
    .expect("create donation")
    .data
    .expect("donation");

    let accept = FulfillmentPatch {
        status: Some(FulfillmentStatus::Accepted),
        ..Default::default()
    };
    let err =
        donation_service::update_donation(&state, &other, donation.id, accept.clone()).unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
    let err = donation_service::update_donation(&state, &restaurant, donation.id, accept.clone())
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Only admins may reassign the NGO on a row.
    let err = donation_service::update_donation(
        &state,
        &ngo,
        donation.id,
        FulfillmentPatch {
            ngo_id: Some(ngo.user_id),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));

    // Completion belongs to the NGO that accepted, not any NGO.
    donation_service::update_donation(&state, &ngo, donation.id, accept).expect("accept");
    let bystander = auth(&state, "ngo2@sharebite.com");
    let err = donation_service::update_donation(
        &state,
        &bystander,
        donation.id,
        FulfillmentPatch {
            status: Some(FulfillmentStatus::Completed),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden));
}

// Items comfortably inside their shelf life stay quiet on creation.
#[test]
fn far_expiry_items_raise_no_warning() {
    let state = seeded_state();
    let restaurant = auth(&state, "restaurant1@sharebite.com");

    let item_id = create_item(&state, &restaurant, "Canned Beans", 3.0, 10);

    let item = food_service::get_food_item(&state, item_id)
        .expect("get item")
        .data
        .expect("item");
    assert_eq!(item.status, FoodStatus::Active);

    let notes = notification_service::list_notifications(&state, &restaurant)
        .expect("notifications")
        .data
        .expect("list");
    assert!(notes.items.iter().all(|n| n.title != "Item Expiring Soon"));
}
