//! Derives a food item's lifecycle status and urgency score from its expiry
//! date and quantity. Pure date math; side effects stay in the services.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::FoodStatus;

const EXPIRING_SOON_WINDOW_DAYS: i64 = 3;

/// Whole days until the expiry date, counted against midnight UTC of the
/// expiry day and rounded up. Can report off-by-one near midnight
/// boundaries; accepted approximation.
pub fn days_until_expiry(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry_midnight = expiry.and_time(NaiveTime::MIN).and_utc();
    let secs = (expiry_midnight - now).num_seconds();
    secs.div_euclid(86_400) + i64::from(secs.rem_euclid(86_400) > 0)
}

pub fn status_for(expiry: NaiveDate, now: DateTime<Utc>) -> FoodStatus {
    let days = days_until_expiry(expiry, now);
    if days < 0 {
        FoodStatus::Expired
    } else if days <= EXPIRING_SOON_WINDOW_DAYS {
        FoodStatus::ExpiringSoon
    } else {
        FoodStatus::Active
    }
}

/// 0-100 urgency score: a 70-point expiry budget decaying 10 points per day
/// (full at day 0, gone by day 7) plus a bulk bonus of up to 30 points that
/// saturates at 300kg. Anything already expired pins at 100.
pub fn priority_score(expiry: NaiveDate, quantity: f64, now: DateTime<Utc>) -> u8 {
    let days = days_until_expiry(expiry, now);
    if days < 0 {
        return 100;
    }

    let base = (70 - days * 10).max(0) as f64;
    let bulk = (quantity / 10.0).min(30.0);

    (base + bulk).round().clamp(0.0, 100.0) as u8
}
