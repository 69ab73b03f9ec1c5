//! Rule-based filter over externally supplied ML predictions. The filter
//! never derives its own risk score from expiry or quantity: when the ML
//! service is unavailable or an item has no prediction, the item is left
//! out rather than guessed at.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::ml::MlPrediction;
use crate::models::{FoodItem, FoodStatus};

/// Probability bar for showing an item as a donation recommendation.
const RECOMMEND_THRESHOLD: f64 = 0.45;
/// Looser bar for offering an item in the create-donation picker.
/// Intentionally distinct from the recommendation bar.
const ELIGIBLE_THRESHOLD: f64 = 0.40;

const CONSUME_WITHIN_DAYS: f64 = 3.0;

fn is_open(item: &FoodItem) -> bool {
    matches!(item.status, FoodStatus::Active | FoodStatus::ExpiringSoon)
}

/// Items to consume soon, per the ML expiration forecast.
pub fn consumption_candidates<'a>(
    items: &'a [FoodItem],
    predictions: &HashMap<Uuid, MlPrediction>,
    ml_available: bool,
) -> Vec<&'a FoodItem> {
    if !ml_available {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| is_open(item))
        .filter(|item| {
            predictions
                .get(&item.id)
                .and_then(|p| p.expiration_days)
                .is_some_and(|days| (0.0..=CONSUME_WITHIN_DAYS).contains(&days))
        })
        .collect()
}

/// Items worth donating, per the ML donation forecast.
pub fn donation_candidates<'a>(
    items: &'a [FoodItem],
    predictions: &HashMap<Uuid, MlPrediction>,
    ml_available: bool,
    already_donated: &HashSet<Uuid>,
) -> Vec<&'a FoodItem> {
    filter_donatable(
        items,
        predictions,
        ml_available,
        already_donated,
        RECOMMEND_THRESHOLD,
    )
}

/// Items allowed into the create-donation picker. Same rules as
/// [`donation_candidates`] but with the looser probability bar.
pub fn donation_eligible<'a>(
    items: &'a [FoodItem],
    predictions: &HashMap<Uuid, MlPrediction>,
    ml_available: bool,
    already_donated: &HashSet<Uuid>,
) -> Vec<&'a FoodItem> {
    filter_donatable(
        items,
        predictions,
        ml_available,
        already_donated,
        ELIGIBLE_THRESHOLD,
    )
}

fn filter_donatable<'a>(
    items: &'a [FoodItem],
    predictions: &HashMap<Uuid, MlPrediction>,
    ml_available: bool,
    already_donated: &HashSet<Uuid>,
    threshold: f64,
) -> Vec<&'a FoodItem> {
    if !ml_available {
        return Vec::new();
    }
    items
        .iter()
        .filter(|item| is_open(item))
        .filter(|item| !already_donated.contains(&item.id))
        .filter(|item| {
            let Some(prediction) = predictions.get(&item.id) else {
                return false;
            };
            prediction.should_donate == Some(true)
                || prediction
                    .donation_probability
                    .is_some_and(|p| p >= threshold)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(status: FoodStatus) -> FoodItem {
        let now = Utc::now();
        FoodItem {
            id: Uuid::new_v4(),
            restaurant_id: Uuid::new_v4(),
            name: "Bread".into(),
            category: "Bakery".into(),
            quantity: 4.0,
            purchase_date: None,
            expiry_date: now.date_naive(),
            status,
            priority_score: 70,
            photo_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn prediction_with(days: Option<f64>, donate: Option<bool>, prob: Option<f64>) -> MlPrediction {
        MlPrediction {
            expiration_days: days,
            should_donate: donate,
            donation_probability: prob,
            ..Default::default()
        }
    }

    #[test]
    fn everything_empty_without_ml() {
        let items = vec![item(FoodStatus::ExpiringSoon)];
        let mut predictions = HashMap::new();
        predictions.insert(items[0].id, prediction_with(Some(1.0), Some(true), Some(0.9)));
        let none = HashSet::new();

        assert!(consumption_candidates(&items, &predictions, false).is_empty());
        assert!(donation_candidates(&items, &predictions, false, &none).is_empty());
        assert!(donation_eligible(&items, &predictions, false, &none).is_empty());
    }

    #[test]
    fn item_without_prediction_is_excluded() {
        let items = vec![item(FoodStatus::Active)];
        let predictions = HashMap::new();
        let none = HashSet::new();

        assert!(consumption_candidates(&items, &predictions, true).is_empty());
        assert!(donation_candidates(&items, &predictions, true, &none).is_empty());
        assert!(donation_eligible(&items, &predictions, true, &none).is_empty());
    }

    #[test]
    fn consumption_uses_ml_expiration_window() {
        let items = vec![
            item(FoodStatus::Active),
            item(FoodStatus::Active),
            item(FoodStatus::Active),
        ];
        let mut predictions = HashMap::new();
        predictions.insert(items[0].id, prediction_with(Some(0.0), None, None));
        predictions.insert(items[1].id, prediction_with(Some(3.0), None, None));
        predictions.insert(items[2].id, prediction_with(Some(4.0), None, None));

        let picked = consumption_candidates(&items, &predictions, true);
        assert_eq!(picked.len(), 2);
        assert!(picked.iter().all(|i| i.id != items[2].id));
    }

    #[test]
    fn closed_statuses_never_qualify() {
        let items = vec![
            item(FoodStatus::Consumed),
            item(FoodStatus::Donated),
            item(FoodStatus::Expired),
        ];
        let mut predictions = HashMap::new();
        for it in &items {
            predictions.insert(it.id, prediction_with(Some(1.0), Some(true), Some(0.99)));
        }
        let none = HashSet::new();

        assert!(consumption_candidates(&items, &predictions, true).is_empty());
        assert!(donation_candidates(&items, &predictions, true, &none).is_empty());
    }

    #[test]
    fn donation_thresholds_diverge() {
        let items = vec![item(FoodStatus::ExpiringSoon)];
        let mut predictions = HashMap::new();
        // Sits between the two bars: eligible for creation, not recommended.
        predictions.insert(items[0].id, prediction_with(None, Some(false), Some(0.42)));
        let none = HashSet::new();

        assert!(donation_candidates(&items, &predictions, true, &none).is_empty());
        assert_eq!(donation_eligible(&items, &predictions, true, &none).len(), 1);
    }

    #[test]
    fn should_donate_flag_overrides_probability() {
        let items = vec![item(FoodStatus::Active)];
        let mut predictions = HashMap::new();
        predictions.insert(items[0].id, prediction_with(None, Some(true), Some(0.01)));
        let none = HashSet::new();

        assert_eq!(donation_candidates(&items, &predictions, true, &none).len(), 1);
    }

    #[test]
    fn already_donated_items_are_skipped() {
        let items = vec![item(FoodStatus::Active)];
        let mut predictions = HashMap::new();
        predictions.insert(items[0].id, prediction_with(None, Some(true), Some(0.9)));
        let donated: HashSet<Uuid> = [items[0].id].into();

        assert!(donation_candidates(&items, &predictions, true, &donated).is_empty());
        assert!(donation_eligible(&items, &predictions, true, &donated).is_empty());
    }
}
