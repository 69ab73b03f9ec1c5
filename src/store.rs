//! Record store: nine named collections held in memory behind one lock and
//! mirrored to a JSON file store on every mutation. Collection keys are
//! fixed; renaming one orphans existing data, there is no migration path.

use std::io;
use std::path::Path;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Analytics, CompletionReport, DisposalRequest, Donation, FoodItem, NgoRating, Notification,
    RewardRedemption, Role, User,
};
use crate::services::auth_service::hash_password;

mod keys {
    pub const USERS: &str = "users";
    pub const FOOD_ITEMS: &str = "food_items";
    pub const DONATIONS: &str = "donations";
    pub const NOTIFICATIONS: &str = "notifications";
    pub const ANALYTICS: &str = "analytics";
    pub const COMPLETION_REPORTS: &str = "completion_reports";
    pub const DISPOSAL_REQUESTS: &str = "disposal_requests";
    pub const REWARD_REDEMPTIONS: &str = "reward_redemptions";
    pub const NGO_RATINGS: &str = "ngo_ratings";
}

#[derive(Debug, Default, Clone)]
pub struct Collections {
    pub users: Vec<User>,
    pub food_items: Vec<FoodItem>,
    pub donations: Vec<Donation>,
    pub notifications: Vec<Notification>,
    pub analytics: Vec<Analytics>,
    pub completion_reports: Vec<CompletionReport>,
    pub disposal_requests: Vec<DisposalRequest>,
    pub reward_redemptions: Vec<RewardRedemption>,
    pub ngo_ratings: Vec<NgoRating>,
}

impl Collections {
    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn food_item(&self, id: Uuid) -> Option<&FoodItem> {
        self.food_items.iter().find(|i| i.id == id)
    }

    pub fn food_item_mut(&mut self, id: Uuid) -> Option<&mut FoodItem> {
        self.food_items.iter_mut().find(|i| i.id == id)
    }

    pub fn donation_mut(&mut self, id: Uuid) -> Option<&mut Donation> {
        self.donations.iter_mut().find(|d| d.id == id)
    }

    pub fn disposal_request_mut(&mut self, id: Uuid) -> Option<&mut DisposalRequest> {
        self.disposal_requests.iter_mut().find(|r| r.id == id)
    }
}

/// Shared handle to the datastore. Constructed once at startup and passed
/// by reference through [`crate::state::AppState`]; cloning is cheap.
#[derive(Clone)]
pub struct Store {
    inner: Arc<RwLock<Collections>>,
    disk: Option<jfs::Store>,
}

impl Store {
    /// Open the store backed by JSON files under `dir`, loading whatever is
    /// already there. Missing collections read as empty, not as errors.
    pub fn open<P: AsRef<Path>>(dir: P) -> anyhow::Result<Self> {
        let disk = jfs::Store::new(dir.as_ref())?;
        let collections = Collections {
            users: load(&disk, keys::USERS)?,
            food_items: load(&disk, keys::FOOD_ITEMS)?,
            donations: load(&disk, keys::DONATIONS)?,
            notifications: load(&disk, keys::NOTIFICATIONS)?,
            analytics: load(&disk, keys::ANALYTICS)?,
            completion_reports: load(&disk, keys::COMPLETION_REPORTS)?,
            disposal_requests: load(&disk, keys::DISPOSAL_REQUESTS)?,
            reward_redemptions: load(&disk, keys::REWARD_REDEMPTIONS)?,
            ngo_ratings: load(&disk, keys::NGO_RATINGS)?,
        };
        Ok(Self {
            inner: Arc::new(RwLock::new(collections)),
            disk: Some(disk),
        })
    }

    /// In-memory store without persistence, for tests.
    pub fn ephemeral() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collections::default())),
            disk: None,
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        f(&guard)
    }

    /// Run a mutation under the write lock and flush the result to disk.
    /// The lock makes every mutation an atomic read-modify-write, so two
    /// handlers cannot lose each other's updates.
    pub fn write<R>(&self, f: impl FnOnce(&mut Collections) -> AppResult<R>) -> AppResult<R> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let result = f(&mut guard)?;
        if let Some(disk) = &self.disk {
            persist(disk, &guard).map_err(AppError::Internal)?;
        }
        Ok(result)
    }

    /// Idempotent bootstrap: seeds the demo accounts only when the users
    /// collection is empty. Never overwrites existing data.
    pub fn initialize(&self) -> AppResult<bool> {
        self.write(|c| {
            if !c.users.is_empty() {
                return Ok(false);
            }
            c.users = seed_users()?;
            Ok(true)
        })
    }
}

fn load<T: DeserializeOwned + Default>(disk: &jfs::Store, key: &str) -> anyhow::Result<T> {
    match disk.get::<T>(key) {
        Ok(value) => Ok(value),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(T::default()),
        Err(err) => Err(err.into()),
    }
}

fn persist(disk: &jfs::Store, c: &Collections) -> anyhow::Result<()> {
    save(disk, &c.users, keys::USERS)?;
    save(disk, &c.food_items, keys::FOOD_ITEMS)?;
    save(disk, &c.donations, keys::DONATIONS)?;
    save(disk, &c.notifications, keys::NOTIFICATIONS)?;
    save(disk, &c.analytics, keys::ANALYTICS)?;
    save(disk, &c.completion_reports, keys::COMPLETION_REPORTS)?;
    save(disk, &c.disposal_requests, keys::DISPOSAL_REQUESTS)?;
    save(disk, &c.reward_redemptions, keys::REWARD_REDEMPTIONS)?;
    save(disk, &c.ngo_ratings, keys::NGO_RATINGS)?;
    Ok(())
}

fn save<T: Serialize + DeserializeOwned>(
    disk: &jfs::Store,
    value: &T,
    key: &str,
) -> anyhow::Result<()> {
    disk.save_with_id(value, key)?;
    Ok(())
}

fn seed_users() -> AppResult<Vec<User>> {
    let now = Utc::now();
    let mut users = Vec::new();

    let mut push = |email: &str,
                    password: &str,
                    name: &str,
                    role: Role,
                    restaurant_type: Option<&str>,
                    location: Option<&str>,
                    phone: Option<&str>|
     -> AppResult<()> {
        users.push(User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: hash_password(password)?,
            name: name.to_string(),
            role,
            restaurant_type: restaurant_type.map(str::to_string),
            location: location.map(str::to_string),
            phone: phone.map(str::to_string),
            rating: None,
            reward_points: (role == Role::Restaurant).then_some(0),
            created_at: now,
        });
        Ok(())
    };

    push(
        "admin@sharebite.com",
        "admin123",
        "Admin User",
        Role::Admin,
        None,
        None,
        None,
    )?;
    push(
        "ngo1@sharebite.com",
        "ngo123",
        "Food Rescue Foundation",
        Role::Ngo,
        None,
        Some("Downtown"),
        Some("+1234567890"),
    )?;
    push(
        "ngo2@sharebite.com",
        "ngo123",
        "Community Food Bank",
        Role::Ngo,
        None,
        Some("Uptown"),
        Some("+1234567891"),
    )?;
    push(
        "restaurant1@sharebite.com",
        "rest123",
        "Green Bistro",
        Role::Restaurant,
        Some("Fine Dining"),
        Some("Main Street"),
        Some("+1234567892"),
    )?;
    push(
        "restaurant2@sharebite.com",
        "rest123",
        "Quick Bites Cafe",
        Role::Restaurant,
        Some("Fast Food"),
        Some("Park Avenue"),
        Some("+1234567893"),
    )?;

    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_seeds_once() {
        let store = Store::ephemeral();
        assert!(store.initialize().unwrap());
        let seeded = store.read(|c| c.users.len());
        assert_eq!(seeded, 5);

        // Second run must not touch existing data.
        assert!(!store.initialize().unwrap());
        assert_eq!(store.read(|c| c.users.len()), 5);
    }

    #[test]
    fn seed_covers_all_roles() {
        let store = Store::ephemeral();
        store.initialize().unwrap();
        store.read(|c| {
            assert_eq!(c.users.iter().filter(|u| u.role == Role::Admin).count(), 1);
            assert_eq!(c.users.iter().filter(|u| u.role == Role::Ngo).count(), 2);
            assert_eq!(
                c.users.iter().filter(|u| u.role == Role::Restaurant).count(),
                2
            );
            // Restaurants start with a zeroed reward balance.
            assert!(
                c.users
                    .iter()
                    .filter(|u| u.role == Role::Restaurant)
                    .all(|u| u.reward_points == Some(0))
            );
        });
    }

    #[test]
    fn open_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store.initialize().unwrap();

        let reopened = Store::open(dir.path()).unwrap();
        assert_eq!(reopened.read(|c| c.users.len()), 5);
        // Bootstrap stays a no-op against persisted data.
        assert!(!reopened.initialize().unwrap());
    }

    #[test]
    fn missing_collections_read_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        assert!(store.read(|c| c.donations.is_empty()));
        assert!(store.read(|c| c.notifications.is_empty()));
    }
}
