//! Record store over the storage port
//!
//! The persisted user collection lives under a single key as one JSON
//! array. Every write goes through [`AccountStore::update_user`] or
//! [`AccountStore::save_users`]; there is no conflict detection, the
//! last writer wins.

use super::password::hash_password;
use crate::{PlatformError, PlatformResult};
use protrade_core::{BootstrapAccount, KeyValueStore, Role, UserRecord};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key holding the serialized user collection
pub const USERS_KEY: &str = "protrade_users";

/// The persisted collection of user accounts
#[derive(Clone)]
pub struct AccountStore {
    storage: Arc<dyn KeyValueStore>,
}

impl AccountStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Load the persisted collection.
    ///
    /// An absent or unparsable persisted value degrades to an empty
    /// collection with a diagnostic; it never surfaces as an error.
    pub fn load_users(&self) -> Vec<UserRecord> {
        let blob = match self.storage.get(USERS_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read user collection: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&blob) {
            Ok(users) => users,
            Err(e) => {
                warn!("Failed to parse user collection, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Serialize and persist the full collection, overwriting prior content
    pub fn save_users(&self, users: &[UserRecord]) -> PlatformResult<()> {
        let blob = serde_json::to_string(users)?;
        self.storage.set(USERS_KEY, &blob)?;
        debug!("Persisted {} user records", users.len());
        Ok(())
    }

    /// Insert the bootstrap accounts that are not already present.
    ///
    /// Idempotent: an admin account is only seeded while the collection
    /// has no admin record, and no account is ever inserted twice, so
    /// exactly one admin exists after initialization.
    pub fn seed_accounts(&self, accounts: &[BootstrapAccount]) -> PlatformResult<()> {
        let mut users = self.load_users();
        let mut changed = false;

        for account in accounts {
            if account.role == Role::Admin && users.iter().any(|u| u.is_admin()) {
                continue;
            }
            if users.iter().any(|u| u.national_id == account.national_id) {
                continue;
            }

            info!("Seeding bootstrap account: {}", account.national_id);
            users.push(UserRecord {
                national_id: account.national_id.clone(),
                name: account.name.clone(),
                email: account.email.clone(),
                password_hash: hash_password(&account.password)?,
                role: account.role,
                verified: account.verified,
                wallet: 0.0,
                portfolio: Vec::new(),
                deposits: Vec::new(),
                withdrawals: Vec::new(),
                kyc_files: Vec::new(),
                created_at: chrono::Utc::now(),
            });
            changed = true;
        }

        if changed {
            self.save_users(&users)?;
        }
        Ok(())
    }

    /// Find a record by its national id
    pub fn find_by_national_id(&self, national_id: &str) -> Option<UserRecord> {
        self.load_users()
            .into_iter()
            .find(|u| u.national_id == national_id)
    }

    /// Append a new record, rejecting a duplicate national id
    pub fn insert(&self, record: UserRecord) -> PlatformResult<()> {
        let mut users = self.load_users();

        if users.iter().any(|u| u.national_id == record.national_id) {
            return Err(PlatformError::validation(
                "This national id is already registered",
            ));
        }

        users.push(record);
        self.save_users(&users)
    }

    /// The mutation pipeline: load the full collection, replace the
    /// record whose id matches, persist, and return the updated
    /// collection for optional chaining by the caller.
    pub fn update_user(&self, updated: &UserRecord) -> PlatformResult<Vec<UserRecord>> {
        let users: Vec<UserRecord> = self
            .load_users()
            .into_iter()
            .map(|u| {
                if u.national_id == updated.national_id {
                    updated.clone()
                } else {
                    u
                }
            })
            .collect();

        self.save_users(&users)?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protrade_core::{MemoryStore, PlatformConfig};

    fn store() -> AccountStore {
        AccountStore::new(Arc::new(MemoryStore::new()))
    }

    fn bootstrap_accounts() -> Vec<BootstrapAccount> {
        PlatformConfig::default().bootstrap.accounts
    }

    fn sample_user(national_id: &str) -> UserRecord {
        UserRecord {
            national_id: national_id.to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            password_hash: hash_password("password123").unwrap(),
            role: Role::User,
            verified: false,
            wallet: 0.0,
            portfolio: Vec::new(),
            deposits: Vec::new(),
            withdrawals: Vec::new(),
            kyc_files: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_empty_store_loads_empty() {
        assert!(store().load_users().is_empty());
    }

    #[test]
    fn test_corrupt_blob_degrades_to_empty() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(USERS_KEY, "not json").unwrap();

        let accounts = AccountStore::new(storage);
        assert!(accounts.load_users().is_empty());
    }

    #[test]
    fn test_seed_accounts_is_idempotent() {
        let accounts = store();
        let bootstrap = bootstrap_accounts();

        accounts.seed_accounts(&bootstrap).unwrap();
        accounts.seed_accounts(&bootstrap).unwrap();

        let users = accounts.load_users();
        assert_eq!(users.len(), 1);
        assert_eq!(users.iter().filter(|u| u.is_admin()).count(), 1);
        assert_eq!(users[0].national_id, "00000000000");
        assert!(users[0].verified);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let accounts = store();
        accounts.insert(sample_user("11111111111")).unwrap();

        let result = accounts.insert(sample_user("11111111111"));
        assert!(matches!(result, Err(PlatformError::Validation { .. })));

        let count = accounts
            .load_users()
            .iter()
            .filter(|u| u.national_id == "11111111111")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_update_user_replaces_single_record() {
        let accounts = store();
        accounts.insert(sample_user("11111111111")).unwrap();
        accounts.insert(sample_user("22222222222")).unwrap();

        let mut updated = accounts.find_by_national_id("11111111111").unwrap();
        updated.verified = true;
        updated.wallet = 500.0;

        let collection = accounts.update_user(&updated).unwrap();
        assert_eq!(collection.len(), 2);

        let reloaded = accounts.find_by_national_id("11111111111").unwrap();
        assert!(reloaded.verified);
        assert_eq!(reloaded.wallet, 500.0);

        // The other record is untouched
        let other = accounts.find_by_national_id("22222222222").unwrap();
        assert!(!other.verified);
    }
}
