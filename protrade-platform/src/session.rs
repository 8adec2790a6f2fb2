//! Session management
//!
//! A single browser-profile-style session: an opaque random token plus
//! the authenticated record's identifier, persisted as two separate
//! keyed values. The session stores the identifier only; every read
//! re-resolves the record from the store, so a session can never serve
//! a stale snapshot.

use crate::PlatformResult;
use protrade_core::{KeyValueStore, UserRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Storage key holding the opaque session token
pub const TOKEN_KEY: &str = "protrade_token";
/// Storage key holding the session identity blob
pub const SESSION_USER_KEY: &str = "protrade_session_user";

/// The persisted session identity: who is logged in, not what their
/// record looked like at login time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub national_id: String,
    pub opened_at: chrono::DateTime<chrono::Utc>,
}

/// Issues and resolves the single active session
#[derive(Clone)]
pub struct SessionManager {
    storage: Arc<dyn KeyValueStore>,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    /// Open a session for `user`, overwriting any prior session
    /// unconditionally. Returns the fresh opaque token.
    pub fn open_session(&self, user: &UserRecord) -> PlatformResult<String> {
        let token = Uuid::new_v4().to_string();
        let identity = SessionIdentity {
            national_id: user.national_id.clone(),
            opened_at: chrono::Utc::now(),
        };

        self.storage.set(TOKEN_KEY, &token)?;
        self.storage
            .set(SESSION_USER_KEY, &serde_json::to_string(&identity)?)?;

        info!("Session opened for: {}", user.national_id);
        Ok(token)
    }

    /// The identity of the current session, if one is present and the
    /// persisted blob parses. Degrades to `None` otherwise.
    pub fn current_identity(&self) -> Option<SessionIdentity> {
        let token = self.storage.get(TOKEN_KEY).ok()??;
        if token.is_empty() {
            return None;
        }

        let blob = self.storage.get(SESSION_USER_KEY).ok()??;
        match serde_json::from_str(&blob) {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!("Failed to parse session identity: {}", e);
                None
            }
        }
    }

    /// Whether `presented` matches the stored session token
    pub fn matches_token(&self, presented: &str) -> bool {
        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) => token == presented,
            _ => false,
        }
    }

    /// Tear down the session by removing both keys
    pub fn logout(&self) -> PlatformResult<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(SESSION_USER_KEY)?;
        info!("Session closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::hash_password;
    use protrade_core::{MemoryStore, Role};

    fn sample_user() -> UserRecord {
        UserRecord {
            national_id: "11111111111".to_string(),
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
    fn test_open_session_and_resolve_identity() {
        let sessions = SessionManager::new(Arc::new(MemoryStore::new()));
        let user = sample_user();

        let token = sessions.open_session(&user).unwrap();
        assert!(!token.is_empty());
        assert!(sessions.matches_token(&token));

        let identity = sessions.current_identity().unwrap();
        assert_eq!(identity.national_id, "11111111111");
    }

    #[test]
    fn test_new_login_overwrites_prior_session() {
        let sessions = SessionManager::new(Arc::new(MemoryStore::new()));
        let user = sample_user();

        let first = sessions.open_session(&user).unwrap();
        let second = sessions.open_session(&user).unwrap();

        assert_ne!(first, second);
        assert!(!sessions.matches_token(&first));
        assert!(sessions.matches_token(&second));
    }

    #[test]
    fn test_logout_clears_session() {
        let sessions = SessionManager::new(Arc::new(MemoryStore::new()));
        let user = sample_user();

        let token = sessions.open_session(&user).unwrap();
        sessions.logout().unwrap();

        assert!(sessions.current_identity().is_none());
        assert!(!sessions.matches_token(&token));
    }

    #[test]
    fn test_no_session_resolves_to_none() {
        let sessions = SessionManager::new(Arc::new(MemoryStore::new()));
        assert!(sessions.current_identity().is_none());
    }

    #[test]
    fn test_corrupt_identity_blob_resolves_to_none() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(TOKEN_KEY, "some-token").unwrap();
        storage.set(SESSION_USER_KEY, "not json").unwrap();

        let sessions = SessionManager::new(storage);
        assert!(sessions.current_identity().is_none());
    }
}
