//! The platform service
//!
//! [`TradingPlatform`] wires the storage port, the record store, the
//! session manager and the market data together, and is the single
//! entry point consumed by the presentation layer. Construction and
//! bootstrap are explicit and run once, under caller control.

use crate::accounts::{
    hash_password, verify_password, AccountStore, AuthResponse, LoginRequest, RegisterRequest,
    UserProfile,
};
use crate::market::{FeedMode, MarketData, MarketSegment, NewsItem};
use crate::session::SessionManager;
use crate::{Asset, PlatformError, PlatformResult};
use protrade_core::{
    is_valid_national_id, JsonFileStore, KeyValueStore, MemoryStore, PaymentRequest,
    PlatformConfig, Role, StorageBackend, UserRecord,
};
use std::sync::Arc;
use tracing::{info, warn};

/// The mock trading platform
pub struct TradingPlatform {
    config: PlatformConfig,
    accounts: AccountStore,
    sessions: SessionManager,
    market: MarketData,
}

impl TradingPlatform {
    /// Create a platform with the storage backend named by the config
    pub fn new(config: PlatformConfig) -> PlatformResult<Self> {
        let storage: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(JsonFileStore::new(&config.storage.data_dir)?),
        };
        Ok(Self::with_storage(config, storage))
    }

    /// Create a platform over an explicitly injected storage backend
    pub fn with_storage(config: PlatformConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let market = MarketData::generate(&config.market);
        Self {
            accounts: AccountStore::new(storage.clone()),
            sessions: SessionManager::new(storage),
            market,
            config,
        }
    }

    /// Insert the configured bootstrap accounts. Idempotent; expected to
    /// run once at process start before anything else.
    pub fn bootstrap(&self) -> PlatformResult<()> {
        self.accounts.seed_accounts(&self.config.bootstrap.accounts)
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    // ---- Registration and session lifecycle ----

    /// Register a new user account. The record starts unverified, with
    /// an empty wallet, portfolio and request lists.
    pub fn register(&self, request: RegisterRequest) -> PlatformResult<UserProfile> {
        if !is_valid_national_id(&request.national_id) {
            return Err(PlatformError::validation(
                "National id must be exactly 11 digits",
            ));
        }
        if request.name.is_empty() || request.email.is_empty() || request.password.is_empty() {
            return Err(PlatformError::validation(
                "Name, email and password are required",
            ));
        }

        let record = UserRecord {
            national_id: request.national_id.clone(),
            name: request.name,
            email: request.email,
            password_hash: hash_password(&request.password)?,
            role: Role::User,
            verified: false,
            wallet: 0.0,
            portfolio: Vec::new(),
            deposits: Vec::new(),
            withdrawals: Vec::new(),
            kyc_files: Vec::new(),
            created_at: chrono::Utc::now(),
        };

        self.accounts.insert(record.clone())?;
        info!("Registered new user: {}", record.national_id);
        Ok(UserProfile::from(&record))
    }

    /// Authenticate credentials and open a session, overwriting any
    /// prior session.
    pub fn login(&self, request: LoginRequest) -> PlatformResult<AuthResponse> {
        let user = self
            .accounts
            .find_by_national_id(&request.national_id)
            .ok_or(PlatformError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            warn!("Invalid password for user: {}", request.national_id);
            return Err(PlatformError::InvalidCredentials);
        }

        let token = self.sessions.open_session(&user)?;
        info!("User logged in: {}", user.national_id);

        Ok(AuthResponse {
            user: UserProfile::from(&user),
            token,
        })
    }

    /// Tear down the current session
    pub fn logout(&self) -> PlatformResult<()> {
        self.sessions.logout()
    }

    /// Resolve the current session to a live record. The session holds
    /// only the identifier; the record is re-read from the store on
    /// every call.
    pub fn current_user(&self) -> Option<UserRecord> {
        let identity = self.sessions.current_identity()?;
        self.accounts.find_by_national_id(&identity.national_id)
    }

    /// Resolve a presented token to the session user, when it matches
    /// the stored session token.
    pub fn session_user_for_token(&self, token: &str) -> Option<UserRecord> {
        if !self.sessions.matches_token(token) {
            return None;
        }
        self.current_user()
    }

    /// The authorization boundary: resolve the current user, demanding
    /// `role` when given. Every privileged operation starts here.
    pub fn require_session(&self, role: Option<Role>) -> PlatformResult<UserRecord> {
        let user = self
            .current_user()
            .ok_or_else(|| PlatformError::unauthorized("No active session"))?;

        if let Some(required) = role {
            if user.role != required {
                return Err(PlatformError::forbidden(format!(
                    "This operation requires the {} role",
                    required
                )));
            }
        }

        Ok(user)
    }

    // ---- User operations ----

    /// Record KYC file names on the acting user's record
    pub fn submit_kyc(&self, actor: &UserRecord, files: Vec<String>) -> PlatformResult<UserProfile> {
        if files.is_empty() || files.iter().any(|f| f.is_empty()) {
            return Err(PlatformError::validation("KYC file names are required"));
        }

        let mut updated = self.fetch(&actor.national_id)?;
        updated.kyc_files = files;
        self.accounts.update_user(&updated)?;

        info!("KYC files submitted for: {}", updated.national_id);
        Ok(UserProfile::from(&updated))
    }

    /// Append a pending deposit request to the acting user's record
    pub fn request_deposit(&self, actor: &UserRecord, amount: f64) -> PlatformResult<UserProfile> {
        let mut updated = self.fetch(&actor.national_id)?;
        updated.deposits.push(Self::payment_request(amount)?);
        self.accounts.update_user(&updated)?;

        info!("Deposit request of {} created for: {}", amount, updated.national_id);
        Ok(UserProfile::from(&updated))
    }

    /// Append a pending withdrawal request to the acting user's record
    pub fn request_withdrawal(
        &self,
        actor: &UserRecord,
        amount: f64,
    ) -> PlatformResult<UserProfile> {
        let mut updated = self.fetch(&actor.national_id)?;
        updated.withdrawals.push(Self::payment_request(amount)?);
        self.accounts.update_user(&updated)?;

        info!(
            "Withdrawal request of {} created for: {}",
            amount, updated.national_id
        );
        Ok(UserProfile::from(&updated))
    }

    /// Create a demo order confirmation for a verified user. Orders are
    /// never executed; this produces a confirmation message only.
    pub fn place_demo_order(
        &self,
        actor: &UserRecord,
        segment: &str,
        code: &str,
    ) -> PlatformResult<String> {
        if !actor.verified {
            return Err(PlatformError::forbidden(
                "Identity verification is pending; trading is not enabled yet",
            ));
        }

        let asset = self
            .market
            .find_asset(segment, code)
            .ok_or_else(|| PlatformError::not_found(format!("Asset {}/{}", segment, code)))?;

        Ok(format!(
            "Demo buy order created for {} - {}",
            segment.to_uppercase(),
            asset.code
        ))
    }

    // ---- Admin operations ----

    /// Flip a user's verified flag to true. Admin only; the flag never
    /// reverts.
    pub fn verify_user(&self, actor: &UserRecord, national_id: &str) -> PlatformResult<UserProfile> {
        self.require_admin(actor)?;

        let mut target = self.fetch(national_id)?;
        target.verified = true;
        self.accounts.update_user(&target)?;

        info!("User verified by admin: {}", national_id);
        Ok(UserProfile::from(&target))
    }

    /// Credit a user's wallet. Admin only.
    pub fn credit_wallet(
        &self,
        actor: &UserRecord,
        national_id: &str,
        amount: f64,
    ) -> PlatformResult<UserProfile> {
        self.require_admin(actor)?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(PlatformError::validation(
                "Credit amount must be greater than zero",
            ));
        }

        let mut target = self.fetch(national_id)?;
        target.wallet += amount;
        self.accounts.update_user(&target)?;

        info!("Wallet of {} credited with {}", national_id, amount);
        Ok(UserProfile::from(&target))
    }

    /// The full collection for the admin panel. Admin only.
    pub fn list_users(&self, actor: &UserRecord) -> PlatformResult<Vec<UserProfile>> {
        self.require_admin(actor)?;
        Ok(self
            .accounts
            .load_users()
            .iter()
            .map(UserProfile::from)
            .collect())
    }

    /// Switch the market feed display mode. Admin only.
    pub fn set_feed_mode(&self, actor: &UserRecord, mode: FeedMode) -> PlatformResult<FeedMode> {
        self.require_admin(actor)?;
        self.market.set_feed_mode(mode);
        info!("Market feed switched to {} mode", mode);
        Ok(mode)
    }

    // ---- Market data ----

    pub fn market_overview(&self) -> Vec<MarketSegment> {
        self.market.overview()
    }

    pub fn marquee(&self) -> Vec<Asset> {
        self.market.marquee()
    }

    pub fn news(&self) -> &[NewsItem] {
        self.market.news()
    }

    pub fn feed_mode(&self) -> FeedMode {
        self.market.feed_mode()
    }

    // ---- Helpers ----

    fn fetch(&self, national_id: &str) -> PlatformResult<UserRecord> {
        self.accounts
            .find_by_national_id(national_id)
            .ok_or_else(|| PlatformError::not_found(format!("User {}", national_id)))
    }

    fn require_admin(&self, actor: &UserRecord) -> PlatformResult<()> {
        if !actor.is_admin() {
            return Err(PlatformError::forbidden(
                "This operation requires the admin role",
            ));
        }
        Ok(())
    }

    fn payment_request(amount: f64) -> PlatformResult<PaymentRequest> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PlatformError::validation(
                "Amount must be greater than zero",
            ));
        }
        Ok(PaymentRequest::pending(amount))
    }
}
