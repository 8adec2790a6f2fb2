//! Request handlers
//!
//! Every handler is a thin layer over the platform service: extract the
//! session user where one is required, call the platform, map the
//! result onto JSON.

use crate::auth::{AdminUser, ApiError, CurrentUser};
use crate::AppState;
use axum::{extract::State, response::Json};
use protrade_platform::{AuthResponse, FeedMode, LoginRequest, RegisterRequest, UserProfile};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

/// Entry page: where unauthenticated requests are redirected
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "ProTrade",
        "message": "Mock trading platform demo. See /api/health.",
    }))
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "protrade-web",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---- Session lifecycle ----

/// User registration endpoint
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    info!("User registration attempt: {}", request.national_id);

    let profile = state.platform.register(request)?;

    info!("User registered successfully: {}", profile.national_id);
    Ok(Json(profile))
}

/// User login endpoint
pub async fn login_user(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    info!("User login attempt: {}", request.national_id);

    let response = state.platform.login(request)?;

    info!("User logged in successfully: {}", response.user.national_id);
    Ok(Json(response))
}

/// Logout endpoint: tears down the single active session
pub async fn logout_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    state.platform.logout()?;

    Ok(Json(json!({
        "message": "Logged out successfully",
        "national_id": user.national_id,
    })))
}

/// Current user information, re-resolved from the record store
pub async fn get_current_user(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

// ---- Market data ----

/// Per-segment market overview plus the current feed mode
pub async fn market_overview(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "feed_mode": state.platform.feed_mode(),
        "segments": state.platform.market_overview(),
    }))
}

/// Ticker marquee slice
pub async fn marquee(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "assets": state.platform.marquee() }))
}

/// News feed
pub async fn news(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "items": state.platform.news() }))
}

/// Demo order request
#[derive(Debug, Deserialize)]
pub struct TradeRequest {
    pub segment: String,
    pub code: String,
}

/// Place a demo order; requires a verified session user
pub async fn place_demo_order(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<TradeRequest>,
) -> Result<Json<Value>, ApiError> {
    let message = state
        .platform
        .place_demo_order(&user, &request.segment, &request.code)?;

    Ok(Json(json!({ "message": message })))
}

// ---- KYC and payments ----

/// KYC submission request
#[derive(Debug, Deserialize)]
pub struct KycRequest {
    pub files: Vec<String>,
}

/// Record KYC file names on the session user
pub async fn submit_kyc(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<KycRequest>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.platform.submit_kyc(&user, request.files)?;

    Ok(Json(json!({
        "message": "KYC files uploaded, awaiting admin approval",
        "user": profile,
    })))
}

/// Deposit/withdrawal amount request
#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: f64,
}

/// Create a pending deposit request
pub async fn request_deposit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<AmountRequest>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.platform.request_deposit(&user, request.amount)?;

    Ok(Json(json!({
        "message": "Deposit request created, awaiting admin approval",
        "user": profile,
    })))
}

/// Create a pending withdrawal request
pub async fn request_withdrawal(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<AmountRequest>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.platform.request_withdrawal(&user, request.amount)?;

    Ok(Json(json!({
        "message": "Withdrawal request created, awaiting admin approval",
        "user": profile,
    })))
}

// ---- Admin panel ----

/// Full user list for the admin panel
pub async fn admin_list_users(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
) -> Result<Json<Value>, ApiError> {
    let users = state.platform.list_users(&admin)?;
    Ok(Json(json!({ "users": users })))
}

/// Verification target
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub national_id: String,
}

/// Approve a user's identity verification
pub async fn admin_verify_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<Value>, ApiError> {
    let profile = state.platform.verify_user(&admin, &request.national_id)?;

    Ok(Json(json!({
        "message": format!("{} has been verified", profile.name),
        "user": profile,
    })))
}

/// Wallet credit request
#[derive(Debug, Deserialize)]
pub struct CreditRequest {
    pub national_id: String,
    pub amount: f64,
}

/// Credit a user's wallet
pub async fn admin_credit_wallet(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<CreditRequest>,
) -> Result<Json<Value>, ApiError> {
    let profile =
        state
            .platform
            .credit_wallet(&admin, &request.national_id, request.amount)?;

    Ok(Json(json!({
        "message": format!("Wallet of {} updated by {}", profile.national_id, request.amount),
        "user": profile,
    })))
}

/// Feed mode request
#[derive(Debug, Deserialize)]
pub struct FeedModeRequest {
    pub mode: FeedMode,
}

/// Switch the market feed display mode
pub async fn admin_set_feed_mode(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(request): Json<FeedModeRequest>,
) -> Result<Json<Value>, ApiError> {
    let mode = state.platform.set_feed_mode(&admin, request.mode)?;

    Ok(Json(json!({
        "message": format!("Market feed switched to {} mode", mode),
        "feed_mode": mode,
    })))
}
