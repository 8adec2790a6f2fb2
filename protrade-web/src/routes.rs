//! Route definitions for the ProTrade web server

use crate::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/auth/register", post(handlers::register_user))
        .route("/auth/login", post(handlers::login_user))
        .route("/auth/logout", post(handlers::logout_user))
        .route("/auth/me", get(handlers::get_current_user))
        // Market data
        .route("/markets", get(handlers::market_overview))
        .route("/markets/marquee", get(handlers::marquee))
        .route("/news", get(handlers::news))
        .route("/trade", post(handlers::place_demo_order))
        // KYC and payments
        .route("/kyc", post(handlers::submit_kyc))
        .route("/payments/deposit", post(handlers::request_deposit))
        .route("/payments/withdraw", post(handlers::request_withdrawal))
        // Admin panel
        .route("/admin/users", get(handlers::admin_list_users))
        .route("/admin/verify", post(handlers::admin_verify_user))
        .route("/admin/wallet", post(handlers::admin_credit_wallet))
        .route("/admin/feed-mode", post(handlers::admin_set_feed_mode))
}
