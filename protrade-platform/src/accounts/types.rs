//! Account request and response types

use protrade_core::{PaymentRequest, Position, Role, UserRecord};
use serde::{Deserialize, Serialize};

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub national_id: String,
    pub password: String,
}

/// Registration/login response: the public profile plus the session token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}

/// Public user information, without the password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub national_id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub verified: bool,
    pub wallet: f64,
    pub portfolio: Vec<Position>,
    pub deposits: Vec<PaymentRequest>,
    pub withdrawals: Vec<PaymentRequest>,
    pub kyc_files: Vec<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&UserRecord> for UserProfile {
    fn from(record: &UserRecord) -> Self {
        Self {
            national_id: record.national_id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role,
            verified: record.verified,
            wallet: record.wallet,
            portfolio: record.portfolio.clone(),
            deposits: record.deposits.clone(),
            withdrawals: record.withdrawals.clone(),
            kyc_files: record.kyc_files.clone(),
            created_at: record.created_at,
        }
    }
}
