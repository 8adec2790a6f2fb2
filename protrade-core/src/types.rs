//! Core data type definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// A position held in a user's portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Asset code, e.g. "CR001"
    pub code: String,
    /// Number of units held
    pub amount: f64,
    /// Current market value of the position
    pub value: f64,
}

/// Lifecycle state of a deposit or withdrawal request.
///
/// Only `Pending` is ever produced by the platform; the remaining
/// variants exist in the persisted format but no operation currently
/// transitions a request out of `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

/// A deposit or withdrawal request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub status: PaymentStatus,
    pub requested_at: DateTime<Utc>,
}

impl PaymentRequest {
    /// Create a new pending request
    pub fn pending(amount: f64) -> Self {
        Self {
            amount,
            status: PaymentStatus::Pending,
            requested_at: Utc::now(),
        }
    }
}

/// A user account record as persisted in the record store.
///
/// The national id is the primary key; it is unique across the
/// collection at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// 11-digit national identifier (primary key)
    pub national_id: String,
    /// Display name
    pub name: String,
    pub email: String,
    /// Argon2 password hash; the plaintext is never persisted
    pub password_hash: String,
    pub role: Role,
    /// Set by admin approval only; never reverts
    pub verified: bool,
    /// Wallet balance, credited only by admin action
    pub wallet: f64,
    pub portfolio: Vec<Position>,
    pub deposits: Vec<PaymentRequest>,
    pub withdrawals: Vec<PaymentRequest>,
    /// Opaque KYC file names; empty means not submitted
    pub kyc_files: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn has_submitted_kyc(&self) -> bool {
        !self.kyc_files.is_empty()
    }
}

/// Check the fixed 11-digit national identifier format
pub fn is_valid_national_id(id: &str) -> bool {
    id.len() == 11 && id.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_id_format() {
        assert!(is_valid_national_id("00000000000"));
        assert!(is_valid_national_id("11111111111"));
        assert!(!is_valid_national_id("1111111111"));
        assert!(!is_valid_national_id("111111111111"));
        assert!(!is_valid_national_id("1111111111a"));
        assert!(!is_valid_national_id(""));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_payment_request_starts_pending() {
        let request = PaymentRequest::pending(250.0);
        assert_eq!(request.status, PaymentStatus::Pending);
        assert_eq!(request.amount, 250.0);
    }
}
