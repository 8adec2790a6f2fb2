//! End-to-end flow over the platform service: bootstrap, registration,
//! login and the admin approval path, all against the in-memory storage
//! double.

use protrade_core::{MemoryStore, PlatformConfig, Role, StorageBackend};
use protrade_platform::{LoginRequest, RegisterRequest, TradingPlatform};
use std::sync::Arc;

#[test]
fn full_platform_flow() {
    let platform =
        TradingPlatform::with_storage(PlatformConfig::default(), Arc::new(MemoryStore::new()));

    // Empty store until bootstrap runs
    assert!(platform.accounts().load_users().is_empty());

    platform.bootstrap().unwrap();
    let users = platform.accounts().load_users();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Admin);
    assert_eq!(users[0].national_id, "00000000000");

    // Bootstrap again: still exactly one admin
    platform.bootstrap().unwrap();
    assert_eq!(platform.accounts().load_users().len(), 1);

    // Register a regular user
    platform
        .register(RegisterRequest {
            national_id: "11111111111".to_string(),
            name: "Demo Trader".to_string(),
            email: "trader@example.com".to_string(),
            password: "hunter2hunter".to_string(),
        })
        .unwrap();
    assert_eq!(platform.accounts().load_users().len(), 2);

    // Registering the same id again is rejected and changes nothing
    let duplicate = platform.register(RegisterRequest {
        national_id: "11111111111".to_string(),
        name: "Someone Else".to_string(),
        email: "other@example.com".to_string(),
        password: "hunter2hunter".to_string(),
    });
    assert!(duplicate.is_err());
    assert_eq!(platform.accounts().load_users().len(), 2);

    // Login resolves a session for the registered identifier
    let response = platform
        .login(LoginRequest {
            national_id: "11111111111".to_string(),
            password: "hunter2hunter".to_string(),
        })
        .unwrap();
    assert!(!response.token.is_empty());

    let session_user = platform.current_user().unwrap();
    assert_eq!(session_user.national_id, "11111111111");
    assert_eq!(session_user.role, Role::User);
    assert!(!session_user.verified);

    // The bearer token round-trips through the session manager
    let resolved = platform.session_user_for_token(&response.token).unwrap();
    assert_eq!(resolved.national_id, "11111111111");
    assert!(platform.session_user_for_token("wrong-token").is_none());

    // The user submits KYC and asks for a deposit
    platform
        .submit_kyc(
            &session_user,
            vec!["front-face.jpg".to_string(), "back-face.jpg".to_string()],
        )
        .unwrap();
    platform.request_deposit(&session_user, 1000.0).unwrap();

    // Admin approves the user and credits the wallet
    let admin = platform
        .accounts()
        .find_by_national_id("00000000000")
        .unwrap();
    platform.verify_user(&admin, "11111111111").unwrap();
    platform.credit_wallet(&admin, "11111111111", 1000.0).unwrap();

    // The session sees the admin's changes immediately
    let refreshed = platform.current_user().unwrap();
    assert!(refreshed.verified);
    assert_eq!(refreshed.wallet, 1000.0);
    assert_eq!(refreshed.deposits.len(), 1);

    // A verified user can place a demo order
    let message = platform
        .place_demo_order(&refreshed, "equities", "EQ003")
        .unwrap();
    assert!(message.contains("EQ003"));

    // Logout tears the session down
    platform.logout().unwrap();
    assert!(platform.current_user().is_none());
}

#[test]
fn file_backend_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut config = PlatformConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.data_dir = dir.path().to_string_lossy().into_owned();

    {
        let platform = TradingPlatform::new(config.clone()).unwrap();
        platform.bootstrap().unwrap();
        platform
            .register(RegisterRequest {
                national_id: "11111111111".to_string(),
                name: "Demo Trader".to_string(),
                email: "trader@example.com".to_string(),
                password: "hunter2hunter".to_string(),
            })
            .unwrap();
    }

    // A fresh platform over the same directory sees the same records,
    // and bootstrap stays idempotent across restarts.
    let reopened = TradingPlatform::new(config).unwrap();
    reopened.bootstrap().unwrap();

    let users = reopened.accounts().load_users();
    assert_eq!(users.len(), 2);
    assert!(reopened
        .accounts()
        .find_by_national_id("11111111111")
        .is_some());

    reopened
        .login(LoginRequest {
            national_id: "11111111111".to_string(),
            password: "hunter2hunter".to_string(),
        })
        .unwrap();
    assert_eq!(
        reopened.current_user().unwrap().national_id,
        "11111111111"
    );
}
