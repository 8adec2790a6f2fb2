//! Account records: the persisted user collection and its mutation path

mod password;
mod store;
mod types;

pub use password::{hash_password, verify_password};
pub use store::{AccountStore, USERS_KEY};
pub use types::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
