//! Account Entity
//!
//! A registered marketplace user holding a coin balance.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{email::Email, user_role::UserRole};

/// User account entity
///
/// The coin balance is only ever moved through ledger operations;
/// entity instances are read snapshots.
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Display name
    pub name: String,
    /// Canonical e-mail address (unique)
    pub email: Email,
    /// Role (Worker, Buyer, Admin)
    pub role: UserRole,
    /// Coin balance, never negative
    pub coins: i64,
    /// Optional avatar URL
    pub photo_url: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with the role's starting balance
    pub fn new(name: String, email: Email, role: UserRole, photo_url: Option<String>) -> Self {
        Self {
            user_id: UserId::new(),
            name,
            email,
            role,
            coins: role.starting_coins(),
            photo_url,
            created_at: Utc::now(),
        }
    }
}
