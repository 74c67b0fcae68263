//! Register Account Use Case
//!
//! Creates a new marketplace account with the role's starting balance.

use std::sync::Arc;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{MarketError, MarketResult};

/// Register account input
pub struct RegisterAccountInput {
    pub name: String,
    pub email: String,
    pub role: String,
    pub photo_url: Option<String>,
}

/// Register account use case
pub struct RegisterAccountUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
}

impl<A> RegisterAccountUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, input: RegisterAccountInput) -> MarketResult<Account> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(MarketError::Validation("name is required".into()));
        }

        let email = Email::new(input.email)?;

        // Admins are seeded operationally, never self-registered.
        let role = match UserRole::from_code(input.role.trim()) {
            Some(role @ (UserRole::Worker | UserRole::Buyer)) => role,
            _ => {
                return Err(MarketError::Validation(
                    "role must be worker or buyer".into(),
                ));
            }
        };

        // The e-mail unique key catches races past this check.
        if self.accounts.exists_by_email(&email).await? {
            return Err(MarketError::EmailTaken);
        }

        let account = Account::new(name, email, role, input.photo_url);
        self.accounts.create(&account).await?;

        tracing::info!(
            email = %account.email,
            role = %account.role,
            coins = account.coins,
            "Account registered"
        );

        Ok(account)
    }
}
