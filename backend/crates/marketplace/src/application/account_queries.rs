//! Account Query Use Cases

use platform::client::CallerClaims;
use std::sync::Arc;

use crate::application::authorize::authorize;
use crate::application::config::MarketConfig;
use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{MarketError, MarketResult};

/// Get account by e-mail (public; used by the frontend on sign-in)
pub struct GetAccountUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
}

impl<A> GetAccountUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, email: &str) -> MarketResult<Account> {
        let email = Email::new(email)?;
        self.accounts
            .find_by_email(&email)
            .await?
            .ok_or(MarketError::UserNotFound)
    }
}

/// Get coin balance by e-mail (public)
pub struct GetBalanceUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
}

impl<A> GetBalanceUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, email: &str) -> MarketResult<i64> {
        let email = Email::new(email)?;
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(MarketError::UserNotFound)?;
        Ok(account.coins)
    }
}

/// Best-users leaderboard (public; top balances, optional role filter)
pub struct ListBestAccountsUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
    config: Arc<MarketConfig>,
}

impl<A> ListBestAccountsUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>, config: Arc<MarketConfig>) -> Self {
        Self { accounts, config }
    }

    pub async fn execute(
        &self,
        role: Option<&str>,
        limit: Option<i64>,
    ) -> MarketResult<Vec<Account>> {
        let role = match role {
            Some(code) => Some(
                UserRole::from_code(code)
                    .ok_or_else(|| MarketError::Validation("unknown role".into()))?,
            ),
            None => None,
        };
        let limit = limit.unwrap_or(self.config.best_users_limit).max(1);
        self.accounts.list_best(role, limit).await
    }
}

/// List every account (admin)
pub struct ListAccountsUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
}

impl<A> ListAccountsUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Account>> {
        authorize(self.accounts.as_ref(), caller, UserRole::Admin).await?;
        self.accounts.list_all().await
    }
}
