//! Withdrawal Query Use Cases

use platform::client::CallerClaims;
use std::sync::Arc;

use crate::application::authorize::authorize;
use crate::domain::entity::withdrawal::Withdrawal;
use crate::domain::repository::{AccountRepository, WithdrawalRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::MarketResult;

/// Every withdrawal request (admin review queue)
pub struct ListWithdrawalsUseCase<A, W>
where
    A: AccountRepository,
    W: WithdrawalRepository,
{
    accounts: Arc<A>,
    withdrawals: Arc<W>,
}

impl<A, W> ListWithdrawalsUseCase<A, W>
where
    A: AccountRepository,
    W: WithdrawalRepository,
{
    pub fn new(accounts: Arc<A>, withdrawals: Arc<W>) -> Self {
        Self {
            accounts,
            withdrawals,
        }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Withdrawal>> {
        authorize(self.accounts.as_ref(), caller, UserRole::Admin).await?;
        self.withdrawals.list_all().await
    }
}

/// A worker's own withdrawal requests
pub struct ListWorkerWithdrawalsUseCase<A, W>
where
    A: AccountRepository,
    W: WithdrawalRepository,
{
    accounts: Arc<A>,
    withdrawals: Arc<W>,
}

impl<A, W> ListWorkerWithdrawalsUseCase<A, W>
where
    A: AccountRepository,
    W: WithdrawalRepository,
{
    pub fn new(accounts: Arc<A>, withdrawals: Arc<W>) -> Self {
        Self {
            accounts,
            withdrawals,
        }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Withdrawal>> {
        let worker = authorize(self.accounts.as_ref(), caller, UserRole::Worker).await?;
        self.withdrawals.list_by_worker(&worker.email).await
    }
}
