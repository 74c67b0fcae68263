//! Dashboard Statistics Use Cases

use platform::client::CallerClaims;
use std::sync::Arc;

use crate::application::authorize::authorize;
use crate::domain::repository::{
    AccountRepository, PaymentRepository, SubmissionRepository, TaskRepository,
};
use crate::domain::value_object::user_role::UserRole;
use crate::error::MarketResult;

/// Buyer dashboard numbers
#[derive(Debug, Clone, Copy)]
pub struct BuyerStats {
    /// Tasks the buyer has posted
    pub total_tasks: i64,
    /// Remaining worker slots across those tasks
    pub pending_slots: i64,
    /// Cash spent on coin purchases
    pub total_payments: f64,
}

/// Buyer stats use case
pub struct BuyerStatsUseCase<A, T, P>
where
    A: AccountRepository,
    T: TaskRepository,
    P: PaymentRepository,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
    payments: Arc<P>,
}

impl<A, T, P> BuyerStatsUseCase<A, T, P>
where
    A: AccountRepository,
    T: TaskRepository,
    P: PaymentRepository,
{
    pub fn new(accounts: Arc<A>, tasks: Arc<T>, payments: Arc<P>) -> Self {
        Self {
            accounts,
            tasks,
            payments,
        }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<BuyerStats> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;

        Ok(BuyerStats {
            total_tasks: self.tasks.count_by_buyer(&buyer.email).await?,
            pending_slots: self.tasks.open_slots_by_buyer(&buyer.email).await?,
            total_payments: self.payments.total_spent_by_email(&buyer.email).await?,
        })
    }
}

/// Worker dashboard numbers
#[derive(Debug, Clone, Copy)]
pub struct WorkerStats {
    /// Submissions the worker has made
    pub total_submissions: i64,
    /// Submissions still awaiting review
    pub pending_submissions: i64,
    /// Coins earned from approved submissions
    pub total_earnings: i64,
}

/// Worker stats use case
pub struct WorkerStatsUseCase<A, S>
where
    A: AccountRepository,
    S: SubmissionRepository,
{
    accounts: Arc<A>,
    submissions: Arc<S>,
}

impl<A, S> WorkerStatsUseCase<A, S>
where
    A: AccountRepository,
    S: SubmissionRepository,
{
    pub fn new(accounts: Arc<A>, submissions: Arc<S>) -> Self {
        Self {
            accounts,
            submissions,
        }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<WorkerStats> {
        let worker = authorize(self.accounts.as_ref(), caller, UserRole::Worker).await?;

        Ok(WorkerStats {
            total_submissions: self.submissions.count_by_worker(&worker.email).await?,
            pending_submissions: self
                .submissions
                .count_pending_by_worker(&worker.email)
                .await?,
            total_earnings: self
                .submissions
                .total_earned_by_worker(&worker.email)
                .await?,
        })
    }
}

/// Platform-wide numbers for the admin dashboard
#[derive(Debug, Clone, Copy)]
pub struct AdminStats {
    pub total_workers: i64,
    pub total_buyers: i64,
    /// Coins currently in circulation
    pub total_coins: i64,
    /// Cash volume across all payments
    pub total_payments: f64,
}

/// Admin stats use case
pub struct AdminStatsUseCase<A, P>
where
    A: AccountRepository,
    P: PaymentRepository,
{
    accounts: Arc<A>,
    payments: Arc<P>,
}

impl<A, P> AdminStatsUseCase<A, P>
where
    A: AccountRepository,
    P: PaymentRepository,
{
    pub fn new(accounts: Arc<A>, payments: Arc<P>) -> Self {
        Self { accounts, payments }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<AdminStats> {
        authorize(self.accounts.as_ref(), caller, UserRole::Admin).await?;

        Ok(AdminStats {
            total_workers: self.accounts.count_by_role(UserRole::Worker).await?,
            total_buyers: self.accounts.count_by_role(UserRole::Buyer).await?,
            total_coins: self.accounts.total_coins().await?,
            total_payments: self.payments.total_volume().await?,
        })
    }
}
