//! Submission Query Use Cases

use platform::client::CallerClaims;
use std::sync::Arc;

use crate::application::authorize::authorize;
use crate::domain::entity::submission::{Submission, SubmissionStatus};
use crate::domain::repository::{AccountRepository, SubmissionRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// A worker's own submissions, optionally filtered by status
pub struct ListWorkerSubmissionsUseCase<A, S>
where
    A: AccountRepository,
    S: SubmissionRepository,
{
    accounts: Arc<A>,
    submissions: Arc<S>,
}

impl<A, S> ListWorkerSubmissionsUseCase<A, S>
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

    pub async fn execute(
        &self,
        caller: &CallerClaims,
        status: Option<&str>,
    ) -> MarketResult<Vec<Submission>> {
        let worker = authorize(self.accounts.as_ref(), caller, UserRole::Worker).await?;

        let status = match status {
            Some("pending") => Some(SubmissionStatus::Pending),
            Some("approved") => Some(SubmissionStatus::Approved),
            Some("rejected") => Some(SubmissionStatus::Rejected),
            Some(_) => {
                return Err(MarketError::Validation("unknown submission status".into()));
            }
            None => None,
        };

        self.submissions.list_by_worker(&worker.email, status).await
    }
}

/// Pending submissions awaiting a buyer's review
pub struct ListReviewQueueUseCase<A, S>
where
    A: AccountRepository,
    S: SubmissionRepository,
{
    accounts: Arc<A>,
    submissions: Arc<S>,
}

impl<A, S> ListReviewQueueUseCase<A, S>
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

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Submission>> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;
        self.submissions.list_pending_for_buyer(&buyer.email).await
    }
}
