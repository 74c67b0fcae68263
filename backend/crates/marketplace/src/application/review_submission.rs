//! Review Submission Use Cases
//!
//! A buyer settles a pending submission: approval pays the worker out
//! of the reserve, rejection restores the task slot. Both transitions
//! are terminal and guarded, so a retry can neither pay twice nor
//! restore twice.

use kernel::id::SubmissionId;
use platform::client::CallerClaims;
use platform::mailer::Mailer;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::authorize::authorize;
use crate::application::config::MarketConfig;
use crate::application::notify::Notifier;
use crate::domain::entity::submission::Submission;
use crate::domain::repository::{AccountRepository, NotificationRepository, SubmissionRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Approve submission use case
pub struct ApproveSubmissionUseCase<A, S, N, M>
where
    A: AccountRepository,
    S: SubmissionRepository,
    N: NotificationRepository,
    M: Mailer,
{
    accounts: Arc<A>,
    submissions: Arc<S>,
    notifier: Arc<Notifier<N, M>>,
    config: Arc<MarketConfig>,
}

impl<A, S, N, M> ApproveSubmissionUseCase<A, S, N, M>
where
    A: AccountRepository,
    S: SubmissionRepository,
    N: NotificationRepository,
    M: Mailer,
{
    pub fn new(
        accounts: Arc<A>,
        submissions: Arc<S>,
        notifier: Arc<Notifier<N, M>>,
        config: Arc<MarketConfig>,
    ) -> Self {
        Self {
            accounts,
            submissions,
            notifier,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &CallerClaims,
        submission_id: Uuid,
    ) -> MarketResult<Submission> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;

        let submission_id = SubmissionId::from_uuid(submission_id);
        let submission = self
            .submissions
            .find_by_id(&submission_id)
            .await?
            .ok_or(MarketError::SubmissionNotFound)?;

        if submission.buyer_email != buyer.email {
            return Err(MarketError::Forbidden("submission targets another buyer"));
        }

        // Status flip and worker credit commit together.
        let approved = self.submissions.approve_crediting(&submission_id).await?;

        self.notifier
            .in_app(
                &approved.worker_email,
                format!(
                    "You have earned {} coins from {} for completing {}",
                    approved.payable_amount, approved.buyer_name, approved.task_title
                ),
                &self.config.worker_home_route,
            )
            .await;
        self.notifier
            .email(
                &approved.worker_email,
                "Submission Approved",
                format!(
                    "Your submission for {} has been approved, and you have earned {} coins.",
                    approved.task_title, approved.payable_amount
                ),
                format!(
                    "<p>Your submission for <b>{}</b> has been approved, and you have earned <b>{}</b> coins.</p>",
                    approved.task_title, approved.payable_amount
                ),
            )
            .await;

        tracing::info!(
            submission_id = %approved.submission_id,
            worker = %approved.worker_email,
            amount = approved.payable_amount,
            "Submission approved"
        );

        Ok(approved)
    }
}

/// Reject submission use case
pub struct RejectSubmissionUseCase<A, S, N, M>
where
    A: AccountRepository,
    S: SubmissionRepository,
    N: NotificationRepository,
    M: Mailer,
{
    accounts: Arc<A>,
    submissions: Arc<S>,
    notifier: Arc<Notifier<N, M>>,
    config: Arc<MarketConfig>,
}

impl<A, S, N, M> RejectSubmissionUseCase<A, S, N, M>
where
    A: AccountRepository,
    S: SubmissionRepository,
    N: NotificationRepository,
    M: Mailer,
{
    pub fn new(
        accounts: Arc<A>,
        submissions: Arc<S>,
        notifier: Arc<Notifier<N, M>>,
        config: Arc<MarketConfig>,
    ) -> Self {
        Self {
            accounts,
            submissions,
            notifier,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &CallerClaims,
        submission_id: Uuid,
    ) -> MarketResult<Submission> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;

        let submission_id = SubmissionId::from_uuid(submission_id);
        let submission = self
            .submissions
            .find_by_id(&submission_id)
            .await?
            .ok_or(MarketError::SubmissionNotFound)?;

        if submission.buyer_email != buyer.email {
            return Err(MarketError::Forbidden("submission targets another buyer"));
        }

        // Status flip and slot restore commit together; no coin movement.
        let rejected = self.submissions.reject_restoring(&submission_id).await?;

        self.notifier
            .in_app(
                &rejected.worker_email,
                format!(
                    "Your submission for {} has been rejected.",
                    rejected.task_title
                ),
                &self.config.my_submissions_route,
            )
            .await;
        self.notifier
            .email(
                &rejected.worker_email,
                "Submission Rejected",
                format!(
                    "Your submission for {} has been rejected. Please review the requirements and try again.",
                    rejected.task_title
                ),
                format!(
                    "<p>Your submission for <b>{}</b> has been rejected. Please review the requirements and try again.</p>",
                    rejected.task_title
                ),
            )
            .await;

        tracing::info!(
            submission_id = %rejected.submission_id,
            worker = %rejected.worker_email,
            "Submission rejected"
        );

        Ok(rejected)
    }
}
