//! Submit Work Use Case
//!
//! A worker claims one slot of a task by handing in proof of work.

use kernel::id::TaskId;
use platform::client::CallerClaims;
use platform::mailer::Mailer;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::authorize::authorize;
use crate::application::config::MarketConfig;
use crate::application::notify::Notifier;
use crate::domain::entity::submission::Submission;
use crate::domain::repository::{
    AccountRepository, NotificationRepository, SubmissionRepository, TaskRepository,
};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Submit work input
pub struct SubmitWorkInput {
    pub task_id: Uuid,
    pub details: String,
}

/// Submit work use case
pub struct SubmitWorkUseCase<A, T, S, N, M>
where
    A: AccountRepository,
    T: TaskRepository,
    S: SubmissionRepository,
    N: NotificationRepository,
    M: Mailer,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
    submissions: Arc<S>,
    notifier: Arc<Notifier<N, M>>,
    config: Arc<MarketConfig>,
}

impl<A, T, S, N, M> SubmitWorkUseCase<A, T, S, N, M>
where
    A: AccountRepository,
    T: TaskRepository,
    S: SubmissionRepository,
    N: NotificationRepository,
    M: Mailer,
{
    pub fn new(
        accounts: Arc<A>,
        tasks: Arc<T>,
        submissions: Arc<S>,
        notifier: Arc<Notifier<N, M>>,
        config: Arc<MarketConfig>,
    ) -> Self {
        Self {
            accounts,
            tasks,
            submissions,
            notifier,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &CallerClaims,
        input: SubmitWorkInput,
    ) -> MarketResult<Submission> {
        let worker = authorize(self.accounts.as_ref(), caller, UserRole::Worker).await?;

        let details = input.details.trim().to_string();
        if details.is_empty() {
            return Err(MarketError::Validation(
                "submissionDetails is required".into(),
            ));
        }

        let task = self
            .tasks
            .find_by_id(&TaskId::from_uuid(input.task_id))
            .await?
            .ok_or(MarketError::TaskNotFound)?;

        // Early exit for a visibly closed task; the slot decrement
        // re-checks under the transaction either way.
        if !task.is_open() {
            return Err(MarketError::TaskExhausted);
        }

        let submission = Submission::new(&task, worker.email.clone(), worker.name.clone(), details);
        self.submissions.create_consuming_slot(&submission).await?;

        self.notifier
            .in_app(
                &submission.buyer_email,
                format!(
                    "{} submitted a task \"{}\"",
                    submission.worker_name, submission.task_title
                ),
                &self.config.my_tasks_route,
            )
            .await;

        tracing::info!(
            submission_id = %submission.submission_id,
            task_id = %submission.task_id,
            worker = %submission.worker_email,
            "Submission created"
        );

        Ok(submission)
    }
}
