//! Update Task Use Case
//!
//! Edits a task's content fields. Slots and coins are never touched
//! here.

use kernel::id::TaskId;
use platform::client::CallerClaims;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::authorize::authorize;
use crate::domain::repository::{AccountRepository, TaskRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Update task input
pub struct UpdateTaskInput {
    pub task_id: Uuid,
    pub title: String,
    pub detail: String,
    pub submission_info: String,
}

/// Update task use case
pub struct UpdateTaskUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
}

impl<A, T> UpdateTaskUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    pub fn new(accounts: Arc<A>, tasks: Arc<T>) -> Self {
        Self { accounts, tasks }
    }

    pub async fn execute(&self, caller: &CallerClaims, input: UpdateTaskInput) -> MarketResult<()> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;

        let title = input.title.trim().to_string();
        let detail = input.detail.trim().to_string();
        let submission_info = input.submission_info.trim().to_string();
        if title.is_empty() || detail.is_empty() || submission_info.is_empty() {
            return Err(MarketError::Validation(
                "title, detail and submissionInfo are required".into(),
            ));
        }

        let task_id = TaskId::from_uuid(input.task_id);
        let task = self
            .tasks
            .find_by_id(&task_id)
            .await?
            .ok_or(MarketError::TaskNotFound)?;

        if task.buyer_email != buyer.email {
            return Err(MarketError::Forbidden("task belongs to another buyer"));
        }

        self.tasks
            .update_content(&task_id, &title, &detail, &submission_info)
            .await?;

        tracing::info!(task_id = %task_id, buyer = %buyer.email, "Task updated");

        Ok(())
    }
}
