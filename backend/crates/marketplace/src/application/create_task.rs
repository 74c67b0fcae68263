//! Create Task Use Case
//!
//! Posts a new task and reserves the buyer's coins for every slot.

use platform::client::CallerClaims;
use std::sync::Arc;

use crate::application::authorize::authorize;
use crate::domain::entity::task::Task;
use crate::domain::repository::{AccountRepository, TaskRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Create task input
pub struct CreateTaskInput {
    pub title: String,
    pub detail: String,
    pub submission_info: String,
    pub required_workers: i64,
    pub payable_amount: i64,
}

/// Create task use case
pub struct CreateTaskUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
}

impl<A, T> CreateTaskUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    pub fn new(accounts: Arc<A>, tasks: Arc<T>) -> Self {
        Self { accounts, tasks }
    }

    pub async fn execute(&self, caller: &CallerClaims, input: CreateTaskInput) -> MarketResult<Task> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;

        let title = input.title.trim().to_string();
        let detail = input.detail.trim().to_string();
        if title.is_empty() || detail.is_empty() {
            return Err(MarketError::Validation(
                "title and detail are required".into(),
            ));
        }
        if input.required_workers <= 0 {
            return Err(MarketError::Validation(
                "requiredWorkers must be positive".into(),
            ));
        }
        if input.payable_amount <= 0 {
            return Err(MarketError::Validation(
                "payableAmount must be positive".into(),
            ));
        }

        let task = Task::new(
            buyer.email.clone(),
            buyer.name.clone(),
            title,
            detail,
            input.submission_info.trim().to_string(),
            input.required_workers,
            input.payable_amount,
        );

        // Debit and insert commit together; a short balance inserts nothing.
        self.tasks.create_reserving(&task).await?;

        tracing::info!(
            task_id = %task.task_id,
            buyer = %task.buyer_email,
            reserve = task.reserve(),
            "Task created"
        );

        Ok(task)
    }
}
