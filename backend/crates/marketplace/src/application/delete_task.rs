//! Delete Task Use Case
//!
//! Removes a task and refunds the buyer for every unconsumed slot.
//! Available to the owning buyer and to admins; the refund and the
//! delete commit together.

use kernel::id::TaskId;
use platform::client::CallerClaims;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::authorize::authorize_any;
use crate::domain::entity::task::Task;
use crate::domain::repository::{AccountRepository, TaskRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Delete task use case
pub struct DeleteTaskUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
}

impl<A, T> DeleteTaskUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    pub fn new(accounts: Arc<A>, tasks: Arc<T>) -> Self {
        Self { accounts, tasks }
    }

    pub async fn execute(&self, caller: &CallerClaims, task_id: Uuid) -> MarketResult<Task> {
        let account = authorize_any(
            self.accounts.as_ref(),
            caller,
            &[UserRole::Buyer, UserRole::Admin],
        )
        .await?;

        let task_id = TaskId::from_uuid(task_id);
        let task = self
            .tasks
            .find_by_id(&task_id)
            .await?
            .ok_or(MarketError::TaskNotFound)?;

        if account.role != UserRole::Admin && task.buyer_email != account.email {
            return Err(MarketError::Forbidden("task belongs to another buyer"));
        }

        let deleted = self.tasks.delete_refunding(&task_id).await?;

        tracing::info!(
            task_id = %task_id,
            buyer = %deleted.buyer_email,
            refund = deleted.reserve(),
            deleted_by = %account.email,
            "Task deleted"
        );

        Ok(deleted)
    }
}
