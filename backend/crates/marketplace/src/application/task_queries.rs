//! Task Query Use Cases

use kernel::id::TaskId;
use platform::client::CallerClaims;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::authorize::{authorize, load_caller};
use crate::domain::entity::task::Task;
use crate::domain::repository::{AccountRepository, TaskRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Tasks a worker can still pick up
pub struct ListOpenTasksUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
}

impl<A, T> ListOpenTasksUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    pub fn new(accounts: Arc<A>, tasks: Arc<T>) -> Self {
        Self { accounts, tasks }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Task>> {
        authorize(self.accounts.as_ref(), caller, UserRole::Worker).await?;
        self.tasks.list_open().await
    }
}

/// A buyer's own tasks
pub struct ListBuyerTasksUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
}

impl<A, T> ListBuyerTasksUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    pub fn new(accounts: Arc<A>, tasks: Arc<T>) -> Self {
        Self { accounts, tasks }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Task>> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;
        self.tasks.list_by_buyer(&buyer.email).await
    }
}

/// Every task (admin)
pub struct ListAllTasksUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
}

impl<A, T> ListAllTasksUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    pub fn new(accounts: Arc<A>, tasks: Arc<T>) -> Self {
        Self { accounts, tasks }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Task>> {
        authorize(self.accounts.as_ref(), caller, UserRole::Admin).await?;
        self.tasks.list_all().await
    }
}

/// Single task by ID (any authenticated account)
pub struct GetTaskUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    accounts: Arc<A>,
    tasks: Arc<T>,
}

impl<A, T> GetTaskUseCase<A, T>
where
    A: AccountRepository,
    T: TaskRepository,
{
    pub fn new(accounts: Arc<A>, tasks: Arc<T>) -> Self {
        Self { accounts, tasks }
    }

    pub async fn execute(&self, caller: &CallerClaims, task_id: Uuid) -> MarketResult<Task> {
        load_caller(self.accounts.as_ref(), caller).await?;
        self.tasks
            .find_by_id(&TaskId::from_uuid(task_id))
            .await?
            .ok_or(MarketError::TaskNotFound)
    }
}
