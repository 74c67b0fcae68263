//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure
//! layer.
//!
//! Operations that must move several records together (debit + insert,
//! status flip + credit, delete + refund) are single trait methods, so
//! every implementation is forced to provide them as one atomic unit.

use kernel::id::{SubmissionId, TaskId, UserId, WithdrawalId};

use crate::domain::entity::{
    account::Account, notification::Notification, payment::Payment,
    submission::{Submission, SubmissionStatus}, task::Task, withdrawal::Withdrawal,
};
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::MarketResult;

/// Ledger repository trait
///
/// The only interface through which coin balances move.
#[trait_variant::make(LedgerRepository: Send)]
pub trait LocalLedgerRepository {
    /// Apply a signed coin delta to a user's balance
    ///
    /// Atomic conditional update: a negative delta only applies while
    /// `balance + delta >= 0`, otherwise `InsufficientFunds`. Returns
    /// the new balance.
    async fn adjust(&self, email: &Email, delta: i64) -> MarketResult<i64>;

    /// Current balance for a user
    async fn balance(&self, email: &Email) -> MarketResult<i64>;
}

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Create a new account; `EmailTaken` on a duplicate e-mail
    async fn create(&self, account: &Account) -> MarketResult<()>;

    /// Find account by canonical e-mail
    async fn find_by_email(&self, email: &Email) -> MarketResult<Option<Account>>;

    /// Check if an account exists for this e-mail
    async fn exists_by_email(&self, email: &Email) -> MarketResult<bool>;

    /// All accounts (admin view)
    async fn list_all(&self) -> MarketResult<Vec<Account>>;

    /// Top accounts by balance, optionally filtered by role
    async fn list_best(&self, role: Option<UserRole>, limit: i64) -> MarketResult<Vec<Account>>;

    /// Change a user's role
    async fn set_role(&self, user_id: &UserId, role: UserRole) -> MarketResult<()>;

    /// Delete an account
    ///
    /// Fails with `UserReferenced` while the user still owns open tasks
    /// or has pending submissions.
    async fn delete(&self, user_id: &UserId) -> MarketResult<()>;

    /// Any admin account, for routing withdrawal notifications
    async fn find_admin(&self) -> MarketResult<Option<Account>>;

    /// Number of accounts holding a role
    async fn count_by_role(&self, role: UserRole) -> MarketResult<i64>;

    /// Coins currently in circulation across all accounts
    async fn total_coins(&self) -> MarketResult<i64>;
}

/// Task repository trait
#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    /// Insert a task, debiting the buyer's reserve in the same unit
    ///
    /// Both the conditional debit and the insert commit together;
    /// a short balance fails the whole operation with
    /// `InsufficientFunds` and inserts nothing.
    async fn create_reserving(&self, task: &Task) -> MarketResult<()>;

    /// Find task by ID
    async fn find_by_id(&self, task_id: &TaskId) -> MarketResult<Option<Task>>;

    /// Update the task's mutable content fields only
    async fn update_content(
        &self,
        task_id: &TaskId,
        title: &str,
        detail: &str,
        submission_info: &str,
    ) -> MarketResult<()>;

    /// Delete a task, refunding the buyer for unconsumed slots in the
    /// same unit; returns the deleted task
    async fn delete_refunding(&self, task_id: &TaskId) -> MarketResult<Task>;

    /// Tasks a worker can still submit against
    async fn list_open(&self) -> MarketResult<Vec<Task>>;

    /// A buyer's tasks, newest first
    async fn list_by_buyer(&self, buyer: &Email) -> MarketResult<Vec<Task>>;

    /// All tasks (admin view)
    async fn list_all(&self) -> MarketResult<Vec<Task>>;

    /// Number of tasks a buyer has created
    async fn count_by_buyer(&self, buyer: &Email) -> MarketResult<i64>;

    /// Sum of remaining worker slots across a buyer's tasks
    async fn open_slots_by_buyer(&self, buyer: &Email) -> MarketResult<i64>;
}

/// Submission repository trait
#[trait_variant::make(SubmissionRepository: Send)]
pub trait LocalSubmissionRepository {
    /// Insert a submission, consuming one task slot in the same unit
    ///
    /// Test-and-decrement: only succeeds while the task has a free
    /// slot (`TaskExhausted` otherwise); the (worker, task) unique key
    /// rolls the slot back on a `DuplicateSubmission`. Consuming the
    /// last slot completes the task.
    async fn create_consuming_slot(&self, submission: &Submission) -> MarketResult<()>;

    /// Find submission by ID
    async fn find_by_id(&self, submission_id: &SubmissionId) -> MarketResult<Option<Submission>>;

    /// Flip `pending -> approved` and credit the worker in the same unit
    ///
    /// `NotPending` when the submission was already reviewed; the flip
    /// and the credit commit together, so a retry can never pay twice.
    /// Returns the approved submission.
    async fn approve_crediting(&self, submission_id: &SubmissionId) -> MarketResult<Submission>;

    /// Flip `pending -> rejected` and restore the task slot in the same
    /// unit
    ///
    /// No coin movement. Restoring the slot reopens a completed task;
    /// the restore is skipped when the task was deleted meanwhile (the
    /// buyer has already been refunded). Returns the rejected
    /// submission.
    async fn reject_restoring(&self, submission_id: &SubmissionId) -> MarketResult<Submission>;

    /// A worker's submissions, optionally filtered by status
    async fn list_by_worker(
        &self,
        worker: &Email,
        status: Option<SubmissionStatus>,
    ) -> MarketResult<Vec<Submission>>;

    /// Pending submissions awaiting a buyer's review
    async fn list_pending_for_buyer(&self, buyer: &Email) -> MarketResult<Vec<Submission>>;

    /// Number of submissions a worker has made
    async fn count_by_worker(&self, worker: &Email) -> MarketResult<i64>;

    /// Number of a worker's submissions still pending review
    async fn count_pending_by_worker(&self, worker: &Email) -> MarketResult<i64>;

    /// Total coins the worker has earned from approved submissions
    async fn total_earned_by_worker(&self, worker: &Email) -> MarketResult<i64>;
}

/// Withdrawal repository trait
#[trait_variant::make(WithdrawalRepository: Send)]
pub trait LocalWithdrawalRepository {
    /// Insert a pending withdrawal request
    async fn create(&self, withdrawal: &Withdrawal) -> MarketResult<()>;

    /// Flip `pending -> approved` and debit the worker in the same unit
    ///
    /// The balance is re-checked here: a worker who spent the coins
    /// since requesting fails with `InsufficientFunds` and the request
    /// stays pending. Returns the approved withdrawal.
    async fn approve_debiting(&self, withdrawal_id: &WithdrawalId) -> MarketResult<Withdrawal>;

    /// All withdrawal requests (admin view), newest first
    async fn list_all(&self) -> MarketResult<Vec<Withdrawal>>;

    /// A worker's withdrawal requests, newest first
    async fn list_by_worker(&self, worker: &Email) -> MarketResult<Vec<Withdrawal>>;
}

/// Payment repository trait
#[trait_variant::make(PaymentRepository: Send)]
pub trait LocalPaymentRepository {
    /// Insert a payment record and credit the purchased coins in the
    /// same unit; returns the new balance
    async fn record_crediting(&self, payment: &Payment) -> MarketResult<i64>;

    /// A buyer's payment history, newest first
    async fn list_by_email(&self, email: &Email) -> MarketResult<Vec<Payment>>;

    /// Total cash a buyer has spent on coins
    async fn total_spent_by_email(&self, email: &Email) -> MarketResult<f64>;

    /// Total cash volume across all payments
    async fn total_volume(&self) -> MarketResult<f64>;
}

/// Notification repository trait
#[trait_variant::make(NotificationRepository: Send)]
pub trait LocalNotificationRepository {
    /// Append a notification (never mutated afterwards)
    async fn append(&self, notification: &Notification) -> MarketResult<()>;

    /// Notifications for a recipient, newest first
    async fn list_for_recipient(&self, recipient: &Email) -> MarketResult<Vec<Notification>>;
}

/// Everything a full marketplace store implements, for handler bounds
pub trait MarketRepository:
    LedgerRepository
    + AccountRepository
    + TaskRepository
    + SubmissionRepository
    + WithdrawalRepository
    + PaymentRepository
    + NotificationRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> MarketRepository for T where
    T: LedgerRepository
        + AccountRepository
        + TaskRepository
        + SubmissionRepository
        + WithdrawalRepository
        + PaymentRepository
        + NotificationRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
