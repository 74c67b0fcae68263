//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    account::Account, notification::Notification, payment::Payment, submission::Submission,
    task::Task, withdrawal::Withdrawal,
};
pub use repository::{
    AccountRepository, LedgerRepository, NotificationRepository, PaymentRepository,
    SubmissionRepository, TaskRepository, WithdrawalRepository,
};
