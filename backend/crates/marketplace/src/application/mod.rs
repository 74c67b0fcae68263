//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod account_queries;
pub mod approve_withdrawal;
pub mod authorize;
pub mod config;
pub mod create_task;
pub mod delete_task;
pub mod moderate_accounts;
pub mod notification_queries;
pub mod notify;
pub mod payments;
pub mod register_account;
pub mod request_withdrawal;
pub mod review_submission;
pub mod stats;
pub mod submission_queries;
pub mod submit_work;
pub mod task_queries;
pub mod update_task;
pub mod withdrawal_queries;

// Re-exports
pub use authorize::{authorize, authorize_any, load_caller};
pub use config::MarketConfig;
pub use create_task::{CreateTaskInput, CreateTaskUseCase};
pub use delete_task::DeleteTaskUseCase;
pub use notify::Notifier;
pub use register_account::{RegisterAccountInput, RegisterAccountUseCase};
pub use review_submission::{ApproveSubmissionUseCase, RejectSubmissionUseCase};
pub use submit_work::{SubmitWorkInput, SubmitWorkUseCase};
pub use update_task::{UpdateTaskInput, UpdateTaskUseCase};
