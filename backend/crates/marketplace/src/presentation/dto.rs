//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::stats::{AdminStats, BuyerStats, WorkerStats};
use crate::domain::entity::{
    account::Account, notification::Notification, payment::Payment, submission::Submission,
    task::Task, withdrawal::Withdrawal,
};

// ============================================================================
// Accounts
// ============================================================================

/// Request for POST /api/users/register
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Account representation returned by user endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub coins: i64,
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            user_id: account.user_id.into_uuid(),
            name: account.name,
            email: account.email.into_db(),
            role: account.role.code().to_string(),
            coins: account.coins,
            photo_url: account.photo_url,
            created_at: account.created_at,
        }
    }
}

/// Response for GET /api/users/coins
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub coins: i64,
}

/// Query for GET /api/users/best
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestUsersQuery {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Query for GET /api/users/coins
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailQuery {
    pub email: String,
}

/// Request for PATCH /api/admin/users/{id}/role
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRoleRequest {
    pub role: String,
}

// ============================================================================
// Tasks
// ============================================================================

/// Request for POST /api/tasks
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub detail: String,
    #[serde(default)]
    pub submission_info: String,
    pub required_workers: i64,
    pub payable_amount: i64,
}

/// Request for PUT /api/tasks/{id}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: String,
    pub detail: String,
    pub submission_info: String,
}

/// Task representation returned by task endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub task_id: Uuid,
    pub buyer_email: String,
    pub buyer_name: String,
    pub title: String,
    pub detail: String,
    pub submission_info: String,
    pub required_workers: i64,
    pub payable_amount: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            task_id: task.task_id.into_uuid(),
            buyer_email: task.buyer_email.into_db(),
            buyer_name: task.buyer_name,
            title: task.title,
            detail: task.detail,
            submission_info: task.submission_info,
            required_workers: task.required_workers,
            payable_amount: task.payable_amount,
            status: task.status.code().to_string(),
            created_at: task.created_at,
        }
    }
}

// ============================================================================
// Submissions
// ============================================================================

/// Request for POST /api/submissions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWorkRequest {
    pub task_id: Uuid,
    pub submission_details: String,
}

/// Query for GET /api/submissions
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFilterQuery {
    #[serde(default)]
    pub status: Option<String>,
}

/// Submission representation returned by submission endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub submission_id: Uuid,
    pub task_id: Uuid,
    pub worker_email: String,
    pub worker_name: String,
    pub submission_details: String,
    pub buyer_email: String,
    pub buyer_name: String,
    pub task_title: String,
    pub payable_amount: i64,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            submission_id: submission.submission_id.into_uuid(),
            task_id: submission.task_id.into_uuid(),
            worker_email: submission.worker_email.into_db(),
            worker_name: submission.worker_name,
            submission_details: submission.details,
            buyer_email: submission.buyer_email.into_db(),
            buyer_name: submission.buyer_name,
            task_title: submission.task_title,
            payable_amount: submission.payable_amount,
            status: submission.status.code().to_string(),
            submitted_at: submission.submitted_at,
        }
    }
}

// ============================================================================
// Withdrawals
// ============================================================================

/// Request for POST /api/withdrawals
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestWithdrawalRequest {
    pub withdrawal_coin: i64,
    pub withdrawal_amount: f64,
    pub payment_system: String,
    pub account_number: String,
}

/// Withdrawal representation returned by withdrawal endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalResponse {
    pub withdrawal_id: Uuid,
    pub worker_email: String,
    pub worker_name: String,
    pub withdrawal_coin: i64,
    pub withdrawal_amount: f64,
    pub payment_system: String,
    pub account_number: String,
    pub status: String,
    pub requested_at: DateTime<Utc>,
}

impl From<Withdrawal> for WithdrawalResponse {
    fn from(withdrawal: Withdrawal) -> Self {
        Self {
            withdrawal_id: withdrawal.withdrawal_id.into_uuid(),
            worker_email: withdrawal.worker_email.into_db(),
            worker_name: withdrawal.worker_name,
            withdrawal_coin: withdrawal.coin_amount,
            withdrawal_amount: withdrawal.cash_amount,
            payment_system: withdrawal.payment_system,
            account_number: withdrawal.account_number,
            status: withdrawal.status.code().to_string(),
            requested_at: withdrawal.requested_at,
        }
    }
}

// ============================================================================
// Payments
// ============================================================================

/// Request for POST /api/payments
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub coins: i64,
    pub price: f64,
    pub transaction_id: String,
}

/// Payment representation returned by payment endpoints
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub payment_id: Uuid,
    pub email: String,
    pub coins: i64,
    pub price: f64,
    pub transaction_id: String,
    pub paid_at: DateTime<Utc>,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            payment_id: payment.payment_id.into_uuid(),
            email: payment.email.into_db(),
            coins: payment.coins,
            price: payment.price,
            transaction_id: payment.transaction_id,
            paid_at: payment.paid_at,
        }
    }
}

/// Response for POST /api/payments
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentResponse {
    pub payment: PaymentResponse,
    pub new_balance: i64,
}

// ============================================================================
// Notifications
// ============================================================================

/// Notification representation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification_id: Uuid,
    pub message: String,
    pub action_route: String,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self {
            notification_id: notification.notification_id.into_uuid(),
            message: notification.message,
            action_route: notification.action_route,
            created_at: notification.created_at,
        }
    }
}

// ============================================================================
// Stats
// ============================================================================

/// Response for GET /api/stats/buyer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerStatsResponse {
    pub total_tasks: i64,
    pub pending_tasks: i64,
    pub total_payments: f64,
}

impl From<BuyerStats> for BuyerStatsResponse {
    fn from(stats: BuyerStats) -> Self {
        Self {
            total_tasks: stats.total_tasks,
            pending_tasks: stats.pending_slots,
            total_payments: stats.total_payments,
        }
    }
}

/// Response for GET /api/stats/worker
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatsResponse {
    pub total_submissions: i64,
    pub pending_submissions: i64,
    pub total_earnings: i64,
}

impl From<WorkerStats> for WorkerStatsResponse {
    fn from(stats: WorkerStats) -> Self {
        Self {
            total_submissions: stats.total_submissions,
            pending_submissions: stats.pending_submissions,
            total_earnings: stats.total_earnings,
        }
    }
}

/// Response for GET /api/admin/stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStatsResponse {
    pub total_workers: i64,
    pub total_buyers: i64,
    pub total_coins: i64,
    pub total_payments: f64,
}

impl From<AdminStats> for AdminStatsResponse {
    fn from(stats: AdminStats) -> Self {
        Self {
            total_workers: stats.total_workers,
            total_buyers: stats.total_buyers,
            total_coins: stats.total_coins,
            total_payments: stats.total_payments,
        }
    }
}

// ============================================================================
// Generic
// ============================================================================

/// Plain confirmation message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
