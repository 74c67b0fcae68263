//! Task Entity
//!
//! A buyer-posted unit of work with a fixed per-worker payout and a
//! remaining-slot counter.

use chrono::{DateTime, Utc};
use kernel::id::TaskId;
use std::fmt;

use crate::domain::value_object::email::Email;

/// Task lifecycle status
///
/// `Completed` is reached when the last worker slot is consumed; a
/// later rejection restores the slot and reopens the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Self {
        match code {
            "pending" => TaskStatus::Pending,
            "completed" => TaskStatus::Completed,
            _ => {
                tracing::error!("Invalid TaskStatus code: {}", code);
                unreachable!("Invalid TaskStatus code: {}", code)
            }
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Task entity
#[derive(Debug, Clone)]
pub struct Task {
    pub task_id: TaskId,
    /// Owning buyer (canonical e-mail)
    pub buyer_email: Email,
    /// Buyer display name, denormalized for listings
    pub buyer_name: String,
    pub title: String,
    pub detail: String,
    /// What the worker must hand in as proof
    pub submission_info: String,
    /// Remaining worker slots, never negative
    pub required_workers: i64,
    /// Coins paid per approved submission
    pub payable_amount: i64,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new open task
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        buyer_email: Email,
        buyer_name: String,
        title: String,
        detail: String,
        submission_info: String,
        required_workers: i64,
        payable_amount: i64,
    ) -> Self {
        Self {
            task_id: TaskId::new(),
            buyer_email,
            buyer_name,
            title,
            detail,
            submission_info,
            required_workers,
            payable_amount,
            status: TaskStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Coins reserved from the buyer to cover every remaining slot
    pub fn reserve(&self) -> i64 {
        self.required_workers * self.payable_amount
    }

    /// Whether a worker can still submit against this task
    pub fn is_open(&self) -> bool {
        self.required_workers > 0 && self.status != TaskStatus::Completed
    }
}
