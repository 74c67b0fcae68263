//! Submission Entity
//!
//! A worker's claim against one task slot. Carries a snapshot of the
//! task fields taken at submission time, so later task edits or
//! deletion do not rewrite a worker's history.

use chrono::{DateTime, Utc};
use kernel::id::{SubmissionId, TaskId};
use std::fmt;

use crate::domain::entity::task::Task;
use crate::domain::value_object::email::Email;

/// Submission review status
///
/// `Approved` and `Rejected` are terminal; a submission is reviewed at
/// most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Self {
        match code {
            "pending" => SubmissionStatus::Pending,
            "approved" => SubmissionStatus::Approved,
            "rejected" => SubmissionStatus::Rejected,
            _ => {
                tracing::error!("Invalid SubmissionStatus code: {}", code);
                unreachable!("Invalid SubmissionStatus code: {}", code)
            }
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionStatus::Pending)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Submission entity
#[derive(Debug, Clone)]
pub struct Submission {
    pub submission_id: SubmissionId,
    pub task_id: TaskId,
    pub worker_email: Email,
    pub worker_name: String,
    /// Proof of work handed in by the worker
    pub details: String,
    /// Snapshot: task owner at submission time
    pub buyer_email: Email,
    /// Snapshot: owner display name
    pub buyer_name: String,
    /// Snapshot: task title
    pub task_title: String,
    /// Snapshot: payout for this slot
    pub payable_amount: i64,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Create a pending submission snapshotting the task's payout fields
    pub fn new(task: &Task, worker_email: Email, worker_name: String, details: String) -> Self {
        Self {
            submission_id: SubmissionId::new(),
            task_id: task.task_id,
            worker_email,
            worker_name,
            details,
            buyer_email: task.buyer_email.clone(),
            buyer_name: task.buyer_name.clone(),
            task_title: task.title.clone(),
            payable_amount: task.payable_amount,
            status: SubmissionStatus::Pending,
            submitted_at: Utc::now(),
        }
    }
}
