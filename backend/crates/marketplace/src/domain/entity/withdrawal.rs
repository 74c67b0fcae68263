//! Withdrawal Entity
//!
//! A worker's request to convert coins into a cash payout.

use chrono::{DateTime, Utc};
use kernel::id::WithdrawalId;
use std::fmt;

use crate::domain::value_object::email::Email;

/// Withdrawal request status; `Approved` is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WithdrawalStatus {
    #[default]
    Pending,
    Approved,
}

impl WithdrawalStatus {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Approved => "approved",
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Self {
        match code {
            "pending" => WithdrawalStatus::Pending,
            "approved" => WithdrawalStatus::Approved,
            _ => {
                tracing::error!("Invalid WithdrawalStatus code: {}", code);
                unreachable!("Invalid WithdrawalStatus code: {}", code)
            }
        }
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Withdrawal request entity
#[derive(Debug, Clone)]
pub struct Withdrawal {
    pub withdrawal_id: WithdrawalId,
    pub worker_email: Email,
    pub worker_name: String,
    /// Coins to debit at approval
    pub coin_amount: i64,
    /// Cash value paid out through the payment system
    pub cash_amount: f64,
    /// Payout destination system (e.g. bkash, paypal)
    pub payment_system: String,
    /// Destination account number
    pub account_number: String,
    pub status: WithdrawalStatus,
    pub requested_at: DateTime<Utc>,
}

impl Withdrawal {
    /// Create a pending withdrawal request
    pub fn new(
        worker_email: Email,
        worker_name: String,
        coin_amount: i64,
        cash_amount: f64,
        payment_system: String,
        account_number: String,
    ) -> Self {
        Self {
            withdrawal_id: WithdrawalId::new(),
            worker_email,
            worker_name,
            coin_amount,
            cash_amount,
            payment_system,
            account_number,
            status: WithdrawalStatus::Pending,
            requested_at: Utc::now(),
        }
    }
}
