//! Payment Entity
//!
//! A completed coin purchase, recorded after the external payment flow
//! confirms the charge.

use chrono::{DateTime, Utc};
use kernel::id::PaymentId;

use crate::domain::value_object::email::Email;

/// Payment record entity
#[derive(Debug, Clone)]
pub struct Payment {
    pub payment_id: PaymentId,
    /// Buyer who purchased the coins
    pub email: Email,
    /// Coins credited
    pub coins: i64,
    /// Cash price charged by the payment provider
    pub price: f64,
    /// Provider-side transaction reference
    pub transaction_id: String,
    pub paid_at: DateTime<Utc>,
}

impl Payment {
    /// Record a confirmed coin purchase
    pub fn new(email: Email, coins: i64, price: f64, transaction_id: String) -> Self {
        Self {
            payment_id: PaymentId::new(),
            email,
            coins,
            price,
            transaction_id,
            paid_at: Utc::now(),
        }
    }
}
