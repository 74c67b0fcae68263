//! Payment Use Cases
//!
//! Records confirmed coin purchases. Payment-intent creation and card
//! processing live with the external payment provider; this only
//! consumes the confirmed result and credits the ledger.

use platform::client::CallerClaims;
use std::sync::Arc;

use crate::application::authorize::authorize;
use crate::domain::entity::payment::Payment;
use crate::domain::repository::{AccountRepository, PaymentRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Record payment input
pub struct RecordPaymentInput {
    pub coins: i64,
    pub price: f64,
    pub transaction_id: String,
}

/// Record payment output
pub struct RecordPaymentOutput {
    pub payment: Payment,
    pub new_balance: i64,
}

/// Record payment use case
pub struct RecordPaymentUseCase<A, P>
where
    A: AccountRepository,
    P: PaymentRepository,
{
    accounts: Arc<A>,
    payments: Arc<P>,
}

impl<A, P> RecordPaymentUseCase<A, P>
where
    A: AccountRepository,
    P: PaymentRepository,
{
    pub fn new(accounts: Arc<A>, payments: Arc<P>) -> Self {
        Self { accounts, payments }
    }

    pub async fn execute(
        &self,
        caller: &CallerClaims,
        input: RecordPaymentInput,
    ) -> MarketResult<RecordPaymentOutput> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;

        if input.coins <= 0 {
            return Err(MarketError::Validation("coins must be positive".into()));
        }
        let transaction_id = input.transaction_id.trim().to_string();
        if transaction_id.is_empty() {
            return Err(MarketError::Validation("transactionId is required".into()));
        }

        // Credit goes to the verified caller, never a body-supplied address.
        let payment = Payment::new(buyer.email.clone(), input.coins, input.price, transaction_id);
        let new_balance = self.payments.record_crediting(&payment).await?;

        tracing::info!(
            payment_id = %payment.payment_id,
            buyer = %payment.email,
            coins = payment.coins,
            "Payment recorded"
        );

        Ok(RecordPaymentOutput {
            payment,
            new_balance,
        })
    }
}

/// List payments use case
pub struct ListPaymentsUseCase<A, P>
where
    A: AccountRepository,
    P: PaymentRepository,
{
    accounts: Arc<A>,
    payments: Arc<P>,
}

impl<A, P> ListPaymentsUseCase<A, P>
where
    A: AccountRepository,
    P: PaymentRepository,
{
    pub fn new(accounts: Arc<A>, payments: Arc<P>) -> Self {
        Self { accounts, payments }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Payment>> {
        let buyer = authorize(self.accounts.as_ref(), caller, UserRole::Buyer).await?;
        self.payments.list_by_email(&buyer.email).await
    }
}
