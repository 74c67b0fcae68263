//! Approve Withdrawal Use Case
//!
//! An admin settles a pending withdrawal. The worker's balance is
//! re-checked by the guarded debit: coins spent since the request make
//! the approval fail and the request stays pending.

use kernel::id::WithdrawalId;
use platform::client::CallerClaims;
use platform::mailer::Mailer;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::authorize::authorize;
use crate::application::config::MarketConfig;
use crate::application::notify::Notifier;
use crate::domain::entity::withdrawal::Withdrawal;
use crate::domain::repository::{AccountRepository, NotificationRepository, WithdrawalRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::MarketResult;

/// Approve withdrawal use case
pub struct ApproveWithdrawalUseCase<A, W, N, M>
where
    A: AccountRepository,
    W: WithdrawalRepository,
    N: NotificationRepository,
    M: Mailer,
{
    accounts: Arc<A>,
    withdrawals: Arc<W>,
    notifier: Arc<Notifier<N, M>>,
    config: Arc<MarketConfig>,
}

impl<A, W, N, M> ApproveWithdrawalUseCase<A, W, N, M>
where
    A: AccountRepository,
    W: WithdrawalRepository,
    N: NotificationRepository,
    M: Mailer,
{
    pub fn new(
        accounts: Arc<A>,
        withdrawals: Arc<W>,
        notifier: Arc<Notifier<N, M>>,
        config: Arc<MarketConfig>,
    ) -> Self {
        Self {
            accounts,
            withdrawals,
            notifier,
            config,
        }
    }

    pub async fn execute(
        &self,
        caller: &CallerClaims,
        withdrawal_id: Uuid,
    ) -> MarketResult<Withdrawal> {
        authorize(self.accounts.as_ref(), caller, UserRole::Admin).await?;

        // Status flip and debit commit together.
        let approved = self
            .withdrawals
            .approve_debiting(&WithdrawalId::from_uuid(withdrawal_id))
            .await?;

        self.notifier
            .in_app(
                &approved.worker_email,
                format!(
                    "Your withdrawal request for {} has been approved.",
                    approved.cash_amount
                ),
                &self.config.withdrawals_route,
            )
            .await;
        self.notifier
            .email(
                &approved.worker_email,
                "Withdrawal Request Approved",
                format!(
                    "Your withdrawal request for {} has been approved. The amount will be transferred to your {} account.",
                    approved.cash_amount, approved.payment_system
                ),
                format!(
                    "<p>Your withdrawal request for <b>{}</b> has been approved. The amount will be transferred to your <b>{}</b> account.</p>",
                    approved.cash_amount, approved.payment_system
                ),
            )
            .await;

        tracing::info!(
            withdrawal_id = %approved.withdrawal_id,
            worker = %approved.worker_email,
            coins = approved.coin_amount,
            "Withdrawal approved"
        );

        Ok(approved)
    }
}
