//! Request Withdrawal Use Case
//!
//! A worker asks to convert coins into a cash payout. The balance
//! check here is a courtesy; the authoritative re-check happens at
//! approval time, so coins stay spendable until an admin acts.

use platform::client::CallerClaims;
use platform::mailer::Mailer;
use std::sync::Arc;

use crate::application::authorize::authorize;
use crate::application::config::MarketConfig;
use crate::application::notify::Notifier;
use crate::domain::entity::withdrawal::Withdrawal;
use crate::domain::repository::{AccountRepository, NotificationRepository, WithdrawalRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Request withdrawal input
pub struct RequestWithdrawalInput {
    pub coin_amount: i64,
    pub cash_amount: f64,
    pub payment_system: String,
    pub account_number: String,
}

/// Request withdrawal use case
pub struct RequestWithdrawalUseCase<A, W, N, M>
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

impl<A, W, N, M> RequestWithdrawalUseCase<A, W, N, M>
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
        input: RequestWithdrawalInput,
    ) -> MarketResult<Withdrawal> {
        let worker = authorize(self.accounts.as_ref(), caller, UserRole::Worker).await?;

        if input.coin_amount <= 0 {
            return Err(MarketError::Validation(
                "withdrawalCoin must be positive".into(),
            ));
        }
        let payment_system = input.payment_system.trim().to_string();
        let account_number = input.account_number.trim().to_string();
        if payment_system.is_empty() || account_number.is_empty() {
            return Err(MarketError::Validation(
                "paymentSystem and accountNumber are required".into(),
            ));
        }

        if worker.coins < input.coin_amount {
            return Err(MarketError::InsufficientFunds);
        }

        let withdrawal = Withdrawal::new(
            worker.email.clone(),
            worker.name.clone(),
            input.coin_amount,
            input.cash_amount,
            payment_system,
            account_number,
        );
        self.withdrawals.create(&withdrawal).await?;

        // Route the request to any admin inbox.
        if let Some(admin) = self.accounts.find_admin().await? {
            self.notifier
                .in_app(
                    &admin.email,
                    format!(
                        "{} requested a withdrawal of {} via {}",
                        withdrawal.worker_name, withdrawal.cash_amount, withdrawal.payment_system
                    ),
                    &self.config.admin_home_route,
                )
                .await;
            self.notifier
                .email(
                    &admin.email,
                    "New Withdrawal Request",
                    format!(
                        "{} has requested a withdrawal of {} via {}.",
                        withdrawal.worker_name, withdrawal.cash_amount, withdrawal.payment_system
                    ),
                    format!(
                        "<p>{} has requested a withdrawal of <b>{}</b> coins via <b>{}</b>.</p>\
                         <p>Please review and take appropriate action in the admin dashboard.</p>",
                        withdrawal.worker_name, withdrawal.coin_amount, withdrawal.payment_system
                    ),
                )
                .await;
        }

        tracing::info!(
            withdrawal_id = %withdrawal.withdrawal_id,
            worker = %withdrawal.worker_email,
            coins = withdrawal.coin_amount,
            "Withdrawal requested"
        );

        Ok(withdrawal)
    }
}
