//! Notification Query Use Cases

use platform::client::CallerClaims;
use std::sync::Arc;

use crate::application::authorize::load_caller;
use crate::domain::entity::notification::Notification;
use crate::domain::repository::{AccountRepository, NotificationRepository};
use crate::error::MarketResult;

/// The caller's own notifications, newest first
pub struct ListNotificationsUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationRepository,
{
    accounts: Arc<A>,
    notifications: Arc<N>,
}

impl<A, N> ListNotificationsUseCase<A, N>
where
    A: AccountRepository,
    N: NotificationRepository,
{
    pub fn new(accounts: Arc<A>, notifications: Arc<N>) -> Self {
        Self {
            accounts,
            notifications,
        }
    }

    pub async fn execute(&self, caller: &CallerClaims) -> MarketResult<Vec<Notification>> {
        let account = load_caller(self.accounts.as_ref(), caller).await?;
        self.notifications.list_for_recipient(&account.email).await
    }
}
