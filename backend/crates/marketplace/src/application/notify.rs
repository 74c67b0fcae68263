//! Notifier Service
//!
//! Fans workflow events out to the in-app notification store and the
//! e-mail transport. Both sides are fire-and-forget: a delivery
//! failure is logged and swallowed, never failing the workflow that
//! triggered it.

use platform::mailer::{EmailMessage, Mailer};
use std::sync::Arc;

use crate::domain::entity::notification::Notification;
use crate::domain::repository::NotificationRepository;
use crate::domain::value_object::email::Email;

/// Notification fan-out service
pub struct Notifier<N, M>
where
    N: NotificationRepository,
    M: Mailer,
{
    notifications: Arc<N>,
    mailer: Arc<M>,
}

impl<N, M> Notifier<N, M>
where
    N: NotificationRepository,
    M: Mailer,
{
    pub fn new(notifications: Arc<N>, mailer: Arc<M>) -> Self {
        Self {
            notifications,
            mailer,
        }
    }

    /// Store an in-app notification for `recipient`
    pub async fn in_app(&self, recipient: &Email, message: String, action_route: &str) {
        let notification = Notification::new(recipient.clone(), message, action_route);
        if let Err(e) = self.notifications.append(&notification).await {
            tracing::warn!(
                error = %e,
                recipient = %recipient,
                "Failed to store notification"
            );
        }
    }

    /// Hand an e-mail to the transport
    pub async fn email(&self, to: &Email, subject: &str, text: String, html: String) {
        let message = EmailMessage::new(to.as_str(), subject, text, html);
        if let Err(e) = self.mailer.send(message).await {
            tracing::warn!(error = %e, to = %to, "Failed to send e-mail");
        }
    }
}
