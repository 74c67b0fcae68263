//! Notification Entity
//!
//! Append-only in-app notification; never mutated after insert.

use chrono::{DateTime, Utc};
use kernel::id::NotificationId;

use crate::domain::value_object::email::Email;

/// In-app notification entity
#[derive(Debug, Clone)]
pub struct Notification {
    pub notification_id: NotificationId,
    pub recipient: Email,
    pub message: String,
    /// Frontend route the notification links to
    pub action_route: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a notification addressed to `recipient`
    pub fn new(recipient: Email, message: String, action_route: impl Into<String>) -> Self {
        Self {
            notification_id: NotificationId::new(),
            recipient,
            message,
            action_route: action_route.into(),
            created_at: Utc::now(),
        }
    }
}
