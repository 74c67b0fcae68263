//! Common ID Types
//!
//! Type-safe ID wrappers for domain entities.

use std::fmt;
use std::marker::PhantomData;
use uuid::Uuid;

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, markers};
/// type TaskId = Id<markers::Task>;
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: uuid::Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random ID (UUID v4)
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }

    /// Create from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            value: uuid,
            _marker: PhantomData,
        }
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.value
    }

    /// Convert to UUID
    pub fn into_uuid(self) -> Uuid {
        self.value
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<Uuid> for Id<T> {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

impl<T> From<Id<T>> for Uuid {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

/// Marker types for different entity IDs
pub mod markers {
    /// Marker for user account IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct User;

    /// Marker for task IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Task;

    /// Marker for submission IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Submission;

    /// Marker for withdrawal request IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Withdrawal;

    /// Marker for payment record IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Payment;

    /// Marker for notification IDs
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Notification;
}

/// Type aliases for common IDs
pub type UserId = Id<markers::User>;
pub type TaskId = Id<markers::Task>;
pub type SubmissionId = Id<markers::Submission>;
pub type WithdrawalId = Id<markers::Withdrawal>;
pub type PaymentId = Id<markers::Payment>;
pub type NotificationId = Id<markers::Notification>;
