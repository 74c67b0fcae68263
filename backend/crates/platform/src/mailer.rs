//! Outbound e-mail port
//!
//! The platform does not deliver mail itself; an external relay does.
//! This module defines the message shape and the [`Mailer`] trait the
//! application layer sends through, plus a tracing-backed
//! implementation for environments without a relay.

/// An outbound e-mail message
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl EmailMessage {
    /// Create a message with both plain-text and HTML bodies
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        text: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            text: text.into(),
            html: html.into(),
        }
    }
}

/// Error from the mail transport
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(String),
}

/// Mail transport trait
#[trait_variant::make(Mailer: Send)]
pub trait LocalMailer {
    /// Hand a message to the transport
    async fn send(&self, message: EmailMessage) -> Result<(), MailError>;
}

/// Mailer that logs outbound messages instead of delivering them
///
/// Used in development and in deployments where delivery is handled by
/// a relay consuming the log stream.
#[derive(Debug, Clone, Default)]
pub struct TracingMailer;

impl Mailer for TracingMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            "Outbound e-mail"
        );
        tracing::debug!(text = %message.text, "Outbound e-mail body");
        Ok(())
    }
}
