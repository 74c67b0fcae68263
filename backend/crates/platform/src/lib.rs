//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Caller identity extraction from gateway-verified headers
//! - Outbound e-mail port (delivery is handled by an external relay)

pub mod client;
pub mod mailer;
