//! Client identification utilities
//!
//! Common functions for identifying callers via HTTP headers.
//!
//! The API sits behind an authentication gateway that verifies the
//! bearer token and forwards the caller's identity in trusted headers.
//! Handlers extract that identity here; role checks against the stored
//! account happen in the application layer.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Header carrying the verified caller e-mail, set by the auth gateway.
pub const CALLER_EMAIL_HEADER: &str = "x-auth-email";

/// Header carrying the caller's claimed role, set by the auth gateway.
pub const CALLER_ROLE_HEADER: &str = "x-auth-role";

/// Verified caller identity forwarded by the authentication gateway
///
/// The role claim is advisory only; every operation re-checks the role
/// stored on the account before acting on it.
#[derive(Debug, Clone)]
pub struct CallerClaims {
    /// Caller e-mail as asserted by the gateway
    pub email: String,
    /// Role claim from the token (re-verified against the database)
    pub role: Option<String>,
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
}

impl CallerClaims {
    /// Create caller claims
    pub fn new(email: String, role: Option<String>, ip: Option<IpAddr>) -> Self {
        Self { email, role, ip }
    }
}

/// Error when extracting caller identity
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdentityError {
    #[error("Missing required header: {0}")]
    MissingHeader(String),
}

/// Extract the caller identity from request headers
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `client_ip` - Client IP address (from connection or X-Forwarded-For)
///
/// ## Returns
/// * `Ok(CallerClaims)` - Successfully extracted identity
/// * `Err(IdentityError)` - Missing identity header
pub fn extract_caller(
    headers: &HeaderMap,
    client_ip: Option<IpAddr>,
) -> Result<CallerClaims, IdentityError> {
    let email = headers
        .get(CALLER_EMAIL_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| IdentityError::MissingHeader(CALLER_EMAIL_HEADER.to_string()))?;

    let role = headers
        .get(CALLER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Ok(CallerClaims::new(email.to_string(), role, client_ip))
}

/// Extract client IP address from headers
///
/// Checks X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    // Check X-Forwarded-For header (first IP in the list)
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    direct_ip
}
