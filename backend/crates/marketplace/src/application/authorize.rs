//! Authorization
//!
//! One capability check used by every operation. The gateway-supplied
//! role claim is advisory; the role stored on the account decides.

use platform::client::CallerClaims;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, user_role::UserRole};
use crate::error::{MarketError, MarketResult};

/// Load the caller's account by canonical e-mail
///
/// Use when an operation only needs an authenticated identity, not a
/// specific role.
pub async fn load_caller<A>(accounts: &A, caller: &CallerClaims) -> MarketResult<Account>
where
    A: AccountRepository,
{
    let email = Email::new(caller.email.as_str())?;
    let account = accounts
        .find_by_email(&email)
        .await?
        .ok_or(MarketError::UserNotFound)?;

    // A stale token role is worth knowing about, but the stored role wins.
    if let Some(claimed) = caller.role.as_deref() {
        if claimed != account.role.code() {
            tracing::warn!(
                email = %account.email,
                claimed = %claimed,
                stored = %account.role,
                "Caller role claim differs from stored role"
            );
        }
    }

    Ok(account)
}

/// Require the caller to hold exactly `required`
pub async fn authorize<A>(
    accounts: &A,
    caller: &CallerClaims,
    required: UserRole,
) -> MarketResult<Account>
where
    A: AccountRepository,
{
    let account = load_caller(accounts, caller).await?;
    if account.role != required {
        return Err(MarketError::Forbidden(role_message(required)));
    }
    Ok(account)
}

/// Require the caller to hold one of `allowed`
pub async fn authorize_any<A>(
    accounts: &A,
    caller: &CallerClaims,
    allowed: &[UserRole],
) -> MarketResult<Account>
where
    A: AccountRepository,
{
    let account = load_caller(accounts, caller).await?;
    if !allowed.contains(&account.role) {
        return Err(MarketError::Forbidden("caller role not permitted"));
    }
    Ok(account)
}

const fn role_message(role: UserRole) -> &'static str {
    match role {
        UserRole::Worker => "worker role required",
        UserRole::Buyer => "buyer role required",
        UserRole::Admin => "admin role required",
    }
}
