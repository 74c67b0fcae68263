//! Account Moderation Use Cases (admin)

use kernel::id::UserId;
use platform::client::CallerClaims;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::authorize::authorize;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{MarketError, MarketResult};

/// Set user role use case
pub struct SetUserRoleUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
}

impl<A> SetUserRoleUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(
        &self,
        caller: &CallerClaims,
        user_id: Uuid,
        role: &str,
    ) -> MarketResult<()> {
        let admin = authorize(self.accounts.as_ref(), caller, UserRole::Admin).await?;

        let role = UserRole::from_code(role.trim())
            .ok_or_else(|| MarketError::Validation("invalid role".into()))?;

        let user_id = UserId::from_uuid(user_id);
        self.accounts.set_role(&user_id, role).await?;

        tracing::info!(
            user_id = %user_id,
            role = %role,
            changed_by = %admin.email,
            "User role updated"
        );

        Ok(())
    }
}

/// Delete user use case
///
/// Refused while the user still owns open tasks or has pending
/// submissions; settle or delete those first.
pub struct DeleteUserUseCase<A>
where
    A: AccountRepository,
{
    accounts: Arc<A>,
}

impl<A> DeleteUserUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }

    pub async fn execute(&self, caller: &CallerClaims, user_id: Uuid) -> MarketResult<()> {
        let admin = authorize(self.accounts.as_ref(), caller, UserRole::Admin).await?;

        let user_id = UserId::from_uuid(user_id);
        self.accounts.delete(&user_id).await?;

        tracing::info!(
            user_id = %user_id,
            deleted_by = %admin.email,
            "User deleted"
        );

        Ok(())
    }
}
