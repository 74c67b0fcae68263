//! Marketplace Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Buyer-posted micro tasks paid in a virtual coin currency
//! - Worker submissions with buyer approval/rejection
//! - Coin withdrawals with admin settlement
//! - Coin purchases recorded from the external payment flow
//! - In-app notifications and outbound e-mail events
//!
//! ## Consistency Model
//! - Coin balances move only through guarded conditional updates and
//!   never go negative
//! - Task slots are test-and-decremented; two workers cannot race past
//!   the last slot
//! - Approve/reject/settle transitions are guarded on `pending`, so a
//!   retry can never pay twice
//! - Coupled mutations (debit + insert, flip + credit, delete + refund)
//!   share one database transaction

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::MarketConfig;
pub use error::{MarketError, MarketResult};
pub use infra::postgres::PgMarketRepository;
pub use presentation::router::market_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgMarketRepository as MarketStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
