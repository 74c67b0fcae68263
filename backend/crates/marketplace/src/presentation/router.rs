//! Marketplace Router

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use platform::mailer::Mailer;
use std::sync::Arc;

use crate::application::config::MarketConfig;
use crate::domain::repository::MarketRepository;
use crate::infra::postgres::PgMarketRepository;
use crate::presentation::handlers::{self, MarketAppState};

/// Create the marketplace router with the PostgreSQL repository
pub fn market_router<M>(repo: PgMarketRepository, mailer: M, config: MarketConfig) -> Router
where
    M: Mailer + Clone + Send + Sync + 'static,
{
    market_router_generic(repo, mailer, config)
}

/// Create a marketplace router for any repository implementation
pub fn market_router_generic<R, M>(repo: R, mailer: M, config: MarketConfig) -> Router
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = MarketAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    Router::new()
        // Accounts
        .route("/users/register", post(handlers::register::<R, M>))
        .route("/users/coins", get(handlers::get_balance::<R, M>))
        .route("/users/best", get(handlers::list_best_users::<R, M>))
        .route("/users/{email}", get(handlers::get_account::<R, M>))
        .route("/notifications", get(handlers::list_notifications::<R, M>))
        // Tasks
        .route("/tasks", post(handlers::create_task::<R, M>))
        .route("/tasks/open", get(handlers::list_open_tasks::<R, M>))
        .route("/tasks/mine", get(handlers::list_my_tasks::<R, M>))
        .route(
            "/tasks/{id}",
            get(handlers::get_task::<R, M>)
                .put(handlers::update_task::<R, M>)
                .delete(handlers::delete_task::<R, M>),
        )
        // Submissions
        .route(
            "/submissions",
            post(handlers::submit_work::<R, M>).get(handlers::list_my_submissions::<R, M>),
        )
        .route(
            "/submissions/review",
            get(handlers::list_review_queue::<R, M>),
        )
        .route(
            "/submissions/{id}/approve",
            patch(handlers::approve_submission::<R, M>),
        )
        .route(
            "/submissions/{id}/reject",
            patch(handlers::reject_submission::<R, M>),
        )
        // Withdrawals
        .route(
            "/withdrawals",
            post(handlers::request_withdrawal::<R, M>).get(handlers::list_my_withdrawals::<R, M>),
        )
        // Payments
        .route(
            "/payments",
            post(handlers::record_payment::<R, M>).get(handlers::list_payments::<R, M>),
        )
        // Stats
        .route("/stats/buyer", get(handlers::buyer_stats::<R, M>))
        .route("/stats/worker", get(handlers::worker_stats::<R, M>))
        // Admin
        .route("/admin/users", get(handlers::list_users::<R, M>))
        .route(
            "/admin/users/{id}/role",
            patch(handlers::set_user_role::<R, M>),
        )
        .route("/admin/users/{id}", delete(handlers::delete_user::<R, M>))
        .route("/admin/tasks", get(handlers::list_all_tasks::<R, M>))
        .route("/admin/tasks/{id}", delete(handlers::delete_task::<R, M>))
        .route(
            "/admin/withdrawals",
            get(handlers::list_withdrawals::<R, M>),
        )
        .route(
            "/admin/withdrawals/{id}/approve",
            patch(handlers::approve_withdrawal::<R, M>),
        )
        .route("/admin/stats", get(handlers::admin_stats::<R, M>))
        .with_state(state)
}
