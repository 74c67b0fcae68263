//! Application Configuration
//!
//! Configuration for the marketplace application layer.

/// Marketplace application configuration
///
/// Action routes are the frontend dashboard locations notifications
/// link to.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Worker dashboard route (earnings notifications)
    pub worker_home_route: String,
    /// Worker submissions route (rejection notifications)
    pub my_submissions_route: String,
    /// Buyer task-list route (new-submission notifications)
    pub my_tasks_route: String,
    /// Worker withdrawals route (approval notifications)
    pub withdrawals_route: String,
    /// Admin dashboard route (withdrawal-request notifications)
    pub admin_home_route: String,
    /// Default result size for the best-users leaderboard
    pub best_users_limit: i64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            worker_home_route: "/dashboard/worker-home".to_string(),
            my_submissions_route: "/dashboard/my-submissions".to_string(),
            my_tasks_route: "/dashboard/my-tasks".to_string(),
            withdrawals_route: "/dashboard/withdrawals".to_string(),
            admin_home_route: "/dashboard/admin-home".to_string(),
            best_users_limit: 10,
        }
    }
}
