//! HTTP Handlers
//!
//! Thin axum adapters: extract the caller identity, delegate to a use
//! case, shape the result into a DTO.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use platform::client::{CallerClaims, extract_caller, extract_client_ip};
use platform::mailer::Mailer;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::account_queries::{
    GetAccountUseCase, GetBalanceUseCase, ListAccountsUseCase, ListBestAccountsUseCase,
};
use crate::application::approve_withdrawal::ApproveWithdrawalUseCase;
use crate::application::config::MarketConfig;
use crate::application::create_task::{CreateTaskInput, CreateTaskUseCase};
use crate::application::delete_task::DeleteTaskUseCase;
use crate::application::moderate_accounts::{DeleteUserUseCase, SetUserRoleUseCase};
use crate::application::notification_queries::ListNotificationsUseCase;
use crate::application::notify::Notifier;
use crate::application::payments::{ListPaymentsUseCase, RecordPaymentInput, RecordPaymentUseCase};
use crate::application::register_account::{RegisterAccountInput, RegisterAccountUseCase};
use crate::application::request_withdrawal::{RequestWithdrawalInput, RequestWithdrawalUseCase};
use crate::application::review_submission::{ApproveSubmissionUseCase, RejectSubmissionUseCase};
use crate::application::stats::{AdminStatsUseCase, BuyerStatsUseCase, WorkerStatsUseCase};
use crate::application::submission_queries::{ListReviewQueueUseCase, ListWorkerSubmissionsUseCase};
use crate::application::submit_work::{SubmitWorkInput, SubmitWorkUseCase};
use crate::application::task_queries::{
    GetTaskUseCase, ListAllTasksUseCase, ListBuyerTasksUseCase, ListOpenTasksUseCase,
};
use crate::application::update_task::{UpdateTaskInput, UpdateTaskUseCase};
use crate::application::withdrawal_queries::{
    ListWithdrawalsUseCase, ListWorkerWithdrawalsUseCase,
};
use crate::domain::repository::MarketRepository;
use crate::error::MarketResult;
use crate::presentation::dto::{
    AccountResponse, AdminStatsResponse, BalanceResponse, BestUsersQuery, BuyerStatsResponse,
    CreateTaskRequest, EmailQuery, MessageResponse, NotificationResponse, PaymentResponse,
    RecordPaymentRequest, RecordPaymentResponse, RegisterRequest, RequestWithdrawalRequest,
    SetRoleRequest, SubmissionFilterQuery, SubmissionResponse, SubmitWorkRequest, TaskResponse,
    UpdateTaskRequest, WithdrawalResponse, WorkerStatsResponse,
};

/// Shared state for marketplace handlers
#[derive(Clone)]
pub struct MarketAppState<R, M>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<MarketConfig>,
}

impl<R, M> MarketAppState<R, M>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    fn notifier(&self) -> Arc<Notifier<R, M>> {
        Arc::new(Notifier::new(self.repo.clone(), self.mailer.clone()))
    }
}

fn caller(headers: &HeaderMap, addr: SocketAddr) -> MarketResult<CallerClaims> {
    let client_ip = extract_client_ip(headers, Some(addr.ip()));
    Ok(extract_caller(headers, client_ip)?)
}

// ============================================================================
// Accounts
// ============================================================================

/// POST /api/users/register
pub async fn register<R, M>(
    State(state): State<MarketAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> MarketResult<impl IntoResponse>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = RegisterAccountUseCase::new(state.repo.clone());
    let account = use_case
        .execute(RegisterAccountInput {
            name: req.name,
            email: req.email,
            role: req.role,
            photo_url: req.photo_url,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// GET /api/users/coins
pub async fn get_balance<R, M>(
    State(state): State<MarketAppState<R, M>>,
    Query(query): Query<EmailQuery>,
) -> MarketResult<Json<BalanceResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = GetBalanceUseCase::new(state.repo.clone());
    let coins = use_case.execute(&query.email).await?;

    Ok(Json(BalanceResponse { coins }))
}

/// GET /api/users/best
pub async fn list_best_users<R, M>(
    State(state): State<MarketAppState<R, M>>,
    Query(query): Query<BestUsersQuery>,
) -> MarketResult<Json<Vec<AccountResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ListBestAccountsUseCase::new(state.repo.clone(), state.config.clone());
    let accounts = use_case
        .execute(query.role.as_deref(), query.limit)
        .await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// GET /api/users/{email}
pub async fn get_account<R, M>(
    State(state): State<MarketAppState<R, M>>,
    Path(email): Path<String>,
) -> MarketResult<Json<AccountResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = GetAccountUseCase::new(state.repo.clone());
    let account = use_case.execute(&email).await?;

    Ok(Json(AccountResponse::from(account)))
}

/// GET /api/notifications
pub async fn list_notifications<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<NotificationResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListNotificationsUseCase::new(state.repo.clone(), state.repo.clone());
    let notifications = use_case.execute(&caller).await?;

    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Tasks
// ============================================================================

/// POST /api/tasks
pub async fn create_task<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Json(req): Json<CreateTaskRequest>,
) -> MarketResult<impl IntoResponse>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = CreateTaskUseCase::new(state.repo.clone(), state.repo.clone());
    let task = use_case
        .execute(
            &caller,
            CreateTaskInput {
                title: req.title,
                detail: req.detail,
                submission_info: req.submission_info,
                required_workers: req.required_workers,
                payable_amount: req.payable_amount,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// GET /api/tasks/open
pub async fn list_open_tasks<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<TaskResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListOpenTasksUseCase::new(state.repo.clone(), state.repo.clone());
    let tasks = use_case.execute(&caller).await?;

    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// GET /api/tasks/mine
pub async fn list_my_tasks<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<TaskResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListBuyerTasksUseCase::new(state.repo.clone(), state.repo.clone());
    let tasks = use_case.execute(&caller).await?;

    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// GET /api/tasks/{id}
pub async fn get_task<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Path(task_id): Path<Uuid>,
) -> MarketResult<Json<TaskResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = GetTaskUseCase::new(state.repo.clone(), state.repo.clone());
    let task = use_case.execute(&caller, task_id).await?;

    Ok(Json(TaskResponse::from(task)))
}

/// PUT /api/tasks/{id}
pub async fn update_task<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> MarketResult<Json<MessageResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = UpdateTaskUseCase::new(state.repo.clone(), state.repo.clone());
    use_case
        .execute(
            &caller,
            UpdateTaskInput {
                task_id,
                title: req.title,
                detail: req.detail,
                submission_info: req.submission_info,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Task updated successfully")))
}

/// DELETE /api/tasks/{id} and DELETE /api/admin/tasks/{id}
pub async fn delete_task<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Path(task_id): Path<Uuid>,
) -> MarketResult<Json<MessageResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = DeleteTaskUseCase::new(state.repo.clone(), state.repo.clone());
    use_case.execute(&caller, task_id).await?;

    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

// ============================================================================
// Submissions
// ============================================================================

/// POST /api/submissions
pub async fn submit_work<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Json(req): Json<SubmitWorkRequest>,
) -> MarketResult<impl IntoResponse>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = SubmitWorkUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.notifier(),
        state.config.clone(),
    );
    let submission = use_case
        .execute(
            &caller,
            SubmitWorkInput {
                task_id: req.task_id,
                details: req.submission_details,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(submission))))
}

/// GET /api/submissions
pub async fn list_my_submissions<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Query(query): Query<SubmissionFilterQuery>,
) -> MarketResult<Json<Vec<SubmissionResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListWorkerSubmissionsUseCase::new(state.repo.clone(), state.repo.clone());
    let submissions = use_case.execute(&caller, query.status.as_deref()).await?;

    Ok(Json(submissions.into_iter().map(Into::into).collect()))
}

/// GET /api/submissions/review
pub async fn list_review_queue<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<SubmissionResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListReviewQueueUseCase::new(state.repo.clone(), state.repo.clone());
    let submissions = use_case.execute(&caller).await?;

    Ok(Json(submissions.into_iter().map(Into::into).collect()))
}

/// PATCH /api/submissions/{id}/approve
pub async fn approve_submission<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Path(submission_id): Path<Uuid>,
) -> MarketResult<Json<SubmissionResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ApproveSubmissionUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.notifier(),
        state.config.clone(),
    );
    let submission = use_case.execute(&caller, submission_id).await?;

    Ok(Json(SubmissionResponse::from(submission)))
}

/// PATCH /api/submissions/{id}/reject
pub async fn reject_submission<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Path(submission_id): Path<Uuid>,
) -> MarketResult<Json<SubmissionResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = RejectSubmissionUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.notifier(),
        state.config.clone(),
    );
    let submission = use_case.execute(&caller, submission_id).await?;

    Ok(Json(SubmissionResponse::from(submission)))
}

// ============================================================================
// Withdrawals
// ============================================================================

/// POST /api/withdrawals
pub async fn request_withdrawal<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Json(req): Json<RequestWithdrawalRequest>,
) -> MarketResult<impl IntoResponse>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = RequestWithdrawalUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.notifier(),
        state.config.clone(),
    );
    let withdrawal = use_case
        .execute(
            &caller,
            RequestWithdrawalInput {
                coin_amount: req.withdrawal_coin,
                cash_amount: req.withdrawal_amount,
                payment_system: req.payment_system,
                account_number: req.account_number,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(WithdrawalResponse::from(withdrawal))))
}

/// GET /api/withdrawals
pub async fn list_my_withdrawals<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<WithdrawalResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListWorkerWithdrawalsUseCase::new(state.repo.clone(), state.repo.clone());
    let withdrawals = use_case.execute(&caller).await?;

    Ok(Json(withdrawals.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Payments
// ============================================================================

/// POST /api/payments
pub async fn record_payment<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Json(req): Json<RecordPaymentRequest>,
) -> MarketResult<impl IntoResponse>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = RecordPaymentUseCase::new(state.repo.clone(), state.repo.clone());
    let output = use_case
        .execute(
            &caller,
            RecordPaymentInput {
                coins: req.coins,
                price: req.price,
                transaction_id: req.transaction_id,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordPaymentResponse {
            payment: PaymentResponse::from(output.payment),
            new_balance: output.new_balance,
        }),
    ))
}

/// GET /api/payments
pub async fn list_payments<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<PaymentResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListPaymentsUseCase::new(state.repo.clone(), state.repo.clone());
    let payments = use_case.execute(&caller).await?;

    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Stats
// ============================================================================

/// GET /api/stats/buyer
pub async fn buyer_stats<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<BuyerStatsResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case =
        BuyerStatsUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());
    let stats = use_case.execute(&caller).await?;

    Ok(Json(BuyerStatsResponse::from(stats)))
}

/// GET /api/stats/worker
pub async fn worker_stats<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<WorkerStatsResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = WorkerStatsUseCase::new(state.repo.clone(), state.repo.clone());
    let stats = use_case.execute(&caller).await?;

    Ok(Json(WorkerStatsResponse::from(stats)))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/admin/users
pub async fn list_users<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<AccountResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListAccountsUseCase::new(state.repo.clone());
    let accounts = use_case.execute(&caller).await?;

    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// PATCH /api/admin/users/{id}/role
pub async fn set_user_role<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<SetRoleRequest>,
) -> MarketResult<Json<MessageResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = SetUserRoleUseCase::new(state.repo.clone());
    use_case.execute(&caller, user_id, &req.role).await?;

    Ok(Json(MessageResponse::new("User role updated successfully")))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Path(user_id): Path<Uuid>,
) -> MarketResult<Json<MessageResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = DeleteUserUseCase::new(state.repo.clone());
    use_case.execute(&caller, user_id).await?;

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// GET /api/admin/tasks
pub async fn list_all_tasks<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<TaskResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListAllTasksUseCase::new(state.repo.clone(), state.repo.clone());
    let tasks = use_case.execute(&caller).await?;

    Ok(Json(tasks.into_iter().map(Into::into).collect()))
}

/// GET /api/admin/withdrawals
pub async fn list_withdrawals<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<Vec<WithdrawalResponse>>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ListWithdrawalsUseCase::new(state.repo.clone(), state.repo.clone());
    let withdrawals = use_case.execute(&caller).await?;

    Ok(Json(withdrawals.into_iter().map(Into::into).collect()))
}

/// PATCH /api/admin/withdrawals/{id}/approve
pub async fn approve_withdrawal<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
    Path(withdrawal_id): Path<Uuid>,
) -> MarketResult<Json<WithdrawalResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = ApproveWithdrawalUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.notifier(),
        state.config.clone(),
    );
    let withdrawal = use_case.execute(&caller, withdrawal_id).await?;

    Ok(Json(WithdrawalResponse::from(withdrawal)))
}

/// GET /api/admin/stats
pub async fn admin_stats<R, M>(
    State(state): State<MarketAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<SocketAddr>,
) -> MarketResult<Json<AdminStatsResponse>>
where
    R: MarketRepository,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let caller = caller(&headers, addr)?;
    let use_case = AdminStatsUseCase::new(state.repo.clone(), state.repo.clone());
    let stats = use_case.execute(&caller).await?;

    Ok(Json(AdminStatsResponse::from(stats)))
}
