//! Unit tests for the marketplace crate
//!
//! Workflow coverage runs the use cases against an in-memory
//! repository whose compound operations keep the same all-or-nothing
//! semantics as the PostgreSQL implementation.

#[cfg(test)]
mod memory {
    //! In-memory repository for exercising the workflows

    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    use kernel::id::{SubmissionId, TaskId, UserId, WithdrawalId};

    use crate::domain::entity::{
        account::Account,
        notification::Notification,
        payment::Payment,
        submission::{Submission, SubmissionStatus},
        task::{Task, TaskStatus},
        withdrawal::{Withdrawal, WithdrawalStatus},
    };
    use crate::domain::repository::{
        AccountRepository, LedgerRepository, NotificationRepository, PaymentRepository,
        SubmissionRepository, TaskRepository, WithdrawalRepository,
    };
    use crate::domain::value_object::{email::Email, user_role::UserRole};
    use crate::error::{MarketError, MarketResult};

    #[derive(Default)]
    struct MemState {
        accounts: HashMap<String, Account>,
        tasks: HashMap<Uuid, Task>,
        submissions: HashMap<Uuid, Submission>,
        withdrawals: HashMap<Uuid, Withdrawal>,
        payments: Vec<Payment>,
        notifications: Vec<Notification>,
    }

    impl MemState {
        fn adjust(&mut self, email: &Email, delta: i64) -> MarketResult<i64> {
            let account = self
                .accounts
                .get_mut(email.as_str())
                .ok_or(MarketError::UserNotFound)?;
            if account.coins + delta < 0 {
                return Err(MarketError::InsufficientFunds);
            }
            account.coins += delta;
            Ok(account.coins)
        }
    }

    /// Map-backed repository; each method body is one critical section,
    /// matching the per-transaction isolation of the real store.
    #[derive(Clone, Default)]
    pub struct MemMarketRepository {
        state: Arc<Mutex<MemState>>,
    }

    impl LedgerRepository for MemMarketRepository {
        async fn adjust(&self, email: &Email, delta: i64) -> MarketResult<i64> {
            self.state.lock().unwrap().adjust(email, delta)
        }

        async fn balance(&self, email: &Email) -> MarketResult<i64> {
            let state = self.state.lock().unwrap();
            state
                .accounts
                .get(email.as_str())
                .map(|a| a.coins)
                .ok_or(MarketError::UserNotFound)
        }
    }

    impl AccountRepository for MemMarketRepository {
        async fn create(&self, account: &Account) -> MarketResult<()> {
            let mut state = self.state.lock().unwrap();
            if state.accounts.contains_key(account.email.as_str()) {
                return Err(MarketError::EmailTaken);
            }
            state
                .accounts
                .insert(account.email.as_str().to_string(), account.clone());
            Ok(())
        }

        async fn find_by_email(&self, email: &Email) -> MarketResult<Option<Account>> {
            let state = self.state.lock().unwrap();
            Ok(state.accounts.get(email.as_str()).cloned())
        }

        async fn exists_by_email(&self, email: &Email) -> MarketResult<bool> {
            let state = self.state.lock().unwrap();
            Ok(state.accounts.contains_key(email.as_str()))
        }

        async fn list_all(&self) -> MarketResult<Vec<Account>> {
            let state = self.state.lock().unwrap();
            Ok(state.accounts.values().cloned().collect())
        }

        async fn list_best(
            &self,
            role: Option<UserRole>,
            limit: i64,
        ) -> MarketResult<Vec<Account>> {
            let state = self.state.lock().unwrap();
            let mut accounts: Vec<Account> = state
                .accounts
                .values()
                .filter(|a| role.is_none_or(|r| a.role == r))
                .cloned()
                .collect();
            accounts.sort_by(|a, b| b.coins.cmp(&a.coins));
            accounts.truncate(limit as usize);
            Ok(accounts)
        }

        async fn set_role(&self, user_id: &UserId, role: UserRole) -> MarketResult<()> {
            let mut state = self.state.lock().unwrap();
            let account = state
                .accounts
                .values_mut()
                .find(|a| a.user_id == *user_id)
                .ok_or(MarketError::UserNotFound)?;
            account.role = role;
            Ok(())
        }

        async fn delete(&self, user_id: &UserId) -> MarketResult<()> {
            let mut state = self.state.lock().unwrap();
            let email = state
                .accounts
                .values()
                .find(|a| a.user_id == *user_id)
                .map(|a| a.email.as_str().to_string())
                .ok_or(MarketError::UserNotFound)?;

            let has_open_tasks = state
                .tasks
                .values()
                .any(|t| t.buyer_email.as_str() == email && t.required_workers > 0);
            let has_pending_submissions = state.submissions.values().any(|s| {
                s.worker_email.as_str() == email && s.status == SubmissionStatus::Pending
            });
            if has_open_tasks || has_pending_submissions {
                return Err(MarketError::UserReferenced);
            }

            state.accounts.remove(&email);
            Ok(())
        }

        async fn find_admin(&self) -> MarketResult<Option<Account>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .accounts
                .values()
                .find(|a| a.role == UserRole::Admin)
                .cloned())
        }

        async fn count_by_role(&self, role: UserRole) -> MarketResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state.accounts.values().filter(|a| a.role == role).count() as i64)
        }

        async fn total_coins(&self) -> MarketResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state.accounts.values().map(|a| a.coins).sum())
        }
    }

    impl TaskRepository for MemMarketRepository {
        async fn create_reserving(&self, task: &Task) -> MarketResult<()> {
            let mut state = self.state.lock().unwrap();
            state.adjust(&task.buyer_email, -task.reserve())?;
            state.tasks.insert(task.task_id.into_uuid(), task.clone());
            Ok(())
        }

        async fn find_by_id(&self, task_id: &TaskId) -> MarketResult<Option<Task>> {
            let state = self.state.lock().unwrap();
            Ok(state.tasks.get(task_id.as_uuid()).cloned())
        }

        async fn update_content(
            &self,
            task_id: &TaskId,
            title: &str,
            detail: &str,
            submission_info: &str,
        ) -> MarketResult<()> {
            let mut state = self.state.lock().unwrap();
            let task = state
                .tasks
                .get_mut(task_id.as_uuid())
                .ok_or(MarketError::TaskNotFound)?;
            task.title = title.to_string();
            task.detail = detail.to_string();
            task.submission_info = submission_info.to_string();
            Ok(())
        }

        async fn delete_refunding(&self, task_id: &TaskId) -> MarketResult<Task> {
            let mut state = self.state.lock().unwrap();
            let task = state
                .tasks
                .remove(task_id.as_uuid())
                .ok_or(MarketError::TaskNotFound)?;
            let refund = task.reserve();
            if refund > 0 {
                state.adjust(&task.buyer_email, refund)?;
            }
            Ok(task)
        }

        async fn list_open(&self) -> MarketResult<Vec<Task>> {
            let state = self.state.lock().unwrap();
            Ok(state.tasks.values().filter(|t| t.is_open()).cloned().collect())
        }

        async fn list_by_buyer(&self, buyer: &Email) -> MarketResult<Vec<Task>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .tasks
                .values()
                .filter(|t| t.buyer_email == *buyer)
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> MarketResult<Vec<Task>> {
            let state = self.state.lock().unwrap();
            Ok(state.tasks.values().cloned().collect())
        }

        async fn count_by_buyer(&self, buyer: &Email) -> MarketResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state.tasks.values().filter(|t| t.buyer_email == *buyer).count() as i64)
        }

        async fn open_slots_by_buyer(&self, buyer: &Email) -> MarketResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state
                .tasks
                .values()
                .filter(|t| t.buyer_email == *buyer)
                .map(|t| t.required_workers)
                .sum())
        }
    }

    impl SubmissionRepository for MemMarketRepository {
        async fn create_consuming_slot(&self, submission: &Submission) -> MarketResult<()> {
            let mut state = self.state.lock().unwrap();

            let task = state
                .tasks
                .get(submission.task_id.as_uuid())
                .ok_or(MarketError::TaskNotFound)?;
            if task.required_workers == 0 {
                return Err(MarketError::TaskExhausted);
            }

            let duplicate = state.submissions.values().any(|s| {
                s.task_id == submission.task_id && s.worker_email == submission.worker_email
            });
            if duplicate {
                return Err(MarketError::DuplicateSubmission);
            }

            let task = state
                .tasks
                .get_mut(submission.task_id.as_uuid())
                .ok_or(MarketError::TaskNotFound)?;
            task.required_workers -= 1;
            if task.required_workers == 0 {
                task.status = TaskStatus::Completed;
            }

            state
                .submissions
                .insert(submission.submission_id.into_uuid(), submission.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            submission_id: &SubmissionId,
        ) -> MarketResult<Option<Submission>> {
            let state = self.state.lock().unwrap();
            Ok(state.submissions.get(submission_id.as_uuid()).cloned())
        }

        async fn approve_crediting(
            &self,
            submission_id: &SubmissionId,
        ) -> MarketResult<Submission> {
            let mut state = self.state.lock().unwrap();

            let submission = state
                .submissions
                .get(submission_id.as_uuid())
                .cloned()
                .ok_or(MarketError::SubmissionNotFound)?;
            if submission.status != SubmissionStatus::Pending {
                return Err(MarketError::NotPending("Submission"));
            }

            // Credit first: a missing worker account leaves the
            // submission pending, like a rolled-back transaction.
            state.adjust(&submission.worker_email, submission.payable_amount)?;

            let submission = state
                .submissions
                .get_mut(submission_id.as_uuid())
                .expect("checked above");
            submission.status = SubmissionStatus::Approved;
            Ok(submission.clone())
        }

        async fn reject_restoring(
            &self,
            submission_id: &SubmissionId,
        ) -> MarketResult<Submission> {
            let mut state = self.state.lock().unwrap();

            let submission = state
                .submissions
                .get_mut(submission_id.as_uuid())
                .ok_or(MarketError::SubmissionNotFound)?;
            if submission.status != SubmissionStatus::Pending {
                return Err(MarketError::NotPending("Submission"));
            }
            submission.status = SubmissionStatus::Rejected;
            let rejected = submission.clone();

            if let Some(task) = state.tasks.get_mut(rejected.task_id.as_uuid()) {
                task.required_workers += 1;
                task.status = TaskStatus::Pending;
            }
            Ok(rejected)
        }

        async fn list_by_worker(
            &self,
            worker: &Email,
            status: Option<SubmissionStatus>,
        ) -> MarketResult<Vec<Submission>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .submissions
                .values()
                .filter(|s| s.worker_email == *worker)
                .filter(|s| status.is_none_or(|wanted| s.status == wanted))
                .cloned()
                .collect())
        }

        async fn list_pending_for_buyer(&self, buyer: &Email) -> MarketResult<Vec<Submission>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .submissions
                .values()
                .filter(|s| s.buyer_email == *buyer && s.status == SubmissionStatus::Pending)
                .cloned()
                .collect())
        }

        async fn count_by_worker(&self, worker: &Email) -> MarketResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state
                .submissions
                .values()
                .filter(|s| s.worker_email == *worker)
                .count() as i64)
        }

        async fn count_pending_by_worker(&self, worker: &Email) -> MarketResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state
                .submissions
                .values()
                .filter(|s| s.worker_email == *worker && s.status == SubmissionStatus::Pending)
                .count() as i64)
        }

        async fn total_earned_by_worker(&self, worker: &Email) -> MarketResult<i64> {
            let state = self.state.lock().unwrap();
            Ok(state
                .submissions
                .values()
                .filter(|s| s.worker_email == *worker && s.status == SubmissionStatus::Approved)
                .map(|s| s.payable_amount)
                .sum())
        }
    }

    impl WithdrawalRepository for MemMarketRepository {
        async fn create(&self, withdrawal: &Withdrawal) -> MarketResult<()> {
            let mut state = self.state.lock().unwrap();
            state
                .withdrawals
                .insert(withdrawal.withdrawal_id.into_uuid(), withdrawal.clone());
            Ok(())
        }

        async fn approve_debiting(
            &self,
            withdrawal_id: &WithdrawalId,
        ) -> MarketResult<Withdrawal> {
            let mut state = self.state.lock().unwrap();

            let withdrawal = state
                .withdrawals
                .get(withdrawal_id.as_uuid())
                .cloned()
                .ok_or(MarketError::WithdrawalNotFound)?;
            if withdrawal.status != WithdrawalStatus::Pending {
                return Err(MarketError::NotPending("Withdrawal"));
            }

            // Re-check: a short balance leaves the request pending.
            state.adjust(&withdrawal.worker_email, -withdrawal.coin_amount)?;

            let withdrawal = state
                .withdrawals
                .get_mut(withdrawal_id.as_uuid())
                .expect("checked above");
            withdrawal.status = WithdrawalStatus::Approved;
            Ok(withdrawal.clone())
        }

        async fn list_all(&self) -> MarketResult<Vec<Withdrawal>> {
            let state = self.state.lock().unwrap();
            Ok(state.withdrawals.values().cloned().collect())
        }

        async fn list_by_worker(&self, worker: &Email) -> MarketResult<Vec<Withdrawal>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .withdrawals
                .values()
                .filter(|w| w.worker_email == *worker)
                .cloned()
                .collect())
        }
    }

    impl PaymentRepository for MemMarketRepository {
        async fn record_crediting(&self, payment: &Payment) -> MarketResult<i64> {
            let mut state = self.state.lock().unwrap();
            let balance = state.adjust(&payment.email, payment.coins)?;
            state.payments.push(payment.clone());
            Ok(balance)
        }

        async fn list_by_email(&self, email: &Email) -> MarketResult<Vec<Payment>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .payments
                .iter()
                .filter(|p| p.email == *email)
                .cloned()
                .collect())
        }

        async fn total_spent_by_email(&self, email: &Email) -> MarketResult<f64> {
            let state = self.state.lock().unwrap();
            Ok(state
                .payments
                .iter()
                .filter(|p| p.email == *email)
                .map(|p| p.price)
                .sum())
        }

        async fn total_volume(&self) -> MarketResult<f64> {
            let state = self.state.lock().unwrap();
            Ok(state.payments.iter().map(|p| p.price).sum())
        }
    }

    impl NotificationRepository for MemMarketRepository {
        async fn append(&self, notification: &Notification) -> MarketResult<()> {
            let mut state = self.state.lock().unwrap();
            state.notifications.push(notification.clone());
            Ok(())
        }

        async fn list_for_recipient(&self, recipient: &Email) -> MarketResult<Vec<Notification>> {
            let state = self.state.lock().unwrap();
            Ok(state
                .notifications
                .iter()
                .rev()
                .filter(|n| n.recipient == *recipient)
                .cloned()
                .collect())
        }
    }
}

#[cfg(test)]
mod workflow_tests {
    use platform::client::CallerClaims;
    use platform::mailer::TracingMailer;
    use std::sync::Arc;
    use uuid::Uuid;

    use super::memory::MemMarketRepository;
    use crate::application::account_queries::ListBestAccountsUseCase;
    use crate::application::approve_withdrawal::ApproveWithdrawalUseCase;
    use crate::application::config::MarketConfig;
    use crate::application::create_task::{CreateTaskInput, CreateTaskUseCase};
    use crate::application::delete_task::DeleteTaskUseCase;
    use crate::application::moderate_accounts::{DeleteUserUseCase, SetUserRoleUseCase};
    use crate::application::notification_queries::ListNotificationsUseCase;
    use crate::application::notify::Notifier;
    use crate::application::payments::{RecordPaymentInput, RecordPaymentUseCase};
    use crate::application::register_account::{RegisterAccountInput, RegisterAccountUseCase};
    use crate::application::request_withdrawal::{
        RequestWithdrawalInput, RequestWithdrawalUseCase,
    };
    use crate::application::review_submission::{
        ApproveSubmissionUseCase, RejectSubmissionUseCase,
    };
    use crate::application::stats::{AdminStatsUseCase, BuyerStatsUseCase, WorkerStatsUseCase};
    use crate::application::submission_queries::{
        ListReviewQueueUseCase, ListWorkerSubmissionsUseCase,
    };
    use crate::application::submit_work::{SubmitWorkInput, SubmitWorkUseCase};
    use crate::application::update_task::{UpdateTaskInput, UpdateTaskUseCase};
    use crate::domain::entity::submission::SubmissionStatus;
    use crate::domain::entity::task::{Task, TaskStatus};
    use crate::domain::entity::withdrawal::WithdrawalStatus;
    use crate::domain::repository::{
        AccountRepository, LedgerRepository, TaskRepository, WithdrawalRepository,
    };
    use crate::domain::value_object::email::Email;
    use crate::error::MarketError;

    fn repo() -> Arc<MemMarketRepository> {
        Arc::new(MemMarketRepository::default())
    }

    fn config() -> Arc<MarketConfig> {
        Arc::new(MarketConfig::default())
    }

    fn notifier(repo: &Arc<MemMarketRepository>) -> Arc<Notifier<MemMarketRepository, TracingMailer>> {
        Arc::new(Notifier::new(repo.clone(), Arc::new(TracingMailer)))
    }

    fn claims(email: &str, role: &str) -> CallerClaims {
        CallerClaims::new(email.to_string(), Some(role.to_string()), None)
    }

    async fn register(repo: &Arc<MemMarketRepository>, name: &str, email: &str, role: &str) {
        RegisterAccountUseCase::new(repo.clone())
            .execute(RegisterAccountInput {
                name: name.to_string(),
                email: email.to_string(),
                role: role.to_string(),
                photo_url: None,
            })
            .await
            .expect("registration should succeed");
    }

    /// Seed an admin directly; registration only accepts worker/buyer.
    async fn seed_admin(repo: &Arc<MemMarketRepository>, email: &str) {
        use crate::domain::entity::account::Account;
        use crate::domain::value_object::user_role::UserRole;
        AccountRepository::create(
            repo.as_ref(),
            &Account::new(
                "Admin".to_string(),
                Email::new(email).unwrap(),
                UserRole::Admin,
                None,
            ),
        )
        .await
        .expect("admin seed should succeed");
    }

    async fn balance_of(repo: &Arc<MemMarketRepository>, email: &str) -> i64 {
        LedgerRepository::balance(repo.as_ref(), &Email::new(email).unwrap())
            .await
            .expect("balance lookup should succeed")
    }

    async fn task_state(repo: &Arc<MemMarketRepository>, task: &Task) -> Option<Task> {
        TaskRepository::find_by_id(repo.as_ref(), &task.task_id)
            .await
            .expect("task lookup should succeed")
    }

    async fn create_task(
        repo: &Arc<MemMarketRepository>,
        buyer: &str,
        required_workers: i64,
        payable_amount: i64,
    ) -> Task {
        CreateTaskUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims(buyer, "buyer"),
                CreateTaskInput {
                    title: "Watch my video".to_string(),
                    detail: "Watch and like".to_string(),
                    submission_info: "Screenshot of the like".to_string(),
                    required_workers,
                    payable_amount,
                },
            )
            .await
            .expect("task creation should succeed")
    }

    async fn submit(
        repo: &Arc<MemMarketRepository>,
        worker: &str,
        task_id: Uuid,
    ) -> Result<crate::domain::entity::submission::Submission, MarketError> {
        SubmitWorkUseCase::new(
            repo.clone(),
            repo.clone(),
            repo.clone(),
            notifier(repo),
            config(),
        )
        .execute(
            &claims(worker, "worker"),
            SubmitWorkInput {
                task_id,
                details: "done, see screenshot".to_string(),
            },
        )
        .await
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_register_starting_balances() {
        let repo = repo();
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        register(&repo, "Bob", "bob@example.com", "buyer").await;

        assert_eq!(balance_of(&repo, "wanda@example.com").await, 10);
        assert_eq!(balance_of(&repo, "bob@example.com").await, 50);
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let repo = repo();
        register(&repo, "Wanda", "wanda@example.com", "worker").await;

        let result = RegisterAccountUseCase::new(repo.clone())
            .execute(RegisterAccountInput {
                name: "Wanda Again".to_string(),
                // Different spelling, same canonical address
                email: "  WANDA@Example.Com ".to_string(),
                role: "buyer".to_string(),
                photo_url: None,
            })
            .await;

        assert!(matches!(result, Err(MarketError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_register_rejects_admin_role() {
        let repo = repo();
        let result = RegisterAccountUseCase::new(repo.clone())
            .execute(RegisterAccountInput {
                name: "Eve".to_string(),
                email: "eve@example.com".to_string(),
                role: "admin".to_string(),
                photo_url: None,
            })
            .await;

        assert!(matches!(result, Err(MarketError::Validation(_))));
    }

    #[tokio::test]
    async fn test_email_canonicalized_at_registration() {
        let repo = repo();
        register(&repo, "Wanda", "  Wanda@Example.COM  ", "worker").await;

        let found = repo
            .find_by_email(&Email::new("wanda@example.com").unwrap())
            .await
            .unwrap();
        assert!(found.is_some());
    }

    // ------------------------------------------------------------------
    // Task creation (reserve debit)
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_task_debits_exact_reserve() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;

        let task = create_task(&repo, "bob@example.com", 2, 10).await;

        assert_eq!(balance_of(&repo, "bob@example.com").await, 30);
        assert_eq!(task.required_workers, 2);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_task_insufficient_funds_is_all_or_nothing() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;

        let result = CreateTaskUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims("bob@example.com", "buyer"),
                CreateTaskInput {
                    title: "Big job".to_string(),
                    detail: "Too rich for this wallet".to_string(),
                    submission_info: String::new(),
                    required_workers: 10,
                    payable_amount: 10,
                },
            )
            .await;

        assert!(matches!(result, Err(MarketError::InsufficientFunds)));
        // No partial debit, no orphan task
        assert_eq!(balance_of(&repo, "bob@example.com").await, 50);
        let tasks = repo
            .list_by_buyer(&Email::new("bob@example.com").unwrap())
            .await
            .unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_create_task_validates_amounts() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;

        for (workers, amount) in [(0, 10), (-1, 10), (2, 0), (2, -5)] {
            let result = CreateTaskUseCase::new(repo.clone(), repo.clone())
                .execute(
                    &claims("bob@example.com", "buyer"),
                    CreateTaskInput {
                        title: "t".to_string(),
                        detail: "d".to_string(),
                        submission_info: String::new(),
                        required_workers: workers,
                        payable_amount: amount,
                    },
                )
                .await;
            assert!(matches!(result, Err(MarketError::Validation(_))));
        }
        assert_eq!(balance_of(&repo, "bob@example.com").await, 50);
    }

    #[tokio::test]
    async fn test_create_task_requires_buyer_role() {
        let repo = repo();
        register(&repo, "Wanda", "wanda@example.com", "worker").await;

        let result = CreateTaskUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims("wanda@example.com", "worker"),
                CreateTaskInput {
                    title: "t".to_string(),
                    detail: "d".to_string(),
                    submission_info: String::new(),
                    required_workers: 1,
                    payable_amount: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(MarketError::Forbidden(_))));
    }

    // ------------------------------------------------------------------
    // Submissions (slot consumption, duplicates, review)
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_submit_consumes_slot_and_notifies_buyer() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        let task = create_task(&repo, "bob@example.com", 2, 10).await;

        let submission = submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();

        assert_eq!(submission.status, SubmissionStatus::Pending);
        assert_eq!(submission.payable_amount, 10);
        let task = task_state(&repo, &task).await.unwrap();
        assert_eq!(task.required_workers, 1);

        let notifications = ListNotificationsUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("bob@example.com", "buyer"))
            .await
            .unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].message.contains("Wanda"));
    }

    #[tokio::test]
    async fn test_duplicate_submission_leaves_slots_unchanged() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        let task = create_task(&repo, "bob@example.com", 2, 10).await;

        submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();
        let second = submit(&repo, "wanda@example.com", task.task_id.into_uuid()).await;

        assert!(matches!(second, Err(MarketError::DuplicateSubmission)));
        let task = task_state(&repo, &task).await.unwrap();
        assert_eq!(task.required_workers, 1);
    }

    #[tokio::test]
    async fn test_submit_exhausted_task() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        register(&repo, "Willy", "willy@example.com", "worker").await;
        let task = create_task(&repo, "bob@example.com", 1, 10).await;

        submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();
        let late = submit(&repo, "willy@example.com", task.task_id.into_uuid()).await;

        assert!(matches!(late, Err(MarketError::TaskExhausted)));
    }

    #[tokio::test]
    async fn test_last_slot_completes_task_and_hides_it() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        let task = create_task(&repo, "bob@example.com", 1, 10).await;

        submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();

        let task = task_state(&repo, &task).await.unwrap();
        assert_eq!(task.required_workers, 0);
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(repo.list_open().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_approve_pays_exactly_once() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        let task = create_task(&repo, "bob@example.com", 2, 10).await;
        let submission = submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();

        let use_case = ApproveSubmissionUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        );
        let approved = use_case
            .execute(
                &claims("bob@example.com", "buyer"),
                submission.submission_id.into_uuid(),
            )
            .await
            .unwrap();

        assert_eq!(approved.status, SubmissionStatus::Approved);
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 20);

        // A retry is a no-op after the first approval
        let again = use_case
            .execute(
                &claims("bob@example.com", "buyer"),
                submission.submission_id.into_uuid(),
            )
            .await;
        assert!(matches!(again, Err(MarketError::NotPending(_))));
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 20);
    }

    #[tokio::test]
    async fn test_reject_restores_slot_without_coin_movement() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        let task = create_task(&repo, "bob@example.com", 1, 10).await;
        let submission = submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();

        let use_case = RejectSubmissionUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        );
        let rejected = use_case
            .execute(
                &claims("bob@example.com", "buyer"),
                submission.submission_id.into_uuid(),
            )
            .await
            .unwrap();

        assert_eq!(rejected.status, SubmissionStatus::Rejected);
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 10);

        // Slot restored, task reopened
        let task = task_state(&repo, &task).await.unwrap();
        assert_eq!(task.required_workers, 1);
        assert_eq!(task.status, TaskStatus::Pending);

        let again = use_case
            .execute(
                &claims("bob@example.com", "buyer"),
                submission.submission_id.into_uuid(),
            )
            .await;
        assert!(matches!(again, Err(MarketError::NotPending(_))));
        let task = task_state(&repo, &task).await.unwrap();
        assert_eq!(task.required_workers, 1);
    }

    #[tokio::test]
    async fn test_review_requires_owning_buyer() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Mallory", "mallory@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        let task = create_task(&repo, "bob@example.com", 1, 10).await;
        let submission = submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();

        let result = ApproveSubmissionUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        )
        .execute(
            &claims("mallory@example.com", "buyer"),
            submission.submission_id.into_uuid(),
        )
        .await;

        assert!(matches!(result, Err(MarketError::Forbidden(_))));
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 10);
    }

    // ------------------------------------------------------------------
    // Task update / delete
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_update_task_content_only_and_ownership() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Mallory", "mallory@example.com", "buyer").await;
        let task = create_task(&repo, "bob@example.com", 2, 10).await;

        let use_case = UpdateTaskUseCase::new(repo.clone(), repo.clone());
        use_case
            .execute(
                &claims("bob@example.com", "buyer"),
                UpdateTaskInput {
                    task_id: task.task_id.into_uuid(),
                    title: "New title".to_string(),
                    detail: "New detail".to_string(),
                    submission_info: "New proof".to_string(),
                },
            )
            .await
            .unwrap();

        let updated = task_state(&repo, &task).await.unwrap();
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.required_workers, 2);
        assert_eq!(updated.payable_amount, 10);

        let foreign = use_case
            .execute(
                &claims("mallory@example.com", "buyer"),
                UpdateTaskInput {
                    task_id: task.task_id.into_uuid(),
                    title: "Hijacked".to_string(),
                    detail: "d".to_string(),
                    submission_info: "s".to_string(),
                },
            )
            .await;
        assert!(matches!(foreign, Err(MarketError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_delete_task_refunds_unconsumed_slots() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        let task = create_task(&repo, "bob@example.com", 3, 5).await;
        assert_eq!(balance_of(&repo, "bob@example.com").await, 35);

        DeleteTaskUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("bob@example.com", "buyer"), task.task_id.into_uuid())
            .await
            .unwrap();

        // 3 slots x 5 coins back
        assert_eq!(balance_of(&repo, "bob@example.com").await, 50);
        assert!(task_state(&repo, &task).await.is_none());

        let again = DeleteTaskUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("bob@example.com", "buyer"), task.task_id.into_uuid())
            .await;
        assert!(matches!(again, Err(MarketError::TaskNotFound)));
    }

    #[tokio::test]
    async fn test_admin_delete_task_refunds_buyer() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        seed_admin(&repo, "admin@example.com").await;
        let task = create_task(&repo, "bob@example.com", 2, 10).await;

        DeleteTaskUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims("admin@example.com", "admin"),
                task.task_id.into_uuid(),
            )
            .await
            .unwrap();

        assert_eq!(balance_of(&repo, "bob@example.com").await, 50);
    }

    #[tokio::test]
    async fn test_reject_after_task_deletion_skips_restore() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        let task = create_task(&repo, "bob@example.com", 2, 10).await;
        let submission = submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();

        // Deleting refunds the single remaining slot
        DeleteTaskUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("bob@example.com", "buyer"), task.task_id.into_uuid())
            .await
            .unwrap();
        assert_eq!(balance_of(&repo, "bob@example.com").await, 40);

        // The dangling submission can still be rejected; there is no
        // task left to restore a slot on
        let rejected = RejectSubmissionUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        )
        .execute(
            &claims("bob@example.com", "buyer"),
            submission.submission_id.into_uuid(),
        )
        .await
        .unwrap();
        assert_eq!(rejected.status, SubmissionStatus::Rejected);
    }

    // ------------------------------------------------------------------
    // End-to-end lifecycle
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_full_task_lifecycle() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        register(&repo, "Willy", "willy@example.com", "worker").await;

        // Buyer with 50 coins posts a 2 x 10 task
        let task = create_task(&repo, "bob@example.com", 2, 10).await;
        assert_eq!(balance_of(&repo, "bob@example.com").await, 30);

        // Two workers claim the two slots
        let first = submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();
        let second = submit(&repo, "willy@example.com", task.task_id.into_uuid())
            .await
            .unwrap();
        let state = task_state(&repo, &task).await.unwrap();
        assert_eq!(state.required_workers, 0);
        assert_eq!(state.status, TaskStatus::Completed);

        // Both sit in the buyer's review queue
        let queue = ListReviewQueueUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("bob@example.com", "buyer"))
            .await
            .unwrap();
        assert_eq!(queue.len(), 2);

        // First one is approved and paid
        ApproveSubmissionUseCase::new(repo.clone(), repo.clone(), notifier(&repo), config())
            .execute(
                &claims("bob@example.com", "buyer"),
                first.submission_id.into_uuid(),
            )
            .await
            .unwrap();
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 20);
        let worker_inbox = ListNotificationsUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("wanda@example.com", "worker"))
            .await
            .unwrap();
        assert!(worker_inbox.iter().any(|n| n.message.contains("earned 10")));

        // Second one is rejected; its slot comes back and reopens the task
        RejectSubmissionUseCase::new(repo.clone(), repo.clone(), notifier(&repo), config())
            .execute(
                &claims("bob@example.com", "buyer"),
                second.submission_id.into_uuid(),
            )
            .await
            .unwrap();
        assert_eq!(balance_of(&repo, "willy@example.com").await, 10);
        let state = task_state(&repo, &task).await.unwrap();
        assert_eq!(state.required_workers, 1);
        assert_eq!(state.status, TaskStatus::Pending);

        // Nothing left to review; each worker sees their own outcome
        let queue = ListReviewQueueUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("bob@example.com", "buyer"))
            .await
            .unwrap();
        assert!(queue.is_empty());

        let approved = ListWorkerSubmissionsUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("wanda@example.com", "worker"), Some("approved"))
            .await
            .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].status, SubmissionStatus::Approved);

        let rejected = ListWorkerSubmissionsUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("willy@example.com", "worker"), Some("rejected"))
            .await
            .unwrap();
        assert_eq!(rejected.len(), 1);
    }

    #[tokio::test]
    async fn test_public_account_queries() {
        use crate::application::account_queries::{GetAccountUseCase, GetBalanceUseCase};

        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;

        // Lookups normalize the queried address too
        let account = GetAccountUseCase::new(repo.clone())
            .execute(" BOB@Example.Com ")
            .await
            .unwrap();
        assert_eq!(account.email.as_str(), "bob@example.com");

        let coins = GetBalanceUseCase::new(repo.clone())
            .execute("bob@example.com")
            .await
            .unwrap();
        assert_eq!(coins, 50);

        let missing = GetAccountUseCase::new(repo.clone())
            .execute("ghost@example.com")
            .await;
        assert!(matches!(missing, Err(MarketError::UserNotFound)));
    }

    // ------------------------------------------------------------------
    // Withdrawals
    // ------------------------------------------------------------------

    async fn worker_with_balance(repo: &Arc<MemMarketRepository>, email: &str, coins: i64) {
        register(repo, "Wanda", email, "worker").await;
        let starting = balance_of(repo, email).await;
        LedgerRepository::adjust(repo.as_ref(), &Email::new(email).unwrap(), coins - starting)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_withdrawal_lifecycle() {
        let repo = repo();
        worker_with_balance(&repo, "wanda@example.com", 40).await;
        seed_admin(&repo, "admin@example.com").await;

        let withdrawal = RequestWithdrawalUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        )
        .execute(
            &claims("wanda@example.com", "worker"),
            RequestWithdrawalInput {
                coin_amount: 25,
                cash_amount: 1.25,
                payment_system: "bkash".to_string(),
                account_number: "017000000".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(withdrawal.status, WithdrawalStatus::Pending);
        // Request does not move coins
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 40);

        // Admin was told about the request
        let admin_inbox = ListNotificationsUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("admin@example.com", "admin"))
            .await
            .unwrap();
        assert_eq!(admin_inbox.len(), 1);

        let use_case = ApproveWithdrawalUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        );
        let approved = use_case
            .execute(
                &claims("admin@example.com", "admin"),
                withdrawal.withdrawal_id.into_uuid(),
            )
            .await
            .unwrap();
        assert_eq!(approved.status, WithdrawalStatus::Approved);
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 15);

        let again = use_case
            .execute(
                &claims("admin@example.com", "admin"),
                withdrawal.withdrawal_id.into_uuid(),
            )
            .await;
        assert!(matches!(again, Err(MarketError::NotPending(_))));
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 15);
    }

    #[tokio::test]
    async fn test_withdrawal_request_checks_balance() {
        let repo = repo();
        worker_with_balance(&repo, "wanda@example.com", 20).await;

        let result = RequestWithdrawalUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        )
        .execute(
            &claims("wanda@example.com", "worker"),
            RequestWithdrawalInput {
                coin_amount: 25,
                cash_amount: 1.25,
                payment_system: "bkash".to_string(),
                account_number: "017000000".to_string(),
            },
        )
        .await;

        assert!(matches!(result, Err(MarketError::InsufficientFunds)));
    }

    #[tokio::test]
    async fn test_withdrawal_approval_rechecks_balance() {
        let repo = repo();
        worker_with_balance(&repo, "wanda@example.com", 40).await;
        seed_admin(&repo, "admin@example.com").await;

        let withdrawal = RequestWithdrawalUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        )
        .execute(
            &claims("wanda@example.com", "worker"),
            RequestWithdrawalInput {
                coin_amount: 25,
                cash_amount: 1.25,
                payment_system: "bkash".to_string(),
                account_number: "017000000".to_string(),
            },
        )
        .await
        .unwrap();

        // Worker spends most of the balance before the admin acts
        LedgerRepository::adjust(
            repo.as_ref(),
            &Email::new("wanda@example.com").unwrap(),
            -30,
        )
        .await
        .unwrap();

        let result = ApproveWithdrawalUseCase::new(
            repo.clone(),
            repo.clone(),
            notifier(&repo),
            config(),
        )
        .execute(
            &claims("admin@example.com", "admin"),
            withdrawal.withdrawal_id.into_uuid(),
        )
        .await;

        assert!(matches!(result, Err(MarketError::InsufficientFunds)));
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 10);

        // Still pending; the admin can retry once the worker earns more
        let pending = WithdrawalRepository::list_all(repo.as_ref()).await.unwrap();
        assert_eq!(pending[0].status, WithdrawalStatus::Pending);
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_record_payment_credits_caller() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;

        let output = RecordPaymentUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims("bob@example.com", "buyer"),
                RecordPaymentInput {
                    coins: 100,
                    price: 10.0,
                    transaction_id: "pi_12345".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(output.new_balance, 150);
        assert_eq!(balance_of(&repo, "bob@example.com").await, 150);
    }

    #[tokio::test]
    async fn test_record_payment_requires_buyer() {
        let repo = repo();
        register(&repo, "Wanda", "wanda@example.com", "worker").await;

        let result = RecordPaymentUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims("wanda@example.com", "worker"),
                RecordPaymentInput {
                    coins: 100,
                    price: 10.0,
                    transaction_id: "pi_12345".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(MarketError::Forbidden(_))));
    }

    // ------------------------------------------------------------------
    // Moderation and authorization
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_unknown_caller_is_rejected() {
        let repo = repo();
        let result = CreateTaskUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims("ghost@example.com", "buyer"),
                CreateTaskInput {
                    title: "t".to_string(),
                    detail: "d".to_string(),
                    submission_info: String::new(),
                    required_workers: 1,
                    payable_amount: 1,
                },
            )
            .await;

        assert!(matches!(result, Err(MarketError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_stored_role_wins_over_stale_claim() {
        let repo = repo();
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        create_task(&repo, "bob@example.com", 1, 5).await;

        // The token still claims buyer; the stored worker role decides
        let tasks = crate::application::task_queries::ListOpenTasksUseCase::new(
            repo.clone(),
            repo.clone(),
        )
        .execute(&claims("wanda@example.com", "buyer"))
        .await
        .unwrap();

        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_user_guarded_by_open_references() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        seed_admin(&repo, "admin@example.com").await;
        let task = create_task(&repo, "bob@example.com", 2, 10).await;

        let buyer = repo
            .find_by_email(&Email::new("bob@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();

        let blocked = DeleteUserUseCase::new(repo.clone())
            .execute(
                &claims("admin@example.com", "admin"),
                buyer.user_id.into_uuid(),
            )
            .await;
        assert!(matches!(blocked, Err(MarketError::UserReferenced)));

        // Settle the open task, then the account can go
        DeleteTaskUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims("admin@example.com", "admin"),
                task.task_id.into_uuid(),
            )
            .await
            .unwrap();
        DeleteUserUseCase::new(repo.clone())
            .execute(
                &claims("admin@example.com", "admin"),
                buyer.user_id.into_uuid(),
            )
            .await
            .unwrap();

        assert!(
            repo.find_by_email(&Email::new("bob@example.com").unwrap())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_set_role_requires_admin() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;

        let wanda = repo
            .find_by_email(&Email::new("wanda@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();

        let result = SetUserRoleUseCase::new(repo.clone())
            .execute(
                &claims("bob@example.com", "buyer"),
                wanda.user_id.into_uuid(),
                "buyer",
            )
            .await;

        assert!(matches!(result, Err(MarketError::Forbidden(_))));
    }

    // ------------------------------------------------------------------
    // Ledger floor
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_ledger_never_goes_negative() {
        let repo = repo();
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        let email = Email::new("wanda@example.com").unwrap();

        let result = LedgerRepository::adjust(repo.as_ref(), &email, -11).await;
        assert!(matches!(result, Err(MarketError::InsufficientFunds)));
        assert_eq!(balance_of(&repo, "wanda@example.com").await, 10);

        let drained = LedgerRepository::adjust(repo.as_ref(), &email, -10).await.unwrap();
        assert_eq!(drained, 0);

        let missing = Email::new("ghost@example.com").unwrap();
        let result = LedgerRepository::adjust(repo.as_ref(), &missing, 5).await;
        assert!(matches!(result, Err(MarketError::UserNotFound)));
    }

    // ------------------------------------------------------------------
    // Stats and leaderboard
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_dashboard_stats() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;
        seed_admin(&repo, "admin@example.com").await;

        let task = create_task(&repo, "bob@example.com", 2, 10).await;
        let submission = submit(&repo, "wanda@example.com", task.task_id.into_uuid())
            .await
            .unwrap();
        ApproveSubmissionUseCase::new(repo.clone(), repo.clone(), notifier(&repo), config())
            .execute(
                &claims("bob@example.com", "buyer"),
                submission.submission_id.into_uuid(),
            )
            .await
            .unwrap();
        RecordPaymentUseCase::new(repo.clone(), repo.clone())
            .execute(
                &claims("bob@example.com", "buyer"),
                RecordPaymentInput {
                    coins: 100,
                    price: 10.0,
                    transaction_id: "pi_1".to_string(),
                },
            )
            .await
            .unwrap();

        let buyer_stats = BuyerStatsUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(&claims("bob@example.com", "buyer"))
            .await
            .unwrap();
        assert_eq!(buyer_stats.total_tasks, 1);
        assert_eq!(buyer_stats.pending_slots, 1);
        assert_eq!(buyer_stats.total_payments, 10.0);

        let worker_stats = WorkerStatsUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("wanda@example.com", "worker"))
            .await
            .unwrap();
        assert_eq!(worker_stats.total_submissions, 1);
        assert_eq!(worker_stats.pending_submissions, 0);
        assert_eq!(worker_stats.total_earnings, 10);

        let admin_stats = AdminStatsUseCase::new(repo.clone(), repo.clone())
            .execute(&claims("admin@example.com", "admin"))
            .await
            .unwrap();
        assert_eq!(admin_stats.total_workers, 1);
        assert_eq!(admin_stats.total_buyers, 1);
        // buyer 30 + 100 purchased, worker 10 + 10 earned
        assert_eq!(admin_stats.total_coins, 150);
        assert_eq!(admin_stats.total_payments, 10.0);
    }

    #[tokio::test]
    async fn test_best_users_leaderboard() {
        let repo = repo();
        register(&repo, "Bob", "bob@example.com", "buyer").await;
        register(&repo, "Wanda", "wanda@example.com", "worker").await;

        let best = ListBestAccountsUseCase::new(repo.clone(), config())
            .execute(None, Some(1))
            .await
            .unwrap();
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].email.as_str(), "bob@example.com");

        let workers = ListBestAccountsUseCase::new(repo.clone(), config())
            .execute(Some("worker"), None)
            .await
            .unwrap();
        assert_eq!(workers.len(), 1);
        assert_eq!(workers[0].email.as_str(), "wanda@example.com");

        let bad_role = ListBestAccountsUseCase::new(repo.clone(), config())
            .execute(Some("moderator"), None)
            .await;
        assert!(matches!(bad_role, Err(MarketError::Validation(_))));
    }
}

#[cfg(test)]
mod dto_tests {
    use crate::presentation::dto::*;

    #[test]
    fn test_create_task_request_deserialization() {
        let json = r#"{
            "title": "Watch my video",
            "detail": "Watch and like",
            "submissionInfo": "Screenshot",
            "requiredWorkers": 2,
            "payableAmount": 10
        }"#;
        let request: CreateTaskRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.title, "Watch my video");
        assert_eq!(request.submission_info, "Screenshot");
        assert_eq!(request.required_workers, 2);
        assert_eq!(request.payable_amount, 10);
    }

    #[test]
    fn test_register_request_photo_optional() {
        let json = r#"{"name":"Wanda","email":"wanda@example.com","role":"worker"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.role, "worker");
        assert!(request.photo_url.is_none());
    }

    #[test]
    fn test_withdrawal_request_field_names() {
        let json = r#"{
            "withdrawalCoin": 25,
            "withdrawalAmount": 1.25,
            "paymentSystem": "bkash",
            "accountNumber": "017000000"
        }"#;
        let request: RequestWithdrawalRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.withdrawal_coin, 25);
        assert_eq!(request.payment_system, "bkash");
    }

    #[test]
    fn test_task_response_serializes_camel_case() {
        use crate::domain::entity::task::Task;
        use crate::domain::value_object::email::Email;

        let task = Task::new(
            Email::new("buyer@example.com").unwrap(),
            "Buyer".into(),
            "Title".into(),
            "Detail".into(),
            "Proof".into(),
            2,
            10,
        );
        let json = serde_json::to_string(&TaskResponse::from(task)).unwrap();

        assert!(json.contains("taskId"));
        assert!(json.contains("buyerEmail"));
        assert!(json.contains("requiredWorkers"));
        assert!(json.contains("payableAmount"));
        assert!(json.contains(r#""status":"pending""#));
    }

    #[test]
    fn test_balance_response_serialization() {
        let json = serde_json::to_string(&BalanceResponse { coins: 42 }).unwrap();
        assert_eq!(json, r#"{"coins":42}"#);
    }
}

#[cfg(test)]
mod error_tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::error::MarketError;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(MarketError, StatusCode)> = vec![
            (MarketError::UserNotFound, StatusCode::NOT_FOUND),
            (MarketError::TaskNotFound, StatusCode::NOT_FOUND),
            (MarketError::SubmissionNotFound, StatusCode::NOT_FOUND),
            (MarketError::WithdrawalNotFound, StatusCode::NOT_FOUND),
            (MarketError::EmailTaken, StatusCode::CONFLICT),
            (MarketError::UserReferenced, StatusCode::CONFLICT),
            (
                MarketError::Forbidden("buyer role required"),
                StatusCode::FORBIDDEN,
            ),
            (
                MarketError::InsufficientFunds,
                StatusCode::PAYMENT_REQUIRED,
            ),
            (MarketError::DuplicateSubmission, StatusCode::CONFLICT),
            (MarketError::TaskExhausted, StatusCode::CONFLICT),
            (
                MarketError::NotPending("Submission"),
                StatusCode::CONFLICT,
            ),
            (
                MarketError::Validation("bad input".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                MarketError::MissingHeader("x-auth-email".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                MarketError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_error_display() {
        assert!(
            MarketError::InsufficientFunds
                .to_string()
                .contains("Insufficient")
        );
        assert!(
            MarketError::NotPending("Withdrawal")
                .to_string()
                .contains("Withdrawal")
        );
        assert!(
            MarketError::TaskExhausted
                .to_string()
                .contains("no longer available")
        );
    }
}
