//! PostgreSQL Repository Implementations
//!
//! Every compound mutation (debit + insert, status flip + credit,
//! delete + refund) runs inside one transaction built from guarded
//! single-statement updates, so concurrent callers cannot race a stale
//! balance or slot count past its floor.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use kernel::id::{NotificationId, PaymentId, SubmissionId, TaskId, UserId, WithdrawalId};

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

/// PostgreSQL-backed marketplace repository
#[derive(Clone)]
pub struct PgMarketRepository {
    pool: PgPool,
}

impl PgMarketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Apply a signed coin delta inside an open transaction
///
/// A debit that would drive the balance negative matches no row and
/// fails the caller's whole transaction.
async fn adjust_balance(
    tx: &mut Transaction<'_, Postgres>,
    email: &Email,
    delta: i64,
) -> MarketResult<i64> {
    let new_balance = sqlx::query_scalar::<_, i64>(
        r#"
        UPDATE users
        SET coins = coins + $2
        WHERE email = $1 AND coins + $2 >= 0
        RETURNING coins
        "#,
    )
    .bind(email.as_str())
    .bind(delta)
    .fetch_optional(tx.as_mut())
    .await?;

    match new_balance {
        Some(balance) => Ok(balance),
        None => {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                    .bind(email.as_str())
                    .fetch_one(tx.as_mut())
                    .await?;

            if exists {
                Err(MarketError::InsufficientFunds)
            } else {
                Err(MarketError::UserNotFound)
            }
        }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

// ============================================================================
// Ledger Repository Implementation
// ============================================================================

impl LedgerRepository for PgMarketRepository {
    async fn adjust(&self, email: &Email, delta: i64) -> MarketResult<i64> {
        let mut tx = self.pool.begin().await?;
        let balance = adjust_balance(&mut tx, email, delta).await?;
        tx.commit().await?;

        tracing::info!(email = %email, delta, balance, "Balance adjusted");

        Ok(balance)
    }

    async fn balance(&self, email: &Email) -> MarketResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT coins FROM users WHERE email = $1")
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(MarketError::UserNotFound)
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for PgMarketRepository {
    async fn create(&self, account: &Account) -> MarketResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                name,
                email,
                user_role,
                coins,
                photo_url,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.user_id.as_uuid())
        .bind(&account.name)
        .bind(account.email.as_str())
        .bind(account.role.id())
        .bind(account.coins)
        .bind(&account.photo_url)
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(MarketError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &Email) -> MarketResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT user_id, name, email, user_role, coins, photo_url, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn exists_by_email(&self, email: &Email) -> MarketResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn list_all(&self) -> MarketResult<Vec<Account>> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT user_id, name, email, user_role, coins, photo_url, created_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AccountRow::into_account).collect())
    }

    async fn list_best(&self, role: Option<UserRole>, limit: i64) -> MarketResult<Vec<Account>> {
        let rows = match role {
            Some(role) => {
                sqlx::query_as::<_, AccountRow>(
                    r#"
                    SELECT user_id, name, email, user_role, coins, photo_url, created_at
                    FROM users
                    WHERE user_role = $1
                    ORDER BY coins DESC
                    LIMIT $2
                    "#,
                )
                .bind(role.id())
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AccountRow>(
                    r#"
                    SELECT user_id, name, email, user_role, coins, photo_url, created_at
                    FROM users
                    ORDER BY coins DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(AccountRow::into_account).collect())
    }

    async fn set_role(&self, user_id: &UserId, role: UserRole) -> MarketResult<()> {
        let updated = sqlx::query("UPDATE users SET user_role = $2 WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .bind(role.id())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(MarketError::UserNotFound);
        }
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> MarketResult<()> {
        let mut tx = self.pool.begin().await?;

        let email = sqlx::query_scalar::<_, String>("SELECT email FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_optional(tx.as_mut())
            .await?
            .ok_or(MarketError::UserNotFound)?;

        // Open tasks hold reserved coins and pending submissions hold a
        // claim on a slot; both must be settled before the row can go.
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM tasks WHERE buyer_email = $1 AND required_workers > 0)
                OR EXISTS(SELECT 1 FROM submissions WHERE worker_email = $1 AND submission_status = 'pending')
            "#,
        )
        .bind(&email)
        .fetch_one(tx.as_mut())
        .await?;

        if referenced {
            return Err(MarketError::UserReferenced);
        }

        sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(tx.as_mut())
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn find_admin(&self) -> MarketResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT user_id, name, email, user_role, coins, photo_url, created_at
            FROM users
            WHERE user_role = $1
            LIMIT 1
            "#,
        )
        .bind(UserRole::Admin.id())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AccountRow::into_account))
    }

    async fn count_by_role(&self, role: UserRole) -> MarketResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE user_role = $1")
                .bind(role.id())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn total_coins(&self) -> MarketResult<i64> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(coins), 0) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}

// ============================================================================
// Task Repository Implementation
// ============================================================================

impl TaskRepository for PgMarketRepository {
    async fn create_reserving(&self, task: &Task) -> MarketResult<()> {
        let mut tx = self.pool.begin().await?;

        adjust_balance(&mut tx, &task.buyer_email, -task.reserve()).await?;

        sqlx::query(
            r#"
            INSERT INTO tasks (
                task_id,
                buyer_email,
                buyer_name,
                title,
                detail,
                submission_info,
                required_workers,
                payable_amount,
                task_status,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(task.buyer_email.as_str())
        .bind(&task.buyer_name)
        .bind(&task.title)
        .bind(&task.detail)
        .bind(&task.submission_info)
        .bind(task.required_workers)
        .bind(task.payable_amount)
        .bind(task.status.code())
        .bind(task.created_at)
        .execute(tx.as_mut())
        .await?;

        tx.commit().await?;

        tracing::info!(
            task_id = %task.task_id,
            buyer = %task.buyer_email,
            reserve = task.reserve(),
            "Task inserted, reserve debited"
        );

        Ok(())
    }

    async fn find_by_id(&self, task_id: &TaskId) -> MarketResult<Option<Task>> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, buyer_email, buyer_name, title, detail, submission_info,
                   required_workers, payable_amount, task_status, created_at
            FROM tasks
            WHERE task_id = $1
            "#,
        )
        .bind(task_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TaskRow::into_task))
    }

    async fn update_content(
        &self,
        task_id: &TaskId,
        title: &str,
        detail: &str,
        submission_info: &str,
    ) -> MarketResult<()> {
        let updated = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, detail = $3, submission_info = $4
            WHERE task_id = $1
            "#,
        )
        .bind(task_id.as_uuid())
        .bind(title)
        .bind(detail)
        .bind(submission_info)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(MarketError::TaskNotFound);
        }
        Ok(())
    }

    async fn delete_refunding(&self, task_id: &TaskId) -> MarketResult<Task> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            DELETE FROM tasks
            WHERE task_id = $1
            RETURNING task_id, buyer_email, buyer_name, title, detail, submission_info,
                      required_workers, payable_amount, task_status, created_at
            "#,
        )
        .bind(task_id.as_uuid())
        .fetch_optional(tx.as_mut())
        .await?
        .ok_or(MarketError::TaskNotFound)?;

        let task = row.into_task();

        let refund = task.reserve();
        if refund > 0 {
            adjust_balance(&mut tx, &task.buyer_email, refund).await?;
        }

        tx.commit().await?;

        tracing::info!(
            task_id = %task.task_id,
            buyer = %task.buyer_email,
            refund,
            "Task deleted, unconsumed slots refunded"
        );

        Ok(task)
    }

    async fn list_open(&self) -> MarketResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, buyer_email, buyer_name, title, detail, submission_info,
                   required_workers, payable_amount, task_status, created_at
            FROM tasks
            WHERE required_workers > 0 AND task_status <> 'completed'
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    async fn list_by_buyer(&self, buyer: &Email) -> MarketResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, buyer_email, buyer_name, title, detail, submission_info,
                   required_workers, payable_amount, task_status, created_at
            FROM tasks
            WHERE buyer_email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(buyer.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    async fn list_all(&self) -> MarketResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, buyer_email, buyer_name, title, detail, submission_info,
                   required_workers, payable_amount, task_status, created_at
            FROM tasks
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TaskRow::into_task).collect())
    }

    async fn count_by_buyer(&self, buyer: &Email) -> MarketResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE buyer_email = $1")
                .bind(buyer.as_str())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn open_slots_by_buyer(&self, buyer: &Email) -> MarketResult<i64> {
        let slots = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(required_workers), 0) FROM tasks WHERE buyer_email = $1",
        )
        .bind(buyer.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(slots)
    }
}

// ============================================================================
// Submission Repository Implementation
// ============================================================================

impl SubmissionRepository for PgMarketRepository {
    async fn create_consuming_slot(&self, submission: &Submission) -> MarketResult<()> {
        let mut tx = self.pool.begin().await?;

        // Test-and-decrement; consuming the last slot completes the task.
        let consumed = sqlx::query(
            r#"
            UPDATE tasks
            SET required_workers = required_workers - 1,
                task_status = CASE
                    WHEN required_workers - 1 = 0 THEN 'completed'
                    ELSE task_status
                END
            WHERE task_id = $1 AND required_workers > 0
            "#,
        )
        .bind(submission.task_id.as_uuid())
        .execute(tx.as_mut())
        .await?
        .rows_affected();

        if consumed == 0 {
            let exists =
                sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM tasks WHERE task_id = $1)")
                    .bind(submission.task_id.as_uuid())
                    .fetch_one(tx.as_mut())
                    .await?;

            return if exists {
                Err(MarketError::TaskExhausted)
            } else {
                Err(MarketError::TaskNotFound)
            };
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO submissions (
                submission_id,
                task_id,
                worker_email,
                worker_name,
                details,
                buyer_email,
                buyer_name,
                task_title,
                payable_amount,
                submission_status,
                submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(submission.submission_id.as_uuid())
        .bind(submission.task_id.as_uuid())
        .bind(submission.worker_email.as_str())
        .bind(&submission.worker_name)
        .bind(&submission.details)
        .bind(submission.buyer_email.as_str())
        .bind(&submission.buyer_name)
        .bind(&submission.task_title)
        .bind(submission.payable_amount)
        .bind(submission.status.code())
        .bind(submission.submitted_at)
        .execute(tx.as_mut())
        .await;

        // The (task, worker) unique key aborts the transaction, which
        // also rolls the slot decrement back.
        if let Err(e) = inserted {
            return if is_unique_violation(&e) {
                Err(MarketError::DuplicateSubmission)
            } else {
                Err(e.into())
            };
        }

        tx.commit().await?;

        tracing::info!(
            submission_id = %submission.submission_id,
            task_id = %submission.task_id,
            worker = %submission.worker_email,
            "Submission inserted, slot consumed"
        );

        Ok(())
    }

    async fn find_by_id(&self, submission_id: &SubmissionId) -> MarketResult<Option<Submission>> {
        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT submission_id, task_id, worker_email, worker_name, details,
                   buyer_email, buyer_name, task_title, payable_amount,
                   submission_status, submitted_at
            FROM submissions
            WHERE submission_id = $1
            "#,
        )
        .bind(submission_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SubmissionRow::into_submission))
    }

    async fn approve_crediting(&self, submission_id: &SubmissionId) -> MarketResult<Submission> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            UPDATE submissions
            SET submission_status = 'approved'
            WHERE submission_id = $1 AND submission_status = 'pending'
            RETURNING submission_id, task_id, worker_email, worker_name, details,
                      buyer_email, buyer_name, task_title, payable_amount,
                      submission_status, submitted_at
            "#,
        )
        .bind(submission_id.as_uuid())
        .fetch_optional(tx.as_mut())
        .await?;

        let Some(row) = row else {
            return Err(not_pending_submission(tx.as_mut(), submission_id).await?);
        };

        let submission = row.into_submission();
        adjust_balance(&mut tx, &submission.worker_email, submission.payable_amount).await?;

        tx.commit().await?;

        tracing::info!(
            submission_id = %submission.submission_id,
            worker = %submission.worker_email,
            amount = submission.payable_amount,
            "Submission approved, worker credited"
        );

        Ok(submission)
    }

    async fn reject_restoring(&self, submission_id: &SubmissionId) -> MarketResult<Submission> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, SubmissionRow>(
            r#"
            UPDATE submissions
            SET submission_status = 'rejected'
            WHERE submission_id = $1 AND submission_status = 'pending'
            RETURNING submission_id, task_id, worker_email, worker_name, details,
                      buyer_email, buyer_name, task_title, payable_amount,
                      submission_status, submitted_at
            "#,
        )
        .bind(submission_id.as_uuid())
        .fetch_optional(tx.as_mut())
        .await?;

        let Some(row) = row else {
            return Err(not_pending_submission(tx.as_mut(), submission_id).await?);
        };

        let submission = row.into_submission();

        // Restore the slot and reopen the task. Matching no row means
        // the task was deleted and its reserve already refunded.
        sqlx::query(
            r#"
            UPDATE tasks
            SET required_workers = required_workers + 1,
                task_status = 'pending'
            WHERE task_id = $1
            "#,
        )
        .bind(submission.task_id.as_uuid())
        .execute(tx.as_mut())
        .await?;

        tx.commit().await?;

        tracing::info!(
            submission_id = %submission.submission_id,
            task_id = %submission.task_id,
            "Submission rejected, slot restored"
        );

        Ok(submission)
    }

    async fn list_by_worker(
        &self,
        worker: &Email,
        status: Option<SubmissionStatus>,
    ) -> MarketResult<Vec<Submission>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, SubmissionRow>(
                    r#"
                    SELECT submission_id, task_id, worker_email, worker_name, details,
                           buyer_email, buyer_name, task_title, payable_amount,
                           submission_status, submitted_at
                    FROM submissions
                    WHERE worker_email = $1 AND submission_status = $2
                    ORDER BY submitted_at DESC
                    "#,
                )
                .bind(worker.as_str())
                .bind(status.code())
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, SubmissionRow>(
                    r#"
                    SELECT submission_id, task_id, worker_email, worker_name, details,
                           buyer_email, buyer_name, task_title, payable_amount,
                           submission_status, submitted_at
                    FROM submissions
                    WHERE worker_email = $1
                    ORDER BY submitted_at DESC
                    "#,
                )
                .bind(worker.as_str())
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(SubmissionRow::into_submission).collect())
    }

    async fn list_pending_for_buyer(&self, buyer: &Email) -> MarketResult<Vec<Submission>> {
        let rows = sqlx::query_as::<_, SubmissionRow>(
            r#"
            SELECT submission_id, task_id, worker_email, worker_name, details,
                   buyer_email, buyer_name, task_title, payable_amount,
                   submission_status, submitted_at
            FROM submissions
            WHERE buyer_email = $1 AND submission_status = 'pending'
            ORDER BY submitted_at DESC
            "#,
        )
        .bind(buyer.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubmissionRow::into_submission).collect())
    }

    async fn count_by_worker(&self, worker: &Email) -> MarketResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM submissions WHERE worker_email = $1",
        )
        .bind(worker.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_pending_by_worker(&self, worker: &Email) -> MarketResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM submissions WHERE worker_email = $1 AND submission_status = 'pending'",
        )
        .bind(worker.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn total_earned_by_worker(&self, worker: &Email) -> MarketResult<i64> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COALESCE(SUM(payable_amount), 0)
            FROM submissions
            WHERE worker_email = $1 AND submission_status = 'approved'
            "#,
        )
        .bind(worker.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}

/// Distinguish a reviewed submission from a missing one
async fn not_pending_submission(
    conn: &mut sqlx::PgConnection,
    submission_id: &SubmissionId,
) -> Result<MarketError, sqlx::Error> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM submissions WHERE submission_id = $1)",
    )
    .bind(submission_id.as_uuid())
    .fetch_one(conn)
    .await?;

    Ok(if exists {
        MarketError::NotPending("Submission")
    } else {
        MarketError::SubmissionNotFound
    })
}

// ============================================================================
// Withdrawal Repository Implementation
// ============================================================================

impl WithdrawalRepository for PgMarketRepository {
    async fn create(&self, withdrawal: &Withdrawal) -> MarketResult<()> {
        sqlx::query(
            r#"
            INSERT INTO withdrawals (
                withdrawal_id,
                worker_email,
                worker_name,
                coin_amount,
                cash_amount,
                payment_system,
                account_number,
                withdrawal_status,
                requested_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(withdrawal.withdrawal_id.as_uuid())
        .bind(withdrawal.worker_email.as_str())
        .bind(&withdrawal.worker_name)
        .bind(withdrawal.coin_amount)
        .bind(withdrawal.cash_amount)
        .bind(&withdrawal.payment_system)
        .bind(&withdrawal.account_number)
        .bind(withdrawal.status.code())
        .bind(withdrawal.requested_at)
        .execute(&self.pool)
        .await?;

        tracing::info!(
            withdrawal_id = %withdrawal.withdrawal_id,
            worker = %withdrawal.worker_email,
            coins = withdrawal.coin_amount,
            "Withdrawal request inserted"
        );

        Ok(())
    }

    async fn approve_debiting(&self, withdrawal_id: &WithdrawalId) -> MarketResult<Withdrawal> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, WithdrawalRow>(
            r#"
            UPDATE withdrawals
            SET withdrawal_status = 'approved'
            WHERE withdrawal_id = $1 AND withdrawal_status = 'pending'
            RETURNING withdrawal_id, worker_email, worker_name, coin_amount, cash_amount,
                      payment_system, account_number, withdrawal_status, requested_at
            "#,
        )
        .bind(withdrawal_id.as_uuid())
        .fetch_optional(tx.as_mut())
        .await?;

        let Some(row) = row else {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM withdrawals WHERE withdrawal_id = $1)",
            )
            .bind(withdrawal_id.as_uuid())
            .fetch_one(tx.as_mut())
            .await?;

            return if exists {
                Err(MarketError::NotPending("Withdrawal"))
            } else {
                Err(MarketError::WithdrawalNotFound)
            };
        };

        let withdrawal = row.into_withdrawal();

        // Balance re-check: coins spent since the request fail the
        // debit, the transaction rolls back, the request stays pending.
        adjust_balance(&mut tx, &withdrawal.worker_email, -withdrawal.coin_amount).await?;

        tx.commit().await?;

        tracing::info!(
            withdrawal_id = %withdrawal.withdrawal_id,
            worker = %withdrawal.worker_email,
            coins = withdrawal.coin_amount,
            "Withdrawal approved, worker debited"
        );

        Ok(withdrawal)
    }

    async fn list_all(&self) -> MarketResult<Vec<Withdrawal>> {
        let rows = sqlx::query_as::<_, WithdrawalRow>(
            r#"
            SELECT withdrawal_id, worker_email, worker_name, coin_amount, cash_amount,
                   payment_system, account_number, withdrawal_status, requested_at
            FROM withdrawals
            ORDER BY requested_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WithdrawalRow::into_withdrawal).collect())
    }

    async fn list_by_worker(&self, worker: &Email) -> MarketResult<Vec<Withdrawal>> {
        let rows = sqlx::query_as::<_, WithdrawalRow>(
            r#"
            SELECT withdrawal_id, worker_email, worker_name, coin_amount, cash_amount,
                   payment_system, account_number, withdrawal_status, requested_at
            FROM withdrawals
            WHERE worker_email = $1
            ORDER BY requested_at DESC
            "#,
        )
        .bind(worker.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WithdrawalRow::into_withdrawal).collect())
    }
}

// ============================================================================
// Payment Repository Implementation
// ============================================================================

impl PaymentRepository for PgMarketRepository {
    async fn record_crediting(&self, payment: &Payment) -> MarketResult<i64> {
        let mut tx = self.pool.begin().await?;

        let balance = adjust_balance(&mut tx, &payment.email, payment.coins).await?;

        sqlx::query(
            r#"
            INSERT INTO payments (
                payment_id,
                email,
                coins,
                price,
                transaction_id,
                paid_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(payment.payment_id.as_uuid())
        .bind(payment.email.as_str())
        .bind(payment.coins)
        .bind(payment.price)
        .bind(&payment.transaction_id)
        .bind(payment.paid_at)
        .execute(tx.as_mut())
        .await?;

        tx.commit().await?;

        tracing::info!(
            payment_id = %payment.payment_id,
            buyer = %payment.email,
            coins = payment.coins,
            "Payment recorded, coins credited"
        );

        Ok(balance)
    }

    async fn list_by_email(&self, email: &Email) -> MarketResult<Vec<Payment>> {
        let rows = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT payment_id, email, coins, price, transaction_id, paid_at
            FROM payments
            WHERE email = $1
            ORDER BY paid_at DESC
            "#,
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PaymentRow::into_payment).collect())
    }

    async fn total_spent_by_email(&self, email: &Email) -> MarketResult<f64> {
        let total = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(price), 0) FROM payments WHERE email = $1",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn total_volume(&self) -> MarketResult<f64> {
        let total = sqlx::query_scalar::<_, f64>("SELECT COALESCE(SUM(price), 0) FROM payments")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }
}

// ============================================================================
// Notification Repository Implementation
// ============================================================================

impl NotificationRepository for PgMarketRepository {
    async fn append(&self, notification: &Notification) -> MarketResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                notification_id,
                recipient_email,
                message,
                action_route,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(notification.notification_id.as_uuid())
        .bind(notification.recipient.as_str())
        .bind(&notification.message)
        .bind(&notification.action_route)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_recipient(&self, recipient: &Email) -> MarketResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT notification_id, recipient_email, message, action_route, created_at
            FROM notifications
            WHERE recipient_email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(recipient.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(NotificationRow::into_notification).collect())
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    user_id: Uuid,
    name: String,
    email: String,
    user_role: i16,
    coins: i64,
    photo_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> Account {
        Account {
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: Email::from_db(self.email),
            role: UserRole::from_id(self.user_role),
            coins: self.coins,
            photo_url: self.photo_url,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    task_id: Uuid,
    buyer_email: String,
    buyer_name: String,
    title: String,
    detail: String,
    submission_info: String,
    required_workers: i64,
    payable_amount: i64,
    task_status: String,
    created_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> Task {
        Task {
            task_id: TaskId::from_uuid(self.task_id),
            buyer_email: Email::from_db(self.buyer_email),
            buyer_name: self.buyer_name,
            title: self.title,
            detail: self.detail,
            submission_info: self.submission_info,
            required_workers: self.required_workers,
            payable_amount: self.payable_amount,
            status: TaskStatus::from_code(&self.task_status),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubmissionRow {
    submission_id: Uuid,
    task_id: Uuid,
    worker_email: String,
    worker_name: String,
    details: String,
    buyer_email: String,
    buyer_name: String,
    task_title: String,
    payable_amount: i64,
    submission_status: String,
    submitted_at: DateTime<Utc>,
}

impl SubmissionRow {
    fn into_submission(self) -> Submission {
        Submission {
            submission_id: SubmissionId::from_uuid(self.submission_id),
            task_id: TaskId::from_uuid(self.task_id),
            worker_email: Email::from_db(self.worker_email),
            worker_name: self.worker_name,
            details: self.details,
            buyer_email: Email::from_db(self.buyer_email),
            buyer_name: self.buyer_name,
            task_title: self.task_title,
            payable_amount: self.payable_amount,
            status: SubmissionStatus::from_code(&self.submission_status),
            submitted_at: self.submitted_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct WithdrawalRow {
    withdrawal_id: Uuid,
    worker_email: String,
    worker_name: String,
    coin_amount: i64,
    cash_amount: f64,
    payment_system: String,
    account_number: String,
    withdrawal_status: String,
    requested_at: DateTime<Utc>,
}

impl WithdrawalRow {
    fn into_withdrawal(self) -> Withdrawal {
        Withdrawal {
            withdrawal_id: WithdrawalId::from_uuid(self.withdrawal_id),
            worker_email: Email::from_db(self.worker_email),
            worker_name: self.worker_name,
            coin_amount: self.coin_amount,
            cash_amount: self.cash_amount,
            payment_system: self.payment_system,
            account_number: self.account_number,
            status: WithdrawalStatus::from_code(&self.withdrawal_status),
            requested_at: self.requested_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PaymentRow {
    payment_id: Uuid,
    email: String,
    coins: i64,
    price: f64,
    transaction_id: String,
    paid_at: DateTime<Utc>,
}

impl PaymentRow {
    fn into_payment(self) -> Payment {
        Payment {
            payment_id: PaymentId::from_uuid(self.payment_id),
            email: Email::from_db(self.email),
            coins: self.coins,
            price: self.price,
            transaction_id: self.transaction_id,
            paid_at: self.paid_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct NotificationRow {
    notification_id: Uuid,
    recipient_email: String,
    message: String,
    action_route: String,
    created_at: DateTime<Utc>,
}

impl NotificationRow {
    fn into_notification(self) -> Notification {
        Notification {
            notification_id: NotificationId::from_uuid(self.notification_id),
            recipient: Email::from_db(self.recipient_email),
            message: self.message,
            action_route: self.action_route,
            created_at: self.created_at,
        }
    }
}
