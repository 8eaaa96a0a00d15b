//! Access repository: the allow-list and balance ledger.
//!
//! The bot only reads (`is_allowed`); the admin commands allow, revoke and set balances.
//! External: SQLite via sqlx.

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::error::StorageError;
use crate::models::{AllowOutcome, BalanceOutcome, RevokeOutcome, UserSummary};
use crate::repository::AllowListStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct AccessRepository {
    pool_manager: SqlitePoolManager,
}

impl AccessRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating access tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS allowed_users (
                user_id INTEGER PRIMARY KEY
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS user_balances (
                user_id INTEGER PRIMARY KEY,
                balance REAL NOT NULL DEFAULT 0,
                images_generated INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        info!("Access tables created successfully");
        Ok(())
    }

    /// Adds `user_id` to the allow-list.
    #[instrument(skip(self))]
    pub async fn allow_user(&self, user_id: i64) -> Result<AllowOutcome, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("INSERT OR IGNORE INTO allowed_users (user_id) VALUES (?)")
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            info!(user_id, "User already allowed");
            Ok(AllowOutcome::AlreadyAllowed)
        } else {
            info!(user_id, "User allowed");
            Ok(AllowOutcome::Allowed)
        }
    }

    /// Removes `user_id` from the allow-list. The balance row, if any, is kept.
    #[instrument(skip(self))]
    pub async fn disable_user(&self, user_id: i64) -> Result<RevokeOutcome, StorageError> {
        let pool = self.pool_manager.pool();

        let result = sqlx::query("DELETE FROM allowed_users WHERE user_id = ?")
            .bind(user_id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            info!(user_id, "User is not currently allowed");
            Ok(RevokeOutcome::NotAllowed)
        } else {
            info!(user_id, "User access revoked");
            Ok(RevokeOutcome::Revoked)
        }
    }

    /// Sets the balance of an allow-listed user, creating the ledger row with zero images on first use.
    #[instrument(skip(self))]
    pub async fn set_balance(
        &self,
        user_id: i64,
        balance: f64,
    ) -> Result<BalanceOutcome, StorageError> {
        if !self.is_allowed(user_id).await? {
            info!(user_id, "Balance not set: user is not currently allowed");
            return Ok(BalanceOutcome::NotAllowed);
        }

        let pool = self.pool_manager.pool();
        sqlx::query(
            r#"
            INSERT INTO user_balances (user_id, balance, images_generated)
            VALUES (?, ?, 0)
            ON CONFLICT (user_id)
            DO UPDATE SET balance = excluded.balance
            "#,
        )
        .bind(user_id)
        .bind(balance)
        .execute(pool)
        .await?;

        info!(user_id, balance, "User balance set");
        Ok(BalanceOutcome::Updated)
    }

    /// Allow-listed users with their balance and generated image count, ordered by id.
    pub async fn list_users(&self) -> Result<Vec<UserSummary>, StorageError> {
        let pool = self.pool_manager.pool();

        let users = sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT au.user_id AS user_id, ub.balance AS balance, ub.images_generated AS images_generated
            FROM allowed_users au
            LEFT JOIN user_balances ub ON au.user_id = ub.user_id
            ORDER BY au.user_id
            "#,
        )
        .fetch_all(pool)
        .await?;

        info!("Retrieved {} allowed users", users.len());
        Ok(users)
    }

    /// Balance row of a single user, allow-listed or not.
    pub async fn get_summary(&self, user_id: i64) -> Result<Option<UserSummary>, StorageError> {
        let pool = self.pool_manager.pool();

        let summary = sqlx::query_as::<_, UserSummary>(
            "SELECT user_id, balance, images_generated FROM user_balances WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(summary)
    }
}

#[async_trait]
impl AllowListStore for AccessRepository {
    async fn is_allowed(&self, user_id: i64) -> Result<bool, StorageError> {
        let pool = self.pool_manager.pool();

        let row: Option<(i64,)> =
            sqlx::query_as("SELECT user_id FROM allowed_users WHERE user_id = ?")
                .bind(user_id)
                .fetch_optional(pool)
                .await?;

        Ok(row.is_some())
    }
}
