//! Durable account storage.
//!
//! [`UserStore`] is the seam between the credential service and persistence.
//! [`SqliteUserStore`] backs it with a single `users` table whose UNIQUE
//! constraint on `username` is the sole authority for uniqueness.
//!
//! The columns are `id`, `username`, `password` (the hex digest) and
//! `timestamp`, so databases already written in that layout are read as-is.

use chrono::NaiveDateTime;
use sqlx::{
    Row, SqlitePool,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow},
};
use std::{future::Future, str::FromStr, time::Duration};
use tracing::{Instrument, debug, info_span};

use super::{
    account::Account,
    error::{StoreError, is_unique_violation},
};

const CREATE_USERS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
)";

const BUSY_TIMEOUT_SECONDS: u64 = 5;

/// Storage operations required by the credential service.
///
/// Implementations provide their own concurrency control: two concurrent
/// inserts of the same username must yield exactly one success and one
/// [`StoreError::DuplicateUsername`].
pub trait UserStore: Send + Sync {
    fn find_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;

    fn insert(
        &self,
        username: &str,
        password_digest: &str,
    ) -> impl Future<Output = Result<Account, StoreError>> + Send;

    fn update_password_digest(
        &self,
        username: &str,
        password_digest: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// `SQLite`-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `dsn` with WAL journaling and a busy timeout, so
    /// concurrent writers queue on the database lock instead of failing.
    ///
    /// # Errors
    /// Returns an error if the DSN is invalid or the database cannot be opened.
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(dsn)?
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(BUSY_TIMEOUT_SECONDS));

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(max_connections.max(1))
            .test_before_acquire(true)
            .connect_with(options)
            .await?;

        Ok(Self::new(pool))
    }

    /// Create the `users` table if it does not exist. Safe to call on every
    /// startup, must run before the first request is served.
    ///
    /// # Errors
    /// Returns an error if the statement fails.
    pub async fn init(&self) -> Result<(), StoreError> {
        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "CREATE",
            db.statement = CREATE_USERS_TABLE
        );
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        debug!("users table ready");

        Ok(())
    }

    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn account_from_row(row: &SqliteRow) -> Result<Account, sqlx::Error> {
    Ok(Account {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        password_digest: row.try_get("password")?,
        // CURRENT_TIMESTAMP text, always UTC
        created_at: row.try_get::<NaiveDateTime, _>("timestamp")?.and_utc(),
    })
}

impl UserStore for SqliteUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let query =
            "SELECT id, username, password, timestamp FROM users WHERE username = ?1";
        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "SELECT",
            db.statement = query
        );
        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .instrument(span)
            .await?;

        Ok(row.as_ref().map(account_from_row).transpose()?)
    }

    async fn insert(&self, username: &str, password_digest: &str) -> Result<Account, StoreError> {
        let query = "INSERT INTO users (username, password) VALUES (?1, ?2) \
                     RETURNING id, username, password, timestamp";
        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "INSERT",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(username)
            .bind(password_digest)
            .fetch_one(&self.pool)
            .instrument(span)
            .await;

        match result {
            Ok(row) => Ok(account_from_row(&row)?),
            Err(err) if is_unique_violation(&err) => {
                Err(StoreError::DuplicateUsername(username.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_password_digest(
        &self,
        username: &str,
        password_digest: &str,
    ) -> Result<(), StoreError> {
        let query = "UPDATE users SET password = ?1 WHERE username = ?2";
        let span = info_span!(
            "db.query",
            db.system = "sqlite",
            db.operation = "UPDATE",
            db.statement = query
        );
        let result = sqlx::query(query)
            .bind(password_digest)
            .bind(username)
            .execute(&self.pool)
            .instrument(span)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(username.to_string()));
        }

        Ok(())
    }
}
