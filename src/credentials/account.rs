use chrono::{DateTime, Utc};

/// A stored credential record.
///
/// Only `password_digest` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
}
