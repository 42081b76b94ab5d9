//! Account entity for registered users.

use chrono::{DateTime, Utc};

/// A registered user account.
///
/// The registry only ever consumes the `id` (as a link's `owner_id`); email
/// and password hash belong to the account service.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
}
