use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account owned by the auth provider. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

/// A live session resolved from its token, together with its user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthSession {
    #[sqlx(flatten)]
    pub user: User,
    pub expires_at: DateTime<Utc>,
}
