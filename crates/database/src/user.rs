//! Repository functions for user lookups.

use checkup_structs::User;

use crate::get_pool;

/// Finds a user by ID.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn find_user_by_id(id: &str) -> Result<Option<User>, sqlx::Error> {
    let pool = get_pool()?;
    sqlx::query_as::<_, User>(
        r"
        SELECT id, name, email, email_verified, created_at
        FROM users
        WHERE id = $1
        ",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Finds a user whose ID and email both match.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn find_user_by_id_and_email(id: &str, email: &str) -> Result<Option<User>, sqlx::Error> {
    let pool = get_pool()?;
    sqlx::query_as::<_, User>(
        r"
        SELECT id, name, email, email_verified, created_at
        FROM users
        WHERE id = $1 AND email = $2
        ",
    )
    .bind(id)
    .bind(email)
    .fetch_optional(pool)
    .await
}

/// Finds a user by email.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn find_user_by_email(email: &str) -> Result<Option<User>, sqlx::Error> {
    let pool = get_pool()?;
    sqlx::query_as::<_, User>(
        r"
        SELECT id, name, email, email_verified, created_at
        FROM users
        WHERE email = $1
        ",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}
