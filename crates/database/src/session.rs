//! Session lookups. Sessions are issued by the auth provider.

use checkup_structs::AuthSession;

use crate::get_pool;

/// Resolves a session token to its user, ignoring expired sessions.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn find_session_by_token(token: &str) -> Result<Option<AuthSession>, sqlx::Error> {
    let pool = get_pool()?;
    sqlx::query_as::<_, AuthSession>(
        r"
        SELECT u.id, u.name, u.email, u.email_verified, u.created_at, s.expires_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.token = $1 AND s.expires_at > NOW()
        ",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}
