//! Repository functions for check-up records.

use checkup_structs::{CheckUpHistory, CheckUpRecord, CreateCheckUp};
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::get_pool;

/// Creates a new check-up record.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn insert_check_up(input: &CreateCheckUp) -> Result<CheckUpRecord, sqlx::Error> {
    let id = Uuid::new_v4();
    let pool = get_pool()?;

    sqlx::query_as::<_, CheckUpRecord>(
        r"
        INSERT INTO check_ups (id, user_id, schema, answers, condition, treatment)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, schema, answers, condition, treatment, created_at
        ",
    )
    .bind(id)
    .bind(&input.user_id)
    .bind(input.schema)
    .bind(&input.answers)
    .bind(&input.condition)
    .bind(&input.treatment)
    .fetch_one(pool)
    .await
}

/// Lists all check-ups of a user, newest first.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn list_check_ups_by_user<'e, E>(
    executor: E,
    user_id: &str,
) -> Result<Vec<CheckUpRecord>, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, CheckUpRecord>(
        r"
        SELECT id, user_id, schema, answers, condition, treatment, created_at
        FROM check_ups
        WHERE user_id = $1
        ORDER BY created_at DESC
        ",
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
}

/// Counts the check-ups of a user.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn count_check_ups_by_user<'e, E>(executor: E, user_id: &str) -> Result<i64, sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>(
        r"
        SELECT COUNT(*) FROM check_ups WHERE user_id = $1
        ",
    )
    .bind(user_id)
    .fetch_one(executor)
    .await
}

/// Lists and counts a user's check-ups from one snapshot, so the count always
/// matches the listed records.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn find_check_up_history(user_id: &str) -> Result<CheckUpHistory, sqlx::Error> {
    let pool = get_pool()?;
    let mut tx = pool.begin().await?;

    sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
        .execute(&mut *tx)
        .await?;
    let check_ups = list_check_ups_by_user(&mut *tx, user_id).await?;
    let count = count_check_ups_by_user(&mut *tx, user_id).await?;

    tx.commit().await?;
    Ok(CheckUpHistory { count, check_ups })
}
