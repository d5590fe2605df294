//! Storage seam used by the workflows, and its `PostgreSQL` implementation.

use anyhow::{Context, Result};
use checkup_structs::{AuthSession, CheckUpHistory, CheckUpRecord, CreateCheckUp, User};

/// Everything the workflows read from or append to storage.
pub trait CheckUpStore: Send + Sync {
    /// Finds a user by ID, additionally requiring `email` to match when given.
    fn find_user(
        &self,
        id: &str,
        email: Option<&str>,
    ) -> impl Future<Output = Result<Option<User>>> + Send;

    fn find_user_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>> + Send;

    /// Resolves an unexpired session token.
    fn find_session(&self, token: &str) -> impl Future<Output = Result<Option<AuthSession>>> + Send;

    fn create_check_up(
        &self,
        input: CreateCheckUp,
    ) -> impl Future<Output = Result<CheckUpRecord>> + Send;

    /// Lists a user's check-ups, newest first, with a count taken from the
    /// same snapshot.
    fn check_up_history(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<CheckUpHistory>> + Send;
}

/// Store backed by the global database pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgStore;

impl CheckUpStore for PgStore {
    async fn find_user(&self, id: &str, email: Option<&str>) -> Result<Option<User>> {
        let user = match email {
            Some(email) => database::find_user_by_id_and_email(id, email).await,
            None => database::find_user_by_id(id).await,
        };
        user.with_context(|| format!("Failed to look up user {id}"))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        database::find_user_by_email(email)
            .await
            .context("Failed to look up user by email")
    }

    async fn find_session(&self, token: &str) -> Result<Option<AuthSession>> {
        database::find_session_by_token(token)
            .await
            .context("Failed to look up session")
    }

    async fn create_check_up(&self, input: CreateCheckUp) -> Result<CheckUpRecord> {
        database::insert_check_up(&input)
            .await
            .context("Failed to insert check up")
    }

    async fn check_up_history(&self, user_id: &str) -> Result<CheckUpHistory> {
        database::find_check_up_history(user_id)
            .await
            .context("Failed to read check up history")
    }
}
