use tracing::{error, info};

use super::{CheckUpService, present};
use crate::error::AccountError;
use crate::store::CheckUpStore;

pub const EMAIL_VALID_MESSAGE: &str = "User is Valid!";

impl<S: CheckUpStore, P, V> CheckUpService<S, P, V> {
    /// Checks that `email` belongs to an account still awaiting verification.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError`] if the email is blank, unknown or already
    /// verified, or the lookup fails.
    pub async fn check_email_present(&self, email: Option<&str>) -> Result<(), AccountError> {
        let Some(email) = present(email) else {
            return Err(AccountError::EmailRequired);
        };

        let user = self.store.find_user_by_email(email).await.map_err(|err| {
            error!(error = %format!("{err:#}"), "Failed to look up user by email");
            AccountError::Persistence(err)
        })?;

        match user {
            None => Err(AccountError::NoAccount),
            Some(user) if user.email_verified => Err(AccountError::AlreadyVerified),
            Some(user) => {
                info!(user_id = %user.id, "Email awaiting verification");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;
    use crate::testing::{FakePredictor, MemoryStore, service};

    #[tokio::test]
    async fn test_email_outcomes() {
        let store = MemoryStore::with_user("u1", "verified@example.com", true);
        store.add_user("u2", "pending@example.com", false);
        let (svc, ..) = service(store, FakePredictor::returning("No", "No"));

        assert!(svc.check_email_present(Some("pending@example.com")).await.is_ok());
        assert!(matches!(
            svc.check_email_present(Some("verified@example.com")).await,
            Err(AccountError::AlreadyVerified)
        ));
        assert!(matches!(
            svc.check_email_present(Some("nobody@example.com")).await,
            Err(AccountError::NoAccount)
        ));
        assert!(matches!(
            svc.check_email_present(Some("")).await,
            Err(AccountError::EmailRequired)
        ));
    }

    #[tokio::test]
    async fn test_lookup_failure() {
        let store = MemoryStore::with_user("u1", "a@example.com", false);
        store.fail_reads(anyhow!("timeout"));
        let (svc, ..) = service(store, FakePredictor::returning("No", "No"));

        assert!(matches!(
            svc.check_email_present(Some("a@example.com")).await,
            Err(AccountError::Persistence(_))
        ));
    }
}
