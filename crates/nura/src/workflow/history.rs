use checkup_structs::CheckUpHistory;
use tracing::{debug, error, warn};

use super::{CheckUpService, present};
use crate::error::HistoryError;
use crate::store::CheckUpStore;

pub const HISTORY_SUCCESS_MESSAGE: &str = "Check Ups fetched successfully!";

impl<S: CheckUpStore, P, V> CheckUpService<S, P, V> {
    /// Returns every check-up of the user, newest first, with the total count.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError`] if the user is missing or unknown, or the
    /// store cannot be read.
    pub async fn check_up_history(
        &self,
        user_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<CheckUpHistory, HistoryError> {
        let Some(user_id) = present(user_id) else {
            return Err(HistoryError::MissingUser);
        };

        let persistence = |err: anyhow::Error| {
            error!(%user_id, error = %format!("{err:#}"), "Failed to read check up history");
            HistoryError::Persistence(err)
        };

        if self
            .store
            .find_user(user_id, present(email))
            .await
            .map_err(persistence)?
            .is_none()
        {
            warn!(%user_id, "History requested for unknown user");
            return Err(HistoryError::UnknownUser);
        }

        let history = self.store.check_up_history(user_id).await.map_err(persistence)?;

        debug!(%user_id, count = history.count, "Fetched check up history");
        Ok(history)
    }
}
