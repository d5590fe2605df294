use checkup_structs::{AnswerMap, CreateCheckUp, Prediction};
use predictor_client::{PredictionRequest, Predictor};
use tracing::{error, info, warn};

use super::{CheckUpService, present};
use crate::cache::ViewInvalidator;
use crate::error::CheckUpError;
use crate::store::CheckUpStore;

pub const CHECK_UP_SUCCESS_MESSAGE: &str = "Check up completed successfully!";

impl<S, P, V> CheckUpService<S, P, V>
where
    S: CheckUpStore,
    P: Predictor,
    V: ViewInvalidator,
{
    /// Validates a questionnaire, asks the predictor for an outcome and
    /// records it for the user.
    ///
    /// `email`, when given, must belong to the same user as `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckUpError`] for the first step that fails. Nothing is
    /// persisted and the dashboard cache is untouched unless every step
    /// succeeds.
    pub async fn submit_check_up(
        &self,
        answers: &AnswerMap,
        user_id: Option<&str>,
        email: Option<&str>,
    ) -> Result<Prediction, CheckUpError> {
        let Some(user_id) = present(user_id) else {
            warn!("Check up submitted without a user id");
            return Err(CheckUpError::MissingUser);
        };

        let submission = self.schema.validate(answers).map_err(|errors| {
            warn!(%user_id, issues = errors.issues().len(), "Check up answers rejected");
            CheckUpError::Validation(errors)
        })?;

        let user = self
            .store
            .find_user(user_id, present(email))
            .await
            .map_err(|err| {
                error!(%user_id, error = %format!("{err:#}"), "Failed to look up user");
                CheckUpError::Persistence(err)
            })?;
        if user.is_none() {
            warn!(%user_id, "Check up submitted for unknown user");
            return Err(CheckUpError::UnknownUser);
        }

        let request = PredictionRequest::from(&submission);
        let prediction = self.predictor.predict(&request).await.map_err(|err| {
            error!(%user_id, error = %format!("{err:#}"), "Prediction failed");
            CheckUpError::ExternalService(err)
        })?;

        let answers = submission
            .answers_json()
            .map_err(|err| CheckUpError::Persistence(err.into()))?;
        let record = self
            .store
            .create_check_up(CreateCheckUp {
                user_id: user_id.to_owned(),
                schema: submission.schema(),
                answers,
                condition: prediction.condition.clone(),
                treatment: prediction.treatment.clone(),
            })
            .await
            .map_err(|err| {
                error!(%user_id, error = %format!("{err:#}"), "Failed to store check up");
                CheckUpError::Persistence(err)
            })?;

        self.invalidator.invalidate_dashboard(user_id);

        info!(
            %user_id,
            check_up_id = %record.id,
            condition = %prediction.condition,
            treatment = %prediction.treatment,
            "Check up completed"
        );
        Ok(prediction)
    }
}
