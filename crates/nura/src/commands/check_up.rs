//! Check-up command - submits one questionnaire from a JSON file.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use checkup_structs::AnswerMap;
use config::Config;
use predictor_client::PredictorClient;
use tracing::{info, warn};

use crate::cache::DashboardCache;
use crate::form::{CheckUpForm, FormState};
use crate::store::PgStore;
use crate::workflow::CheckUpService;

/// Runs the check-up command.
///
/// Drives the check-up form in-process, waits for its dashboard redirect and
/// prints the refreshed history.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `user_id` - User the check-up is recorded for
/// * `email` - Optional email that must belong to the same user
/// * `answers_path` - JSON object with the questionnaire answers
///
/// # Errors
///
/// Returns an error if the answers cannot be read or the check-up fails.
pub async fn run(
    config: &Config,
    user_id: &str,
    email: Option<&str>,
    answers_path: &Path,
) -> Result<()> {
    let raw = std::fs::read_to_string(answers_path)
        .with_context(|| format!("Failed to read {}", answers_path.display()))?;
    let answers: AnswerMap = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON object", answers_path.display()))?;

    let predictor = PredictorClient::from_config(config)?;
    let service = CheckUpService::new(
        Arc::new(PgStore),
        Arc::new(predictor),
        Arc::new(DashboardCache::new()),
        config.checkup_schema,
    );

    let (mut form, mut navigation) = CheckUpForm::new(
        service.clone(),
        config.checkup_schema,
        user_id,
        email.map(str::to_owned),
    );

    let prediction = match form.submit(&answers).await {
        Err(errors) => {
            for issue in errors.issues() {
                warn!(field = %issue.field, "{}", issue.message);
            }
            bail!("{errors}");
        }
        Ok(FormState::Succeeded(prediction)) => prediction,
        Ok(FormState::Failed(message)) => bail!(message),
        Ok(state) => bail!("Check up ended in unexpected state {state:?}"),
    };

    info!(
        condition = %prediction.condition,
        treatment = %prediction.treatment,
        "Check up completed successfully!"
    );

    if navigation.recv().await.is_some() {
        let history = service.check_up_history(Some(user_id), email).await?;
        info!(count = history.count, "Check up history");
        for record in &history.check_ups {
            info!(
                created_at = %record.created_at,
                condition = %record.condition,
                treatment = %record.treatment,
                "Check up"
            );
        }
    }

    Ok(())
}
