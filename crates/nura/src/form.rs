//! Client-side state machine of the check-up form.
//!
//! The form validates locally, calls a [`CheckUpAction`], and after a
//! successful submission redirects back to the dashboard once
//! [`REDIRECT_DELAY`] has passed. The redirect timer belongs to the form and
//! is aborted when the form is dropped.

use core::time::Duration;
use std::sync::{Arc, Mutex, PoisonError};

use checkup_structs::{AnswerMap, Prediction, SchemaVariant, ValidationErrors};
use predictor_client::Predictor;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::ViewInvalidator;
use crate::error::ActionResponse;
use crate::store::CheckUpStore;
use crate::workflow::{CHECK_UP_SUCCESS_MESSAGE, CheckUpService};

/// Time a result stays on screen before returning to the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(5);

/// Server action invoked by the form.
pub trait CheckUpAction: Send + Sync {
    fn submit(
        &self,
        answers: &AnswerMap,
        user_id: &str,
        email: Option<&str>,
    ) -> impl Future<Output = ActionResponse<Prediction>> + Send;
}

impl<S, P, V> CheckUpAction for CheckUpService<S, P, V>
where
    S: CheckUpStore,
    P: Predictor,
    V: ViewInvalidator,
{
    async fn submit(
        &self,
        answers: &AnswerMap,
        user_id: &str,
        email: Option<&str>,
    ) -> ActionResponse<Prediction> {
        let result = self.submit_check_up(answers, Some(user_id), email).await;
        ActionResponse::from_result(result, CHECK_UP_SUCCESS_MESSAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Submitting,
    Succeeded(Prediction),
    Failed(String),
}

/// Navigation requested by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Dashboard { refresh: bool },
}

pub struct CheckUpForm<A> {
    action: A,
    schema: SchemaVariant,
    user_id: String,
    email: Option<String>,
    state: Arc<Mutex<FormState>>,
    navigation: mpsc::UnboundedSender<Navigation>,
    redirect_delay: Duration,
    redirect: Option<JoinHandle<()>>,
}

impl<A: CheckUpAction> CheckUpForm<A> {
    /// Creates an idle form and the receiver of its navigation events.
    pub fn new(
        action: A,
        schema: SchemaVariant,
        user_id: impl Into<String>,
        email: Option<String>,
    ) -> (Self, mpsc::UnboundedReceiver<Navigation>) {
        let (navigation, events) = mpsc::unbounded_channel();
        let form = Self {
            action,
            schema,
            user_id: user_id.into(),
            email,
            state: Arc::new(Mutex::new(FormState::Idle)),
            navigation,
            redirect_delay: REDIRECT_DELAY,
            redirect: None,
        };
        (form, events)
    }

    #[must_use]
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn state(&self) -> FormState {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_state(&self, state: FormState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Submits the answers and returns the state the form settled in.
    ///
    /// # Errors
    ///
    /// Returns the field errors when the answers fail local validation. The
    /// form keeps its current state and the action is not called.
    pub async fn submit(&mut self, answers: &AnswerMap) -> Result<FormState, ValidationErrors> {
        self.schema.validate(answers)?;

        self.cancel_redirect();
        self.set_state(FormState::Submitting);

        let response = self
            .action
            .submit(answers, &self.user_id, self.email.as_deref())
            .await;

        let state = match response {
            ActionResponse {
                success: true,
                data: Some(prediction),
                ..
            } => {
                info!(condition = %prediction.condition, "Check up succeeded");
                FormState::Succeeded(prediction)
            }
            ActionResponse { message, .. } => FormState::Failed(message),
        };
        self.set_state(state.clone());
        if matches!(state, FormState::Succeeded(_)) {
            self.schedule_redirect();
        }
        Ok(state)
    }

    fn schedule_redirect(&mut self) {
        let state = Arc::clone(&self.state);
        let navigation = self.navigation.clone();
        let delay = self.redirect_delay;

        self.redirect = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            *state.lock().unwrap_or_else(PoisonError::into_inner) = FormState::Idle;
            // Receiver may be gone.
            let _ = navigation.send(Navigation::Dashboard { refresh: true });
        }));
    }

    fn cancel_redirect(&mut self) {
        if let Some(handle) = self.redirect.take() {
            debug!("Cancelling pending redirect");
            handle.abort();
        }
    }
}

impl<A> Drop for CheckUpForm<A> {
    fn drop(&mut self) {
        if let Some(handle) = self.redirect.take() {
            handle.abort();
        }
    }
}
