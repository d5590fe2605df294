//! Workflow failures and the uniform response envelope they are reported in.

use checkup_structs::ValidationErrors;
use serde::{Deserialize, Serialize};

const CHECK_UP_FAILED: &str = "Some error occurred while check up mental health";
const HISTORY_FAILED: &str = "Some error occurred while fetching user check ups!";
const EMAIL_CHECK_FAILED: &str = "Some error occurred while checking user!";

/// An error whose message may be shown to the end user.
pub trait UserFacing {
    fn user_message(&self) -> String;
}

/// Failure of the check-up workflow.
#[derive(Debug, thiserror::Error)]
pub enum CheckUpError {
    #[error("User Id is required!")]
    MissingUser,

    #[error("User not authorized for check up!")]
    UnknownUser,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("prediction service failed: {0:#}")]
    ExternalService(#[source] anyhow::Error),

    #[error("check up storage failed: {0:#}")]
    Persistence(#[source] anyhow::Error),
}

impl UserFacing for CheckUpError {
    fn user_message(&self) -> String {
        match self {
            Self::MissingUser | Self::UnknownUser => self.to_string(),
            Self::Validation(errors) => errors.message().to_owned(),
            Self::ExternalService(_) | Self::Persistence(_) => CHECK_UP_FAILED.to_owned(),
        }
    }
}

/// Failure of the history workflow.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("User Id is required!")]
    MissingUser,

    #[error("User not found!")]
    UnknownUser,

    #[error("check up history lookup failed: {0:#}")]
    Persistence(#[source] anyhow::Error),
}

impl UserFacing for HistoryError {
    fn user_message(&self) -> String {
        match self {
            Self::MissingUser | Self::UnknownUser => self.to_string(),
            Self::Persistence(_) => HISTORY_FAILED.to_owned(),
        }
    }
}

/// Failure of the email presence check.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Email is required to check whether it is registered!")]
    EmailRequired,

    #[error("No account found. Provide valid registered email!")]
    NoAccount,

    #[error("Email is already verified for this user!")]
    AlreadyVerified,

    #[error("user lookup failed: {0:#}")]
    Persistence(#[source] anyhow::Error),
}

impl UserFacing for AccountError {
    fn user_message(&self) -> String {
        match self {
            Self::Persistence(_) => EMAIL_CHECK_FAILED.to_owned(),
            _ => self.to_string(),
        }
    }
}

/// `{ success, message, data }` envelope returned by every action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ActionResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Wraps a workflow result, hiding infrastructure details from the user.
    pub fn from_result<E: UserFacing>(result: Result<T, E>, success_message: &str) -> Self {
        match result {
            Ok(data) => Self::ok(success_message, data),
            Err(err) => Self::failure(err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use checkup_structs::FieldIssue;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_infrastructure_details_are_hidden() {
        let err = CheckUpError::ExternalService(anyhow!("connection refused to 10.0.0.3"));
        assert_eq!(err.user_message(), CHECK_UP_FAILED);
        assert!(err.to_string().contains("connection refused"));

        let err = HistoryError::Persistence(anyhow!("pool timed out"));
        assert_eq!(err.user_message(), HISTORY_FAILED);
    }

    #[test]
    fn test_validation_message_is_first_issue() {
        let err = CheckUpError::from(ValidationErrors::new(vec![FieldIssue {
            field: "age".into(),
            message: "Age must be at least 10".into(),
        }]));
        assert_eq!(err.user_message(), "Age must be at least 10");
    }

    #[test]
    fn test_envelope_shape() {
        let failure: ActionResponse<()> =
            ActionResponse::from_result(Err(CheckUpError::MissingUser), "unused");
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({ "success": false, "message": "User Id is required!" })
        );

        let success = ActionResponse::<u8>::from_result(Ok::<_, AccountError>(7), "done");
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({ "success": true, "message": "done", "data": 7 })
        );
    }
}
