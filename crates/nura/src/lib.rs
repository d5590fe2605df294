//! Nura mental-health check-ups.
//!
//! Validates questionnaire answers, obtains a prediction from the external
//! model service, records the outcome and serves the history over HTTP.

pub mod cache;
pub mod commands;
pub mod error;
pub mod form;
pub mod server;
pub mod session;
pub mod store;
pub mod workflow;

#[cfg(test)]
mod testing;

pub use cache::{DashboardCache, DashboardView, ViewInvalidator};
pub use error::{AccountError, ActionResponse, CheckUpError, HistoryError, UserFacing};
pub use form::{CheckUpAction, CheckUpForm, FormState, Navigation, REDIRECT_DELAY};
pub use store::{CheckUpStore, PgStore};
pub use workflow::CheckUpService;
