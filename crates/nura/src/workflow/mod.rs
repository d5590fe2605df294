//! Server-side workflows: submitting a check-up, reading history and
//! checking an email before resending verification.
//!
//! Every collaborator is held by [`CheckUpService`] so the workflows can run
//! against the database and predictor in production and against fakes in tests.

mod account;
mod check_up;
mod history;

use std::sync::Arc;

use checkup_structs::SchemaVariant;

pub use account::EMAIL_VALID_MESSAGE;
pub use check_up::CHECK_UP_SUCCESS_MESSAGE;
pub use history::HISTORY_SUCCESS_MESSAGE;

/// Collaborators shared by all workflows.
pub struct CheckUpService<S, P, V> {
    store: Arc<S>,
    predictor: Arc<P>,
    invalidator: Arc<V>,
    schema: SchemaVariant,
}

impl<S, P, V> CheckUpService<S, P, V> {
    pub const fn new(
        store: Arc<S>,
        predictor: Arc<P>,
        invalidator: Arc<V>,
        schema: SchemaVariant,
    ) -> Self {
        Self {
            store,
            predictor,
            invalidator,
            schema,
        }
    }

    /// Questionnaire this service validates against.
    pub const fn schema(&self) -> SchemaVariant {
        self.schema
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S, P, V> Clone for CheckUpService<S, P, V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            predictor: Arc::clone(&self.predictor),
            invalidator: Arc::clone(&self.invalidator),
            schema: self.schema,
        }
    }
}

/// Treats an absent or blank identifier as missing.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
