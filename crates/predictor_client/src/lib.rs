//! Client for the external prediction service.
//!
//! Sends validated questionnaire answers to `POST {SERVER_URL}/predict` and
//! reads back the predicted condition and treatment recommendation.

pub mod api;
mod predictor;

pub use api::client::PredictorClient;
pub use api::models::{LifestylePayload, PredictionRequest, PredictionResponse, WorkplacePayload};
pub use predictor::Predictor;
