use checkup_structs::Prediction;

use crate::api::client::PredictorClient;
use crate::api::models::PredictionRequest;

/// Anything that can turn a prediction request into a prediction.
pub trait Predictor: Send + Sync {
    /// Requests a prediction for one submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, answers with a
    /// non-success status, or returns a body that cannot be read.
    fn predict(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = anyhow::Result<Prediction>> + Send;
}

impl Predictor for PredictorClient {
    async fn predict(&self, request: &PredictionRequest) -> anyhow::Result<Prediction> {
        self.request_prediction(request).await
    }
}
