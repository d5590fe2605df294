//! HTTP client for the prediction service.

use core::time::Duration;

use anyhow::{Context, Result};
use checkup_structs::Prediction;
use config::Config;
use reqwest::Client;
use tracing::{debug, info, warn};

use super::models::{PredictionRequest, PredictionResponse};

/// Header carrying the shared secret.
const API_KEY_HEADER: &str = "x-api-key";

/// Client for the prediction service.
///
/// One request per call. Failures are returned as-is and never retried.
pub struct PredictorClient {
    client: Client,
    predict_url: String,
    api_key: String,
}

impl PredictorClient {
    /// Creates a new client.
    ///
    /// # Arguments
    ///
    /// * `server_url` - Base URL of the service, without the `/predict` suffix
    /// * `api_key` - Shared secret sent in the `x-api-key` header
    /// * `timeout` - Upper bound for a whole request
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(server_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            predict_url: format!("{}/predict", server_url.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.server_url,
            config.api_secret_key.clone(),
            config.predictor_timeout,
        )
    }

    /// Sends one prediction request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, gets a non-success
    /// status, or the response body cannot be parsed.
    pub async fn request_prediction(&self, request: &PredictionRequest) -> Result<Prediction> {
        debug!(url = %self.predict_url, "Requesting prediction");

        let response = self
            .client
            .post(&self.predict_url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await
            .context("Failed to send request to prediction service")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Prediction service rejected request");
            anyhow::bail!("Prediction request failed with status {status}: {body}");
        }

        let data: PredictionResponse = response
            .json()
            .await
            .context("Failed to parse prediction response")?;

        info!(
            condition = %data.predicted_condition,
            treatment = %data.treatment_needed,
            "Received prediction"
        );

        Ok(data.into())
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::Router;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::post;
    use checkup_structs::{SchemaVariant, WorkplaceAnswers};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::*;

    async fn spawn(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    fn request() -> PredictionRequest {
        let answers = serde_json::to_value(WorkplaceAnswers::default()).unwrap();
        let submission = SchemaVariant::Workplace
            .validate(answers.as_object().unwrap())
            .unwrap();
        PredictionRequest::from(&submission)
    }

    async fn predict_ok(headers: HeaderMap, axum::Json(body): axum::Json<Value>) -> impl IntoResponse {
        if headers.get(API_KEY_HEADER).and_then(|v| v.to_str().ok()) != Some("secret") {
            return (StatusCode::FORBIDDEN, axum::Json(json!({ "detail": "Unauthorized access" })));
        }
        assert_eq!(body["Age"], json!("24"));
        (
            StatusCode::OK,
            axum::Json(json!({
                "predicted_condition": "Yes",
                "treatment_needed": "Needed",
            })),
        )
    }

    #[tokio::test]
    async fn test_sends_api_key_and_parses_prediction() {
        let addr = spawn(Router::new().route("/predict", post(predict_ok))).await;
        let client =
            PredictorClient::new(&format!("http://{addr}/"), "secret", Duration::from_secs(5))
                .unwrap();

        let prediction = client.request_prediction(&request()).await.unwrap();
        assert_eq!(prediction.condition, "Yes");
        assert_eq!(prediction.treatment, "Needed");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let addr = spawn(Router::new().route("/predict", post(predict_ok))).await;
        let client =
            PredictorClient::new(&format!("http://{addr}"), "wrong", Duration::from_secs(5))
                .unwrap();

        let err = client.request_prediction(&request()).await.unwrap_err();
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_timeout_is_an_error() {
        let slow = post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            axum::Json(json!({ "predicted_condition": "No", "treatment_needed": "No" }))
        });
        let addr = spawn(Router::new().route("/predict", slow)).await;
        let client =
            PredictorClient::new(&format!("http://{addr}"), "secret", Duration::from_millis(100))
                .unwrap();

        assert!(client.request_prediction(&request()).await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_body_is_an_error() {
        let addr = spawn(Router::new().route(
            "/predict",
            post(|| async { axum::Json(json!({ "unexpected": true })) }),
        ))
        .await;
        let client =
            PredictorClient::new(&format!("http://{addr}"), "secret", Duration::from_secs(5))
                .unwrap();

        let err = client.request_prediction(&request()).await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
