//! Serve command - runs the HTTP server against the database and predictor.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use config::Config;
use predictor_client::PredictorClient;
use tracing::info;

use crate::server::{AppState, router, serve};
use crate::store::PgStore;

/// Runs the serve command.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `bind` - Overrides the configured listen address
///
/// # Errors
///
/// Returns an error if the predictor client cannot be built or the server fails.
pub async fn run(config: &Config, bind: Option<SocketAddr>) -> Result<()> {
    let predictor = PredictorClient::from_config(config)?;
    let addr = bind.unwrap_or(config.bind_address);

    info!(
        schema = %config.checkup_schema,
        predictor = %config.server_url,
        "Starting check-up server"
    );

    let state = AppState::new(Arc::new(PgStore), Arc::new(predictor), config.checkup_schema);
    serve(router(Arc::new(state)), addr).await
}
