//! HTTP surface: guarded pages and JSON actions.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use checkup_structs::AnswerMap;
use predictor_client::Predictor;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::cache::DashboardCache;
use crate::error::{AccountError, ActionResponse, CheckUpError, HistoryError, UserFacing};
use crate::session::{current_session, require_auth, require_unauth};
use crate::store::CheckUpStore;
use crate::workflow::{
    CHECK_UP_SUCCESS_MESSAGE, CheckUpService, EMAIL_VALID_MESSAGE, HISTORY_SUCCESS_MESSAGE,
};

const SIGN_IN_REQUIRED: &str = "Sign in to continue!";

/// Shared state of the HTTP server.
pub struct AppState<S, P> {
    pub service: CheckUpService<S, P, DashboardCache>,
    pub cache: Arc<DashboardCache>,
}

impl<S, P> AppState<S, P> {
    /// Wires the workflows to a fresh dashboard cache.
    pub fn new(store: Arc<S>, predictor: Arc<P>, schema: checkup_structs::SchemaVariant) -> Self {
        let cache = Arc::new(DashboardCache::new());
        Self {
            service: CheckUpService::new(store, predictor, Arc::clone(&cache), schema),
            cache,
        }
    }
}

/// HTTP status for a workflow failure.
trait ErrorStatus {
    fn status(&self) -> StatusCode;
}

impl ErrorStatus for CheckUpError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingUser | Self::UnknownUser => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ExternalService(_) => StatusCode::BAD_GATEWAY,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorStatus for HistoryError {
    fn status(&self) -> StatusCode {
        match self {
            Self::MissingUser | Self::UnknownUser => StatusCode::UNAUTHORIZED,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ErrorStatus for AccountError {
    fn status(&self) -> StatusCode {
        match self {
            Self::EmailRequired => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NoAccount => StatusCode::NOT_FOUND,
            Self::AlreadyVerified => StatusCode::CONFLICT,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn respond<T, E>(result: Result<T, E>, success_message: &str) -> Response
where
    T: Serialize,
    E: UserFacing + ErrorStatus,
{
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(err) => err.status(),
    };
    (status, Json(ActionResponse::from_result(result, success_message))).into_response()
}

fn reject(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ActionResponse::<()>::failure(message))).into_response()
}

/// Builds the application router.
pub fn router<S, P>(state: Arc<AppState<S, P>>) -> Router
where
    S: CheckUpStore + 'static,
    P: Predictor + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/sign-in", get(sign_in::<S, P>))
        .route("/sign-up", get(sign_up::<S, P>))
        .route("/dashboard", get(dashboard::<S, P>))
        .route("/check-up", get(check_up_form::<S, P>))
        .route("/api/check-up", post(submit_check_up::<S, P>))
        .route("/api/check-ups", get(check_ups::<S, P>))
        .route("/api/check-email", post(check_email::<S, P>))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn unauth_page<S: CheckUpStore, P>(
    state: &AppState<S, P>,
    headers: &HeaderMap,
    page: &str,
) -> Response {
    let session = current_session(state.service.store().as_ref(), headers).await;
    match require_unauth(session.as_ref()) {
        Ok(()) => Json(json!({ "page": page })).into_response(),
        Err(redirect) => redirect.into_response(),
    }
}

async fn sign_in<S: CheckUpStore, P>(
    State(state): State<Arc<AppState<S, P>>>,
    headers: HeaderMap,
) -> Response {
    unauth_page(&state, &headers, "sign-in").await
}

async fn sign_up<S: CheckUpStore, P>(
    State(state): State<Arc<AppState<S, P>>>,
    headers: HeaderMap,
) -> Response {
    unauth_page(&state, &headers, "sign-up").await
}

async fn dashboard<S: CheckUpStore, P>(
    State(state): State<Arc<AppState<S, P>>>,
    headers: HeaderMap,
) -> Response {
    let session = current_session(state.service.store().as_ref(), &headers).await;
    let session = match require_auth(session) {
        Ok(session) => session,
        Err(redirect) => return redirect.into_response(),
    };

    match state.cache.load(&state.service, &session).await {
        Ok(view) => Json(view).into_response(),
        Err(err) => reject(err.status(), err.user_message()),
    }
}

async fn check_up_form<S: CheckUpStore, P>(
    State(state): State<Arc<AppState<S, P>>>,
    headers: HeaderMap,
) -> Response {
    let session = current_session(state.service.store().as_ref(), &headers).await;
    match require_auth(session) {
        Ok(_) => Json(state.service.schema().form()).into_response(),
        Err(redirect) => redirect.into_response(),
    }
}

async fn submit_check_up<S: CheckUpStore, P: Predictor>(
    State(state): State<Arc<AppState<S, P>>>,
    headers: HeaderMap,
    payload: Result<Json<AnswerMap>, JsonRejection>,
) -> Response {
    let Some(session) = current_session(state.service.store().as_ref(), &headers).await else {
        return reject(StatusCode::UNAUTHORIZED, SIGN_IN_REQUIRED);
    };
    let Json(answers) = match payload {
        Ok(answers) => answers,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected check up body");
            return reject(rejection.status(), rejection.body_text());
        }
    };

    let result = state
        .service
        .submit_check_up(&answers, Some(&session.user.id), Some(&session.user.email))
        .await;
    respond(result, CHECK_UP_SUCCESS_MESSAGE)
}

async fn check_ups<S: CheckUpStore, P>(
    State(state): State<Arc<AppState<S, P>>>,
    headers: HeaderMap,
) -> Response {
    let Some(session) = current_session(state.service.store().as_ref(), &headers).await else {
        return reject(StatusCode::UNAUTHORIZED, SIGN_IN_REQUIRED);
    };

    let result = state
        .service
        .check_up_history(Some(&session.user.id), Some(&session.user.email))
        .await;
    respond(result, HISTORY_SUCCESS_MESSAGE)
}

#[derive(Debug, Deserialize)]
struct CheckEmailRequest {
    #[serde(default)]
    email: Option<String>,
}

async fn check_email<S: CheckUpStore, P>(
    State(state): State<Arc<AppState<S, P>>>,
    payload: Result<Json<CheckEmailRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(request) => request,
        Err(rejection) => return reject(rejection.status(), rejection.body_text()),
    };

    let result = state.service.check_email_present(request.email.as_deref()).await;
    respond(result.map(|()| json!({})), EMAIL_VALID_MESSAGE)
}

/// Serves the router until Ctrl+C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(router: Router, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
