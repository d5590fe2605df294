//! Session lookup and page guards.

use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::response::{IntoResponse, Redirect, Response};
use checkup_structs::AuthSession;
use tracing::error;

use crate::store::CheckUpStore;

/// Cookie set by the auth provider.
pub const SESSION_COOKIE: &str = "nura.session_token";

/// Reads the session token from the cookie, then from a bearer header.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let from_cookie = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
    })
}

/// Resolves the caller's session. Lookup failures count as signed out.
pub async fn current_session<S: CheckUpStore>(store: &S, headers: &HeaderMap) -> Option<AuthSession> {
    let token = session_token(headers)?;
    match store.find_session(token).await {
        Ok(session) => session,
        Err(err) => {
            error!(error = %format!("{err:#}"), "Failed to resolve session");
            None
        }
    }
}

/// Where a guard sends a caller that may not see the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRedirect {
    SignIn,
    VerifyEmail,
    Dashboard,
}

impl GuardRedirect {
    pub const fn path(self) -> &'static str {
        match self {
            Self::SignIn => "/sign-in",
            Self::VerifyEmail => "/verify-email",
            Self::Dashboard => "/dashboard",
        }
    }
}

impl IntoResponse for GuardRedirect {
    fn into_response(self) -> Response {
        Redirect::to(self.path()).into_response()
    }
}

/// Admits signed-in users whose email is verified.
pub fn require_auth(session: Option<AuthSession>) -> Result<AuthSession, GuardRedirect> {
    match session {
        None => Err(GuardRedirect::SignIn),
        Some(session) if !session.user.email_verified => Err(GuardRedirect::VerifyEmail),
        Some(session) => Ok(session),
    }
}

/// Admits only signed-out callers.
pub fn require_unauth(session: Option<&AuthSession>) -> Result<(), GuardRedirect> {
    match session {
        Some(_) => Err(GuardRedirect::Dashboard),
        None => Ok(()),
    }
}
