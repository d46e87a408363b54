//! JWT Extractor
//!
//! Lets handlers take a [`CurrentUser`] argument directly.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// Map a validation failure to the API error, logging it
pub(crate) fn rejection(err: JwtError, uri: &http::Uri) -> AppError {
    security_log!(
        "WARN",
        "auth_failed",
        error = format!("{}", err),
        uri = format!("{:?}", uri)
    );
    match err {
        JwtError::ExpiredToken => AppError::token_expired(),
        _ => AppError::invalid_token("Invalid token"),
    }
}

/// Validate the bearer token of a request
pub(crate) fn authenticate(
    jwt_service: &JwtService,
    headers: &http::HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", uri));
            return Err(AppError::unauthorized());
        }
    };

    let claims = jwt_service
        .validate_token(token)
        .map_err(|e| rejection(e, uri))?;
    CurrentUser::try_from(claims).map_err(|e| rejection(e, uri))
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Already validated by the middleware
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(state.jwt_service(), &parts.headers, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
